pub mod calendar;
pub mod extract;
pub mod models;
pub mod phrases;
pub mod validation;

pub use calendar::Clock;
pub use extract::extract_day_names;
pub use models::*;
pub use validation::*;
