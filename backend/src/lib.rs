pub mod catchers;
pub mod config;
pub mod discovery;
pub mod error;
pub mod pages;
pub mod queries;
pub mod routes;
pub mod store;
pub mod styles;
pub use shared::{models::*, validation::*};

use rocket::{catchers, routes, Build, Rocket};
use routes::AppState;

/// Assembles the server around an already-connected state.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount(
            "/",
            routes![
                routes::home,
                routes::vote_today,
                routes::database,
                routes::browse,
                routes::poll_form,
                routes::poll,
                routes::day_ranking
            ],
        )
        .register(
            "/",
            catchers![
                catchers::bad_request,
                catchers::not_found,
                catchers::unprocessable,
                catchers::internal_error
            ],
        )
}

#[cfg(test)]
mod tests;
