use time::{OffsetDateTime, UtcOffset};
use crate::models::CalendarDate;

/// Japan Standard Time, the offset the search phrases are written in.
pub const DEFAULT_UTC_OFFSET_HOURS: i8 = 9;

/// Source of "today" for every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    Offset(UtcOffset),
    Fixed(CalendarDate),
}

impl Default for Clock {
    fn default() -> Self {
        Self::jst()
    }
}

impl Clock {
    pub fn jst() -> Self {
        Self::from_offset_hours(DEFAULT_UTC_OFFSET_HOURS)
            .unwrap_or(Self::Offset(UtcOffset::UTC))
    }

    pub fn from_offset_hours(hours: i8) -> Result<Self, time::error::ComponentRange> {
        UtcOffset::from_hms(hours, 0, 0).map(Self::Offset)
    }

    pub fn today(&self) -> CalendarDate {
        match *self {
            Self::Offset(offset) => date_at(OffsetDateTime::now_utc().to_offset(offset)),
            Self::Fixed(date) => date,
        }
    }
}

pub fn date_at(moment: OffsetDateTime) -> CalendarDate {
    CalendarDate {
        month: u8::from(moment.month()),
        day: moment.day(),
    }
}
