//! The Japanese phrasings used to find and count day names.
//!
//! A post announcing a commemorative day reads like `3月14日は数学の日`
//! ("March 14th is the day of mathematics"), sometimes with a katakana
//! `デイ` suffix instead of `の日`.

use crate::models::CalendarDate;

/// "... day is"; the start anchor of a day name.
pub const START_TOKEN: &str = "日は";

/// "day of"; the two end anchors accepted after a day name.
pub const END_TOKENS: [&str; 2] = ["の日", "デイ"];

pub const MAX_SEARCH_RESULTS: u32 = 50;

pub fn date_prefix(date: CalendarDate) -> String {
    format!("{date}は")
}

/// Disjunction of the two phrase templates for `date`.
pub fn search_query(date: CalendarDate) -> String {
    let prefix = date_prefix(date);
    format!("{prefix} {} OR ({prefix} {})", END_TOKENS[0], END_TOKENS[1])
}

pub fn count_query(date: CalendarDate, day_name: &str) -> String {
    format!("{} {}", date_prefix(date), day_name)
}
