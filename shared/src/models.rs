use serde::{Serialize, Deserialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A month/day pair with no year attached. Built through `validation::validate_date`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}月{}日", self.month, self.day)
    }
}

#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub month: i64,
    pub day: i64,
    #[cfg_attr(feature = "backend", sqlx(rename = "dayName"))]
    pub day_name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayCandidate {
    pub name: String,
    pub mentions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayRanking {
    pub month: u8,
    pub day: u8,
    pub votes: Vec<VoteRecord>,
}

impl DayRanking {
    pub fn new(date: CalendarDate, votes: Vec<VoteRecord>) -> Self {
        Self { month: date.month, day: date.day, votes }
    }
}

/// Orders mention counts highest first, breaking ties by name so the page is stable.
pub fn rank_candidates(counts: HashMap<String, u64>) -> Vec<DayCandidate> {
    let mut ranked: Vec<_> = counts.into_iter()
        .map(|(name, mentions)| DayCandidate { name, mentions })
        .collect();

    ranked.sort_unstable_by(|a, b| match b.mentions.cmp(&a.mentions) {
        Ordering::Equal => a.name.cmp(&b.name),
        other => other,
    });
    ranked
}
