use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tweet {
    pub id: String,
    pub text: String,
}

/// Response of `GET /tweets/search/recent`. `data` is omitted by the API when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Tweet>,
    #[serde(default)]
    pub meta: Option<SearchMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub result_count: u32,
    pub newest_id: Option<String>,
    pub oldest_id: Option<String>,
}

/// Response of `GET /tweets/counts/recent`.
#[derive(Debug, Clone, Deserialize)]
pub struct CountsResponse {
    #[serde(default)]
    pub data: Vec<CountBucket>,
    pub meta: CountsMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountBucket {
    pub start: String,
    pub end: String,
    pub tweet_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountsMeta {
    pub total_tweet_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Minute,
    Hour,
    Day,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Minute => "minute",
            Granularity::Hour => "hour",
            Granularity::Day => "day",
        }
    }
}
