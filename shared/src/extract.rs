//! Heuristic extraction of day names from free text.
//!
//! Only the first phrase match of each text is considered. The result is
//! lossy in both directions and is only meant to seed the candidate list.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;
use crate::phrases::{END_TOKENS, START_TOKEN};

static PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"日は?[#、,，\[\{\(”（）｛「【『〔［〈≪《\s]?[^\n]*(?:の日|デイ)").unwrap()
});

/// Characters allowed between the start anchor and the day name.
const DELIMITERS: &[char] = &[
    '#', '、', ',', '，', '[', '{', '(', '”', '（', '）', '｛', '「', '【', '『', '〔', '［', '〈', '≪', '《',
];

/// Characters that break the count query when embedded in it.
pub const FORBIDDEN_CHARS: &[char] = &['"', '\'', '’', '”', '＃'];

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || DELIMITERS.contains(&c)
}

fn first_end_token(text: &str) -> Option<usize> {
    END_TOKENS.iter().filter_map(|token| text.find(token)).min()
}

/// Day name embedded in a single text, if the anchors line up.
pub fn extract_day_name(text: &str) -> Option<&str> {
    let span = PHRASE_RE.find(text)?.as_str();
    let start = span.find(START_TOKEN)?;

    let mut rest = &span[start + START_TOKEN.len()..];
    if let Some(c) = rest.chars().next().filter(|&c| is_delimiter(c)) {
        rest = &rest[c.len_utf8()..];
    }

    let name = &rest[..first_end_token(rest)?];
    if name.is_empty() || name.contains(FORBIDDEN_CHARS) {
        return None;
    }
    Some(name)
}

/// Distinct day names across `texts`, in order of first appearance.
pub fn extract_day_names<I, S>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    let mut scanned = 0usize;

    for text in texts {
        scanned += 1;
        let Some(name) = extract_day_name(text.as_ref()) else { continue };
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }

    debug!(scanned, found = names.len(), "Extracted day name candidates");
    names
}
