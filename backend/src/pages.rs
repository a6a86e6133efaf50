//! Server-rendered HTML pages.

use rocket::http::Status;
use shared::models::{CalendarDate, DayCandidate, VoteRecord};
use crate::styles::*;

/// Render the home page: ranked candidates for today and the vote leaderboard.
pub fn render_home(today: CalendarDate, candidates: &[DayCandidate], votes: &[VoteRecord]) -> String {
    let mut rows = String::new();
    if candidates.is_empty() {
        rows.push_str(&format!(r#"<p class="{TEXT_MUTED}">No day names found in recent posts.</p>"#));
    }
    for (rank, candidate) in candidates.iter().enumerate() {
        rows.push_str(&format!(
            r#"<li class="{FLEX_BETWEEN}"><span>{}. {}</span><span class="{TEXT_MUTED}">{} mentions</span></li>"#,
            rank + 1,
            html_escape(&candidate.name),
            candidate.mentions,
        ));
    }

    let content = format!(
        r#"<h1 class="{HEADING_LG}">What day is {today}?</h1>
<section class="{CARD}">
    <h2 class="{HEADING_MD}">Mentioned this week</h2>
    <ol class="{SPACE_Y_BASE}">{rows}</ol>
</section>
<section class="{CARD}">
    <h2 class="{HEADING_MD}">Voted by users</h2>
    {votes}
</section>
<section class="{CARD}">
    <form method="post" action="/" class="{FORM_ROW}">
        <div class="{INPUT_GROUP}">
            <label for="user_day" class="{TEXT_LABEL}">Today is the day of…</label>
            <input id="user_day" name="user_day" type="text" class="{INPUT_BASE}" autocomplete="off">
        </div>
        <button type="submit" class="{button}">Vote</button>
    </form>
</section>"#,
        votes = render_vote_table(votes),
        button = button_success(),
    );

    build_page("Today", &content)
}

/// Render the top votes for one date with a form to pick another.
pub fn render_database(date: CalendarDate, votes: &[VoteRecord]) -> String {
    let content = format!(
        r#"<h1 class="{HEADING_LG}">{date}</h1>
<section class="{CARD}">
    <h2 class="{HEADING_MD}">Top votes</h2>
    {votes}
</section>
<section class="{CARD}">
    <form method="post" action="/database" class="{FORM_ROW}">
        {fields}
        <button type="submit" class="{button}">Browse</button>
    </form>
</section>"#,
        votes = render_vote_table(votes),
        fields = date_fields(Some(date)),
        button = button_primary(),
    );

    build_page("Browse", &content)
}

pub fn render_poll() -> String {
    let content = format!(
        r#"<h1 class="{HEADING_LG}">Suggest a day</h1>
<section class="{CARD}">
    <form method="post" action="/poll" class="{FORM_ROW}">
        {fields}
        <div class="{INPUT_GROUP}">
            <label for="dayname" class="{TEXT_LABEL}">Day of</label>
            <input id="dayname" name="dayname" type="text" class="{INPUT_BASE}" autocomplete="off">
        </div>
        <button type="submit" class="{button}">Vote</button>
    </form>
</section>"#,
        fields = date_fields(None),
        button = button_success(),
    );

    build_page("Poll", &content)
}

pub fn render_invalid_input() -> String {
    let content = format!(
        r#"<div class="{alert}">Invalid input. Please check the date and day name and try again.</div>
<a href="/" class="{NAV_LINK}">Back to today</a>"#,
        alert = alert_style("warning"),
    );
    build_page("Invalid input", &content)
}

pub fn render_error(status: Status, message: &str) -> String {
    let content = format!(
        r#"<div class="{alert}"><strong>{code}</strong> {reason}</div>
<p class="{TEXT_MUTED}">{message}</p>"#,
        alert = alert_style("error"),
        code = status.code,
        reason = status.reason_lossy(),
        message = html_escape(message),
    );
    build_page("Error", &content)
}

fn render_vote_table(votes: &[VoteRecord]) -> String {
    if votes.is_empty() {
        return format!(r#"<p class="{TEXT_MUTED}">No votes yet.</p>"#);
    }

    let rows: String = votes.iter()
        .map(|vote| format!(
            r#"<li class="{CARD_SECTION} {FLEX_BETWEEN}"><span>{}</span><span>{} votes</span></li>"#,
            html_escape(&vote.day_name),
            vote.count,
        ))
        .collect();
    format!(r#"<ol class="{SPACE_Y_BASE}">{rows}</ol>"#)
}

fn date_fields(selected: Option<CalendarDate>) -> String {
    let value = |v: Option<u8>| v.map(|v| v.to_string()).unwrap_or_default();
    format!(
        r#"<div class="{INPUT_GROUP}">
            <label for="usermonth" class="{TEXT_LABEL}">Month</label>
            <input id="usermonth" name="usermonth" type="number" min="1" max="12" value="{month}" class="{INPUT_BASE}">
        </div>
        <div class="{INPUT_GROUP}">
            <label for="userday" class="{TEXT_LABEL}">Day</label>
            <input id="userday" name="userday" type="number" min="1" max="31" value="{day}" class="{INPUT_BASE}">
        </div>"#,
        month = value(selected.map(|d| d.month)),
        day = value(selected.map(|d| d.day)),
    )
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | What Day</title>
<script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="{BODY}">
<nav class="{NAV}">
    <a href="/" class="{NAV_LINK}">Today</a>
    <a href="/database" class="{NAV_LINK}">Browse</a>
    <a href="/poll" class="{NAV_LINK}">Poll</a>
</nav>
<main class="{CONTAINER}">
{content}
</main>
</body>
</html>"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
