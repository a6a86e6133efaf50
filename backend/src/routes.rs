use rocket::{State, get, post, uri, FromForm, form::Form, http::Status, serde::json::Json};
use rocket::response::{content::RawHtml, Redirect};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use shared::models::{CalendarDate, DayRanking};
use shared::{parse_date, validate_date, validate_day_name, Clock, ValidationError};
use twitter_client::TwitterClient;
use crate::{
    config::Config,
    discovery,
    error::{ApiError, StartupError},
    pages,
    queries::Queries,
    store::{self, VotePool},
};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Everything a handler needs, built once at startup.
pub struct AppState {
    pub db: VotePool,
    pub twitter: TwitterClient,
    pub clock: Clock,
}

impl AppState {
    pub fn new(db: VotePool, twitter: TwitterClient, clock: Clock) -> Self {
        Self { db, twitter, clock }
    }

    pub async fn from_config(config: &Config) -> Result<Self, StartupError> {
        let clock = config.clock()?;
        let db = store::connect(&config.database_url).await?;
        let twitter = TwitterClient::with_base_url(&config.bearer_token, &config.twitter_api_url);
        Ok(Self::new(db, twitter, clock))
    }
}

#[derive(Debug, FromForm)]
pub struct TodayVoteForm {
    pub user_day: Option<String>,
}

#[derive(Debug, FromForm)]
pub struct DateForm {
    pub usermonth: Option<String>,
    pub userday: Option<String>,
}

#[derive(Debug, FromForm)]
pub struct PollForm {
    pub usermonth: Option<String>,
    pub userday: Option<String>,
    pub dayname: Option<String>,
}

fn reject(err: ValidationError) -> ApiError {
    warn!("Rejected input: {}", err);
    ApiError::from(err)
}

async fn render_date(state: &AppState, date: CalendarDate) -> Result<RawHtml<String>, ApiError> {
    let votes = Queries::top_votes(&state.db, date).await?;
    Ok(RawHtml(pages::render_database(date, &votes)))
}

#[instrument(skip(state))]
#[get("/")]
pub async fn home(state: &State<AppState>) -> Result<RawHtml<String>, ApiError> {
    let today = state.clock.today();

    let candidates = discovery::discover(&state.twitter, today).await.map_err(|e| {
        error!("Day name discovery failed: {}", e);
        ApiError::from(e)
    })?;
    let votes = Queries::top_votes(&state.db, today).await?;

    Ok(RawHtml(pages::render_home(today, &candidates, &votes)))
}

#[instrument(skip(state, form))]
#[post("/", data = "<form>")]
pub async fn vote_today(state: &State<AppState>, form: Form<TodayVoteForm>) -> Result<Redirect, ApiError> {
    let today = state.clock.today();
    let day_name = validate_day_name(form.user_day.as_deref()).map_err(reject)?;

    let record = Queries::record_vote(&state.db, today, &day_name).await?;
    info!("🗳️ Vote for {} on {} (count {})", record.day_name, today, record.count);

    Ok(Redirect::to(uri!(home)))
}

#[instrument(skip(state))]
#[get("/database?<month>&<day>")]
pub async fn database(
    state: &State<AppState>,
    month: Option<String>,
    day: Option<String>,
) -> Result<RawHtml<String>, ApiError> {
    let date = match (month.as_deref(), day.as_deref()) {
        (None, None) => state.clock.today(),
        (month, day) => parse_date(month, day).map_err(reject)?,
    };
    render_date(state, date).await
}

#[instrument(skip(state, form))]
#[post("/database", data = "<form>")]
pub async fn browse(state: &State<AppState>, form: Form<DateForm>) -> Result<RawHtml<String>, ApiError> {
    let date = parse_date(form.usermonth.as_deref(), form.userday.as_deref()).map_err(reject)?;
    render_date(state, date).await
}

#[get("/poll")]
pub fn poll_form() -> RawHtml<String> {
    RawHtml(pages::render_poll())
}

#[instrument(skip(state, form))]
#[post("/poll", data = "<form>")]
pub async fn poll(state: &State<AppState>, form: Form<PollForm>) -> Result<RawHtml<String>, ApiError> {
    let date = parse_date(form.usermonth.as_deref(), form.userday.as_deref()).map_err(reject)?;
    let day_name = validate_day_name(form.dayname.as_deref()).map_err(reject)?;

    let record = Queries::record_vote(&state.db, date, &day_name).await?;
    info!("🗳️ Vote for {} on {} (count {})", record.day_name, date, record.count);

    render_date(state, date).await
}

#[get("/api/days/<month>/<day>")]
pub async fn day_ranking(
    state: &State<AppState>,
    month: i64,
    day: i64,
) -> Result<Json<DayRanking>, (Status, Json<ErrorResponse>)> {
    let date = validate_date(month, day).map_err(|e| (
        Status::BadRequest,
        Json(ErrorResponse { error: e.to_string() })
    ))?;

    Queries::top_votes(&state.db, date)
        .await
        .map(|votes| Json(DayRanking::new(date, votes)))
        .map_err(|e| {
            error!("Failed to load ranking for {}: {}", date, e);
            (Status::InternalServerError, Json(ErrorResponse { error: "Database error".into() }))
        })
}
