use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use shared::models::{CalendarDate, DayRanking};
use shared::Clock;
use twitter_client::{TwitterClient, TwitterError};
use crate::{build_rocket, discovery, queries::Queries, routes::AppState, store};

const PI_DAY: CalendarDate = CalendarDate { month: 3, day: 14 };
const CHRISTMAS: CalendarDate = CalendarDate { month: 12, day: 25 };

// "クリスマス", percent-encoded for form bodies
const CHRISTMAS_FORM: &str = "usermonth=12&userday=25&dayname=%E3%82%AF%E3%83%AA%E3%82%B9%E3%83%9E%E3%82%B9";

async fn memory_pool() -> store::VotePool {
    store::connect("sqlite::memory:").await.expect("in-memory database")
}

async fn client_with(server: Option<&MockServer>, today: CalendarDate) -> Client {
    let base_url = server.map(|s| s.uri()).unwrap_or_else(|| "http://127.0.0.1:9".into());
    let state = AppState::new(
        memory_pool().await,
        TwitterClient::with_base_url("test-token", base_url),
        Clock::Fixed(today),
    );
    Client::tracked(build_rocket(state)).await.expect("valid rocket instance")
}

fn state(client: &Client) -> &AppState {
    client.rocket().state::<AppState>().expect("managed state")
}

async fn mount_search(server: &MockServer, texts: &[&str]) {
    let data: Vec<_> = texts.iter().enumerate()
        .map(|(i, text)| json!({ "id": i.to_string(), "text": text }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

async fn mount_count(server: &MockServer, query: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/tweets/counts/recent"))
        .and(query_param("query", query))
        .respond_with(response)
        .mount(server)
        .await;
}

fn total(count: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": [], "meta": { "total_tweet_count": count } }))
}

#[rocket::async_test]
async fn test_sequential_votes_increment() {
    let pool = memory_pool().await;

    assert_eq!(Queries::find_vote(&pool, PI_DAY, "数学").await.unwrap(), None);
    for n in 1..=5 {
        let record = Queries::record_vote(&pool, PI_DAY, "数学").await.unwrap();
        assert_eq!(record.count, n);
    }

    let record = Queries::find_vote(&pool, PI_DAY, "数学").await.unwrap().unwrap();
    assert_eq!(record.count, 5);
    assert_eq!((record.month, record.day), (3, 14));
    assert_eq!(Queries::find_vote(&pool, CHRISTMAS, "数学").await.unwrap(), None);
}

#[rocket::async_test]
async fn test_top_votes_limits_and_orders() {
    let pool = memory_pool().await;

    for (name, votes) in [("a", 1), ("b", 4), ("c", 2), ("d", 4), ("e", 3)] {
        for _ in 0..votes {
            Queries::record_vote(&pool, PI_DAY, name).await.unwrap();
        }
    }
    Queries::record_vote(&pool, CHRISTMAS, "z").await.unwrap();

    let top = Queries::top_votes(&pool, PI_DAY).await.unwrap();
    let names: Vec<_> = top.iter().map(|r| (r.day_name.as_str(), r.count)).collect();
    assert_eq!(names, vec![("b", 4), ("d", 4), ("e", 3)]);

    assert!(Queries::top_votes(&pool, CalendarDate { month: 1, day: 1 }).await.unwrap().is_empty());
}

#[rocket::async_test]
async fn test_count_failure_aborts_batch() {
    let server = MockServer::start().await;
    mount_count(&server, "3月14日は 数学", total(10)).await;
    mount_count(&server, "3月14日は 円周率", ResponseTemplate::new(503).set_body_string("over capacity")).await;

    let client = TwitterClient::with_base_url("test-token", server.uri());
    let candidates = vec!["数学".to_string(), "円周率".to_string()];
    let result = discovery::count_mentions(&client, PI_DAY, &candidates).await;

    match result {
        Err(TwitterError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "over capacity");
        }
        other => panic!("Expected the batch to fail, got {other:?}"),
    }
}

#[rocket::async_test]
async fn test_count_mentions_maps_each_candidate() {
    let server = MockServer::start().await;
    mount_count(&server, "3月14日は 数学", total(10)).await;
    mount_count(&server, "3月14日は 円周率", total(25)).await;

    let client = TwitterClient::with_base_url("test-token", server.uri());
    let candidates = vec!["数学".to_string(), "円周率".to_string()];
    let counts = discovery::count_mentions(&client, PI_DAY, &candidates).await.unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts["数学"], 10);
    assert_eq!(counts["円周率"], 25);
}

#[rocket::async_test]
async fn test_discover_ranks_extracted_candidates() {
    let server = MockServer::start().await;
    mount_search(&server, &[
        "3月14日は数学の日",
        "3月14日は「円周率の日」らしい",
        "3月14日は数学の日!!",
        "関係ない投稿",
    ]).await;
    mount_count(&server, "3月14日は 数学", total(10)).await;
    mount_count(&server, "3月14日は 円周率", total(25)).await;

    let client = TwitterClient::with_base_url("test-token", server.uri());
    let ranked = discovery::discover(&client, PI_DAY).await.unwrap();

    let names: Vec<_> = ranked.iter().map(|c| (c.name.as_str(), c.mentions)).collect();
    assert_eq!(names, vec![("円周率", 25), ("数学", 10)]);
}

#[rocket::async_test]
async fn test_poll_creates_then_increments() {
    let client = client_with(None, PI_DAY).await;

    let response = client.post("/poll")
        .header(ContentType::Form)
        .body(CHRISTMAS_FORM)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let record = Queries::find_vote(&state(&client).db, CHRISTMAS, "クリスマス").await.unwrap().unwrap();
    assert_eq!(record.count, 1);

    let response = client.post("/poll")
        .header(ContentType::Form)
        .body(CHRISTMAS_FORM)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let html = response.into_string().await.unwrap();
    assert!(html.contains("クリスマス"));
    assert!(html.contains("2 votes"));

    let top = Queries::top_votes(&state(&client).db, CHRISTMAS).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].count, 2);
}

#[rocket::async_test]
async fn test_poll_rejects_invalid_input_without_writing() {
    let client = client_with(None, PI_DAY).await;

    for body in [
        "usermonth=2&userday=30&dayname=x",
        "usermonth=4&userday=31&dayname=x",
        "usermonth=13&userday=1&dayname=x",
        "usermonth=1&userday=0&dayname=x",
        "usermonth=1&userday=1&dayname=",
        "usermonth=one&userday=1&dayname=x",
        "userday=1&dayname=x",
    ] {
        let response = client.post("/poll")
            .header(ContentType::Form)
            .body(body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest, "body: {body}");
        assert!(response.into_string().await.unwrap().contains("Invalid input"));
    }

    for month in 1..=12 {
        let date = CalendarDate { month, day: 1 };
        assert!(Queries::top_votes(&state(&client).db, date).await.unwrap().is_empty());
    }
}

#[rocket::async_test]
async fn test_vote_today_redirects_home() {
    let client = client_with(None, PI_DAY).await;

    let response = client.post("/")
        .header(ContentType::Form)
        .body("user_day=%E6%95%B0%E5%AD%A6")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/"));

    let record = Queries::find_vote(&state(&client).db, PI_DAY, "数学").await.unwrap().unwrap();
    assert_eq!(record.count, 1);

    let response = client.post("/")
        .header(ContentType::Form)
        .body("user_day=")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[rocket::async_test]
async fn test_database_defaults_to_today() {
    let client = client_with(None, PI_DAY).await;
    Queries::record_vote(&state(&client).db, PI_DAY, "数学").await.unwrap();

    let response = client.get("/database").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let html = response.into_string().await.unwrap();
    assert!(html.contains("3月14日"));
    assert!(html.contains("数学"));
}

#[rocket::async_test]
async fn test_database_browse_by_date() {
    let client = client_with(None, PI_DAY).await;
    Queries::record_vote(&state(&client).db, CHRISTMAS, "クリスマス").await.unwrap();

    let response = client.post("/database")
        .header(ContentType::Form)
        .body("usermonth=12&userday=25")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().await.unwrap().contains("クリスマス"));

    let response = client.get("/database?month=12&day=25").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().await.unwrap().contains("クリスマス"));

    let response = client.get("/database?month=12").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);

    let response = client.post("/database")
        .header(ContentType::Form)
        .body("usermonth=2&userday=30")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[rocket::async_test]
async fn test_poll_form_renders() {
    let client = client_with(None, PI_DAY).await;
    let response = client.get("/poll").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().await.unwrap().contains(r#"name="dayname""#));
}

#[rocket::async_test]
async fn test_home_shows_candidates_and_votes() {
    let server = MockServer::start().await;
    mount_search(&server, &["3月14日は数学の日", "3月14日は「円周率の日」"]).await;
    mount_count(&server, "3月14日は 数学", total(7)).await;
    mount_count(&server, "3月14日は 円周率", total(30)).await;

    let client = client_with(Some(&server), PI_DAY).await;
    Queries::record_vote(&state(&client).db, PI_DAY, "ホワイトデー").await.unwrap();

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let html = response.into_string().await.unwrap();

    let pi = html.find("1. 円周率").expect("円周率 ranked first");
    let math = html.find("2. 数学").expect("数学 ranked second");
    assert!(pi < math);
    assert!(html.contains("30 mentions"));
    assert!(html.contains("ホワイトデー"));
}

#[rocket::async_test]
async fn test_home_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let client = client_with(Some(&server), PI_DAY).await;
    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::BadGateway);
}

#[rocket::async_test]
async fn test_day_ranking_json() {
    let client = client_with(None, PI_DAY).await;
    for _ in 0..2 {
        Queries::record_vote(&state(&client).db, CHRISTMAS, "クリスマス").await.unwrap();
    }

    let response = client.get("/api/days/12/25").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let ranking: DayRanking = response.into_json().await.unwrap();
    assert_eq!((ranking.month, ranking.day), (12, 25));
    assert_eq!(ranking.votes.len(), 1);
    assert_eq!(ranking.votes[0].count, 2);

    let response = client.get("/api/days/4/31").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[rocket::async_test]
async fn test_unknown_path_is_not_found() {
    let client = client_with(None, PI_DAY).await;
    let response = client.get("/nowhere").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}
