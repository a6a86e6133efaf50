use std::collections::HashMap;
use futures::{stream, StreamExt, TryStreamExt};
use tracing::{debug, info, instrument};
use shared::models::{rank_candidates, CalendarDate, DayCandidate};
use shared::{extract_day_names, phrases};
use twitter_client::{Granularity, Result, TwitterClient, TwitterError};

/// Count requests allowed in flight at once.
const COUNT_CONCURRENCY: usize = 4;

/// Day names mentioned in recent posts about `date`.
pub async fn fetch_candidates(client: &TwitterClient, date: CalendarDate) -> Result<Vec<String>> {
    let query = phrases::search_query(date);
    let tweets = client.search_recent(&query, phrases::MAX_SEARCH_RESULTS).await?;
    Ok(extract_day_names(tweets.iter().map(|tweet| tweet.text.as_str())))
}

/// Mentions of each candidate over the last week. The first failed request fails the whole batch.
pub async fn count_mentions(
    client: &TwitterClient,
    date: CalendarDate,
    candidates: &[String],
) -> Result<HashMap<String, u64>> {
    stream::iter(candidates.iter().cloned())
        .map(|name| async move {
            let counts = client
                .count_recent(&phrases::count_query(date, &name), Granularity::Day)
                .await?;
            debug!(name = %name, total = counts.meta.total_tweet_count, "Counted mentions");
            Ok::<_, TwitterError>((name, counts.meta.total_tweet_count))
        })
        .buffered(COUNT_CONCURRENCY)
        .try_collect()
        .await
}

#[instrument(skip_all, fields(date = %date))]
pub async fn discover(client: &TwitterClient, date: CalendarDate) -> Result<Vec<DayCandidate>> {
    let candidates = fetch_candidates(client, date).await?;
    let counts = count_mentions(client, date, &candidates).await?;
    let ranked = rank_candidates(counts);

    info!("🔍 Found {} day name candidates", ranked.len());
    Ok(ranked)
}
