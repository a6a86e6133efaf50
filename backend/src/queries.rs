use shared::models::{CalendarDate, VoteRecord};
use crate::error::ApiError;
use crate::store::VotePool;

/// Size of the per-date leaderboard.
pub const TOP_VOTES_LIMIT: i64 = 3;

pub struct Queries;

impl Queries {
    pub async fn find_vote(
        pool: &VotePool,
        date: CalendarDate,
        day_name: &str,
    ) -> Result<Option<VoteRecord>, ApiError> {
        sqlx::query_as::<_, VoteRecord>(
            "SELECT month, day, dayName, count FROM daysinyear
             WHERE month = ? AND day = ? AND dayName = ?",
        )
        .bind(date.month)
        .bind(date.day)
        .bind(day_name)
        .fetch_optional(pool)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
    }

    /// Highest counts first; equal counts keep insertion order.
    pub async fn top_votes(pool: &VotePool, date: CalendarDate) -> Result<Vec<VoteRecord>, ApiError> {
        sqlx::query_as::<_, VoteRecord>(
            "SELECT month, day, dayName, count FROM daysinyear
             WHERE month = ? AND day = ?
             ORDER BY count DESC, rowid ASC
             LIMIT ?",
        )
        .bind(date.month)
        .bind(date.day)
        .bind(TOP_VOTES_LIMIT)
        .fetch_all(pool)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
    }

    /// Inserts the triple with a count of 1, or bumps the existing count, in one statement.
    pub async fn record_vote(
        pool: &VotePool,
        date: CalendarDate,
        day_name: &str,
    ) -> Result<VoteRecord, ApiError> {
        sqlx::query_as::<_, VoteRecord>(
            "INSERT INTO daysinyear (month, day, dayName, count) VALUES (?, ?, ?, 1)
             ON CONFLICT (month, day, dayName) DO UPDATE SET count = count + 1
             RETURNING month, day, dayName, count",
        )
        .bind(date.month)
        .bind(date.day)
        .bind(day_name)
        .fetch_one(pool)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
    }
}
