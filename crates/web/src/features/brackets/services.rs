use sqlx::PgPool;
use storage::{
    dto::bracket::{MatchResponse, RoundResponse, ScoreRequest},
    error::Result,
    repository::{event::EventRepository, matches::PgMatchStore, player::PlayerRepository},
    services::bracket::{self, BracketRound},
};

/// Rebuild an event's bracket in a single transaction
pub async fn build_bracket(
    pool: &PgPool,
    event_id: i32,
    names: &[String],
) -> Result<Vec<RoundResponse>> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let mut tx = pool.begin().await?;
    let mut store = PgMatchStore::new(&mut *tx);
    let rounds = bracket::build_bracket(&mut store, names, event_id).await?;
    tx.commit().await?;

    resolve_names(pool, rounds).await
}

/// Record a match result and advance its winner in a single transaction
pub async fn record_score(
    pool: &PgPool,
    event_id: i32,
    match_id: i32,
    request: &ScoreRequest,
) -> Result<MatchResponse> {
    let mut tx = pool.begin().await?;
    let mut store = PgMatchStore::new(&mut *tx);
    let record = bracket::record_score(&mut store, event_id, match_id, request.into()).await?;
    tx.commit().await?;

    let names = PlayerRepository::new(pool).whole_names().await?;
    Ok(MatchResponse::resolve(record, &names))
}

/// Every round of an event, seeds included
pub async fn list_rounds(pool: &PgPool, event_id: i32) -> Result<Vec<BracketRound>> {
    let mut conn = pool.acquire().await?;
    let mut store = PgMatchStore::new(&mut *conn);
    bracket::list_rounds(&mut store, event_id).await
}

pub async fn resolve_names(pool: &PgPool, rounds: Vec<BracketRound>) -> Result<Vec<RoundResponse>> {
    let names = PlayerRepository::new(pool).whole_names().await?;
    Ok(RoundResponse::resolve_all(rounds, &names))
}
