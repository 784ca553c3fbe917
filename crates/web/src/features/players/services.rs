use sqlx::PgPool;
use storage::{
    dto::player::{CreatePlayerRequest, UpdatePlayerRequest},
    error::Result,
    models::Player,
    repository::player::PlayerRepository,
};

const AUTOCOMPLETE_LIMIT: i64 = 5;

/// List all players
pub async fn list_players(pool: &PgPool) -> Result<Vec<Player>> {
    let repo = PlayerRepository::new(pool);
    repo.list().await
}

/// Get a player by id
pub async fn get_player(pool: &PgPool, id: i32) -> Result<Player> {
    let repo = PlayerRepository::new(pool);
    repo.find_by_id(id).await
}

/// A handful of player names containing `query`
pub async fn autocomplete(pool: &PgPool, query: &str) -> Result<Vec<String>> {
    let repo = PlayerRepository::new(pool);
    repo.search_names(query.trim(), AUTOCOMPLETE_LIMIT).await
}

/// Create a new player
pub async fn create_player(pool: &PgPool, request: &CreatePlayerRequest) -> Result<Player> {
    let repo = PlayerRepository::new(pool);
    repo.create(request).await
}

/// Update a player
pub async fn update_player(
    pool: &PgPool,
    id: i32,
    request: &UpdatePlayerRequest,
) -> Result<Player> {
    let repo = PlayerRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a player
pub async fn delete_player(pool: &PgPool, id: i32) -> Result<()> {
    let repo = PlayerRepository::new(pool);
    repo.delete(id).await
}
