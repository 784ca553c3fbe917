use sqlx::PgPool;
use storage::{
    dto::house::HouseRanking, error::Result, models::House,
    repository::house::HouseRepository,
};

/// Houses ranked by points
pub async fn list_rankings(pool: &PgPool) -> Result<Vec<HouseRanking>> {
    let repo = HouseRepository::new(pool);
    let houses = repo.list_by_points().await?;
    Ok(HouseRanking::rank_all(houses))
}

/// Overwrite a house's points
pub async fn set_points(pool: &PgPool, id: &str, points: i32) -> Result<House> {
    let repo = HouseRepository::new(pool);
    repo.set_points(id, points).await
}

/// Insert default houses and their players where missing
pub async fn seed_defaults(pool: &PgPool) -> Result<u64> {
    let repo = HouseRepository::new(pool);
    repo.seed_defaults().await
}
