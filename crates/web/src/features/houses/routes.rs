use axum::{
    Router, middleware,
    routing::{get, put},
};
use storage::Database;

use super::handlers::{list_houses, update_house_points};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:id/points", put(update_house_points))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new().route("/", get(list_houses)).merge(protected)
}
