use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{build_bracket, list_rounds, record_score};
use crate::middleware::auth::{ApiKeys, require_auth};

/// Bracket routes, mounted next to the event routes
pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:id/bracket", post(build_bracket))
        .route("/:id/matches/:match_id/score", put(record_score))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:id/rounds", get(list_rounds))
        .merge(protected)
}
