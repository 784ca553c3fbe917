use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    autocomplete_players, create_player, delete_player, get_player, list_players, update_player,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_player))
        .route("/:id", put(update_player))
        .route("/:id", delete(delete_player))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_players))
        .route("/autocomplete", get(autocomplete_players))
        .route("/:id", get(get_player))
        .merge(protected)
}
