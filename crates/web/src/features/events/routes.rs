use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_event, delete_event, get_event, get_timetable, list_events, record_placements,
    update_event, update_event_status,
};
use crate::features::brackets;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_event))
        .route("/:id", put(update_event))
        .route("/:id", delete(delete_event))
        .route("/:id/status", put(update_event_status))
        .route("/:id/placements", put(record_placements))
        .route_layer(middleware::from_fn_with_state(api_keys.clone(), require_auth));

    Router::new()
        .route("/", get(list_events))
        .route("/timetable", get(get_timetable))
        .route("/:id", get(get_event))
        .merge(protected)
        .merge(brackets::routes::routes(api_keys))
}
