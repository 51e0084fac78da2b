//! CRUD routes for heroes, powers and hero_powers.

use crate::handlers::{create, delete, list, read, update};
use crate::model::{Hero, HeroPower, Power};
use crate::service::Resource;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .merge(resource::<Hero>())
        .merge(resource::<Power>())
        .merge(resource::<HeroPower>())
        .with_state(state)
}

/// `/{path}` and `/{path}/:id` for one resource. PATCH is accepted as an alias of PUT.
fn resource<R: Resource>() -> Router<AppState> {
    Router::new()
        .route(&format!("/{}", R::PATH), get(list::<R>).post(create::<R>))
        .route(
            &format!("/{}/:id", R::PATH),
            get(read::<R>)
                .put(update::<R>)
                .patch(update::<R>)
                .delete(delete::<R>),
        )
}
