//! Current-user routes

use axum::{routing::get, Router};

use crate::handlers::user;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(user::read_me).put(user::update_me))
}
