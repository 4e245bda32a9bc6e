mod dto;
pub mod handlers;
mod repo;
mod repo_types;
mod services;

pub use dto::{MealResponse, MessageResponse};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
