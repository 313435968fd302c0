use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/today/mood", post(handlers::today_mood))
        .route("/today/note", post(handlers::today_note))
        .route("/day/:date", post(handlers::day_action))
        .route("/api/today", get(handlers::get_today))
        .route("/api/day/:date", get(handlers::get_day))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/month", get(handlers::get_month))
        .route("/api/year", get(handlers::get_year))
        .route("/api/mood", post(handlers::set_mood))
        .route("/api/note", post(handlers::set_note))
        .with_state(state)
}
