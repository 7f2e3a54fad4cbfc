//! Notification route handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::notify::Notification;
use crate::state::AppState;

/// Pending notifications, oldest first.
#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
}

/// Take every pending notification. Each one is returned exactly once.
pub async fn drain(State(state): State<AppState>) -> Json<NotificationList> {
    Json(NotificationList {
        notifications: state.notifications().drain(),
    })
}
