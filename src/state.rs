use crate::tracker::TrackerState;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<TrackerState>>,
}

impl AppState {
    pub fn new(tracker: TrackerState) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }
}
