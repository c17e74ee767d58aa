use crate::clock::SystemClock;
use crate::controller::HabitController;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type LiveController = HabitController<FileStore, SystemClock>;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<LiveController>>,
}

impl AppState {
    pub fn new(controller: LiveController) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }
}
