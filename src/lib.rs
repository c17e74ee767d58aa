pub mod app;
pub mod clock;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod streak;
pub mod ui;
pub mod view;

pub use app::router;
pub use controller::{HabitController, Intent};
pub use state::AppState;
pub use storage::{FileStore, SessionStore, resolve_data_path};
