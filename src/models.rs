use serde::{Deserialize, Serialize};

pub const ALLOWED_MINUTES: std::ops::RangeInclusive<u32> = MIN_MINUTES..=MAX_MINUTES;
pub const MIN_MINUTES: u32 = 10;
pub const MAX_MINUTES: u32 = 300;
pub const MINUTES_STEP: u32 = 10;

pub fn is_allowed_minutes(minutes: u32) -> bool {
    ALLOWED_MINUTES.contains(&minutes) && minutes % MINUTES_STEP == 0
}

pub fn allowed_minutes() -> impl Iterator<Item = u32> {
    ALLOWED_MINUTES.step_by(MINUTES_STEP as usize)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub minutes: u32,
    // epoch millis
    #[serde(rename = "ts")]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: Option<String>,
    pub logs: Vec<LogEntry>,
}

impl Session {
    pub fn count(&self) -> usize {
        self.logs.len()
    }
}
