use crate::controller::{Modal, Screen, UiState};
use crate::models::{Session, allowed_minutes};
use crate::streak::streak_at;
use chrono::{DateTime, TimeZone};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub screen: Screen,
    pub greeting: String,
    pub username_field: String,
    pub login_enabled: bool,
    pub badge: Badge,
    pub streak: u32,
    pub modal: ModalView,
    pub durations: Vec<DurationOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub visible: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub open: bool,
    pub activity: String,
    pub duration: Option<u32>,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationOption {
    pub minutes: u32,
    pub label: String,
}

pub fn render<Tz: TimeZone>(session: &Session, ui: &UiState, now: &DateTime<Tz>) -> View {
    let count = session.count();
    let greeting = match &session.username {
        Some(name) if ui.screen == Screen::Main => format!("Hi, {name}!"),
        _ => String::new(),
    };

    let modal = match &ui.modal {
        Modal::Open(pending) => ModalView {
            open: true,
            activity: pending.text.clone(),
            duration: pending.minutes,
            submit_enabled: pending.is_complete(),
        },
        Modal::Closed => ModalView {
            open: false,
            activity: String::new(),
            duration: None,
            submit_enabled: false,
        },
    };

    View {
        screen: ui.screen,
        greeting,
        username_field: ui.username_field.clone(),
        login_enabled: !ui.username_field.trim().is_empty(),
        badge: Badge {
            visible: count > 0,
            text: if count > 0 { count.to_string() } else { String::new() },
        },
        streak: streak_at(&session.logs, now),
        modal,
        durations: duration_options(),
    }
}

pub fn duration_options() -> Vec<DurationOption> {
    allowed_minutes()
        .map(|minutes| DurationOption {
            minutes,
            label: format_duration(minutes),
        })
        .collect()
}

pub fn format_duration(minutes: u32) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}
