use crate::clock::Clock;
use crate::errors::Rejected;
use crate::models::{LogEntry, Session, is_allowed_minutes};
use crate::storage::SessionStore;
use crate::streak::current_streak;
use crate::view::{self, View};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Login,
    Main,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEntry {
    pub text: String,
    pub minutes: Option<u32>,
}

impl PendingEntry {
    pub fn is_complete(&self) -> bool {
        !self.text.trim().is_empty() && self.minutes.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Open(PendingEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub screen: Screen,
    pub username_field: String,
    pub modal: Modal,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    EditUsername { value: String },
    Login { name: String },
    OpenEntryModal,
    CloseEntryModal,
    EditActivity { text: String },
    SelectDuration { value: String },
    SubmitPending,
    SubmitLog { text: String, minutes: String },
}

pub struct HabitController<S, C> {
    session: Session,
    ui: UiState,
    store: S,
    clock: C,
}

impl<S: SessionStore, C: Clock> HabitController<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        let session = store.load();
        let ui = match &session.username {
            Some(name) => UiState {
                screen: Screen::Main,
                username_field: name.clone(),
                modal: Modal::Closed,
            },
            None => UiState::default(),
        };
        if let Some(name) = &session.username {
            info!(user = %name, logs = session.count(), "resumed session");
        }

        Self {
            session,
            ui,
            store,
            clock,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn streak(&self) -> u32 {
        current_streak(&self.session.logs, &self.clock)
    }

    pub fn view(&self) -> View {
        view::render(&self.session, &self.ui, &self.clock.now())
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<(), Rejected> {
        let outcome = match intent {
            Intent::EditUsername { value } => {
                self.edit_username(value);
                Ok(())
            }
            Intent::Login { name } => self.login(&name),
            Intent::OpenEntryModal => self.open_entry_modal(),
            Intent::CloseEntryModal => {
                self.close_entry_modal();
                Ok(())
            }
            Intent::EditActivity { text } => self.edit_activity(text),
            Intent::SelectDuration { value } => self.select_duration(&value),
            Intent::SubmitPending => self.submit_pending(),
            Intent::SubmitLog { text, minutes } => self.submit_log(&text, &minutes),
        };
        if let Err(reason) = &outcome {
            debug!(%reason, "ignored intent");
        }
        outcome
    }

    pub fn edit_username(&mut self, value: String) {
        self.ui.username_field = value;
    }

    pub fn login(&mut self, name: &str) -> Result<(), Rejected> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejected::BlankName);
        }

        self.session.username = Some(name.to_string());
        self.store.save(&self.session);
        self.ui.username_field = name.to_string();
        self.ui.screen = Screen::Main;
        info!(user = %name, "logged in");
        Ok(())
    }

    pub fn open_entry_modal(&mut self) -> Result<(), Rejected> {
        if self.ui.screen != Screen::Main {
            return Err(Rejected::NotLoggedIn);
        }
        self.ui.modal = Modal::Open(PendingEntry::default());
        Ok(())
    }

    pub fn close_entry_modal(&mut self) {
        self.ui.modal = Modal::Closed;
    }

    pub fn edit_activity(&mut self, text: String) -> Result<(), Rejected> {
        match &mut self.ui.modal {
            Modal::Open(pending) => {
                pending.text = text;
                Ok(())
            }
            Modal::Closed => Err(Rejected::ModalClosed),
        }
    }

    pub fn select_duration(&mut self, value: &str) -> Result<(), Rejected> {
        match &mut self.ui.modal {
            Modal::Open(pending) => {
                pending.minutes = parse_minutes(value);
                Ok(())
            }
            Modal::Closed => Err(Rejected::ModalClosed),
        }
    }

    pub fn submit_pending(&mut self) -> Result<(), Rejected> {
        let Modal::Open(pending) = &self.ui.modal else {
            return Err(Rejected::ModalClosed);
        };
        let text = pending.text.clone();
        let minutes = pending.minutes.map(|m| m.to_string()).unwrap_or_default();
        self.submit_log(&text, &minutes)
    }

    pub fn submit_log(&mut self, text: &str, minutes_selection: &str) -> Result<(), Rejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Rejected::BlankActivity);
        }
        let minutes = parse_minutes(minutes_selection)
            .ok_or_else(|| Rejected::InvalidDuration(minutes_selection.to_string()))?;

        self.session.logs.push(LogEntry {
            text: text.to_string(),
            minutes,
            timestamp: self.clock.now_millis(),
        });
        self.store.save(&self.session);
        self.close_entry_modal();
        info!(
            minutes,
            count = self.session.count(),
            streak = self.streak(),
            "logged activity"
        );
        Ok(())
    }
}

fn parse_minutes(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|minutes| is_allowed_minutes(*minutes))
}
