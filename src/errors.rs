use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Shape(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "invalid json: {err}"),
            Self::Shape(what) => write!(f, "unexpected shape: {what}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Shape(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejected {
    BlankName,
    BlankActivity,
    InvalidDuration(String),
    NotLoggedIn,
    ModalClosed,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => f.write_str("name is blank"),
            Self::BlankActivity => f.write_str("activity is blank"),
            Self::InvalidDuration(value) => write!(f, "duration '{value}' is not allowed"),
            Self::NotLoggedIn => f.write_str("not logged in"),
            Self::ModalClosed => f.write_str("entry modal is closed"),
        }
    }
}

impl std::error::Error for Rejected {}
