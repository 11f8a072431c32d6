use std::fmt;

use gridmenu_engine::InterfaceError;

#[derive(Debug)]
pub enum ReadError {
    /// The document does not have the expected structure.
    Structural(String),
    /// The document is well-formed but the interface it describes is invalid.
    Interface(InterfaceError),
    /// Input is not JSON, or not a JSON object.
    Json(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural(msg) => write!(f, "{msg}"),
            Self::Interface(err) => write!(f, "invalid interface: {err}"),
            Self::Json(msg) => write!(f, "invalid JSON: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Interface(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InterfaceError> for ReadError {
    fn from(err: InterfaceError) -> Self {
        Self::Interface(err)
    }
}
