use serde::Serialize;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Error {
    pub reason: Reason,
    pub help: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Reason {
    /// Text that should have carried MDX structure but doesn't, such as a
    /// malformed unique name or an unrecognized keyword token.
    Format { expected: String, found: String },
    /// A constructor received a value it cannot build a node from.
    InvalidArgument { message: String },
    /// A mutation that contradicts what the target object already holds.
    InvalidState { message: String },
}

impl Error {
    pub fn new(reason: Reason) -> Self {
        Error { reason, help: None }
    }

    pub fn format<E: Into<String>, F: Into<String>>(expected: E, found: F) -> Self {
        Error::new(Reason::Format {
            expected: expected.into(),
            found: found.into(),
        })
    }

    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Error::new(Reason::InvalidArgument {
            message: message.into(),
        })
    }

    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Error::new(Reason::InvalidState {
            message: message.into(),
        })
    }

    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl Reason {
    pub fn message(&self) -> String {
        match self {
            Reason::Format { expected, found } => {
                format!("expected {expected}, but found `{found}`")
            }
            Reason::InvalidArgument { message } => format!("invalid argument: {message}"),
            Reason::InvalidState { message } => format!("invalid state: {message}"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason.message())?;
        if let Some(help) = &self.help {
            write!(f, "\nhelp: {help}")?;
        }
        Ok(())
    }
}

impl StdError for Error {}

pub trait WithErrorInfo {
    fn with_help<S: Into<String>>(self, help: S) -> Self;
}

impl<T> WithErrorInfo for Result<T, Error> {
    fn with_help<S: Into<String>>(self, help: S) -> Self {
        self.map_err(|e| e.with_help(help))
    }
}
