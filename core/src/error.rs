use std::{any::Any, fmt};

/// Failure payload for a computation that panicked instead of producing an outcome.
///
/// Only the panic message survives; the original payload is dropped once the
/// message has been extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Panicked {
    message: String,
}

impl Panicked {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Builds the payload from whatever `catch_unwind` handed back.
    ///
    /// `panic!` with a literal yields a `&'static str`, formatted panics yield a
    /// `String`; anything else is reported without a message.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(message) => (*message).to_owned(),
                None => String::from("Box<dyn Any>"),
            },
        };

        Self { message }
    }

    /// Returns the panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.message)
    }
}

impl std::error::Error for Panicked {}

/// Failure payload for a pending outcome whose producer went away without resolving it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("producer dropped before resolving the outcome")
    }
}

impl std::error::Error for Cancelled {}
