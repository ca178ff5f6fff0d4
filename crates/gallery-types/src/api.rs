use serde::{Deserialize, Serialize};

use crate::models::Picture;

// -- Envelope --

/// Status/message envelope returned by the picture operations and the API.
/// `picture` is only present when an operation hands back a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub status: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<Picture>,
}

impl Message {
    pub fn new(status: bool, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            picture: None,
        }
    }

    pub fn with_picture(status: bool, message: impl Into<String>, picture: Picture) -> Self {
        Self {
            picture: Some(picture),
            ..Self::new(status, message)
        }
    }
}

// -- Validation --

/// Outcome of validating a picture before it is written.
///
/// `message.status` is `false` for every outcome, accepted or not; callers
/// decide on `accepted` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub message: Message,
    pub accepted: bool,
}

impl Validation {
    pub fn accept(message: impl Into<String>) -> Self {
        Self {
            message: Message::new(false, message),
            accepted: true,
        }
    }

    pub fn reject(message: impl Into<String>) -> Self {
        Self {
            message: Message::new(false, message),
            accepted: false,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}

// -- Listing --

#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<u32>,
}
