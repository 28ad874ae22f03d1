//! Run outcomes and the structured response handed back to the scheduler.

use serde::{Deserialize, Serialize};

/// A status the posting service accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedStatus {
    pub id: String,

    #[serde(default)]
    pub url: Option<String>,
}

/// Final result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// An image was posted
    Posted(PostedStatus),

    /// The result set held no usable image; nothing was posted
    NothingPosted,

    /// The run failed
    Failed(String),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, RunOutcome::Failed(_))
    }

    /// Convert into the `{statusCode, body}` shape the scheduler logs.
    pub fn into_response(self) -> BotResponse {
        match self {
            RunOutcome::Posted(status) => BotResponse {
                status_code: 200,
                body: format!(
                    "Posted successfully! {} at {}",
                    status.id,
                    status.url.as_deref().unwrap_or("(no url)")
                ),
            },
            RunOutcome::NothingPosted => BotResponse {
                status_code: 204,
                body: "No eligible image found; nothing posted".to_string(),
            },
            RunOutcome::Failed(message) => BotResponse {
                status_code: 500,
                body: message,
            },
        }
    }
}

/// Structured invocation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotResponse {
    pub status_code: u16,
    pub body: String,
}
