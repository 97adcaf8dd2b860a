//! Voice assistant replies.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::TranslationResult;

/// How the assistant classified the query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoiceReplyKind {
    /// The user asked for something to be done; the reply is a plan of action
    Action,
    /// The user asked for information
    Info,
    /// The query was ambiguous; the reply carries one clarifying question
    Clarify,
}

impl fmt::Display for VoiceReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceReplyKind::Action => write!(f, "action"),
            VoiceReplyKind::Info => write!(f, "info"),
            VoiceReplyKind::Clarify => write!(f, "clarify"),
        }
    }
}

/// Reply to a transcribed voice query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceReply {
    /// The type of response.
    #[serde(rename = "type")]
    pub kind: VoiceReplyKind,
    /// The response text to be spoken to the user.
    pub response_text: String,
    /// A clarifying question if needed.
    #[serde(default)]
    pub followup: Option<String>,
    /// Telugu translation of a common phrase, if applicable.
    #[serde(default)]
    pub telugu_phrase: Option<TranslationResult>,
}
