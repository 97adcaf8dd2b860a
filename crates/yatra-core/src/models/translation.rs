//! Telugu phrase translation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A short phrase rendered in Telugu for showing to locals.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// The translated phrase in Telugu script.
    pub telugu_text: String,
    /// The phrase transliterated into Latin letters.
    pub transliteration: String,
    /// Language tag for speech synthesis, e.g. "te-IN".
    #[serde(default)]
    pub tts_lang: Option<String>,
}
