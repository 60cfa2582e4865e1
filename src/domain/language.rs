//! Language detection over message text.
//!
//! The support surface is bilingual (English/Malayalam). Detection is a pure
//! function of the character sets present in the text; no external service
//! is consulted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detected language of a message or conversation.
///
/// `Mixed` is only ever a per-message detection result; it is never stored
/// as a conversation's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ml")]
    Malayalam,
    Mixed,
}

/// Malayalam script block plus the zero-width joiners used by Indic scripts.
const MALAYALAM_RANGES: [(u32, u32); 2] = [(0x0D00, 0x0D7F), (0x200C, 0x200D)];

impl Language {
    /// Detects the language of `text` by script membership.
    ///
    /// - Only ASCII letters present: `English`
    /// - Only Malayalam script present: `Malayalam`
    /// - Both present: `Mixed`
    /// - Empty, whitespace-only, or no recognized script: `default`
    pub fn detect(text: &str, default: Language) -> Language {
        if text.trim().is_empty() {
            return default;
        }

        let mut has_malayalam = false;
        let mut has_ascii_letters = false;

        for ch in text.chars() {
            let code = ch as u32;
            if MALAYALAM_RANGES
                .iter()
                .any(|&(start, end)| (start..=end).contains(&code))
            {
                has_malayalam = true;
            }
            if ch.is_ascii_alphabetic() {
                has_ascii_letters = true;
            }
        }

        match (has_malayalam, has_ascii_letters) {
            (true, true) => Language::Mixed,
            (true, false) => Language::Malayalam,
            (false, true) => Language::English,
            (false, false) => default,
        }
    }

    /// Resolves the language to respond in.
    ///
    /// The current message's detection wins unless it is `Mixed`, in which
    /// case the conversation's established language (or the default) is
    /// used.
    pub fn response_language(
        detected: Language,
        conversation_language: Option<Language>,
        default: Language,
    ) -> Language {
        match detected {
            Language::Mixed => conversation_language.unwrap_or(default),
            concrete => concrete,
        }
    }

    /// Two-letter code used in persisted records and provider prompts.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Malayalam => "ml",
            Language::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
