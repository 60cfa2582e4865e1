//! Rule-based intent classification.
//!
//! Classification is ordered keyword matching over immutable per-language
//! tables: deterministic, stateless, and total. The Response Router relies
//! on this determinism to make its blocking decisions auditable. Extending
//! to a new language or intent is adding table rows, not branching logic.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::language::Language;

/// Classified purpose of a user message. Drives response routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    OrderStatus,
    ReturnRefund,
    Policy,
    Escalation,
    General,
}

impl Intent {
    /// Classifies `text` against the keyword tables for `language`.
    ///
    /// Intents are evaluated in fixed priority order (escalation first):
    /// a request to reach a human outranks any automatable intent, even
    /// when keywords for both co-occur. No match yields `General`.
    pub fn classify(text: &str, language: Language) -> Intent {
        if text.trim().is_empty() {
            return Intent::General;
        }

        let normalized = text.to_lowercase();
        let table = keyword_table(language);

        for rule in table {
            if rule
                .keywords
                .iter()
                .any(|keyword| normalized.contains(keyword))
            {
                return rule.intent;
            }
        }

        Intent::General
    }

    /// Snake-case code used in persisted records.
    pub fn code(&self) -> &'static str {
        match self {
            Intent::OrderStatus => "order_status",
            Intent::ReturnRefund => "return_refund",
            Intent::Policy => "policy",
            Intent::Escalation => "escalation",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One row of the classification table: an intent and the keywords that
/// select it. Rows are evaluated top to bottom; first match wins.
struct IntentRule {
    intent: Intent,
    keywords: &'static [&'static str],
}

/// English keyword rules, highest priority first.
static ENGLISH_RULES: Lazy<Vec<IntentRule>> = Lazy::new(|| {
    vec![
        IntentRule {
            intent: Intent::Escalation,
            keywords: &[
                "complaint",
                "talk to agent",
                "human",
                "support executive",
                "escalate",
            ],
        },
        IntentRule {
            intent: Intent::OrderStatus,
            keywords: &["order", "track", "delivery", "shipped", "status", "where"],
        },
        IntentRule {
            intent: Intent::ReturnRefund,
            keywords: &["return", "refund", "replace", "damaged", "cancel"],
        },
        IntentRule {
            intent: Intent::Policy,
            keywords: &["policy", "rules", "terms", "conditions"],
        },
    ]
});

/// Malayalam keyword rules, highest priority first.
static MALAYALAM_RULES: Lazy<Vec<IntentRule>> = Lazy::new(|| {
    vec![
        IntentRule {
            intent: Intent::Escalation,
            keywords: &[
                "പരാതി",
                "മനുഷ്യൻ",
                "മനുഷ്യനോട്",
                "കസ്റ്റമർ കെയർ",
                "കസ്റ്റമർ കെയറിനെ",
                "എസ്കലേറ്റ്",
            ],
        },
        IntentRule {
            intent: Intent::OrderStatus,
            keywords: &["ഓർഡർ", "ട്രാക്ക്", "ഡെലിവറി", "എത്തിയോ", "സ്ഥിതി", "എവിടെയാണ്"],
        },
        IntentRule {
            intent: Intent::ReturnRefund,
            keywords: &["റിട്ടേൺ", "റീഫണ്ട്", "തിരികെ", "നശിച്ചു", "ക്യാൻസൽ"],
        },
        IntentRule {
            intent: Intent::Policy,
            keywords: &["നയം", "നയങ്ങൾ", "നിയമങ്ങൾ", "വ്യവസ്ഥകൾ"],
        },
    ]
});

/// Mixed or unknown language classifies against the English tables.
fn keyword_table(language: Language) -> &'static [IntentRule] {
    match language {
        Language::Malayalam => &MALAYALAM_RULES,
        Language::English | Language::Mixed => &ENGLISH_RULES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn order_keywords_classify_as_order_status() {
        assert_eq!(
            Intent::classify("Where is my order?", Language::English),
            Intent::OrderStatus
        );
        assert_eq!(
            Intent::classify("Has it shipped yet", Language::English),
            Intent::OrderStatus
        );
    }

    #[test]
    fn return_keywords_classify_as_return_refund() {
        assert_eq!(
            Intent::classify("I want a refund", Language::English),
            Intent::ReturnRefund
        );
    }

    #[test]
    fn policy_keywords_classify_as_policy() {
        assert_eq!(
            Intent::classify("what are your terms and conditions", Language::English),
            Intent::Policy
        );
    }

    #[test]
    fn escalation_keywords_classify_as_escalation() {
        assert_eq!(
            Intent::classify("I need to talk to agent now", Language::English),
            Intent::Escalation
        );
    }

    #[test]
    fn escalation_dominates_cooccurring_intents() {
        // "order" and "refund" keywords both present; escalation still wins.
        assert_eq!(
            Intent::classify(
                "I have a complaint about my order and want a refund",
                Language::English
            ),
            Intent::Escalation
        );
    }

    #[test]
    fn order_status_outranks_return_and_policy() {
        assert_eq!(
            Intent::classify("track my return policy", Language::English),
            Intent::OrderStatus
        );
    }

    #[test]
    fn no_keyword_match_yields_general() {
        assert_eq!(
            Intent::classify("hello there, good morning", Language::English),
            Intent::General
        );
    }

    #[test]
    fn empty_text_yields_general() {
        assert_eq!(Intent::classify("", Language::English), Intent::General);
        assert_eq!(Intent::classify("   ", Language::Malayalam), Intent::General);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            Intent::classify("WHERE IS MY ORDER", Language::English),
            Intent::OrderStatus
        );
    }

    #[test]
    fn malayalam_keywords_use_malayalam_table() {
        assert_eq!(
            Intent::classify("എന്റെ ഓർഡർ എവിടെയാണ്?", Language::Malayalam),
            Intent::OrderStatus
        );
        assert_eq!(
            Intent::classify("എനിക്ക് ഒരു പരാതി ഉണ്ട്", Language::Malayalam),
            Intent::Escalation
        );
    }

    #[test]
    fn mixed_language_falls_back_to_english_table() {
        assert_eq!(
            Intent::classify("ഓർഡർ where is it", Language::Mixed),
            Intent::OrderStatus
        );
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(text in ".{0,200}") {
            let first = Intent::classify(&text, Language::English);
            let second = Intent::classify(&text, Language::English);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn escalation_keyword_always_wins(prefix in "[a-z ]{0,40}", suffix in "[a-z ]{0,40}") {
            let text = format!("{} escalate {}", prefix, suffix);
            prop_assert_eq!(Intent::classify(&text, Language::English), Intent::Escalation);
        }
    }
}
