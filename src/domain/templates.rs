//! Deterministic bilingual response templates.
//!
//! The deterministic path answers order-status, return/refund and policy
//! intents from fixed per-language templates. Placeholder values (current
//! order status, dates, policy type) come from out-of-scope collaborators;
//! the defaults below are used when none are supplied.

use crate::domain::intent::Intent;
use crate::domain::language::Language;

/// Context values substituted into templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub order_status: Option<String>,
    pub delivery_estimate: Option<String>,
    pub policy_type: Option<String>,
}

impl TemplateContext {
    pub fn with_order_status(mut self, status: impl Into<String>) -> Self {
        self.order_status = Some(status.into());
        self
    }

    pub fn with_delivery_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.delivery_estimate = Some(estimate.into());
        self
    }

    pub fn with_policy_type(mut self, policy_type: impl Into<String>) -> Self {
        self.policy_type = Some(policy_type.into());
        self
    }
}

/// Renders the deterministic template for an intent in the given language.
///
/// Total: every (intent, language) pair has a template; `Mixed` renders in
/// English. `General` yields the generic greeting, which doubles as the
/// gateway's fallback text.
pub fn render(intent: Intent, language: Language, context: &TemplateContext) -> String {
    let order_status = context.order_status.as_deref();
    let delivery_estimate = context.delivery_estimate.as_deref();
    let policy_type = context.policy_type.as_deref();

    match (language, intent) {
        (Language::Malayalam, Intent::OrderStatus) => format!(
            "നിങ്ങളുടെ ഓർഡർ നിലവിൽ {} ആണ്.",
            order_status.unwrap_or("പ്രോസസ്സ് ചെയ്യുന്നു")
        ),
        (Language::Malayalam, Intent::ReturnRefund) => {
            "ഡെലിവറി കഴിഞ്ഞ് 7 ദിവസത്തിനുള്ളിൽ റിട്ടേൺ അഭ്യർത്ഥിക്കാം.".to_string()
        }
        (Language::Malayalam, Intent::Policy) => {
            format!("{} നയം ഇതാണ്.", policy_type.unwrap_or("പൊതുവായ"))
        }
        (Language::Malayalam, Intent::Escalation) => {
            "നിങ്ങളെ കസ്റ്റമർ കെയറുമായി ബന്ധിപ്പിക്കുന്നു.".to_string()
        }
        (Language::Malayalam, Intent::General) => {
            "എനിക്ക് നിങ്ങളെ എങ്ങനെ സഹായിക്കാം?".to_string()
        }
        (_, Intent::OrderStatus) => format!(
            "Your order is currently {}. Expected delivery: {}.",
            order_status.unwrap_or("being processed"),
            delivery_estimate.unwrap_or("soon")
        ),
        (_, Intent::ReturnRefund) => {
            "You can request a return within 7 days of delivery.".to_string()
        }
        (_, Intent::Policy) => {
            format!("Here is our {} policy.", policy_type.unwrap_or("general"))
        }
        (_, Intent::Escalation) => "I am connecting you to a support executive.".to_string(),
        (_, Intent::General) => "How can I help you today?".to_string(),
    }
}
