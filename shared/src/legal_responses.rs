//! Canned answers for the legal assistant and the ordered substring rules
//! that pick one of them for a user message.

use serde::Serialize;
use strum_macros::{AsRefStr, EnumIter};

/// Returned when no rule matches and no completion provider answered.
pub const DEFAULT_RESPONSE: &str = "I understand you have a legal question. While I can provide general information about legal procedures, IPC sections, and filing FIRs, for specific legal advice, please consult a qualified lawyer. What specific legal information are you looking for?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LegalTopic {
    Greeting,
    FirDefinition,
    FirFiling,
    PenalCode,
    LegalAdvice,
    PoliceHelp,
    Evidence,
    Tracking,
    Rights,
    Emergency,
    Cybercrime,
    PropertyDispute,
    DomesticViolence,
    TrafficViolation,
    ConsumerRights,
}

impl LegalTopic {
    /// The canned answer for this topic.
    pub fn answer(self) -> &'static str {
        match self {
            LegalTopic::Greeting => "Hello! I'm your Legal Track assistant. I can help you with information about filing FIRs, understanding IPC sections, and general legal guidance. How can I assist you today?",
            LegalTopic::FirDefinition => "A First Information Report (FIR) is the first step in the criminal justice process. It's a written document prepared by the police when they receive information about a cognizable offense. Filing an FIR is crucial as it sets the criminal law in motion.",
            LegalTopic::FirFiling => "To file an FIR online:\n1. Go to our 'File FIR' section\n2. Fill in your personal details\n3. Provide incident information\n4. Review and submit\n5. You'll receive a CID for tracking\n\nYou can also visit your local police station to file in person.",
            LegalTopic::PenalCode => "The Indian Penal Code (IPC) is the main criminal code of India. It defines various offenses and their punishments. Common sections include:\n• IPC 420: Cheating and fraud\n• IPC 378: Theft\n• IPC 302: Murder\n• IPC 354: Assault on women\n• IPC 406: Criminal breach of trust",
            LegalTopic::LegalAdvice => "I can provide general legal information, but for specific legal advice, please consult a qualified lawyer. I can help you understand legal procedures, IPC sections, and guide you through filing documents.",
            LegalTopic::PoliceHelp => "The police are here to help you. If you're in immediate danger, call 100. For filing complaints, you can:\n• Visit the nearest police station\n• Use our online FIR filing system\n• Contact the police helpline in your area",
            LegalTopic::Evidence => "When filing an FIR, gather all available evidence:\n• Photographs of the incident\n• CCTV footage if available\n• Witness statements\n• Medical reports (if applicable)\n• Any documents related to the case\n• Preserve physical evidence",
            LegalTopic::Tracking => "To track your FIR:\n• Use the CID (Content Identifier) provided\n• Contact the police station where you filed\n• Check online status portals\n• Follow up with the investigating officer",
            LegalTopic::Rights => "As a citizen, you have the right to:\n• File an FIR for cognizable offenses\n• Get a copy of your FIR\n• Know the status of your case\n• Be treated with dignity by police\n• File complaints against police misconduct",
            LegalTopic::Emergency => "For emergencies:\n• Call 100 (Police)\n• Call 101 (Fire)\n• Call 102 (Ambulance)\n• Call 1091 (Women Helpline)\n• Call 1098 (Child Helpline)",
            LegalTopic::Cybercrime => "For cybercrime complaints:\n• File an FIR at your local police station\n• Report to cybercrime.gov.in\n• Contact the cybercrime helpline\n• Preserve digital evidence\n• Don't delete suspicious messages or emails",
            LegalTopic::PropertyDispute => "For property disputes:\n• Gather all property documents\n• Collect evidence of ownership\n• File a complaint with the police\n• Consider mediation services\n• Consult a property lawyer",
            LegalTopic::DomesticViolence => "If you're experiencing domestic violence:\n• Call 1091 (Women Helpline)\n• Contact local women's organizations\n• File a complaint with the police\n• Seek medical attention if needed\n• Consider legal protection orders",
            LegalTopic::TrafficViolation => "For traffic violations:\n• Pay fines online through official portals\n• Contest violations in traffic court\n• Keep all related documents\n• Follow traffic rules to avoid future violations",
            LegalTopic::ConsumerRights => "Your consumer rights include:\n• Right to safety\n• Right to information\n• Right to choose\n• Right to be heard\n• Right to seek redressal\n\nFile complaints with consumer forums or the police if needed.",
        }
    }
}

/// A rule matches when the message contains any of `any` and, if `and_any`
/// is non-empty, also any of `and_any`.
struct TopicRule {
    topic: LegalTopic,
    any: &'static [&'static str],
    and_any: &'static [&'static str],
}

impl TopicRule {
    fn matches(&self, lower: &str) -> bool {
        self.any.iter().any(|k| lower.contains(k))
            && (self.and_any.is_empty() || self.and_any.iter().any(|k| lower.contains(k)))
    }
}

const fn topic(
    topic: LegalTopic,
    any: &'static [&'static str],
    and_any: &'static [&'static str],
) -> TopicRule {
    TopicRule { topic, any, and_any }
}

// First match wins. Substrings are not word bounded, so "this" greets.
static TOPIC_RULES: &[TopicRule] = &[
    topic(LegalTopic::Greeting, &["hello", "hi", "hey"], &[]),
    topic(LegalTopic::FirDefinition, &["fir"], &["what", "mean"]),
    topic(LegalTopic::FirFiling, &["fir"], &["how", "file"]),
    topic(LegalTopic::PenalCode, &["ipc", "penal code"], &[]),
    topic(LegalTopic::LegalAdvice, &["legal advice", "lawyer"], &[]),
    topic(LegalTopic::PoliceHelp, &["police"], &["help", "contact"]),
    topic(LegalTopic::Evidence, &["evidence", "proof"], &[]),
    topic(LegalTopic::Tracking, &["track", "status"], &[]),
    topic(LegalTopic::Rights, &["rights", "entitled"], &[]),
    topic(LegalTopic::Emergency, &["emergency", "urgent"], &[]),
    topic(LegalTopic::Cybercrime, &["cyber", "online", "internet"], &[]),
    topic(LegalTopic::PropertyDispute, &["property", "land", "house"], &[]),
    topic(LegalTopic::DomesticViolence, &["domestic", "abuse", "violence"], &[]),
    topic(LegalTopic::TrafficViolation, &["traffic", "driving", "vehicle"], &[]),
    topic(LegalTopic::ConsumerRights, &["consumer", "purchase", "buy"], &[]),
];

/// Picks the first topic whose rule matches the message, if any.
pub fn match_topic(message: &str) -> Option<LegalTopic> {
    let lower = message.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.topic)
}

/// The canned answer for a message, falling back to [`DEFAULT_RESPONSE`].
pub fn find_best_response(message: &str) -> &'static str {
    match_topic(message)
        .map(LegalTopic::answer)
        .unwrap_or(DEFAULT_RESPONSE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn hello_returns_greeting() {
        assert_eq!(
            find_best_response("hello"),
            "Hello! I'm your Legal Track assistant. I can help you with information about filing FIRs, understanding IPC sections, and general legal guidance. How can I assist you today?"
        );
        assert_eq!(match_topic("HEY there"), Some(LegalTopic::Greeting));
    }

    #[test]
    fn fir_questions() {
        assert_eq!(find_best_response("what is fir"), LegalTopic::FirDefinition.answer());
        assert_eq!(find_best_response("What does FIR mean?"), LegalTopic::FirDefinition.answer());
        assert_eq!(find_best_response("how do I file an fir"), LegalTopic::FirFiling.answer());
        assert!(LegalTopic::FirFiling.answer().starts_with("To file an FIR online:\n1."));
    }

    #[test]
    fn rule_order_decides() {
        // matches both "police" + "help" and "emergency"; police comes first
        assert_eq!(match_topic("police help in an emergency"), Some(LegalTopic::PoliceHelp));
        // "ipc" wins over "lawyer"
        assert_eq!(match_topic("ipc or lawyer"), Some(LegalTopic::PenalCode));
        // "police" alone is not enough for the police rule
        assert_eq!(match_topic("police"), None);
        assert_eq!(match_topic("need proof"), Some(LegalTopic::Evidence));
        assert_eq!(match_topic("got a traffic ticket"), Some(LegalTopic::TrafficViolation));
        // "vehicle" contains "hi"
        assert_eq!(match_topic("my vehicle was towed"), Some(LegalTopic::Greeting));
    }

    #[test]
    fn unmatched_returns_default() {
        assert_eq!(match_topic("Can you explain bail?"), None);
        assert_eq!(find_best_response(""), DEFAULT_RESPONSE);
    }

    #[test]
    fn every_topic_has_a_rule() {
        for t in LegalTopic::iter() {
            assert!(TOPIC_RULES.iter().any(|r| r.topic == t), "{}", t.as_ref());
            assert!(!t.answer().is_empty());
        }
    }
}
