//! Context assembly for inference calls.
//!
//! Merges the intake profile with a bounded window of recent conversation
//! history. The payload built here, not raw storage records, is what
//! crosses the boundary to the inference endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{Message, Role};
use crate::domain::intake::IntakeProfile;

/// Question-text hints for each extracted profile field. Extraction works
/// over the text as asked, not the category field, so a reworded script
/// keeps working as long as the hints still appear.
const NAME_HINTS: &[&str] = &["chamado", "chamar", "nome"];
const SITUATION_HINTS: &[&str] = &["momento atual", "situação", "situacao"];
const GOALS_HINTS: &[&str] = &["espera alcançar", "espera alcancar", "objetivo"];

/// Profile fields extracted from intake responses.
///
/// Fields the profile does not answer stay `None`; nothing is fabricated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileFields {
    /// How the user wants to be addressed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
    /// Free-text description of the user's current situation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
    /// Free-text statement of goals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
}

/// One history entry in the inference payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMessage {
    /// Who sent it.
    pub role: Role,
    /// What was said.
    pub content: String,
}

impl From<&Message> for ContextMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role(),
            content: message.content().to_string(),
        }
    }
}

/// The payload handed to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPayload {
    /// Extracted profile fields.
    pub profile: ProfileFields,
    /// Bounded recent history, oldest first.
    pub history: Vec<ContextMessage>,
    /// The new outgoing user message.
    pub message: String,
}

/// Builds inference payloads from profile and history.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    history_window: usize,
}

impl ContextAssembler {
    /// Creates an assembler keeping at most `history_window` recent messages.
    pub fn new(history_window: usize) -> Self {
        Self { history_window }
    }

    /// Returns the configured window size.
    pub fn history_window(&self) -> usize {
        self.history_window
    }

    /// Assembles the payload for one outgoing message.
    ///
    /// Takes the most recent `history_window` messages oldest-first; older
    /// history is dropped, never summarized.
    pub fn build(
        &self,
        profile: Option<&IntakeProfile>,
        recent_messages: &[Message],
        outgoing: &str,
    ) -> ContextPayload {
        let start = recent_messages.len().saturating_sub(self.history_window);
        let history = recent_messages[start..].iter().map(Into::into).collect();

        ContextPayload {
            profile: profile.map(Self::extract_fields).unwrap_or_default(),
            history,
            message: outgoing.to_string(),
        }
    }

    /// Pulls the known fields out of the flattened intake responses by
    /// matching hint keywords against each question's text. The first
    /// matching answer wins.
    fn extract_fields(profile: &IntakeProfile) -> ProfileFields {
        let answer_for = |hints: &[&str]| {
            profile.responses().iter().find_map(|response| {
                let question = response.question_text.to_lowercase();
                hints
                    .iter()
                    .any(|hint| question.contains(hint))
                    .then(|| response.response_text.clone())
            })
        };

        ProfileFields {
            preferred_name: answer_for(NAME_HINTS),
            situation: answer_for(SITUATION_HINTS),
            goals: answer_for(GOALS_HINTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::intake::{IntakeResponse, QuestionCategory};

    fn profile_with(entries: &[(&str, &str)]) -> IntakeProfile {
        let mut profile = IntakeProfile::new(UserId::new("user-1").unwrap());
        for (i, (question, answer)) in entries.iter().enumerate() {
            profile.record_response(IntakeResponse {
                step_index: 0,
                question_index: i,
                question_text: question.to_string(),
                category: QuestionCategory::Open,
                response_text: answer.to_string(),
            });
        }
        profile
    }

    fn messages(contents: &[&str]) -> Vec<Message> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i % 2 == 0 {
                    Message::user(*c).unwrap()
                } else {
                    Message::assistant(*c).unwrap()
                }
            })
            .collect()
    }

    #[test]
    fn extracts_name_situation_and_goals() {
        let profile = profile_with(&[
            ("Como você gostaria de ser chamado(a)?", "Ana"),
            ("Como você descreveria o seu momento atual?", "cansada"),
            ("O que você espera alcançar com o acompanhamento?", "dormir melhor"),
        ]);

        let payload = ContextAssembler::new(10).build(Some(&profile), &[], "oi");
        assert_eq!(payload.profile.preferred_name.as_deref(), Some("Ana"));
        assert_eq!(payload.profile.situation.as_deref(), Some("cansada"));
        assert_eq!(payload.profile.goals.as_deref(), Some("dormir melhor"));
    }

    #[test]
    fn missing_fields_are_omitted_not_defaulted() {
        let profile = profile_with(&[("Qual é a sua idade?", "30")]);
        let payload = ContextAssembler::new(10).build(Some(&profile), &[], "oi");

        assert_eq!(payload.profile, ProfileFields::default());
        let json = serde_json::to_value(&payload.profile).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn no_profile_yields_empty_fields() {
        let payload = ContextAssembler::new(10).build(None, &[], "oi");
        assert_eq!(payload.profile, ProfileFields::default());
    }

    #[test]
    fn history_keeps_only_the_most_recent_window_oldest_first() {
        let msgs = messages(&["m1", "m2", "m3", "m4", "m5"]);
        let payload = ContextAssembler::new(3).build(None, &msgs, "m6");

        let contents: Vec<_> = payload.history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m3", "m4", "m5"]);
    }

    #[test]
    fn short_history_is_passed_whole() {
        let msgs = messages(&["m1", "m2"]);
        let payload = ContextAssembler::new(10).build(None, &msgs, "m3");
        assert_eq!(payload.history.len(), 2);
        assert_eq!(payload.message, "m3");
    }
}
