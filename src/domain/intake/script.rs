//! Intake script - the fixed, ordered question sequence.
//!
//! The script is data, not control flow: steps and questions are plain
//! ordered lists so the sequence can be inspected and tested without
//! touching the interview logic.

use serde::{Deserialize, Serialize};

/// Category of an intake question.
///
/// Stored alongside each response; downstream analysis groups answers by
/// category while context extraction matches on question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    /// Who the user is and how they want to be addressed.
    Identity,
    /// How the user is doing right now.
    Wellbeing,
    /// What the user hopes to get out of the program.
    Goals,
    /// Free-form closing questions.
    Open,
}

/// A single question within an intake step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeQuestion {
    /// The question text shown to the user.
    pub text: String,
    /// Category for downstream grouping.
    pub category: QuestionCategory,
}

impl IntakeQuestion {
    /// Creates a new question.
    pub fn new(text: impl Into<String>, category: QuestionCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// An ordered group of questions presented as one interview step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeStep {
    /// Step title shown as a section header.
    pub title: String,
    /// Ordered questions for this step.
    pub questions: Vec<IntakeQuestion>,
}

impl IntakeStep {
    /// Creates a new step.
    pub fn new(title: impl Into<String>, questions: Vec<IntakeQuestion>) -> Self {
        Self {
            title: title.into(),
            questions,
        }
    }
}

/// The full ordered interview script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeScript {
    steps: Vec<IntakeStep>,
}

impl IntakeScript {
    /// Creates a script from ordered steps.
    pub fn new(steps: Vec<IntakeStep>) -> Self {
        Self { steps }
    }

    /// The built-in onboarding script for the wellness program.
    pub fn wellness_onboarding() -> Self {
        use QuestionCategory::*;

        Self::new(vec![
            IntakeStep::new(
                "Boas-vindas",
                vec![
                    IntakeQuestion::new("Como você gostaria de ser chamado(a)?", Identity),
                    IntakeQuestion::new("Qual é a sua idade?", Identity),
                ],
            ),
            IntakeStep::new(
                "Momento atual",
                vec![
                    IntakeQuestion::new(
                        "Como você descreveria o seu momento atual?",
                        Wellbeing,
                    ),
                    IntakeQuestion::new(
                        "O que mais tem pesado no seu dia a dia?",
                        Wellbeing,
                    ),
                ],
            ),
            IntakeStep::new(
                "Objetivos",
                vec![
                    IntakeQuestion::new(
                        "O que você espera alcançar com o acompanhamento?",
                        Goals,
                    ),
                    IntakeQuestion::new(
                        "Existe algo mais que gostaria de compartilhar?",
                        Open,
                    ),
                ],
            ),
        ])
    }

    /// Returns the ordered steps.
    pub fn steps(&self) -> &[IntakeStep] {
        &self.steps
    }

    /// Returns the question at the given position, if within bounds.
    pub fn question_at(&self, step_index: usize, question_index: usize) -> Option<&IntakeQuestion> {
        self.steps
            .get(step_index)
            .and_then(|step| step.questions.get(question_index))
    }

    /// Total number of questions across all steps.
    pub fn total_questions(&self) -> usize {
        self.steps.iter().map(|s| s.questions.len()).sum()
    }
}
