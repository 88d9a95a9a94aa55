//! Password strength evaluation
//!
//! A pure rule evaluator: every invocation derives five independent
//! criteria from the candidate string, a 0-100 score in steps of 20, and
//! a validity flag. Nothing is persisted and no prior state is consulted.

use serde::{Deserialize, Serialize};

/// Symbols accepted by the symbol criterion
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Minimum acceptable password length
const MIN_LENGTH: usize = 8;

/// The five independent criteria a password is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCriteria {
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_number: bool,
    pub has_symbol: bool,
    pub has_min_length: bool,
}

impl PasswordCriteria {
    /// Evaluate all criteria against `password`. Overlapping character
    /// classes are all checked, never short-circuited.
    pub fn evaluate(password: &str) -> Self {
        Self {
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            has_symbol: password.chars().any(|c| SYMBOLS.contains(c)),
            has_min_length: password.chars().count() >= MIN_LENGTH,
        }
    }

    /// Number of criteria met, 0 through 5
    pub fn met_count(&self) -> u32 {
        [
            self.has_uppercase,
            self.has_lowercase,
            self.has_number,
            self.has_symbol,
            self.has_min_length,
        ]
        .iter()
        .filter(|&&met| met)
        .count() as u32
    }

    /// True iff every criterion is met
    pub fn all_met(&self) -> bool {
        self.met_count() == 5
    }
}

/// Qualitative label derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthLabel {
    EnterPassword,
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
}

impl std::fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StrengthLabel::EnterPassword => "Enter password",
            StrengthLabel::VeryWeak => "Very Weak",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        };
        write!(f, "{label}")
    }
}

/// Result of one evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthEvaluation {
    pub criteria: PasswordCriteria,
    pub score: u32,
    pub label: String,
    pub is_valid: bool,
}

/// Evaluate `password` and derive score, label and validity
pub fn evaluate(password: &str) -> StrengthEvaluation {
    let criteria = PasswordCriteria::evaluate(password);
    let score = criteria.met_count() * 20;
    StrengthEvaluation {
        criteria,
        score,
        label: label_for(score).to_string(),
        is_valid: criteria.all_met(),
    }
}

fn label_for(score: u32) -> StrengthLabel {
    match score {
        0 => StrengthLabel::EnterPassword,
        1..=20 => StrengthLabel::VeryWeak,
        21..=40 => StrengthLabel::Weak,
        41..=60 => StrengthLabel::Fair,
        61..=80 => StrengthLabel::Good,
        _ => StrengthLabel::Strong,
    }
}
