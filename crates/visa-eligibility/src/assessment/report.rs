use serde::Serialize;

use super::domain::ScoringOutcome;
use super::reference::FinancialRequirement;

/// Qualitative label derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChanceBand {
    #[serde(rename = "High Chance")]
    High,
    #[serde(rename = "Moderate Chance")]
    Moderate,
    #[serde(rename = "Low Chance")]
    Low,
}

impl ChanceBand {
    pub const fn from_score(score: i16) -> Self {
        if score >= 80 {
            Self::High
        } else if score >= 60 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Chance",
            Self::Moderate => "Moderate Chance",
            Self::Low => "Low Chance",
        }
    }
}

/// Pass mark for the intended program and whether the total reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramThreshold {
    pub program: String,
    pub required_score: i16,
    pub met: bool,
}

/// Everything the presentation layer renders after a questionnaire is completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub outcome: ScoringOutcome,
    pub chance_band: ChanceBand,
    pub financial_requirements: FinancialRequirement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_threshold: Option<ProgramThreshold>,
}

impl AssessmentReport {
    pub fn score(&self) -> i16 {
        self.outcome.score
    }

    /// Total funds to evidence for the first year.
    pub fn total_funds_required(&self) -> u32 {
        self.financial_requirements.base_amount + self.financial_requirements.additional_funds
    }
}
