//! Eligibility scoring for student visa questionnaires.
//!
//! Six independent category scorers each produce a bounded sub-score with notes and
//! improvement tips. The engine sums them, clamps the total to 0..=100 and derives the
//! presentation report (chance band, funds to evidence, program pass mark).

pub mod domain;
pub mod reference;
mod report;
pub mod router;
mod scorers;
pub mod transition;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantRecord, CategoryResult, EnglishProficiency, FinancialStatus, PreviousVisa,
    ScoreCategory, ScoringOutcome, UnknownVariant, NATIVE_TEST_SCORE,
};
pub use reference::{CountryProfile, FinancialRequirement, ProgramLevel, ReferenceData, StudyField};
pub use report::{AssessmentReport, ChanceBand, ProgramThreshold};
pub use router::assessment_router;
pub use transition::transition_delta;

use scorers::CATEGORY_SCORERS;
use tracing::debug;

/// Upper bound of the combined score.
pub const MAX_TOTAL_SCORE: i16 = 100;

/// Stateless evaluator that applies the fixed category rubric against reference tables.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityEngine<'a> {
    reference: &'a ReferenceData,
}

impl EligibilityEngine<'static> {
    /// Engine backed by the process-wide reference tables.
    pub fn standard() -> Self {
        Self::new(ReferenceData::standard())
    }
}

impl<'a> EligibilityEngine<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    pub fn assess(&self, record: &ApplicantRecord) -> ScoringOutcome {
        let details: Vec<CategoryResult> = CATEGORY_SCORERS
            .iter()
            .map(|scorer| scorer(record, self.reference))
            .collect();

        let total: i16 = details.iter().map(|detail| detail.score).sum();

        ScoringOutcome {
            score: total.clamp(0, MAX_TOTAL_SCORE),
            details,
        }
    }

    pub fn report(&self, record: &ApplicantRecord) -> AssessmentReport {
        let outcome = self.assess(record);
        let chance_band = ChanceBand::from_score(outcome.score);
        let financial_requirements = self
            .reference
            .financial_requirements(&record.country_of_origin);
        let program_threshold = self
            .reference
            .program_requirements(&record.intended_study)
            .map(|program| ProgramThreshold {
                program: program.name.clone(),
                required_score: program.required_score,
                met: outcome.score >= program.required_score,
            });

        debug!(
            score = outcome.score,
            band = chance_band.label(),
            country = %record.country_of_origin,
            program = %record.intended_study,
            "eligibility assessment completed"
        );

        AssessmentReport {
            outcome,
            chance_band,
            financial_requirements,
            program_threshold,
        }
    }
}

/// Score a record against the standard reference tables.
pub fn assess(record: &ApplicantRecord) -> ScoringOutcome {
    EligibilityEngine::standard().assess(record)
}
