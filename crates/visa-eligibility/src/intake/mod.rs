//! Questionnaire intake: collects answers step by step and converts them into an
//! [`ApplicantRecord`] once every step is complete.

mod parser;

pub use parser::{import_questionnaires, QuestionnaireImportError, QuestionnaireImporter};

use serde::{Deserialize, Serialize};

use crate::assessment::{
    ApplicantRecord, EnglishProficiency, FinancialStatus, PreviousVisa, UnknownVariant,
    NATIVE_TEST_SCORE,
};

pub const MIN_AGE: u8 = 15;
pub const MAX_AGE: u8 = 99;

/// The three pages of the questionnaire, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireStep {
    Background,
    StudyPlan,
    Compliance,
}

impl QuestionnaireStep {
    pub const fn ordered() -> [Self; 3] {
        [Self::Background, Self::StudyPlan, Self::Compliance]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::StudyPlan => "Study Plan",
            Self::Compliance => "Insurance & Finances",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Background => Some(Self::StudyPlan),
            Self::StudyPlan => Some(Self::Compliance),
            Self::Compliance => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Background => None,
            Self::StudyPlan => Some(Self::Background),
            Self::Compliance => Some(Self::StudyPlan),
        }
    }
}

/// Answers as captured by the form, before any enumerated value is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionnaireDraft {
    pub age: Option<u8>,
    pub country_of_origin: Option<String>,
    pub education_level: Option<String>,
    pub intended_study: Option<String>,
    pub selected_field: Option<String>,
    pub has_related_study: bool,
    pub prior_study_details: String,
    pub has_work_experience: bool,
    pub work_experience_years: u32,
    pub english_proficiency: Option<String>,
    pub english_test_score: Option<String>,
    pub previous_visa: Option<String>,
    pub health_insurance: Option<bool>,
    pub financial_status: Option<String>,
}

/// Reasons a draft cannot become an [`ApplicantRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("{} step is incomplete: missing {}", .step.label(), .fields.join(", "))]
    MissingFields {
        step: QuestionnaireStep,
        fields: Vec<&'static str>,
    },
    #[error("age {0} is outside the accepted range 15-99")]
    AgeOutOfRange(u8),
    #[error("{field}: {source}")]
    UnrecognizedValue {
        field: &'static str,
        #[source]
        source: UnknownVariant,
    },
}

impl IntakeError {
    /// Step the applicant should return to, when the error belongs to one.
    pub fn step(&self) -> Option<QuestionnaireStep> {
        match self {
            IntakeError::MissingFields { step, .. } => Some(*step),
            IntakeError::AgeOutOfRange(_) => Some(QuestionnaireStep::Background),
            IntakeError::UnrecognizedValue { field, .. } => match *field {
                "financialStatus" => Some(QuestionnaireStep::Compliance),
                _ => Some(QuestionnaireStep::StudyPlan),
            },
        }
    }
}

fn answered(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|raw| !raw.trim().is_empty())
        .unwrap_or(false)
}

fn parse_answer<T>(field: &'static str, raw: &str) -> Result<T, IntakeError>
where
    T: std::str::FromStr<Err = UnknownVariant>,
{
    raw.parse()
        .map_err(|source| IntakeError::UnrecognizedValue { field, source })
}

fn owned(value: Option<String>) -> String {
    value.map(|raw| raw.trim().to_string()).unwrap_or_default()
}

impl QuestionnaireDraft {
    fn is_native_speaker(&self) -> bool {
        self.english_proficiency
            .as_deref()
            .map(|raw| raw.trim().eq_ignore_ascii_case(NATIVE_TEST_SCORE))
            .unwrap_or(false)
    }

    /// Questionnaire fields still unanswered on `step`.
    pub fn missing_fields(&self, step: QuestionnaireStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            QuestionnaireStep::Background => {
                if self.age.unwrap_or(0) == 0 {
                    missing.push("age");
                }
                if !answered(&self.country_of_origin) {
                    missing.push("countryOfOrigin");
                }
                if !answered(&self.education_level) {
                    missing.push("educationLevel");
                }
            }
            QuestionnaireStep::StudyPlan => {
                if !answered(&self.intended_study) {
                    missing.push("intendedStudy");
                }
                if !answered(&self.selected_field) {
                    missing.push("selectedField");
                }
                if !answered(&self.english_proficiency) {
                    missing.push("englishProficiency");
                } else if !self.is_native_speaker() && !answered(&self.english_test_score) {
                    missing.push("englishTestScore");
                }
            }
            QuestionnaireStep::Compliance => {
                if self.health_insurance.is_none() {
                    missing.push("healthInsurance");
                }
                if !answered(&self.financial_status) {
                    missing.push("financialStatus");
                }
            }
        }
        missing
    }

    pub fn is_step_complete(&self, step: QuestionnaireStep) -> bool {
        self.missing_fields(step).is_empty()
    }

    pub fn first_incomplete_step(&self) -> Option<QuestionnaireStep> {
        QuestionnaireStep::ordered()
            .into_iter()
            .find(|step| !self.is_step_complete(*step))
    }

    fn check_step(&self, step: QuestionnaireStep) -> Result<(), IntakeError> {
        let fields = self.missing_fields(step);
        if fields.is_empty() {
            Ok(())
        } else {
            Err(IntakeError::MissingFields { step, fields })
        }
    }

    /// Validate every step and convert the loose answers into closed types.
    pub fn finish(self) -> Result<ApplicantRecord, IntakeError> {
        for step in QuestionnaireStep::ordered() {
            self.check_step(step)?;
        }

        let age = self.age.unwrap_or(0);
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(IntakeError::AgeOutOfRange(age));
        }

        let english_proficiency: EnglishProficiency = parse_answer(
            "englishProficiency",
            self.english_proficiency.as_deref().unwrap_or_default(),
        )?;
        let financial_status: FinancialStatus = parse_answer(
            "financialStatus",
            self.financial_status.as_deref().unwrap_or_default(),
        )?;
        let previous_visa = match self.previous_visa.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_answer::<PreviousVisa>("previousVisa", raw)?),
        };

        let english_test_score = match english_proficiency {
            EnglishProficiency::Native => NATIVE_TEST_SCORE.to_string(),
            _ => owned(self.english_test_score),
        };
        let work_experience_years = if self.has_work_experience {
            self.work_experience_years
        } else {
            0
        };

        Ok(ApplicantRecord {
            age,
            country_of_origin: owned(self.country_of_origin),
            education_level: owned(self.education_level),
            intended_study: owned(self.intended_study),
            selected_field: owned(self.selected_field),
            has_related_study: self.has_related_study,
            prior_study_details: self.prior_study_details,
            has_work_experience: self.has_work_experience,
            work_experience_years,
            english_proficiency,
            english_test_score,
            previous_visa,
            health_insurance: self.health_insurance.unwrap_or(false),
            financial_status,
        })
    }
}

/// Result of moving forward through the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next(QuestionnaireStep),
    Completed(ApplicantRecord),
}

/// Caller-owned questionnaire state: the current page plus the answers so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionnaireSession {
    step: QuestionnaireStep,
    pub draft: QuestionnaireDraft,
}

impl Default for QuestionnaireSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionnaireSession {
    pub fn new() -> Self {
        Self::from_draft(QuestionnaireDraft::default())
    }

    pub fn from_draft(draft: QuestionnaireDraft) -> Self {
        Self {
            step: QuestionnaireStep::Background,
            draft,
        }
    }

    pub fn step(&self) -> QuestionnaireStep {
        self.step
    }

    pub fn can_advance(&self) -> bool {
        self.draft.is_step_complete(self.step)
    }

    /// Move to the next page, or produce the record from the final page.
    pub fn advance(&mut self) -> Result<Advance, IntakeError> {
        self.draft.check_step(self.step)?;
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(Advance::Next(next))
            }
            None => self.draft.clone().finish().map(Advance::Completed),
        }
    }

    pub fn back(&mut self) -> QuestionnaireStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    pub fn start_over(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> QuestionnaireDraft {
        QuestionnaireDraft {
            age: Some(24),
            country_of_origin: Some("US".to_string()),
            education_level: Some("BACHELORS".to_string()),
            intended_study: Some("MASTERS".to_string()),
            selected_field: Some("IT".to_string()),
            has_related_study: true,
            prior_study_details: "BSc Computer Science".to_string(),
            has_work_experience: true,
            work_experience_years: 3,
            english_proficiency: Some("ielts".to_string()),
            english_test_score: Some(" 7.0 ".to_string()),
            previous_visa: Some(String::new()),
            health_insurance: Some(true),
            financial_status: Some("Sufficient".to_string()),
        }
    }

    #[test]
    fn finish_converts_loose_answers() {
        let record = complete_draft().finish().expect("draft is complete");

        assert_eq!(record.english_proficiency, EnglishProficiency::Ielts);
        assert_eq!(record.financial_status, FinancialStatus::Sufficient);
        assert_eq!(record.english_test_score, "7.0");
        assert_eq!(record.previous_visa, None);
        assert_eq!(record.work_experience_years, 3);
    }

    #[test]
    fn finish_reports_first_incomplete_step() {
        let mut draft = complete_draft();
        draft.intended_study = None;
        draft.financial_status = Some("  ".to_string());

        assert_eq!(
            draft.first_incomplete_step(),
            Some(QuestionnaireStep::StudyPlan)
        );
        match draft.finish() {
            Err(IntakeError::MissingFields { step, fields }) => {
                assert_eq!(step, QuestionnaireStep::StudyPlan);
                assert_eq!(fields, vec!["intendedStudy"]);
            }
            other => panic!("expected missing fields, got {other:?}"),
        }
    }

    #[test]
    fn native_speakers_do_not_need_a_test_score() {
        let mut draft = complete_draft();
        draft.english_proficiency = Some("NATIVE".to_string());
        draft.english_test_score = None;

        assert!(draft.is_step_complete(QuestionnaireStep::StudyPlan));
        let record = draft.finish().expect("native speaker record");
        assert_eq!(record.english_test_score, NATIVE_TEST_SCORE);
    }

    #[test]
    fn test_takers_must_supply_a_score() {
        let mut draft = complete_draft();
        draft.english_test_score = None;

        assert_eq!(
            draft.missing_fields(QuestionnaireStep::StudyPlan),
            vec!["englishTestScore"]
        );
    }

    #[test]
    fn unknown_financial_status_is_rejected() {
        let mut draft = complete_draft();
        draft.financial_status = Some("LOTTERY".to_string());

        let err = draft.finish().expect_err("status rejected");
        assert!(matches!(
            err,
            IntakeError::UnrecognizedValue {
                field: "financialStatus",
                ..
            }
        ));
        assert_eq!(err.step(), Some(QuestionnaireStep::Compliance));
        assert!(err.to_string().contains("LOTTERY"));
    }

    #[test]
    fn age_outside_range_is_rejected() {
        let mut draft = complete_draft();
        draft.age = Some(14);

        assert_eq!(draft.finish(), Err(IntakeError::AgeOutOfRange(14)));
    }

    #[test]
    fn work_years_are_dropped_without_work_experience() {
        let mut draft = complete_draft();
        draft.has_work_experience = false;

        let record = draft.finish().expect("record builds");
        assert_eq!(record.work_experience_years, 0);
    }

    #[test]
    fn previous_visa_is_parsed_when_present() {
        let mut draft = complete_draft();
        draft.previous_visa = Some("visa_refused".to_string());

        let record = draft.finish().expect("record builds");
        assert_eq!(record.previous_visa, Some(PreviousVisa::VisaRefused));
    }

    #[test]
    fn session_walks_through_every_step() {
        let mut session = QuestionnaireSession::from_draft(complete_draft());

        assert_eq!(
            session.advance(),
            Ok(Advance::Next(QuestionnaireStep::StudyPlan))
        );
        assert_eq!(
            session.advance(),
            Ok(Advance::Next(QuestionnaireStep::Compliance))
        );
        match session.advance() {
            Ok(Advance::Completed(record)) => assert_eq!(record.country_of_origin, "US"),
            other => panic!("expected completed record, got {other:?}"),
        }
    }

    #[test]
    fn session_blocks_on_incomplete_step() {
        let mut session = QuestionnaireSession::new();
        session.draft.age = Some(30);

        assert!(!session.can_advance());
        assert!(session.advance().is_err());
        assert_eq!(session.step(), QuestionnaireStep::Background);

        session.draft.country_of_origin = Some("IN".to_string());
        session.draft.education_level = Some("DIPLOMA".to_string());
        assert!(session.can_advance());
        assert_eq!(
            session.advance(),
            Ok(Advance::Next(QuestionnaireStep::StudyPlan))
        );
        assert_eq!(session.back(), QuestionnaireStep::Background);
        assert_eq!(session.back(), QuestionnaireStep::Background);
    }

    #[test]
    fn start_over_clears_answers() {
        let mut session = QuestionnaireSession::from_draft(complete_draft());
        session.advance().expect("background complete");

        session.start_over();

        assert_eq!(session.step(), QuestionnaireStep::Background);
        assert_eq!(session.draft, QuestionnaireDraft::default());
    }
}
