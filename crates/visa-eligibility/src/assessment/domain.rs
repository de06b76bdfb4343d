use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Completed questionnaire answers handed to the scoring engine.
///
/// Every enumerated answer is already a closed type here; intake is responsible for
/// rejecting anything the engine would not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRecord {
    pub age: u8,
    pub country_of_origin: String,
    pub education_level: String,
    pub intended_study: String,
    pub selected_field: String,
    pub has_related_study: bool,
    pub prior_study_details: String,
    pub has_work_experience: bool,
    pub work_experience_years: u32,
    pub english_proficiency: EnglishProficiency,
    pub english_test_score: String,
    pub previous_visa: Option<PreviousVisa>,
    pub health_insurance: bool,
    pub financial_status: FinancialStatus,
}

/// Raised when an enumerated answer does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! questionnaire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const fn ordered() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            /// Canonical upper-case code used by the questionnaire.
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let normalized = raw.trim().to_ascii_uppercase();
                match normalized.as_str() {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: raw.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownVariant;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

questionnaire_enum! {
    /// How the applicant demonstrates English ability.
    EnglishProficiency, "english proficiency" {
        Native => "NATIVE",
        Ielts => "IELTS",
        Toefl => "TOEFL",
        Pte => "PTE",
    }
}

questionnaire_enum! {
    /// Declared means of funding the study period.
    FinancialStatus, "financial status" {
        Sufficient => "SUFFICIENT",
        Scholarship => "SCHOLARSHIP",
        Loan => "LOAN",
        Partial => "PARTIAL",
    }
}

questionnaire_enum! {
    /// Most recent Australian visa history.
    PreviousVisa, "previous visa" {
        NoVisa => "NO_VISA",
        StudentVisa => "STUDENT_VISA",
        TouristVisa => "TOURIST_VISA",
        WorkingVisa => "WORKING_VISA",
        VisaRefused => "VISA_REFUSED",
    }
}

/// Test score literal recorded for native speakers.
pub const NATIVE_TEST_SCORE: &str = "NATIVE";

/// The six fixed scoring dimensions, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreCategory {
    #[serde(rename = "Country Assessment")]
    CountryAssessment,
    #[serde(rename = "Academic Alignment")]
    AcademicAlignment,
    #[serde(rename = "Study & Experience")]
    StudyAndExperience,
    #[serde(rename = "English Proficiency")]
    EnglishProficiency,
    #[serde(rename = "Financial Capacity")]
    FinancialCapacity,
    #[serde(rename = "Visa Compliance")]
    VisaCompliance,
}

impl ScoreCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::CountryAssessment,
            Self::AcademicAlignment,
            Self::StudyAndExperience,
            Self::EnglishProficiency,
            Self::FinancialCapacity,
            Self::VisaCompliance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CountryAssessment => "Country Assessment",
            Self::AcademicAlignment => "Academic Alignment",
            Self::StudyAndExperience => "Study & Experience",
            Self::EnglishProficiency => "English Proficiency",
            Self::FinancialCapacity => "Financial Capacity",
            Self::VisaCompliance => "Visa Compliance",
        }
    }

    pub const fn max_score(self) -> i16 {
        match self {
            Self::CountryAssessment => 15,
            Self::AcademicAlignment => 20,
            Self::StudyAndExperience => 25,
            Self::EnglishProficiency => 20,
            Self::FinancialCapacity => 15,
            Self::VisaCompliance => 5,
        }
    }
}

/// Score, diagnostics and guidance for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub category: ScoreCategory,
    pub score: i16,
    pub max_score: i16,
    pub notes: Vec<String>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement: Option<Vec<String>>,
}

impl CategoryResult {
    /// Builds a result, attaching `tips` only when the score falls short of the maximum.
    pub(crate) fn new(
        category: ScoreCategory,
        score: i16,
        notes: Vec<String>,
        explanation: &str,
        tips: &[&str],
    ) -> Self {
        let max_score = category.max_score();
        let score = score.clamp(0, max_score);
        let improvement = (score < max_score)
            .then(|| tips.iter().map(|tip| tip.to_string()).collect::<Vec<_>>());

        Self {
            category,
            score,
            max_score,
            notes,
            explanation: explanation.to_string(),
            improvement,
        }
    }

    pub(crate) fn with_improvement(mut self, tips: Vec<String>) -> Self {
        if self.score < self.max_score {
            self.improvement = Some(tips);
        }
        self
    }
}

/// Total score alongside the per-category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    pub score: i16,
    pub details: Vec<CategoryResult>,
}

impl ScoringOutcome {
    pub fn category(&self, category: ScoreCategory) -> Option<&CategoryResult> {
        self.details
            .iter()
            .find(|detail| detail.category == category)
    }
}
