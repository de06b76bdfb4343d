use super::domain::{
    ApplicantRecord, CategoryResult, EnglishProficiency, FinancialStatus, ScoreCategory,
};
use super::reference::{ProgramLevel, ReferenceData};
use super::transition::transition_delta;

/// Signature shared by every category scorer.
pub(crate) type CategoryScorer = fn(&ApplicantRecord, &ReferenceData) -> CategoryResult;

/// Scorers in reporting order.
pub(crate) const CATEGORY_SCORERS: [CategoryScorer; 6] = [
    score_country,
    score_academic_alignment,
    score_study_experience,
    score_english,
    score_financial,
    score_visa_compliance,
];

const ACADEMIC_BASELINE: i16 = 15;
const RELATED_STUDY_POINTS: i16 = 15;
const WORK_POINTS_PER_YEAR: u32 = 2;
const WORK_POINTS_CAP: u32 = 10;

fn level_name(reference: &ReferenceData, level: &str) -> String {
    reference
        .program_requirements(level)
        .map(|program| program.name.clone())
        .unwrap_or_else(|| level.to_string())
}

pub(crate) fn score_country(record: &ApplicantRecord, reference: &ReferenceData) -> CategoryResult {
    let category = ScoreCategory::CountryAssessment;
    let country = reference.country_info(&record.country_of_origin);
    let score = country
        .map(|country| country.risk_score.clamp(0, category.max_score()))
        .unwrap_or(0);

    let mut notes = Vec::new();
    match country {
        Some(country) => {
            notes.push(format!("Country: {}", country.name));
            notes.push(format!("Assessment Level: {}", country.assessment_level));
        }
        None => notes.push(format!(
            "Country '{}' has no assessment data",
            record.country_of_origin
        )),
    }
    notes.push(format!(
        "Current Education: {}",
        level_name(reference, &record.education_level)
    ));

    CategoryResult::new(
        category,
        score,
        notes,
        "Points based on country assessment level and education background",
        &[
            "Provide complete documentation of academic history",
            "Include certified translations of all documents",
            "Submit detailed explanation of study gaps (if any)",
        ],
    )
}

pub(crate) fn score_academic_alignment(
    record: &ApplicantRecord,
    reference: &ReferenceData,
) -> CategoryResult {
    let delta = transition_delta(reference, &record.education_level, &record.intended_study);
    let score = (ACADEMIC_BASELINE + delta).max(0);

    let progression = match delta {
        d if d > 0 => "Positive",
        d if d < 0 => "Negative",
        _ => "Neutral",
    };

    let notes = vec![
        format!(
            "Current Level: {}",
            level_name(reference, &record.education_level)
        ),
        format!(
            "Intended Level: {}",
            level_name(reference, &record.intended_study)
        ),
        format!("Academic Progression: {progression}"),
        if record.has_related_study {
            "Has relevant prior study".to_string()
        } else {
            "No related prior study".to_string()
        },
    ];

    CategoryResult::new(
        ScoreCategory::AcademicAlignment,
        score,
        notes,
        "Points based on academic progression and study pathway relevance",
        &[
            "Demonstrate clear academic progression",
            "Provide detailed study plan",
            "Include statement of purpose explaining course selection",
        ],
    )
}

pub(crate) fn score_study_experience(
    record: &ApplicantRecord,
    reference: &ReferenceData,
) -> CategoryResult {
    let study_points = if record.has_related_study {
        RELATED_STUDY_POINTS
    } else {
        0
    };
    let work_points = if record.has_work_experience {
        record
            .work_experience_years
            .saturating_mul(WORK_POINTS_PER_YEAR)
            .min(WORK_POINTS_CAP) as i16
    } else {
        0
    };

    let field_name = reference
        .study_field_info(&record.selected_field)
        .map(|field| field.name.clone())
        .unwrap_or_else(|| record.selected_field.clone());

    let notes = vec![
        format!("Selected Field: {field_name}"),
        if record.has_related_study {
            format!(
                "Prior Study: {} (+{RELATED_STUDY_POINTS} points)",
                record.prior_study_details
            )
        } else {
            "Prior Study: None".to_string()
        },
        if record.has_work_experience {
            format!(
                "Work Experience: {} years (+{work_points} points)",
                record.work_experience_years
            )
        } else {
            "Work Experience: None".to_string()
        },
    ];

    CategoryResult::new(
        ScoreCategory::StudyAndExperience,
        study_points + work_points,
        notes,
        "Points awarded for relevant academic and professional background",
        &[
            "Document all relevant work experience",
            "Include professional certifications",
            "Provide detailed job descriptions for relevant roles",
        ],
    )
}

/// Upper and lower margins around the requirement for each test's four-tier ladder.
fn ladder_margins(test: EnglishProficiency) -> (f64, f64) {
    match test {
        EnglishProficiency::Ielts => (1.0, 0.5),
        EnglishProficiency::Toefl | EnglishProficiency::Pte => (10.0, 5.0),
        EnglishProficiency::Native => (0.0, 0.0),
    }
}

fn ladder_score(test: EnglishProficiency, score: f64, required: f64) -> i16 {
    let (above, below) = ladder_margins(test);
    if score >= required + above {
        20
    } else if score >= required {
        15
    } else if score >= required - below {
        10
    } else {
        5
    }
}

fn parse_test_score(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn english_status(score: i16) -> &'static str {
    match score {
        20.. => "Exceeds",
        15..=19 => "Meets",
        _ => "Below",
    }
}

pub(crate) fn score_english(record: &ApplicantRecord, reference: &ReferenceData) -> CategoryResult {
    let test = record.english_proficiency;
    let program = reference.program_requirements(&record.intended_study);

    let (score, required_note) = match test {
        EnglishProficiency::Native => (
            20,
            "Required Level: waived for native speakers".to_string(),
        ),
        EnglishProficiency::Ielts | EnglishProficiency::Toefl | EnglishProficiency::Pte => {
            match (
                parse_test_score(&record.english_test_score),
                program.and_then(|program| program.required_for(test)),
            ) {
                (None, Some(required)) => (0, format!("Required Level: {test} {required}")),
                (_, None) => (
                    0,
                    format!(
                        "Required Level: no program data for '{}'",
                        record.intended_study
                    ),
                ),
                (Some(value), Some(required)) => (
                    ladder_score(test, value, required),
                    format!("Required Level: {test} {required}"),
                ),
            }
        }
    };

    let notes = vec![
        format!("Test Type: {test}"),
        format!("Score: {}", record.english_test_score),
        required_note,
        format!("Status: {} requirements", english_status(score)),
    ];

    CategoryResult::new(
        ScoreCategory::EnglishProficiency,
        score,
        notes,
        "Points based on English language proficiency relative to course requirements",
        &[],
    )
    .with_improvement(english_tips(program))
}

fn english_tips(program: Option<&ProgramLevel>) -> Vec<String> {
    let target = match program {
        Some(program) => format!(
            "Aim for IELTS {} or equivalent",
            program.required_ielts + 0.5
        ),
        None => "Confirm the intended program level so the English requirement can be assessed"
            .to_string(),
    };

    vec![
        target,
        "Consider English preparation courses".to_string(),
        "Practice academic writing and speaking".to_string(),
    ]
}

pub(crate) fn score_financial(record: &ApplicantRecord, _reference: &ReferenceData) -> CategoryResult {
    let score = match record.financial_status {
        FinancialStatus::Sufficient | FinancialStatus::Scholarship => 15,
        FinancialStatus::Loan => 10,
        FinancialStatus::Partial => 5,
    };

    let notes = vec![
        format!("Status: {}", record.financial_status),
        format!("Score Impact: +{score} points"),
        "Required: 12 months of living costs + full tuition".to_string(),
    ];

    CategoryResult::new(
        ScoreCategory::FinancialCapacity,
        score,
        notes,
        "Assessment of financial capacity to support study period",
        &[
            "Provide evidence of liquid assets",
            "Include sponsor documentation if applicable",
            "Show additional financial security",
        ],
    )
}

/// Previous visa history is reported but never changes the score.
pub(crate) fn score_visa_compliance(
    record: &ApplicantRecord,
    _reference: &ReferenceData,
) -> CategoryResult {
    let score = if record.health_insurance { 5 } else { 0 };

    let notes = vec![
        if record.health_insurance {
            "Health Insurance: Yes (+5 points)".to_string()
        } else {
            "Health Insurance: No".to_string()
        },
        format!(
            "Previous Visa History: {}",
            record
                .previous_visa
                .map(|visa| visa.code())
                .unwrap_or("None")
        ),
    ];

    CategoryResult::new(
        ScoreCategory::VisaCompliance,
        score,
        notes,
        "Points for meeting visa requirements and compliance history",
        &[
            "Obtain OSHC coverage for full study period",
            "Ensure coverage meets minimum requirements",
        ],
    )
}
