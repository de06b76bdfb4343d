use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    ApplicantRecord, EnglishProficiency, FinancialStatus, PreviousVisa,
};
use crate::assessment::reference::ReferenceData;
use crate::assessment::EligibilityEngine;
use crate::intake::QuestionnaireDraft;

/// US graduate stepping up from a bachelor's to a master's with an IELTS 7.0.
pub(super) fn applicant() -> ApplicantRecord {
    ApplicantRecord {
        age: 26,
        country_of_origin: "US".to_string(),
        education_level: "BACHELORS".to_string(),
        intended_study: "MASTERS".to_string(),
        selected_field: "IT".to_string(),
        has_related_study: true,
        prior_study_details: "BSc Computer Science".to_string(),
        has_work_experience: true,
        work_experience_years: 3,
        english_proficiency: EnglishProficiency::Ielts,
        english_test_score: "7.0".to_string(),
        previous_visa: Some(PreviousVisa::TouristVisa),
        health_insurance: true,
        financial_status: FinancialStatus::Sufficient,
    }
}

pub(super) fn with_english(test: EnglishProficiency, score: &str) -> ApplicantRecord {
    ApplicantRecord {
        english_proficiency: test,
        english_test_score: score.to_string(),
        ..applicant()
    }
}

pub(super) fn reference() -> &'static ReferenceData {
    ReferenceData::standard()
}

pub(super) fn engine() -> EligibilityEngine<'static> {
    EligibilityEngine::standard()
}

pub(super) fn draft() -> QuestionnaireDraft {
    QuestionnaireDraft {
        age: Some(26),
        country_of_origin: Some("US".to_string()),
        education_level: Some("BACHELORS".to_string()),
        intended_study: Some("MASTERS".to_string()),
        selected_field: Some("IT".to_string()),
        has_related_study: true,
        prior_study_details: "BSc Computer Science".to_string(),
        has_work_experience: true,
        work_experience_years: 3,
        english_proficiency: Some("IELTS".to_string()),
        english_test_score: Some("7.0".to_string()),
        previous_visa: Some("TOURIST_VISA".to_string()),
        health_insurance: Some(true),
        financial_status: Some("SUFFICIENT".to_string()),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("json body")
}
