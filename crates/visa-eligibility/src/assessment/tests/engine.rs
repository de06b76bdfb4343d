use super::common::*;
use crate::assessment::domain::{
    ApplicantRecord, EnglishProficiency, FinancialStatus, ScoreCategory, NATIVE_TEST_SCORE,
};
use crate::assessment::reference::{CountryProfile, ReferenceData};
use crate::assessment::{assess, ChanceBand, EligibilityEngine, MAX_TOTAL_SCORE};

#[test]
fn graduate_stepping_up_scores_high_chance() {
    let outcome = engine().assess(&applicant());

    let scores: Vec<(ScoreCategory, i16, i16)> = outcome
        .details
        .iter()
        .map(|detail| (detail.category, detail.score, detail.max_score))
        .collect();
    assert_eq!(
        scores,
        vec![
            (ScoreCategory::CountryAssessment, 10, 15),
            (ScoreCategory::AcademicAlignment, 20, 20),
            (ScoreCategory::StudyAndExperience, 21, 25),
            (ScoreCategory::EnglishProficiency, 15, 20),
            (ScoreCategory::FinancialCapacity, 15, 15),
            (ScoreCategory::VisaCompliance, 5, 5),
        ]
    );
    assert_eq!(outcome.score, 86);
    assert_eq!(ChanceBand::from_score(outcome.score), ChanceBand::High);
}

#[test]
fn categories_follow_fixed_order_and_weights() {
    let outcome = engine().assess(&applicant());

    let categories: Vec<ScoreCategory> = outcome
        .details
        .iter()
        .map(|detail| detail.category)
        .collect();
    assert_eq!(categories, ScoreCategory::ordered().to_vec());

    let max_total: i16 = outcome.details.iter().map(|detail| detail.max_score).sum();
    assert_eq!(max_total, MAX_TOTAL_SCORE);
}

#[test]
fn every_score_stays_within_bounds() {
    let countries = ["US", "IN", "DE", "ZZ", ""];
    let levels = ["CERTIFICATE", "DIPLOMA", "BACHELOR", "MASTERS", "PHD", "HIGH_SCHOOL"];
    let statuses = [
        FinancialStatus::Sufficient,
        FinancialStatus::Scholarship,
        FinancialStatus::Loan,
        FinancialStatus::Partial,
    ];
    let english = [
        (EnglishProficiency::Native, NATIVE_TEST_SCORE),
        (EnglishProficiency::Ielts, "9"),
        (EnglishProficiency::Toefl, "30"),
        (EnglishProficiency::Pte, "abc"),
    ];

    for country in countries {
        for current in levels {
            for intended in levels {
                for status in statuses {
                    for (test, raw) in english {
                        let record = ApplicantRecord {
                            country_of_origin: country.to_string(),
                            education_level: current.to_string(),
                            intended_study: intended.to_string(),
                            financial_status: status,
                            english_proficiency: test,
                            english_test_score: raw.to_string(),
                            health_insurance: status != FinancialStatus::Loan,
                            ..applicant()
                        };
                        let outcome = engine().assess(&record);

                        assert!((0..=MAX_TOTAL_SCORE).contains(&outcome.score));
                        for detail in &outcome.details {
                            assert!(
                                (0..=detail.max_score).contains(&detail.score),
                                "{:?} out of range for {record:?}",
                                detail.category
                            );
                            assert_eq!(
                                detail.improvement.is_some(),
                                detail.score < detail.max_score
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn total_is_clamped_even_with_generous_reference_data() {
    let generous = ReferenceData::new(
        vec![CountryProfile::new("XX", "Generous", 1, 500)],
        ReferenceData::standard().programs().to_vec(),
        Vec::new(),
    );
    let engine = EligibilityEngine::new(&generous);
    let record = ApplicantRecord {
        country_of_origin: "XX".to_string(),
        work_experience_years: 10,
        english_proficiency: EnglishProficiency::Native,
        english_test_score: NATIVE_TEST_SCORE.to_string(),
        ..applicant()
    };

    let outcome = engine.assess(&record);

    assert_eq!(outcome.score, 100);
    assert_eq!(
        outcome
            .category(ScoreCategory::CountryAssessment)
            .map(|detail| detail.score),
        Some(15)
    );
}

#[test]
fn assessing_twice_is_byte_identical() {
    let record = applicant();

    let first = serde_json::to_string(&assess(&record)).expect("serializes");
    let second = serde_json::to_string(&assess(&record)).expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn category_scores_are_independent_of_each_other() {
    let baseline = engine().assess(&applicant());
    let weaker_finances = ApplicantRecord {
        financial_status: FinancialStatus::Partial,
        ..applicant()
    };

    let changed = engine().assess(&weaker_finances);

    for (before, after) in baseline.details.iter().zip(&changed.details) {
        if before.category == ScoreCategory::FinancialCapacity {
            assert_eq!(after.score, 5);
        } else {
            assert_eq!(before, after);
        }
    }
    assert_eq!(changed.score, baseline.score - 10);
}

#[test]
fn unknown_country_degrades_gracefully() {
    let record = ApplicantRecord {
        country_of_origin: "ZZ".to_string(),
        ..applicant()
    };

    let report = engine().report(&record);

    assert_eq!(
        report
            .outcome
            .category(ScoreCategory::CountryAssessment)
            .map(|detail| detail.score),
        Some(0)
    );
    assert_eq!(report.score(), 76);
    assert_eq!(report.chance_band, ChanceBand::Moderate);
    assert_eq!(
        report.financial_requirements,
        crate::assessment::FinancialRequirement::DEFAULT
    );
}

#[test]
fn report_resolves_funds_and_program_threshold() {
    let report = engine().report(&applicant());

    assert_eq!(report.chance_band, ChanceBand::High);
    assert_eq!(report.financial_requirements.base_amount, 20_000);
    assert_eq!(report.total_funds_required(), 49_710);
    let threshold = report.program_threshold.expect("masters is known");
    assert_eq!(threshold.program, "Masters Degree");
    assert_eq!(threshold.required_score, 65);
    assert!(threshold.met);
}

#[test]
fn weak_application_is_low_chance() {
    let record = ApplicantRecord {
        country_of_origin: "NG".to_string(),
        education_level: "MASTERS".to_string(),
        intended_study: "DIPLOMA".to_string(),
        has_related_study: false,
        has_work_experience: false,
        work_experience_years: 0,
        english_test_score: "4.5".to_string(),
        financial_status: FinancialStatus::Partial,
        health_insurance: false,
        ..applicant()
    };

    let report = engine().report(&record);

    // 3 + 10 + 0 + 5 + 5 + 0
    assert_eq!(report.score(), 23);
    assert_eq!(report.chance_band, ChanceBand::Low);
    let threshold = report.program_threshold.expect("diploma is known");
    assert!(!threshold.met);
}

#[test]
fn report_serializes_display_labels() {
    let report = engine().report(&applicant());

    let value = serde_json::to_value(&report).expect("serializes");

    assert_eq!(value["chanceBand"], "High Chance");
    assert_eq!(value["outcome"]["score"], 86);
    assert_eq!(value["outcome"]["details"][0]["category"], "Country Assessment");
    assert_eq!(value["outcome"]["details"][0]["maxScore"], 15);
    assert!(value["outcome"]["details"][1].get("improvement").is_none());
    assert_eq!(value["financialRequirements"]["additionalFunds"], 29_710);
}
