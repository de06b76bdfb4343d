use crate::infra::{format_aud, load_draft, today};
use crate::routes::{assess_batch, BatchAssessmentResponse};
use chrono::NaiveDate;
use clap::{ArgGroup, Args, Subcommand};
use std::path::PathBuf;
use visa_eligibility::assessment::{AssessmentReport, EligibilityEngine, ReferenceData};
use visa_eligibility::error::AppError;
use visa_eligibility::intake::{Advance, QuestionnaireImporter, QuestionnaireSession};

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "csv"])))]
pub(crate) struct AssessArgs {
    /// Questionnaire draft as camelCase JSON
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Questionnaire export with one applicant per row
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Emit JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
    /// Assessment date stamped on batch output (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) assessed_on: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ReferenceCommand {
    /// Countries with assessment level and funds to evidence
    Countries {
        /// Show a single country with its document checklist
        #[arg(long)]
        code: Option<String>,
    },
    /// Program levels with English and score requirements
    Programs,
    /// Study fields with their priority weighting
    Fields,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        input,
        csv,
        json,
        assessed_on,
    } = args;
    let engine = EligibilityEngine::standard();

    if let Some(path) = csv {
        let drafts = QuestionnaireImporter::from_path(&path)?;
        let rows = assess_batch(engine, drafts);
        let completed = rows.iter().filter(|row| row.report.is_some()).count();
        let response = BatchAssessmentResponse {
            assessed_on: assessed_on.unwrap_or_else(today),
            completed,
            rejected: rows.len() - completed,
            rows,
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            render_batch(&response);
        }
        return Ok(());
    }

    if let Some(path) = input {
        let record = load_draft(&path)?.finish()?;
        let report = engine.report(&record);
        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            render_assessment_report(&report);
        }
    }

    Ok(())
}

pub(crate) fn run_reference(command: ReferenceCommand) -> Result<(), AppError> {
    let reference = ReferenceData::standard();

    match command {
        ReferenceCommand::Countries { code: Some(code) } => render_country(reference, &code),
        ReferenceCommand::Countries { code: None } => {
            println!("Countries");
            for country in reference.countries() {
                println!(
                    "  - {} {} | level {} | risk {} | funds {}",
                    country.code,
                    country.name,
                    country.assessment_level,
                    country.risk_score,
                    format_aud(country.financial.base_amount + country.financial.additional_funds)
                );
            }
        }
        ReferenceCommand::Programs => {
            println!("Program levels");
            for program in reference.programs() {
                println!(
                    "  {}. {} ({}) | IELTS {:.1} | TOEFL {} | PTE {} | pass mark {}",
                    program.rank,
                    program.name,
                    program.key,
                    program.required_ielts,
                    program.required_toefl,
                    program.required_pte,
                    program.required_score
                );
            }
        }
        ReferenceCommand::Fields => {
            println!("Study fields");
            for field in reference.study_fields() {
                println!(
                    "  - {} ({}) | priority {} | {}",
                    field.name, field.key, field.priority_level, field.description
                );
            }
        }
    }

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Student visa eligibility demo");

    let mut session = QuestionnaireSession::new();
    session.draft.age = Some(26);
    session.draft.country_of_origin = Some("US".to_string());
    session.draft.education_level = Some("BACHELORS".to_string());
    session.draft.intended_study = Some("MASTERS".to_string());
    session.draft.selected_field = Some("IT".to_string());
    session.draft.has_related_study = true;
    session.draft.prior_study_details = "BSc Computer Science".to_string();
    session.draft.has_work_experience = true;
    session.draft.work_experience_years = 3;
    session.draft.english_proficiency = Some("IELTS".to_string());
    session.draft.english_test_score = Some("7.0".to_string());
    session.draft.previous_visa = Some("TOURIST_VISA".to_string());
    session.draft.health_insurance = Some(true);
    session.draft.financial_status = Some("SUFFICIENT".to_string());

    let record = loop {
        let current = session.step();
        match session.advance()? {
            Advance::Next(next) => {
                println!("  {} complete, continuing to {}", current.label(), next.label());
            }
            Advance::Completed(record) => {
                println!("  {} complete, questionnaire submitted", current.label());
                break record;
            }
        }
    };

    let report = EligibilityEngine::standard().report(&record);
    println!();
    render_assessment_report(&report);
    Ok(())
}

fn render_country(reference: &ReferenceData, code: &str) {
    match reference.country_info(code) {
        Some(country) => println!(
            "{} ({}) | assessment level {} | risk score {}",
            country.name, country.code, country.assessment_level, country.risk_score
        ),
        None => println!("{} has no assessment data", code.trim().to_ascii_uppercase()),
    }

    let funds = reference.financial_requirements(code);
    println!(
        "Funds to evidence: {} base + {} living = {}",
        format_aud(funds.base_amount),
        format_aud(funds.additional_funds),
        format_aud(funds.base_amount + funds.additional_funds)
    );

    let documents = reference.document_requirements(code);
    if !documents.is_empty() {
        println!("Documents");
        for document in documents {
            println!("  - {document}");
        }
    }
}

fn render_batch(response: &BatchAssessmentResponse) {
    println!(
        "Batch assessment ({}) | {} scored | {} incomplete",
        response.assessed_on, response.completed, response.rejected
    );
    for row in &response.rows {
        match (&row.report, &row.error) {
            (Some(report), _) => println!(
                "  Row {}: {}/100 {}",
                row.row,
                report.score(),
                report.chance_band.label()
            ),
            (None, Some(error)) => println!("  Row {}: {error}", row.row),
            (None, None) => {}
        }
    }
}

pub(crate) fn render_assessment_report(report: &AssessmentReport) {
    println!(
        "Eligibility score: {}/100 ({})",
        report.score(),
        report.chance_band.label()
    );

    for detail in &report.outcome.details {
        println!(
            "\n{}: {}/{}",
            detail.category.label(),
            detail.score,
            detail.max_score
        );
        println!("  {}", detail.explanation);
        for note in &detail.notes {
            println!("  - {note}");
        }
        if let Some(tips) = &detail.improvement {
            println!("  To improve:");
            for tip in tips {
                println!("    * {tip}");
            }
        }
    }

    let funds = &report.financial_requirements;
    println!(
        "\nFunds to evidence: {} base + {} living = {}",
        format_aud(funds.base_amount),
        format_aud(funds.additional_funds),
        format_aud(report.total_funds_required())
    );

    if let Some(threshold) = &report.program_threshold {
        let status = if threshold.met { "met" } else { "not met" };
        println!(
            "{} pass mark: {} ({status})",
            threshold.program, threshold.required_score
        );
    }
}
