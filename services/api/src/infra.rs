use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use visa_eligibility::error::AppError;
use visa_eligibility::intake::QuestionnaireDraft;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_draft(path: &Path) -> Result<QuestionnaireDraft, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let draft = serde_json::from_str(&raw)?;
    Ok(draft)
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

pub(crate) fn format_aud(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("AUD {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_aud_groups_thousands() {
        assert_eq!(format_aud(0), "AUD 0");
        assert_eq!(format_aud(950), "AUD 950");
        assert_eq!(format_aud(29_710), "AUD 29,710");
        assert_eq!(format_aud(1_234_567), "AUD 1,234,567");
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert_eq!(
            parse_date(" 2025-02-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid date"))
        );
        assert!(parse_date("01/02/2025").is_err());
    }

    #[test]
    fn load_draft_reports_missing_file() {
        let err = load_draft(Path::new("/nonexistent/questionnaire.json"))
            .expect_err("file missing");
        assert!(matches!(err, AppError::Io(_)));
    }
}
