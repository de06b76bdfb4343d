use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

use super::domain::EnglishProficiency;

/// Funds an applicant is expected to evidence, in AUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRequirement {
    /// Base funds covering tuition and travel.
    pub base_amount: u32,
    /// Annual living cost on top of the base funds.
    pub additional_funds: u32,
}

impl FinancialRequirement {
    pub const DEFAULT: Self = Self {
        base_amount: 25_000,
        additional_funds: 29_710,
    };

    fn for_assessment_level(level: u8) -> Self {
        match level {
            1 => Self {
                base_amount: 20_000,
                additional_funds: 29_710,
            },
            2 => Self::DEFAULT,
            _ => Self {
                base_amount: 30_000,
                additional_funds: 29_710,
            },
        }
    }
}

/// Immigration assessment data for a country of citizenship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryProfile {
    pub code: String,
    pub name: String,
    /// Evidence tier, 1 being the lightest documentation burden.
    pub assessment_level: u8,
    /// Points contributed towards the country category before capping.
    pub risk_score: i16,
    pub financial: FinancialRequirement,
}

impl CountryProfile {
    pub fn new(code: &str, name: &str, assessment_level: u8, risk_score: i16) -> Self {
        Self {
            code: code.to_ascii_uppercase(),
            name: name.to_string(),
            assessment_level,
            risk_score,
            financial: FinancialRequirement::for_assessment_level(assessment_level),
        }
    }
}

/// A ranked program level with its English entry requirements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramLevel {
    pub key: String,
    #[serde(skip)]
    pub aliases: Vec<String>,
    pub name: String,
    pub rank: u8,
    #[serde(rename = "requiredIELTS")]
    pub required_ielts: f64,
    #[serde(rename = "requiredTOEFL")]
    pub required_toefl: f64,
    #[serde(rename = "requiredPTE")]
    pub required_pte: f64,
    pub financial_requirement: u32,
    /// Overall assessment score at which the level is considered met.
    pub required_score: i16,
}

impl ProgramLevel {
    /// Minimum score for the given test, or `None` for native speakers.
    pub fn required_for(&self, test: EnglishProficiency) -> Option<f64> {
        match test {
            EnglishProficiency::Native => None,
            EnglishProficiency::Ielts => Some(self.required_ielts),
            EnglishProficiency::Toefl => Some(self.required_toefl),
            EnglishProficiency::Pte => Some(self.required_pte),
        }
    }

    fn matches(&self, normalized: &str) -> bool {
        self.key == normalized || self.aliases.iter().any(|alias| alias == normalized)
    }
}

/// Study field catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyField {
    pub key: String,
    pub name: String,
    pub description: String,
    /// Demand weighting from 1 (standard) to 3 (priority skills).
    pub priority_level: u8,
}

/// Read-only lookup tables consulted by every scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    countries: BTreeMap<String, CountryProfile>,
    programs: Vec<ProgramLevel>,
    fields: BTreeMap<String, StudyField>,
}

static STANDARD: OnceLock<ReferenceData> = OnceLock::new();

const BASE_DOCUMENTS: [&str; 4] = [
    "Valid passport",
    "Confirmation of Enrolment (CoE)",
    "Genuine Student statement",
    "Overseas Student Health Cover (OSHC) policy",
];

impl ReferenceData {
    pub fn new(
        countries: Vec<CountryProfile>,
        mut programs: Vec<ProgramLevel>,
        fields: Vec<StudyField>,
    ) -> Self {
        programs.sort_by_key(|program| program.rank);
        Self {
            countries: countries
                .into_iter()
                .map(|country| (country.code.clone(), country))
                .collect(),
            programs,
            fields: fields
                .into_iter()
                .map(|field| (field.key.clone(), field))
                .collect(),
        }
    }

    /// Process-wide tables, built on first use.
    pub fn standard() -> &'static Self {
        STANDARD.get_or_init(|| Self::new(standard_countries(), standard_programs(), standard_fields()))
    }

    pub fn country_info(&self, code: &str) -> Option<&CountryProfile> {
        self.countries.get(&code.trim().to_ascii_uppercase())
    }

    pub fn countries(&self) -> impl Iterator<Item = &CountryProfile> {
        self.countries.values()
    }

    /// Falls back to [`FinancialRequirement::DEFAULT`] for unlisted countries.
    pub fn financial_requirements(&self, code: &str) -> FinancialRequirement {
        self.country_info(code)
            .map(|country| country.financial)
            .unwrap_or(FinancialRequirement::DEFAULT)
    }

    pub fn program_requirements(&self, level: &str) -> Option<&ProgramLevel> {
        let normalized = normalize_key(level);
        self.programs
            .iter()
            .find(|program| program.matches(&normalized))
    }

    pub fn programs(&self) -> &[ProgramLevel] {
        &self.programs
    }

    pub fn required_score_for_level(&self, level: &str) -> Option<i16> {
        self.program_requirements(level)
            .map(|program| program.required_score)
    }

    pub fn study_field_info(&self, key: &str) -> Option<&StudyField> {
        self.fields.get(&normalize_key(key))
    }

    pub fn study_fields(&self) -> impl Iterator<Item = &StudyField> {
        self.fields.values()
    }

    /// Checklist shown to the applicant once a country is chosen.
    pub fn document_requirements(&self, code: &str) -> Vec<String> {
        if code.trim().is_empty() {
            return Vec::new();
        }

        let mut documents: Vec<String> = BASE_DOCUMENTS.iter().map(|doc| doc.to_string()).collect();
        let level = self
            .country_info(code)
            .map(|country| country.assessment_level)
            .unwrap_or(3);

        if level >= 2 {
            documents.push("Evidence of funds for the first year of study".to_string());
            documents.push("Certified academic transcripts".to_string());
        }
        if level >= 3 {
            documents.push("Certified English translations of all documents".to_string());
            documents.push("Statement of study gaps and employment history".to_string());
        }

        documents
    }
}

/// Upper-cases a lookup key and maps spaces and hyphens to underscores.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

fn standard_countries() -> Vec<CountryProfile> {
    vec![
        CountryProfile::new("US", "United States", 1, 10),
        CountryProfile::new("GB", "United Kingdom", 1, 12),
        CountryProfile::new("CA", "Canada", 1, 12),
        CountryProfile::new("DE", "Germany", 1, 15),
        CountryProfile::new("FR", "France", 1, 14),
        CountryProfile::new("JP", "Japan", 1, 15),
        CountryProfile::new("KR", "South Korea", 1, 14),
        CountryProfile::new("SG", "Singapore", 1, 15),
        CountryProfile::new("CN", "China", 2, 9),
        CountryProfile::new("BR", "Brazil", 2, 8),
        CountryProfile::new("ID", "Indonesia", 2, 8),
        CountryProfile::new("MY", "Malaysia", 2, 10),
        CountryProfile::new("TH", "Thailand", 2, 8),
        CountryProfile::new("VN", "Vietnam", 2, 7),
        CountryProfile::new("PH", "Philippines", 2, 7),
        CountryProfile::new("CO", "Colombia", 2, 7),
        CountryProfile::new("IN", "India", 3, 5),
        CountryProfile::new("NP", "Nepal", 3, 4),
        CountryProfile::new("PK", "Pakistan", 3, 4),
        CountryProfile::new("BD", "Bangladesh", 3, 4),
        CountryProfile::new("LK", "Sri Lanka", 3, 5),
        CountryProfile::new("NG", "Nigeria", 3, 3),
    ]
}

fn program(
    key: &str,
    aliases: &[&str],
    name: &str,
    rank: u8,
    english: (f64, f64, f64),
    financial_requirement: u32,
    required_score: i16,
) -> ProgramLevel {
    let (required_ielts, required_toefl, required_pte) = english;
    ProgramLevel {
        key: key.to_string(),
        aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        name: name.to_string(),
        rank,
        required_ielts,
        required_toefl,
        required_pte,
        financial_requirement,
        required_score,
    }
}

fn standard_programs() -> Vec<ProgramLevel> {
    vec![
        program("CERTIFICATE", &[], "Certificate", 1, (5.5, 46.0, 42.0), 15_000, 50),
        program("DIPLOMA", &[], "Diploma", 2, (5.5, 46.0, 42.0), 15_000, 55),
        program(
            "BACHELOR",
            &["BACHELORS"],
            "Bachelor Degree",
            3,
            (6.0, 60.0, 50.0),
            20_000,
            60,
        ),
        program(
            "MASTERS",
            &["MASTER"],
            "Masters Degree",
            4,
            (6.5, 79.0, 58.0),
            25_000,
            65,
        ),
        program("PHD", &["DOCTORATE"], "Doctorate", 5, (6.5, 79.0, 58.0), 25_000, 70),
    ]
}

fn field(key: &str, name: &str, description: &str, priority_level: u8) -> StudyField {
    StudyField {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        priority_level,
    }
}

fn standard_fields() -> Vec<StudyField> {
    vec![
        field(
            "IT",
            "Information Technology",
            "Software engineering, data science and cyber security",
            3,
        ),
        field(
            "ENGINEERING",
            "Engineering",
            "Civil, mechanical, electrical and mining engineering",
            3,
        ),
        field(
            "HEALTH",
            "Health & Nursing",
            "Nursing, allied health and public health",
            3,
        ),
        field(
            "EDUCATION",
            "Education",
            "Early childhood, primary and secondary teaching",
            2,
        ),
        field(
            "SCIENCE",
            "Science",
            "Natural, physical and environmental sciences",
            2,
        ),
        field(
            "AGRICULTURE",
            "Agriculture",
            "Agricultural science and agribusiness",
            2,
        ),
        field(
            "BUSINESS",
            "Business & Management",
            "Accounting, finance, marketing and management",
            1,
        ),
        field(
            "ARTS",
            "Arts & Humanities",
            "Creative arts, languages and social sciences",
            1,
        ),
        field(
            "HOSPITALITY",
            "Hospitality & Tourism",
            "Hotel management, culinary arts and tourism",
            1,
        ),
    ]
}
