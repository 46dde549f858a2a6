// src/types/company.rs
//! Company records produced by the extraction pipeline

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::error::ExtractionError;

pub const NOT_AVAILABLE: &str = "Not available";

/// The eight content fields, in output order.
pub const COMPANY_FIELDS: [&str; 8] = [
    "company_name",
    "industry_type",
    "funding",
    "founding_stage",
    "number_of_employees",
    "location",
    "company_description",
    "type_of_company",
];

/// One organic search result. `snippet` doubles as the industry hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub company_name: String,
    pub industry_type: String,
    pub funding: String,
    pub founding_stage: String,
    pub number_of_employees: String,
    pub location: String,
    pub company_description: String,
    pub type_of_company: String,
}

impl CompanyProfile {
    /// Build a profile from the object the model returned. Missing or null
    /// fields become "Not available"; non-string values keep their JSON text.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let field = |name: &str| -> String {
            match object.get(name) {
                None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
                Some(Value::String(s)) if s.trim().is_empty() => NOT_AVAILABLE.to_string(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            }
        };

        Self {
            company_name: field("company_name"),
            industry_type: field("industry_type"),
            funding: field("funding"),
            founding_stage: field("founding_stage"),
            number_of_employees: field("number_of_employees"),
            location: field("location"),
            company_description: field("company_description"),
            type_of_company: field("type_of_company"),
        }
    }

    /// Field values in `COMPANY_FIELDS` order.
    pub fn values(&self) -> [&str; 8] {
        [
            &self.company_name,
            &self.industry_type,
            &self.funding,
            &self.founding_stage,
            &self.number_of_employees,
            &self.location,
            &self.company_description,
            &self.type_of_company,
        ]
    }
}

#[derive(Debug)]
enum Outcome {
    Extracted {
        profile: CompanyProfile,
        linkedin_url: String,
    },
    Failed {
        error: ExtractionError,
        linkedin_url: Option<String>,
    },
}

/// Result of one query. Either a full profile with its source URL, or an
/// error with whatever URL was known when the pipeline stopped.
#[derive(Debug)]
pub struct CompanyRecord {
    query: String,
    outcome: Outcome,
}

impl CompanyRecord {
    pub fn extracted(query: &str, profile: CompanyProfile, linkedin_url: String) -> Self {
        Self {
            query: query.to_string(),
            outcome: Outcome::Extracted {
                profile,
                linkedin_url,
            },
        }
    }

    pub fn failed(query: &str, error: ExtractionError, linkedin_url: Option<String>) -> Self {
        Self {
            query: query.to_string(),
            outcome: Outcome::Failed {
                error,
                linkedin_url,
            },
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn profile(&self) -> Option<&CompanyProfile> {
        match &self.outcome {
            Outcome::Extracted { profile, .. } => Some(profile),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn linkedin_url(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Extracted { linkedin_url, .. } => Some(linkedin_url),
            Outcome::Failed { linkedin_url, .. } => linkedin_url.as_deref(),
        }
    }

    pub fn error(&self) -> Option<&ExtractionError> {
        match &self.outcome {
            Outcome::Extracted { .. } => None,
            Outcome::Failed { error, .. } => Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }
}

#[derive(Serialize)]
struct RecordView<'a> {
    #[serde(flatten)]
    profile: Option<&'a CompanyProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linkedin_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ExtractionError>,
}

impl Serialize for CompanyRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordView {
            profile: self.profile(),
            linkedin_url: self.linkedin_url(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}

/// A generated article that was written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    pub title: String,
    pub body: String,
    pub file_path: PathBuf,
}

impl ArticleRecord {
    pub fn preview(&self, max_chars: usize) -> String {
        if self.body.chars().count() > max_chars {
            let head: String = self.body.chars().take(max_chars).collect();
            format!("{}...", head)
        } else {
            self.body.clone()
        }
    }
}

/// A title whose article could not be generated. Never written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleFailure {
    pub title: String,
    pub error: String,
}
