// src/linkedin_analysis/output_parser.rs
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::{error, warn};

use crate::error::ParseFailure;

fn fenced_json_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("fenced block pattern is valid")
    })
}

/// Parse the first ```json fenced block of a completion as a JSON object.
pub fn extract_json_object(completion: &str) -> Result<Map<String, Value>, ParseFailure> {
    let Some(captures) = fenced_json_block().captures(completion) else {
        warn!("No JSON block found in model output");
        return Err(ParseFailure::NotFound);
    };

    let block = &captures[1];
    match serde_json::from_str::<Value>(block) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => {
            let reason = format!("expected a JSON object, found {}", json_kind(&other));
            error!("JSON decode failed: {}", reason);
            Err(ParseFailure::Malformed(reason))
        }
        Err(e) => {
            error!("JSON decode failed: {}", e);
            Err(ParseFailure::Malformed(e.to_string()))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_eight_keys() {
        let expected = json!({
            "company_name": "Stripe",
            "industry_type": "Financial Services",
            "funding": "Series I",
            "founding_stage": "Late stage",
            "number_of_employees": "5,001-10,000",
            "location": "South San Francisco, CA",
            "company_description": "Payments infrastructure for the internet.",
            "type_of_company": "private"
        });
        let completion = format!(
            "Here is the data:\n```json\n{}\n```\nLet me know if you need more.",
            serde_json::to_string_pretty(&expected).unwrap()
        );

        let object = extract_json_object(&completion).unwrap();
        assert_eq!(Value::Object(object), expected);
    }

    #[test]
    fn test_no_block() {
        assert_eq!(
            extract_json_object("{\"company_name\": \"Stripe\"}"),
            Err(ParseFailure::NotFound)
        );
        assert_eq!(
            extract_json_object("```\n{\"a\": 1}\n```"),
            Err(ParseFailure::NotFound)
        );
    }

    #[test]
    fn test_malformed_block() {
        let result = extract_json_object("```json\n{\"company_name\": \"Stripe\",}\n```");
        assert!(matches!(result, Err(ParseFailure::Malformed(_))));
    }

    #[test]
    fn test_first_block_wins() {
        let completion = "```json\n{\"n\": 1}\n```\ntext\n```json\n{\"n\": 2}\n```";
        let object = extract_json_object(completion).unwrap();
        assert_eq!(object["n"], 1);
    }

    #[test]
    fn test_nested_object() {
        let completion = "```json\n{\"a\": {\"b\": \"c\"}, \"d\": \"e\"}\n```";
        let object = extract_json_object(completion).unwrap();
        assert_eq!(object["a"]["b"], "c");
        assert_eq!(object["d"], "e");
    }
}
