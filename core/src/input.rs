use std::collections::HashMap;
use anyhow::{anyhow, Result};

use crate::service::driver_filter::DriverQuery;

pub const DRIVER_QUERY_KEYS: [&str; 1] = ["status"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    pub metadata: HashMap<String, String>,
}

/// Splits command words into free text and `key:value` pairs.
///
/// A word is only taken as a pair when its key abbreviates one of
/// `known_keys`; every other word, colons included, stays in the text in order.
pub fn parse_args(args: &[String], known_keys: &[&str]) -> Result<ParsedInput> {
    let mut text_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && known_keys.iter().any(|k| k.starts_with(key)) {
                metadata.insert(expand_key(key, known_keys)?, value.to_string());
                continue;
            }
        }
        text_parts.push(arg.as_str());
    }

    Ok(ParsedInput {
        text: text_parts.join(" "),
        metadata,
    })
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// `doe st:ACTIVE` -> search "doe", status "ACTIVE".
pub fn parse_driver_query(args: &[String], default_status: &str) -> Result<DriverQuery> {
    let parsed = parse_args(args, &DRIVER_QUERY_KEYS)?;
    let status = parsed
        .metadata
        .get("status")
        .map(String::as_str)
        .unwrap_or(default_status);

    Ok(DriverQuery::new(parsed.text, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::driver_filter::StatusFilter;

    fn words(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&words(&["james", "doe", "status:ACTIVE"]), &DRIVER_QUERY_KEYS).unwrap();
        assert_eq!(parsed.text, "james doe");
        assert_eq!(parsed.metadata.get("status"), Some(&"ACTIVE".to_string()));
    }

    #[test]
    fn test_non_key_colons_stay_in_text() {
        let parsed = parse_args(&words(&["+44:20", ":x"]), &DRIVER_QUERY_KEYS).unwrap();
        assert_eq!(parsed.text, "+44:20 :x");
        assert!(parsed.metadata.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_search_text() {
        let parsed = parse_args(&words(&["tel:555", "doe", "st:ACTIVE", "mail:x@y"]), &DRIVER_QUERY_KEYS).unwrap();
        assert_eq!(parsed.text, "tel:555 doe mail:x@y");
        assert_eq!(parsed.metadata.len(), 1);
        assert_eq!(parsed.metadata.get("status"), Some(&"ACTIVE".to_string()));
    }

    #[test]
    fn test_parse_args_ambiguous_key() {
        let candidates = ["status", "search"];
        assert!(parse_args(&words(&["s:x"]), &candidates).is_err());

        let parsed = parse_args(&words(&["se:doe", "sta:ACTIVE"]), &candidates).unwrap();
        assert_eq!(parsed.metadata.get("search"), Some(&"doe".to_string()));
        assert_eq!(parsed.metadata.get("status"), Some(&"ACTIVE".to_string()));
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["status", "search", "year"];

        assert_eq!(expand_key("st", &candidates).unwrap(), "status");
        assert_eq!(expand_key("status", &candidates).unwrap(), "status");
        assert_eq!(expand_key("y", &candidates).unwrap(), "year");

        // Ambiguous
        assert!(expand_key("s", &candidates).is_err());

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_parse_driver_query() {
        let query = parse_driver_query(&words(&["doe", "st:ON_LEAVE"]), "ALL").unwrap();
        assert_eq!(query.search, "doe");
        assert_eq!(query.status, StatusFilter::Only("ON_LEAVE".to_string()));

        let query = parse_driver_query(&[], "ALL").unwrap();
        assert_eq!(query, DriverQuery::default());

        let query = parse_driver_query(&words(&["tel:555"]), "ALL").unwrap();
        assert_eq!(query.search, "tel:555");
        assert_eq!(query.status, StatusFilter::All);

        let query = parse_driver_query(&words(&["colour:red"]), "ACTIVE").unwrap();
        assert_eq!(query.search, "colour:red");
        assert_eq!(query.status, StatusFilter::Only("ACTIVE".to_string()));
    }
}
