use std::collections::HashMap;
use utsushi::config::{RunOptions, WorkflowSchema, parse_language_map};
use utsushi::error::ConfigError;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let options = RunOptions::default();
    assert_eq!(options.source_label, "English");
    assert_eq!(options.language_map.get("English").map(String::as_str), Some("en"));
    assert!(options.dry_run);

    let schema = WorkflowSchema::default();
    assert!(schema.is_terminal("thanks"));
    assert!(schema.is_sub_choice("visitreason"));
    assert!(schema.is_auto_routing("watchlistcheck"));
}

#[test]
fn test_from_lookup_overrides() {
    let options = RunOptions::from_lookup(lookup_from(&[
        ("UTSUSHI_SOURCE_LANGUAGE_LABEL", " Deutsch "),
        ("UTSUSHI_LANGUAGE_MAP", r#"{"Deutsch": "de", "Vlaams": "nl-BE"}"#),
        ("UTSUSHI_DRY_RUN", "false"),
    ]))
    .expect("valid configuration");

    assert_eq!(options.source_label, "Deutsch");
    assert_eq!(options.language_map.get("Vlaams").map(String::as_str), Some("nl-BE"));
    assert_eq!(options.language_map.get("English").map(String::as_str), Some("en"));
    assert!(!options.dry_run);
}

#[test]
fn test_blank_source_label_keeps_default() {
    let options = RunOptions::from_lookup(lookup_from(&[("UTSUSHI_SOURCE_LANGUAGE_LABEL", "  ")]))
        .expect("valid configuration");
    assert_eq!(options.source_label, "English");
}

#[test]
fn test_invalid_values_are_rejected() {
    let result = RunOptions::from_lookup(lookup_from(&[("UTSUSHI_DRY_RUN", "maybe")]));
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    assert!(parse_language_map("{not json").is_err());
}

#[test]
fn test_csv_language_map() {
    let map = parse_language_map("Spanish:es, French : fr,broken,:xx").expect("valid map");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("French").map(String::as_str), Some("fr"));
}
