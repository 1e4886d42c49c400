//! Run configuration, passed explicitly into every engine entry point.
use crate::error::ConfigError;
use indexmap::IndexMap;
use std::env;

pub const DEFAULT_SOURCE_LABEL: &str = "English";

/// Reserved vocabulary of the workflow format.
///
/// These tags decide node behavior at runtime, so they live in one value
/// rather than being scattered as literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSchema {
    /// `template_id` of nodes that never continue.
    pub terminal_template: String,
    /// `template_id` of pages that branch on a nested reason selection.
    pub sub_choice_template: String,
    /// Node `type` of the choice page.
    pub choice_page_type: String,
    /// `configuration.data_name` identifying the top-level choice page.
    pub choice_marker: String,
    /// `lval` compared by the choice page's routing conditions.
    pub choice_field: String,
    /// Templates that route automatically; their `title` is admin-only.
    pub auto_routing_templates: Vec<String>,
}

impl Default for WorkflowSchema {
    fn default() -> Self {
        Self {
            terminal_template: "thanks".to_string(),
            sub_choice_template: "visitreason".to_string(),
            choice_page_type: "page".to_string(),
            choice_marker: "language".to_string(),
            choice_field: "reason_id".to_string(),
            auto_routing_templates: ["invitecheck", "watchlistcheck", "hostcheck"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl WorkflowSchema {
    pub fn is_terminal(&self, template_id: &str) -> bool {
        template_id == self.terminal_template
    }

    pub fn is_sub_choice(&self, template_id: &str) -> bool {
        template_id == self.sub_choice_template
    }

    pub fn is_auto_routing(&self, template_id: &str) -> bool {
        self.auto_routing_templates.iter().any(|t| t == template_id)
    }
}

/// Options of one mirroring run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Selection label of the template branch, e.g. `English`.
    pub source_label: String,
    /// Explicit selection label -> locale code overrides.
    pub language_map: IndexMap<String, String>,
    /// When set, the document is validated but never saved.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        let mut language_map = IndexMap::new();
        language_map.insert(DEFAULT_SOURCE_LABEL.to_string(), "en".to_string());
        Self {
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            language_map,
            dry_run: true,
        }
    }
}

impl RunOptions {
    /// Loads options from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds options from an arbitrary variable lookup.
    ///
    /// Recognized keys: `UTSUSHI_SOURCE_LANGUAGE_LABEL`, `UTSUSHI_LANGUAGE_MAP`,
    /// `UTSUSHI_DRY_RUN`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(label) = lookup("UTSUSHI_SOURCE_LANGUAGE_LABEL") {
            let label = label.trim();
            if !label.is_empty() {
                options.source_label = label.to_string();
            }
        }

        if let Some(raw) = lookup("UTSUSHI_LANGUAGE_MAP") {
            options.language_map.extend(parse_language_map(&raw)?);
        }

        if let Some(raw) = lookup("UTSUSHI_DRY_RUN") {
            options.dry_run = parse_bool("UTSUSHI_DRY_RUN", &raw)?;
        }

        Ok(options)
    }
}

/// Parses a language map given either as a JSON object or as `Label:code,Label:code`.
pub fn parse_language_map(raw: &str) -> Result<IndexMap<String, String>, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        let parsed: IndexMap<String, serde_json::Value> =
            serde_json::from_str(trimmed).map_err(|e| ConfigError::InvalidValue {
                key: "UTSUSHI_LANGUAGE_MAP".to_string(),
                message: e.to_string(),
            })?;
        return Ok(parsed
            .into_iter()
            .map(|(label, code)| {
                let code = match code {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (label, code)
            })
            .collect());
    }

    Ok(trimmed
        .split(',')
        .filter_map(|part| part.split_once(':'))
        .map(|(label, code)| (label.trim().to_string(), code.trim().to_string()))
        .filter(|(label, _)| !label.is_empty())
        .collect())
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, found '{}'", other),
        }),
    }
}
