//! Route template compilation.
//!
//! # Responsibilities
//! - Turn templates like `/tasks/:id/complete` into anchored matchers
//! - Extract named parameters from concrete paths
//!
//! # Design Decisions
//! - Parameters match one or more non-slash characters
//! - Literal segments are escaped and matched exactly, so a suffix after a
//!   parameter is never absorbed into the capture
//! - Templates are validated at compile time, not at match time

use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

/// Error type for template compilation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("route template must start with '/': {0:?}")]
    MissingLeadingSlash(String),

    #[error("empty parameter name in template {0:?}")]
    EmptyParam(String),

    #[error("invalid parameter name {name:?} in template {template:?}")]
    InvalidParam { template: String, name: String },

    #[error("duplicate parameter {name:?} in template {template:?}")]
    DuplicateParam { template: String, name: String },

    #[error("template {template:?} did not compile: {reason}")]
    Regex { template: String, reason: String },
}

/// Named values captured from a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: HashMap<String, String>,
}

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A compiled route template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    params: Vec<String>,
}

impl PathPattern {
    /// Compile `template`. Segments of the form `:name` become parameters.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        if !template.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(template.to_string()));
        }

        let mut source = String::from("^");
        let mut params: Vec<String> = Vec::new();

        for segment in template.split('/').skip(1) {
            source.push('/');

            let Some(name) = segment.strip_prefix(':') else {
                source.push_str(&regex::escape(segment));
                continue;
            };

            if name.is_empty() {
                return Err(PatternError::EmptyParam(template.to_string()));
            }
            if !is_valid_name(name) {
                return Err(PatternError::InvalidParam {
                    template: template.to_string(),
                    name: name.to_string(),
                });
            }
            if params.iter().any(|p| p == name) {
                return Err(PatternError::DuplicateParam {
                    template: template.to_string(),
                    name: name.to_string(),
                });
            }

            source.push_str(&format!("(?P<{name}>[^/]+)"));
            params.push(name.to_string());
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| PatternError::Regex {
            template: template.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { regex, params })
    }

    /// Parameter names in template order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path`, returning the captured parameters on success.
    pub fn captures(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;
        let values = self
            .params
            .iter()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();
        Some(PathParams { values })
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_template() {
        let pattern = PathPattern::compile("/tasks").unwrap();
        assert!(pattern.is_match("/tasks"));
        assert!(!pattern.is_match("/tasks/1"));
        assert!(!pattern.is_match("/taskss"));
        assert!(pattern.captures("/tasks").unwrap().is_empty());
    }

    #[test]
    fn test_id_param() {
        let pattern = PathPattern::compile("/tasks/:id").unwrap();
        let params = pattern.captures("/tasks/abc-123").unwrap();
        assert_eq!(params.get("id"), Some("abc-123"));
        assert!(!pattern.is_match("/tasks/"));
        assert!(!pattern.is_match("/tasks/abc-123/complete"));
    }

    #[test]
    fn test_literal_suffix_after_param() {
        let pattern = PathPattern::compile("/tasks/:id/complete").unwrap();
        let params = pattern.captures("/tasks/abc-123/complete").unwrap();
        assert_eq!(params.get("id"), Some("abc-123"));
        assert_eq!(params.len(), 1);

        assert!(!pattern.is_match("/tasks/abc-123"));
        assert!(!pattern.is_match("/tasks/abc-123/completed"));
        assert!(!pattern.is_match("/tasks/a/b/complete"));
    }

    #[test]
    fn test_multiple_params() {
        let pattern = PathPattern::compile("/users/:user_id/tasks/:task").unwrap();
        assert_eq!(pattern.params(), ["user_id", "task"]);

        let params = pattern.captures("/users/u1/tasks/t9").unwrap();
        assert_eq!(params.get("user_id"), Some("u1"));
        assert_eq!(params.get("task"), Some("t9"));
    }

    #[test]
    fn test_literal_segments_are_escaped() {
        let pattern = PathPattern::compile("/v1.0/items").unwrap();
        assert!(pattern.is_match("/v1.0/items"));
        assert!(!pattern.is_match("/v1x0/items"));
    }

    #[test]
    fn test_invalid_templates() {
        assert!(matches!(
            PathPattern::compile("tasks"),
            Err(PatternError::MissingLeadingSlash(_))
        ));
        assert!(matches!(
            PathPattern::compile("/tasks/:"),
            Err(PatternError::EmptyParam(_))
        ));
        assert!(matches!(
            PathPattern::compile("/tasks/:1d"),
            Err(PatternError::InvalidParam { .. })
        ));
        assert!(matches!(
            PathPattern::compile("/a/:id/b/:id"),
            Err(PatternError::DuplicateParam { .. })
        ));
    }
}
