//! Reference paths.
//!
//! A reference path is the restricted form of JSONPath used by state
//! input/output processing fields (`InputPath`, `OutputPath`, `ResultPath`)
//! and by payload templates: it must identify a single node, so the
//! operators `@`, `,` (union), `:` (slice), `?` (filter) and `*` (wildcard)
//! are not allowed. Paths rooted at `$$` address the context object instead
//! of the state input.

use serde_json::Value;

use crate::error::WorkflowError;

const FORBIDDEN_OPERATORS: [char; 5] = ['@', ',', ':', '?', '*'];

/// A validated reference path.
///
/// # Example
///
/// ```
/// use workflow_gen::path::ReferencePath;
///
/// let path = ReferencePath::parse("$.resultpath.outputpath").unwrap();
/// assert!(!path.is_context_path());
///
/// let ctx = ReferencePath::parse("$$.aaa").unwrap();
/// assert!(ctx.is_context_path());
///
/// assert!(ReferencePath::parse("$.a[?]").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePath {
    path: String,
    is_context_path: bool,
}

impl ReferencePath {
    /// Parses and validates a reference path.
    pub fn parse(path: &str) -> Result<Self, WorkflowError> {
        let mut rest = path.strip_prefix('$').ok_or_else(|| {
            WorkflowError::validation(format!("reference path {path:?} must begin with '$'"))
        })?;

        let mut is_context_path = false;
        if let Some(stripped) = rest.strip_prefix('$') {
            is_context_path = true;
            rest = stripped;
        }

        if let Some(op) = rest.chars().find(|c| FORBIDDEN_OPERATORS.contains(c)) {
            return Err(WorkflowError::validation(format!(
                "reference path {path:?} must not contain the operator {op:?}"
            )));
        }

        let mut chars = rest.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    let mut len = 0;
                    while let Some(&next) = chars.peek() {
                        if next == '.' || next == '[' {
                            break;
                        }
                        chars.next();
                        len += 1;
                    }
                    if len == 0 {
                        return Err(WorkflowError::validation(format!(
                            "reference path {path:?} contains an empty field"
                        )));
                    }
                }
                '[' => {
                    let mut len = 0;
                    let mut closed = false;
                    for next in chars.by_ref() {
                        if next == ']' {
                            closed = true;
                            break;
                        }
                        len += 1;
                    }
                    if !closed || len == 0 {
                        return Err(WorkflowError::validation(format!(
                            "reference path {path:?} contains a malformed bracket"
                        )));
                    }
                }
                _ => {
                    return Err(WorkflowError::validation(format!(
                        "reference path {path:?} has an unexpected {c:?} after '$'"
                    )));
                }
            }
        }

        Ok(Self {
            path: path.to_string(),
            is_context_path,
        })
    }

    /// The path as written, including the `$$` prefix for context paths.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Returns true if this path addresses the context object.
    pub fn is_context_path(&self) -> bool {
        self.is_context_path
    }
}

impl std::fmt::Display for ReferencePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Validates a reference path without keeping the parsed form.
pub fn validate(path: &str) -> Result<(), WorkflowError> {
    ReferencePath::parse(path).map(|_| ())
}

/// Validates the dynamic values of a payload template.
///
/// In `Parameters` and `ResultSelector` templates, any object key ending in
/// `.$` declares that its value is a reference path to be resolved at
/// execution time. Static values are passed through untouched.
pub fn validate_payload_template(template: &Value) -> Result<(), WorkflowError> {
    match template {
        Value::Object(map) => {
            for (key, value) in map {
                if key.ends_with(".$") {
                    let path = value.as_str().ok_or_else(|| {
                        WorkflowError::validation(format!(
                            "payload template key {key:?} must hold a string path"
                        ))
                    })?;
                    validate(path)?;
                } else {
                    validate_payload_template(value)?;
                }
            }
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                validate_payload_template(item)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_accepts_root() {
        let path = ReferencePath::parse("$").unwrap();
        assert_eq!(path.as_str(), "$");
        assert!(!path.is_context_path());
    }

    #[test]
    fn test_accepts_dotted_fields() {
        for path in ["$.bool", "$.args", "$.resultpath.outputpath"] {
            assert!(ReferencePath::parse(path).is_ok(), "rejected {path}");
        }
    }

    #[test]
    fn test_accepts_brackets() {
        assert!(ReferencePath::parse("$[0]").is_ok());
        assert!(ReferencePath::parse("$.items[3]").is_ok());
    }

    #[test]
    fn test_context_path() {
        let path = ReferencePath::parse("$$.aaa").unwrap();
        assert!(path.is_context_path());
        assert_eq!(path.as_str(), "$$.aaa");

        let root = ReferencePath::parse("$$").unwrap();
        assert!(root.is_context_path());
    }

    #[test]
    fn test_rejects_unrooted() {
        assert!(ReferencePath::parse("").is_err());
        assert!(ReferencePath::parse("foo").is_err());
        assert!(ReferencePath::parse(".bar").is_err());
    }

    #[test]
    fn test_rejects_operators() {
        for path in ["$.a[?]", "$.a,b", "$[1:2]", "$.*", "$.a[@.b]"] {
            assert!(ReferencePath::parse(path).is_err(), "accepted {path}");
        }
    }

    #[test]
    fn test_rejects_empty_fields() {
        for path in ["$.", "$..a", "$.a..b", "$.a.", "$[]", "$.a["] {
            assert!(ReferencePath::parse(path).is_err(), "accepted {path}");
        }
    }

    #[test]
    fn test_payload_template_valid() {
        let template = json!({
            "aaa": 111,
            "old.$": "$.args",
            "args": ["param0", "param1", "param2"],
            "nested": { "ctx_aaa.$": "$$.aaa" },
        });
        assert!(validate_payload_template(&template).is_ok());
    }

    #[test]
    fn test_payload_template_invalid_path() {
        let template = json!({ "old.$": "args" });
        assert!(validate_payload_template(&template).is_err());
    }

    #[test]
    fn test_payload_template_non_string_path() {
        let template = json!({ "old.$": 42 });
        assert!(validate_payload_template(&template).is_err());
    }

    fn field() -> impl Strategy<Value = String> {
        "[a-zA-Z_][a-zA-Z0-9_]{0,8}"
    }

    proptest! {
        /// Property: any dotted chain of plain fields is a valid reference path.
        #[test]
        fn prop_dotted_fields_parse(fields in proptest::collection::vec(field(), 1..5)) {
            let path = format!("$.{}", fields.join("."));
            prop_assert!(ReferencePath::parse(&path).is_ok());
        }

        /// Property: the same chain rooted at `$$` parses as a context path.
        #[test]
        fn prop_context_paths_parse(fields in proptest::collection::vec(field(), 1..5)) {
            let path = format!("$$.{}", fields.join("."));
            let parsed = ReferencePath::parse(&path).unwrap();
            prop_assert!(parsed.is_context_path());
        }
    }
}
