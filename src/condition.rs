//! Conditions for Choice state rules.
//!
//! A condition compares a reference-path variable against a literal, or
//! combines other conditions with `And`, `Or`, and `Not`. Conditions render
//! to the comparison-object form of the state language, e.g.
//! `{"Variable": "$.bool", "BooleanEquals": true}`.

use serde_json::{json, Map, Value};

use crate::error::WorkflowError;
use crate::path;

/// A condition for a Choice state rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Variable equals the given boolean.
    BooleanEquals { variable: String, value: bool },
    /// Variable equals the given string.
    StringEquals { variable: String, value: String },
    /// Variable equals the given number.
    NumericEquals { variable: String, value: f64 },
    /// Variable is strictly less than the given number.
    NumericLessThan { variable: String, value: f64 },
    /// Variable is strictly greater than the given number.
    NumericGreaterThan { variable: String, value: f64 },
    /// Variable is present in the input.
    IsPresent { variable: String },
    /// All of the nested conditions hold.
    And(Vec<Condition>),
    /// At least one of the nested conditions holds.
    Or(Vec<Condition>),
    /// The nested condition does not hold.
    Not(Box<Condition>),
}

impl Condition {
    /// Matches when the value at `variable` equals `value`.
    pub fn boolean_equals(variable: impl Into<String>, value: bool) -> Self {
        Self::BooleanEquals {
            variable: variable.into(),
            value,
        }
    }

    /// Matches when the string at `variable` equals `value`.
    pub fn string_equals(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Self::StringEquals {
            variable: variable.into(),
            value: value.into(),
        }
    }

    /// Matches when the number at `variable` equals `value`.
    pub fn numeric_equals(variable: impl Into<String>, value: f64) -> Self {
        Self::NumericEquals {
            variable: variable.into(),
            value,
        }
    }

    /// Matches when the number at `variable` is less than `value`.
    pub fn numeric_less_than(variable: impl Into<String>, value: f64) -> Self {
        Self::NumericLessThan {
            variable: variable.into(),
            value,
        }
    }

    /// Matches when the number at `variable` is greater than `value`.
    pub fn numeric_greater_than(variable: impl Into<String>, value: f64) -> Self {
        Self::NumericGreaterThan {
            variable: variable.into(),
            value,
        }
    }

    /// Matches when `variable` is present in the input.
    pub fn is_present(variable: impl Into<String>) -> Self {
        Self::IsPresent {
            variable: variable.into(),
        }
    }

    /// Matches when all of `conditions` match.
    pub fn and(conditions: Vec<Condition>) -> Self {
        Self::And(conditions)
    }

    /// Matches when at least one of `conditions` matches.
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self::Or(conditions)
    }

    /// Matches when `condition` does not match.
    pub fn not(condition: Condition) -> Self {
        Self::Not(Box::new(condition))
    }

    /// Validates every variable path referenced by this condition.
    pub(crate) fn validate(&self) -> Result<(), WorkflowError> {
        match self {
            Self::BooleanEquals { variable, .. }
            | Self::StringEquals { variable, .. }
            | Self::NumericEquals { variable, .. }
            | Self::NumericLessThan { variable, .. }
            | Self::NumericGreaterThan { variable, .. }
            | Self::IsPresent { variable } => path::validate(variable),
            Self::And(conditions) | Self::Or(conditions) => {
                conditions.iter().try_for_each(Condition::validate)
            }
            Self::Not(condition) => condition.validate(),
        }
    }

    /// Renders this condition as its comparison object.
    pub(crate) fn to_json(&self) -> Value {
        fn comparison(variable: &str, operator: &str, value: Value) -> Value {
            let mut map = Map::new();
            map.insert("Variable".to_string(), json!(variable));
            map.insert(operator.to_string(), value);
            Value::Object(map)
        }

        match self {
            Self::BooleanEquals { variable, value } => {
                comparison(variable, "BooleanEquals", json!(value))
            }
            Self::StringEquals { variable, value } => {
                comparison(variable, "StringEquals", json!(value))
            }
            Self::NumericEquals { variable, value } => {
                comparison(variable, "NumericEquals", json!(value))
            }
            Self::NumericLessThan { variable, value } => {
                comparison(variable, "NumericLessThan", json!(value))
            }
            Self::NumericGreaterThan { variable, value } => {
                comparison(variable, "NumericGreaterThan", json!(value))
            }
            Self::IsPresent { variable } => comparison(variable, "IsPresent", json!(true)),
            Self::And(conditions) => {
                json!({ "And": conditions.iter().map(Condition::to_json).collect::<Vec<_>>() })
            }
            Self::Or(conditions) => {
                json!({ "Or": conditions.iter().map(Condition::to_json).collect::<Vec<_>>() })
            }
            Self::Not(condition) => json!({ "Not": condition.to_json() }),
        }
    }
}
