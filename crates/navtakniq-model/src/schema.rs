// SPDX-License-Identifier: Apache-2.0

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// One caller-suppliable field of an insert shape, keyed by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
}

impl FieldRule {
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationIssue {
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    #[must_use]
    pub fn at(field: &str, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.to_string()],
            message: message.into(),
        }
    }

    #[must_use]
    pub fn root(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Dotted path of the offending field; empty for whole-document issues.
    #[must_use]
    pub fn field(&self) -> String {
        self.path.join(".")
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field(), self.message)
        }
    }
}

impl std::error::Error for ValidationIssue {}

#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Caller-suppliable subset of an entity.
///
/// `FIELDS` is the declaration order used for reporting, so the first issue
/// always names the earliest offending field. Keys outside `FIELDS` are
/// dropped before decoding.
pub trait InsertShape: Serialize + DeserializeOwned {
    const FIELDS: &'static [FieldRule];
    /// Entity fields the persistence layer assigns and callers never supply.
    const SYSTEM_FIELDS: &'static [&'static str];

    fn validate(input: &Value) -> Result<Self, Vec<ValidationIssue>> {
        let Some(object) = input.as_object() else {
            return Err(vec![ValidationIssue::root(format!(
                "Expected object, received {}",
                json_kind(input)
            ))]);
        };
        let issues = check_fields(Self::FIELDS, object);
        if !issues.is_empty() {
            return Err(issues);
        }
        let declared: Map<String, Value> = Self::FIELDS
            .iter()
            .filter_map(|rule| {
                object
                    .get(rule.name)
                    .map(|value| (rule.name.to_string(), value.clone()))
            })
            .collect();
        let typed: Self = serde_json::from_value(Value::Object(declared))
            .map_err(|e| vec![ValidationIssue::root(e.to_string())])?;
        typed.refine()?;
        Ok(typed)
    }

    /// Entity-specific rules run after the field checks pass.
    fn refine(&self) -> Result<(), Vec<ValidationIssue>> {
        Ok(())
    }

    /// Re-runs the runtime rules against an already typed value.
    fn check(&self) -> Result<(), Vec<ValidationIssue>> {
        let value =
            serde_json::to_value(self).map_err(|e| vec![ValidationIssue::root(e.to_string())])?;
        Self::validate(&value).map(|_| ())
    }
}

fn check_fields(rules: &[FieldRule], object: &Map<String, Value>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for rule in rules {
        match object.get(rule.name) {
            None | Some(Value::Null) => {
                if rule.required {
                    issues.push(ValidationIssue::at(rule.name, "Required"));
                }
            }
            Some(Value::String(text)) => {
                if rule.required && text.trim().is_empty() {
                    issues.push(ValidationIssue::at(
                        rule.name,
                        format!("{} must not be empty", rule.name),
                    ));
                }
            }
            Some(other) => issues.push(ValidationIssue::at(
                rule.name,
                format!("Expected string, received {}", json_kind(other)),
            )),
        }
    }
    issues
}
