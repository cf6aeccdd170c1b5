//! A small rule engine over data-described validation rules.
//!
//! Each [`Rule`] names the field it checks, the check itself, the message
//! shown on failure and an optional activation condition on another field
//! (the discriminator). Rules whose condition does not hold are skipped
//! entirely. For every field only the first failing rule is reported.

use std::collections::BTreeMap;

use url::Url;

use super::snapshot::{FieldValue, FormSnapshot};

/// Predicate applied to a field value. `None` means the field is absent.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Text must be non-empty; a file counts as present.
    Required,
    /// Text, when present, must be one of the listed values.
    OneOf(&'static [&'static str]),
    /// Text, when present and non-empty, must be an absolute http(s) or ftp URL.
    Url,
    /// A file with a non-empty name must be selected.
    FileSelected,
    /// The selected file must not exceed the given number of bytes.
    MaxFileSize(u64),
    /// Arbitrary predicate.
    Predicate(fn(Option<&FieldValue>) -> bool),
}

impl Check {
    fn passes(&self, value: Option<&FieldValue>) -> bool {
        match self {
            Check::Required => match value {
                Some(FieldValue::Text(text)) => !text.is_empty(),
                Some(FieldValue::File(_)) => true,
                None => false,
            },
            Check::OneOf(allowed) => match value {
                Some(FieldValue::Text(text)) => {
                    allowed.iter().any(|candidate| *candidate == text.as_str())
                }
                Some(FieldValue::File(_)) => false,
                None => true,
            },
            Check::Url => match value {
                Some(FieldValue::Text(text)) if !text.is_empty() => is_web_url(text),
                Some(FieldValue::Text(_)) | None => true,
                Some(FieldValue::File(_)) => false,
            },
            Check::FileSelected => {
                matches!(value, Some(FieldValue::File(file)) if !file.name.is_empty())
            }
            Check::MaxFileSize(max) => {
                matches!(value, Some(FieldValue::File(file)) if file.size <= *max)
            }
            Check::Predicate(predicate) => predicate(value),
        }
    }
}

/// Activation condition: the rule applies only while `field == equals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub field: &'static str,
    pub equals: &'static str,
}

impl Condition {
    fn holds(&self, snapshot: &FormSnapshot) -> bool {
        snapshot.text(self.field) == Some(self.equals)
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: String,
    pub when: Option<Condition>,
}

impl Rule {
    pub fn new(field: &'static str, check: Check, message: impl Into<String>) -> Self {
        Self {
            field,
            check,
            message: message.into(),
            when: None,
        }
    }

    /// Restrict the rule to snapshots where `field` equals `equals`.
    pub fn when(mut self, field: &'static str, equals: &'static str) -> Self {
        self.when = Some(Condition { field, equals });
        self
    }

    pub fn is_active(&self, snapshot: &FormSnapshot) -> bool {
        self.when.is_none_or(|condition| condition.holds(snapshot))
    }

    fn failure(&self, snapshot: &FormSnapshot) -> Option<&str> {
        if !self.is_active(snapshot) || self.check.passes(snapshot.get(self.field)) {
            None
        } else {
            Some(&self.message)
        }
    }
}

/// Field name → message. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Ordered rule list.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Evaluate every rule, collecting the first failure of each field.
    pub fn validate(&self, snapshot: &FormSnapshot) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for rule in &self.rules {
            if errors.errors.contains_key(rule.field) {
                continue;
            }
            if let Some(message) = rule.failure(snapshot) {
                errors.errors.insert(rule.field, message.to_string());
            }
        }
        errors
    }

    /// Evaluate only the rules of `field`.
    pub fn validate_field(&self, snapshot: &FormSnapshot, field: &str) -> Option<String> {
        self.rules
            .iter()
            .filter(|rule| rule.field == field)
            .find_map(|rule| rule.failure(snapshot))
            .map(str::to_string)
    }

    /// Distinct fields that have at least one rule, in declaration order.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = Vec::new();
        for rule in &self.rules {
            if !fields.contains(&rule.field) {
                fields.push(rule.field);
            }
        }
        fields
    }

    /// Fields with at least one rule active for `snapshot`.
    pub fn active_fields(&self, snapshot: &FormSnapshot) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.is_active(snapshot)) {
            if !fields.contains(&rule.field) {
                fields.push(rule.field);
            }
        }
        fields
    }
}

fn is_web_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "ftp") && url.has_host(),
        Err(_) => false,
    }
}
