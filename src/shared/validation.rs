use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    /// Regex for validating member email addresses (case-insensitive)
    /// - Valid: "barista@roastery.kr", "a.b+c@mail.co"
    /// - Invalid: "barista", "barista@", "@roastery.kr", "barista@roastery"
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap();
}

/// Validation failure scoped to one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flatten `validator` output into field errors, ordered by field name.
///
/// Field names are reported in their wire (camelCase) form.
pub fn to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(&field);
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    sort_field_errors(&mut out);
    out
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn sort_field_errors(errors: &mut [FieldError]) {
    errors.sort_by(|a, b| a.field.cmp(&b.field));
}

/// Rejects passwords shorter than the minimum, but lets a blank value through
/// (blank means "leave unchanged" on update forms).
pub fn validate_optional_password(value: &str) -> Result<(), ValidationError> {
    let min = crate::shared::constants::MEMBER_PASSWORD_MIN_LEN as usize;
    if !value.is_empty() && value.chars().count() < min {
        return Err(ValidationError::new("length").with_message(Cow::Borrowed(
            "비밀번호는 최소 6자 이상이어야 합니다.",
        )));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFormValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Accepts a form control value as sent by a browser form (string) or by a
/// JSON client (number/bool/null) and keeps it as the raw control string.
pub fn form_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawFormValue>::deserialize(deserializer)?;
    Ok(match raw {
        None => String::new(),
        Some(RawFormValue::Text(s)) => s,
        Some(RawFormValue::Integer(n)) => n.to_string(),
        Some(RawFormValue::Float(f)) => f.to_string(),
        Some(RawFormValue::Flag(b)) => b.to_string(),
    })
}

/// Like [`form_value`], for patch bodies: pair with `#[serde(default)]` so an
/// absent key stays `None` while an explicit `null` becomes `Some("")`.
pub fn optional_form_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    form_value(deserializer).map(Some)
}
