//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `InvalidRequest` domain error whose details carry
//! the offending field; clients only see the message.

use serde_json::json;

use crate::domain::{CatId, Email, Error, GeoError, GeoPoint, PlainPassword, UserId, UserName};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidCoordinates,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidCoordinates => "invalid_coordinates",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_coordinates_error(field: FieldName, value: &str, err: &GeoError) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field}: {err}"))
        .with_value(ErrorCode::InvalidCoordinates, value)
}

/// Field rejection without echoing the value (used for secrets too).
pub(crate) fn invalid_field_error(field: FieldName, reason: impl std::fmt::Display) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field}: {reason}")).with_code(ErrorCode::InvalidValue)
}

pub(crate) fn parse_cat_id(value: &str, field: FieldName) -> Result<CatId, Error> {
    CatId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a required `"lng,lat"` value.
pub(crate) fn parse_coordinates(value: Option<&str>, field: FieldName) -> Result<GeoPoint, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    GeoPoint::parse_pair(raw).map_err(|err| invalid_coordinates_error(field, raw, &err))
}

pub(crate) fn parse_user_name(value: &str, field: FieldName) -> Result<UserName, Error> {
    UserName::new(value).map_err(|err| invalid_field_error(field, err))
}

pub(crate) fn parse_email(value: &str, field: FieldName) -> Result<Email, Error> {
    Email::new(value).map_err(|err| invalid_field_error(field, err))
}

pub(crate) fn parse_password(value: String, field: FieldName) -> Result<PlainPassword, Error> {
    PlainPassword::new(value).map_err(|err| invalid_field_error(field, err))
}
