//! Business rules applied to a draft before it may reach the collection service.
//!
//! `validate` checks the four content rules in a fixed order and stops at the
//! first failure, so a draft always yields a single, reproducible reason.
//! Presence of the form fields is a separate, earlier check (`check_required`).

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::draft::ProductFields;
use crate::model::{CategoryId, NewProduct};

pub const MAX_NAME_LENGTH: usize = 100;
pub const IMPORT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Code,
    Name,
    ImportDate,
    Quantity,
    Category,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Code => "Product code",
            Field::Name => "Product name",
            Field::ImportDate => "Import date",
            Field::Quantity => "Quantity",
            Field::Category => "Category",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    MissingField(Field),
    #[error("Product name must not exceed 100 characters")]
    NameTooLong,
    #[error("Quantity must be a positive integer")]
    InvalidQuantity,
    #[error("Invalid date format. Use DD/MM/YYYY")]
    InvalidDateFormat,
    #[error("Import date cannot be in the future")]
    FutureImportDate,
}

/// Checks the content rules: name length, quantity, date format, date not in
/// the future. `today` is the caller's current local date.
pub fn validate(fields: &ProductFields, today: NaiveDate) -> Result<(), ValidationError> {
    if fields.name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    if parse_quantity(&fields.quantity).is_none() {
        return Err(ValidationError::InvalidQuantity);
    }

    let import_date =
        parse_import_date(&fields.import_date).ok_or(ValidationError::InvalidDateFormat)?;

    if import_date > today {
        return Err(ValidationError::FutureImportDate);
    }

    Ok(())
}

/// Reports the first empty field in form order and hands back the selected
/// category on success.
pub fn check_required(fields: &ProductFields) -> Result<CategoryId, ValidationError> {
    let text_fields = [
        (Field::Code, &fields.code),
        (Field::Name, &fields.name),
        (Field::ImportDate, &fields.import_date),
        (Field::Quantity, &fields.quantity),
    ];

    if let Some((field, _)) = text_fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    fields
        .category_id
        .clone()
        .ok_or(ValidationError::MissingField(Field::Category))
}

/// Full pre-submit pipeline: required fields, content rules, then the wire body.
pub fn prepare(fields: &ProductFields, today: NaiveDate) -> Result<NewProduct, ValidationError> {
    let category_id = check_required(fields)?;
    validate(fields, today)?;

    let quantity = parse_quantity(&fields.quantity).ok_or(ValidationError::InvalidQuantity)?;

    Ok(NewProduct {
        code: fields.code.trim().to_string(),
        name: fields.name.clone(),
        import_date: fields.import_date.clone(),
        quantity,
        category_id,
    })
}

/// Accepts whole numbers written as text ("5", " 5 ", "5.0"). Zero, negatives,
/// fractions and values past `u32::MAX` are rejected.
pub fn parse_quantity(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().parse().ok()?;

    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
        return None;
    }

    Some(value as u32)
}

/// Strict `DD/MM/YYYY`: two-digit day and month, four-digit year, and a date
/// that exists on the calendar.
pub fn parse_import_date(raw: &str) -> Option<NaiveDate> {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| {
        Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("import date pattern is valid")
    });

    if !shape.is_match(raw) {
        return None;
    }

    NaiveDate::parse_from_str(raw, IMPORT_DATE_FORMAT).ok()
}
