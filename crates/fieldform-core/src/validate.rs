//! Draft validation
//!
//! A single pure function checks the whole draft and collects every field
//! error instead of failing fast, so callers can render per-field messages
//! in one pass.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::draft::{fields, FormDraft};

/// Aggregate ceiling for attached photos, in bytes (10 MiB).
pub const MAX_TOTAL_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

/// Content types accepted for photo attachments.
pub const ACCEPTED_PHOTO_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Field-name to message mapping collected by [`validate`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// A draft that passed [`validate`]. The only way to obtain one, which is
/// what lets the multipart encoder skip re-checking.
#[derive(Debug, Clone)]
pub struct ValidDraft(pub(crate) FormDraft);

impl ValidDraft {
    pub fn draft(&self) -> &FormDraft {
        &self.0
    }

    pub fn into_inner(self) -> FormDraft {
        self.0
    }
}

fn coordinates_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?\d+(\.\d+)?,\s*-?\d+(\.\d+)?$").expect("coordinate pattern")
    })
}

/// Returns true for a signed-decimal `"<lat>,<lon>"` pair.
pub fn coordinates_valid(value: &str) -> bool {
    coordinates_regex().is_match(value)
}

/// Validate a draft against the intake schema.
///
/// All failures are collected; the result is either a [`ValidDraft`] ready
/// for encoding or the full field-to-message map.
pub fn validate(draft: &FormDraft) -> Result<ValidDraft, FieldErrors> {
    let mut errors = FieldErrors::default();

    require(&mut errors, fields::SALESMAN_NAME, &draft.salesman_name, "Salesman name is required");
    require(&mut errors, fields::CUSTOMER_NAME, &draft.customer_name, "Customer name is required");
    require(
        &mut errors,
        fields::CUSTOMER_ADDRESS,
        &draft.customer_address,
        "Customer address is required",
    );
    require(
        &mut errors,
        fields::CUSTOMER_HOME_NO,
        &draft.customer_home_no,
        "Customer Home Number is required",
    );
    require(&mut errors, fields::VILLAGE, &draft.village, "Village name is required");
    require(&mut errors, fields::BUILDING_TYPE, &draft.building_type, "Building type is required");

    if draft.coordinates.is_empty() {
        errors.insert(fields::COORDINATES, "Coordinates are required");
    } else if !coordinates_valid(&draft.coordinates) {
        errors.insert(
            fields::COORDINATES,
            "Invalid coordinates format. e.g: 3.456,89.012 or -3.456,-89.012",
        );
    }

    if draft.operators.is_empty() {
        errors.insert(fields::OPERATORS, "At least one operator is required");
    }

    if draft
        .building_photos
        .iter()
        .any(|p| !ACCEPTED_PHOTO_TYPES.contains(&p.content_type.as_str()))
    {
        errors.insert(fields::BUILDING_PHOTOS, "Please provide valid files");
    } else {
        let total: u64 = draft.building_photos.iter().map(|p| p.size()).sum();
        if total > MAX_TOTAL_PHOTO_BYTES {
            errors.insert(fields::BUILDING_PHOTOS, "Maximum total file size is 10 MB");
        }
    }

    if errors.is_empty() {
        Ok(ValidDraft(draft.clone()))
    } else {
        Err(errors)
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &'static str) {
    if value.is_empty() {
        errors.insert(field, message);
    }
}
