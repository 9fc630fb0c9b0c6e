//! Self-validating value objects that make up a [`Location`](super::Location).
//!
//! Text values are trimmed before their limits are checked; limits count
//! characters, not bytes, so Korean addresses get the same budget as ASCII.

use crate::constants::{ADDRESS_MAX_CHARS, NAME_MAX_CHARS, NUMBER_MAX_CHARS};
use crate::error::{CenterError, Result};
use serde::Serialize;
use std::fmt;

fn validated_text(raw: &str, label: &str, max_chars: usize) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(CenterError::invalid(format!(
            "{label} cannot be null or blank"
        )));
    }
    if value.chars().count() > max_chars {
        return Err(CenterError::invalid(format!(
            "{label} cannot be more than {max_chars} characters"
        )));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocationName(String);

impl LocationName {
    pub fn new(raw: &str) -> Result<Self> {
        validated_text(raw, "Location name", NAME_MAX_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Phone-style contact number, e.g. `031-729-0000`. Only length is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocationNumber(String);

impl LocationNumber {
    pub fn new(raw: &str) -> Result<Self> {
        validated_text(raw, "Location number", NUMBER_MAX_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocationAddress(String);

impl LocationAddress {
    pub fn new(raw: &str) -> Result<Self> {
        validated_text(raw, "Address", ADDRESS_MAX_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Latitude(f64);

impl Latitude {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
            return Err(CenterError::invalid("Latitude must be between -90° and 90°"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Longitude(f64);

impl Longitude {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
            return Err(CenterError::invalid(
                "Longitude must be between -180° and 180°",
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

macro_rules! display_text {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        })*
    };
}

display_text!(LocationName, LocationNumber, LocationAddress);

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}
