use std::fmt;

use thiserror::Error;

/// Which half of a coordinate pair failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Latitude,
    Longitude,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
        }
    }

    fn bounds(&self) -> (f64, f64) {
        match self {
            Field::Latitude => (-90.0, 90.0),
            Field::Longitude => (-180.0, 180.0),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected query coordinates. The `Display` text is safe to echo back to callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("both latitude (\"lat\") and longitude (\"lon\") must be provided")]
    MissingField,

    #[error("invalid {field}: {value} is not a number")]
    ParseError { field: Field, value: String },

    #[error("invalid {field}: {value} is out of range")]
    OutOfRange { field: Field, value: String },
}

/// Check that `lat` and `lon` are present, numeric and inside their geographic ranges.
pub fn validate_coordinates(lat: &str, lon: &str) -> Result<(), ValidationError> {
    if lat.is_empty() || lon.is_empty() {
        return Err(ValidationError::MissingField);
    }

    check_field(Field::Latitude, lat)?;
    check_field(Field::Longitude, lon)?;

    Ok(())
}

fn check_field(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw.parse().map_err(|_| ValidationError::ParseError {
        field,
        value: raw.to_string(),
    })?;

    // NaN fails `contains`, so it lands here as out of range.
    let (min, max) = field.bounds();
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value: raw.to_string(),
        });
    }

    Ok(value)
}
