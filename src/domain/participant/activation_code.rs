//! Activation code value object and generation.
//!
//! An activation code is a 6-digit decimal string. It is issued once when a
//! participant row is created and later typed in by an administrator to prove
//! that the participant attended the orientation meeting.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::ParticipantError;

/// Number of digits in every activation code.
pub const CODE_LENGTH: usize = 6;

/// Draws allowed before issuance gives up with `CodeSpaceExhausted`.
pub const MAX_CODE_ATTEMPTS: u32 = 1000;

const MIN_ISSUED: u32 = 100_000;
const MAX_ISSUED: u32 = 999_999;

/// Validated 6-digit activation code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivationCode(String);

impl ActivationCode {
    /// Parses user or admin input. Surrounding whitespace is ignored; anything
    /// other than exactly six ASCII digits is rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("activation_code"));
        }
        let len = trimmed.chars().count();
        if len != CODE_LENGTH {
            return Err(ValidationError::out_of_range(
                "activation_code_length",
                CODE_LENGTH as i64,
                CODE_LENGTH as i64,
                len as i64,
            ));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "activation_code",
                "must contain only digits",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Builds a code from a number in the issued range.
    fn from_number(value: u32) -> Self {
        Self(format!("{:06}", value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ActivationCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ActivationCode> for String {
    fn from(code: ActivationCode) -> Self {
        code.0
    }
}

/// Source of candidate activation codes.
///
/// Stores call this in a loop until a candidate does not collide with an
/// existing code, up to [`MAX_CODE_ATTEMPTS`] times.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> ActivationCode;
}

/// Uniform draw from 100000..=999999.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> ActivationCode {
        let value = rand::thread_rng().gen_range(MIN_ISSUED..=MAX_ISSUED);
        ActivationCode::from_number(value)
    }
}

/// Draws candidates until one is not taken.
///
/// For stores that can test membership synchronously while holding their
/// write lock.
pub fn draw_unique_code(
    generator: &dyn CodeGenerator,
    mut is_taken: impl FnMut(&ActivationCode) -> bool,
) -> Result<ActivationCode, ParticipantError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let candidate = generator.generate();
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(ParticipantError::code_space_exhausted(MAX_CODE_ATTEMPTS))
}
