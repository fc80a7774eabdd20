//! Error types for the Galaxy3D spatial index
//!
//! Construction of an index is the only fallible path: queries work on
//! caller-validated data and treat out-of-range ids as precondition violations.

use std::fmt;

/// Result type for Galaxy3D spatial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D spatial index errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The sample lookup has no record for a sample id inside `[0, N)`
    MissingSample(u32),

    /// A sample references a representation the representation lookup does not know
    MissingRepresentation {
        /// Sample that holds the dangling reference
        sample: u32,
        /// Representation id that could not be resolved
        representation: u32,
    },

    /// A representation's local bounding box is inverted or not finite
    MalformedGeometry {
        /// Offending representation
        representation: u32,
        /// Human readable reason
        reason: String,
    },

    /// A sample or item transform cannot be turned into a matrix
    InvalidTransform {
        /// Sample whose transform pair is broken
        sample: u32,
        /// Human readable reason
        reason: String,
    },

    /// The dataset has more samples than the flat tree can address
    TooManySamples(usize),

    /// The build configuration is inconsistent
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingSample(sample) => write!(f, "Missing sample: no record for sample {}", sample),
            Error::MissingRepresentation { sample, representation } => write!(
                f,
                "Missing representation: sample {} references unknown representation {}",
                sample, representation
            ),
            Error::MalformedGeometry { representation, reason } => write!(
                f,
                "Malformed geometry: representation {}: {}",
                representation, reason
            ),
            Error::InvalidTransform { sample, reason } => {
                write!(f, "Invalid transform: sample {}: {}", sample, reason)
            }
            Error::TooManySamples(count) => write!(
                f,
                "Too many samples: {} samples do not fit in a flat tree",
                count
            ),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
