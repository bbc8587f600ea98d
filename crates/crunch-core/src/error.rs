//! Configuration errors for parameters and registries.
//!
//! These are programmer errors caught while a processor is being built:
//! a parameter with no identifier, an actual range that cannot be mapped,
//! or two parameters sharing an identifier. They never occur on the audio
//! path, which only reads already-validated state.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use thiserror::Error;

/// Errors raised while constructing or registering parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// The parameter identifier was empty.
    #[error("parameter identifier must not be empty")]
    EmptyId,

    /// The actual range has equal bounds, so the inverse mapping divides by zero.
    #[error("parameter '{id}' has a degenerate range [{min}, {max}]")]
    DegenerateRange {
        /// Identifier of the offending parameter.
        id: String,
        /// Actual minimum.
        min: f32,
        /// Actual maximum.
        max: f32,
    },

    /// One of the actual bounds is NaN or infinite.
    #[error("parameter '{id}' has a non-finite range [{min}, {max}]")]
    NonFiniteRange {
        /// Identifier of the offending parameter.
        id: String,
        /// Actual minimum.
        min: f32,
        /// Actual maximum.
        max: f32,
    },

    /// A parameter with this identifier is already registered.
    #[error("duplicate parameter identifier '{0}'")]
    DuplicateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::{format, string::ToString};

    #[test]
    fn messages_name_the_parameter() {
        let err = ParamError::DegenerateRange {
            id: "drive".to_string(),
            min: 1.0,
            max: 1.0,
        };
        assert_eq!(
            format!("{err}"),
            "parameter 'drive' has a degenerate range [1, 1]"
        );

        let err = ParamError::DuplicateId("mix".to_string());
        assert_eq!(format!("{err}"), "duplicate parameter identifier 'mix'");
    }

    #[test]
    fn empty_id_message() {
        assert_eq!(
            format!("{}", ParamError::EmptyId),
            "parameter identifier must not be empty"
        );
    }
}
