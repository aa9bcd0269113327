//! Error taxonomy for explicit conversions out of the kernel.
//!
//! Absence and wrong-alternative access are represented structurally by
//! [`Optional::Unset`](crate::optional::Optional::Unset). These errors only
//! appear when a caller explicitly asks to turn that structure into a
//! `Result` so it can be propagated with `?`.

/// Errors produced when converting kernel values into `Result`s.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KernelError {
    /// A required value was absent.
    #[error("required value is unset: {what}")]
    Unset {
        /// Description of the value that was required.
        what: String,
    },

    /// A variant was accessed at a position other than the active one.
    #[error("wrong alternative: expected position {expected}, active position is {active}")]
    WrongAlternative {
        /// The requested position.
        expected: usize,
        /// The position that is actually active.
        active: usize,
    },
}

/// Result type for kernel conversions.
pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unset() {
        let err = KernelError::Unset {
            what: "configuration".to_string(),
        };
        assert_eq!(err.to_string(), "required value is unset: configuration");
    }

    #[test]
    fn test_display_wrong_alternative() {
        let err = KernelError::WrongAlternative {
            expected: 1,
            active: 0,
        };
        assert_eq!(
            err.to_string(),
            "wrong alternative: expected position 1, active position is 0"
        );
    }
}
