//! Result codes returned by every command handler

/// Success code on the wire
pub const RESULT_OK: u8 = 0;

/// Reasons a command is rejected
///
/// Shape errors ([`ArgCount`](Self::ArgCount), [`ArgType`](Self::ArgType))
/// are detected before any argument value is inspected. Value errors are
/// detected in a validation pass over the whole input before any hardware
/// is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Wrong number of arguments
    ArgCount,
    /// Argument present but of the wrong kind
    ArgType,
    /// Argument well-typed but outside the allowed domain
    ArgValue,
    /// Transient buffer could not be obtained
    AllocFailed,
}

impl CommandError {
    /// Wire code for this error
    pub fn code(self) -> u8 {
        match self {
            CommandError::ArgCount => 1,
            CommandError::ArgType => 2,
            CommandError::ArgValue => 3,
            CommandError::AllocFailed => 4,
        }
    }
}

/// Result of a command handler
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Wire code for a handler result
pub fn result_code<T>(result: &CommandResult<T>) -> u8 {
    match result {
        Ok(_) => RESULT_OK,
        Err(e) => e.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_nonzero() {
        let errors = [
            CommandError::ArgCount,
            CommandError::ArgType,
            CommandError::ArgValue,
            CommandError::AllocFailed,
        ];
        for (i, a) in errors.iter().enumerate() {
            assert_ne!(a.code(), RESULT_OK);
            for b in &errors[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn test_result_code() {
        assert_eq!(result_code(&Ok::<(), CommandError>(())), RESULT_OK);
        assert_eq!(result_code::<()>(&Err(CommandError::ArgValue)), 3);
    }
}
