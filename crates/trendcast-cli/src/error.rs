use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid date format '{value}', expected YYYY-MM-DD")]
    InvalidDateFormat { value: String },

    #[error(transparent)]
    Validation(#[from] trendcast_core::ValidationError),

    #[error(transparent)]
    Source(#[from] trendcast_core::SourceError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidDateFormat { .. } => 2,
            Self::Validation(_) => 2,
            Self::Source(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_exit_with_usage_code() {
        let error = CliError::InvalidDateFormat {
            value: String::from("2024/01/10"),
        };
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.to_string(),
            "invalid date format '2024/01/10', expected YYYY-MM-DD"
        );
    }

    #[test]
    fn io_errors_exit_with_code_ten() {
        let error = CliError::from(std::io::Error::other("closed"));
        assert_eq!(error.exit_code(), 10);
    }
}
