use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the ball field core.
///
/// Only construction and input paths can fail. Stepping a field that was built
/// successfully never returns an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value or rejected body input.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Configuration text that is not valid JSON for [`crate::core::FieldConfig`].
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Propagated I/O errors (reading a configuration file).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("radius must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("radius"));
    }

    #[test]
    fn json_errors_convert() {
        let err: Error = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("malformed configuration"));
    }

    #[test]
    fn result_type_alias_compiles() -> Result<()> {
        Ok(())
    }
}
