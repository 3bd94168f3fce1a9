use lifebalance_domain::shared::DomainError;

/// Shorthand for mapping boundary errors (I/O, serde) into `DomainError`
pub trait ResultExt<T, E> {
    /// `result.to_infra_err()?`
    fn to_infra_err(self) -> Result<T, DomainError>;

    /// Like `to_infra_err`, for encode/decode failures
    fn to_serialization_err(self, context: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(e.to_string()))
    }

    fn to_serialization_err(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Serialization(format!("{}: {}", context, e)))
    }
}
