use lifebalance_domain::shared::DomainError;

/// Extension trait for mapping driver errors into `DomainError`
pub trait ResultExt<T> {
    /// Convert error to DomainError::Repository, prefixed with what was attempted
    /// Usage: `result.to_repo_err("Save activity record")?`
    fn to_repo_err(self, context: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn to_repo_err(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }
}
