// Domain layer - Pure streak and aggregation logic
// No dependencies on infrastructure or presentation layers

pub mod activity;
pub mod aggregate;
pub mod progress;
pub mod shared;
pub mod streak;

// Re-exports for convenience
pub use activity::{ActivityKind, ActivityRecord, ActivityRepository, DateKey, ReferenceTimezone};
pub use shared::{DomainError, UserId};
