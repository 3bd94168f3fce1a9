mod date_key;
mod repository;
mod types;


pub use date_key::{DateKey, ReferenceTimezone, DATE_KEY_FORMAT};
pub use repository::ActivityRepository;
pub use types::{ActivityKind, ActivityRecord, ActivityValue, LifeDomain};
