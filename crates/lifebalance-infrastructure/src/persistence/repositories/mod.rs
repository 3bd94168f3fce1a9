pub mod activity_record_repo;

pub use activity_record_repo::SqliteActivityRepository;
