mod calendar_queries;

pub use calendar_queries::CalendarQueries;
