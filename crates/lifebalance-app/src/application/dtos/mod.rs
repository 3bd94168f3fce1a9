mod goal_dto;
mod streak_dto;
mod trend_dto;

pub use goal_dto::LifeDomainProgressDto;
pub use streak_dto::{CalendarDayDto, CalendarDto, MonthStatsDto, StreakDto, TodayProgressDto};
pub use trend_dto::{TrendDto, WindowTrendDto};
