//! Class schedule browsing: load flat session rows, filter them by period,
//! sub-term and course, group them into courses and lay them out per weekday.

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod models;
pub mod report;
pub mod store;
pub mod week;

pub use aggregate::{aggregate, flatten};
pub use cache::StoreCache;
pub use error::{Result, ScheduleError};
pub use filter::{
    default_period, default_sub_term, filter, list_course_names, list_periods, list_sub_terms,
    Selection, SubTermDefault,
};
pub use models::{Course, Period, PeriodId, Session, SessionDisplay, Weekday};
pub use store::{LoadStatus, ScheduleStore, StoreStatus};
pub use week::{build_week_view, WeekView};
