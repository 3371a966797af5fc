//! tally-core: task classification and performance scoring.
//!
//! Everything here is a pure function of its inputs. The caller supplies
//! "now" explicitly; nothing reads the system clock.

pub mod classify;
pub mod error;
pub mod score;
pub mod snapshot;
pub mod stats;
pub mod task;
pub mod team;
pub mod time;
pub mod trend;
pub mod window;

pub use classify::{Classification, TaskState, classify};
pub use error::EngineError;
pub use score::{AlertTier, PerformanceScore, effective_rqc, score};
pub use snapshot::FrozenWeek;
pub use stats::{WindowStats, aggregate, global_stats, stats_by_user, user_stats};
pub use task::{SHIFT_GLYPH, Task, TaskKind, TaskStatus};
pub use team::{TeamMember, rank_team};
pub use time::{END_OF_DAY, WeekStart, local_now, week_bounds};
pub use trend::{WeekTrend, trailing_weeks, trend};
pub use window::{RangePolicy, ReportWindow, in_range};
