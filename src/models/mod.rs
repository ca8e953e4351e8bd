//! Allocation domain models.
//!
//! Plain data types for the people being allocated, the work assigned to
//! them, and the projects that work belongs to. Behavior lives in the
//! `engine`, `mutation`, and `import` modules; the models only carry
//! builders and small queries.
//!
//! # Ownership
//!
//! | Type | Owns | References |
//! |------|------|------------|
//! | Resource | its Tasks | - |
//! | Task | - | Project (by id, name cached) |
//! | Project | - | - |

mod caller;
mod calendar;
mod project;
mod resource;
mod task;

pub use caller::{AccessLevel, Caller};
pub use calendar::{days_in_range, format_date, parse_date, DatePreset, DateRange, DATE_FORMAT};
pub use project::{Project, ProjectStatus};
pub use resource::{Resource, ResourceStatus, Role};
pub use task::{Priority, Task};
