//! Job scheduler interface.
//!
//! # Data Flow
//! ```text
//! console handlers
//!     → Scheduler (read: groups, keys, details, executing, paused)
//!     → Scheduler (control: pause/resume job group)
//!
//! Implementations:
//!     memory.rs (in-process, seeded from config)
//!     any external engine adapter implementing the trait
//! ```
//!
//! # Design Decisions
//! - Narrow trait: the console never sees engine internals
//! - Implementations own their synchronization; callers add no locks
//! - Shared as `Arc<dyn Scheduler>` captured by handlers, never a global

pub mod memory;

use std::fmt;

pub use memory::InMemoryScheduler;

/// Identifies a job within its group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobKey {
    pub group: String,
    pub name: String,
}

impl JobKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

/// Static description of a registered job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetail {
    pub key: JobKey,
    pub description: Option<String>,
    /// Implementation type name as reported by the engine.
    pub job_type: String,
    /// Whether the job can be interrupted while running.
    pub interruptible: bool,
}

/// A job that is currently running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutingJob {
    pub key: JobKey,
    pub fire_instance_id: String,
}

/// Errors reported by a scheduler implementation.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("scheduler is shut down")]
    ShutDown,
}

/// Read and control surface the console needs from a job scheduler.
pub trait Scheduler: Send + Sync {
    /// Names of all job groups, sorted.
    fn job_group_names(&self) -> Result<Vec<String>, SchedulerError>;

    /// Keys of the jobs in `group`, sorted. Unknown groups yield an empty list.
    fn job_keys(&self, group: &str) -> Result<Vec<JobKey>, SchedulerError>;

    fn job_detail(&self, key: &JobKey) -> Result<Option<JobDetail>, SchedulerError>;

    fn currently_executing(&self) -> Result<Vec<ExecutingJob>, SchedulerError>;

    fn is_job_group_paused(&self, group: &str) -> Result<bool, SchedulerError>;

    fn pause_job_group(&self, group: &str) -> Result<(), SchedulerError>;

    fn resume_job_group(&self, group: &str) -> Result<(), SchedulerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_key_display() {
        assert_eq!(JobKey::new("DEFAULT", "cleanup").to_string(), "DEFAULT.cleanup");
    }
}
