//! In-process scheduler state.
//!
//! Holds job registrations, paused groups and running jobs in concurrent maps.
//! Used by the bundled server (seeded from config) and by tests.

use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::SchedulerConfig;
use crate::scheduler::{ExecutingJob, JobDetail, JobKey, Scheduler, SchedulerError};

#[derive(Debug, Default)]
pub struct InMemoryScheduler {
    jobs: DashMap<JobKey, JobDetail>,
    paused_groups: DashSet<String>,
    executing: DashMap<JobKey, ExecutingJob>,
    fire_counter: AtomicU64,
    shut_down: AtomicBool,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scheduler from the `[scheduler]` config section.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        let scheduler = Self::new();
        for job in &config.jobs {
            let key = JobKey::new(&job.group, &job.name);
            scheduler.add_job(JobDetail {
                key: key.clone(),
                description: job.description.clone(),
                job_type: job.job_type.clone(),
                interruptible: job.interruptible,
            });
            if job.running {
                scheduler.start(&key);
            }
        }
        for group in &config.paused_groups {
            scheduler.paused_groups.insert(group.clone());
        }
        scheduler
    }

    /// Register or replace a job.
    pub fn add_job(&self, detail: JobDetail) {
        self.jobs.insert(detail.key.clone(), detail);
    }

    /// Mark a job as running. Returns the fire instance id.
    pub fn start(&self, key: &JobKey) -> String {
        let id = self.fire_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let fire_instance_id = format!("fire-{}", id);
        self.executing.insert(
            key.clone(),
            ExecutingJob {
                key: key.clone(),
                fire_instance_id: fire_instance_id.clone(),
            },
        );
        fire_instance_id
    }

    /// Mark a job as no longer running.
    pub fn finish(&self, key: &JobKey) {
        self.executing.remove(key);
    }

    /// Reject all further calls with [`SchedulerError::ShutDown`].
    pub fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }

    fn ensure_running(&self) -> Result<(), SchedulerError> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Err(SchedulerError::ShutDown);
        }
        Ok(())
    }
}

impl Scheduler for InMemoryScheduler {
    fn job_group_names(&self) -> Result<Vec<String>, SchedulerError> {
        self.ensure_running()?;
        let mut groups: Vec<String> = self.jobs.iter().map(|e| e.key().group.clone()).collect();
        groups.sort();
        groups.dedup();
        Ok(groups)
    }

    fn job_keys(&self, group: &str) -> Result<Vec<JobKey>, SchedulerError> {
        self.ensure_running()?;
        let mut keys: Vec<JobKey> = self
            .jobs
            .iter()
            .filter(|e| e.key().group == group)
            .map(|e| e.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn job_detail(&self, key: &JobKey) -> Result<Option<JobDetail>, SchedulerError> {
        self.ensure_running()?;
        Ok(self.jobs.get(key).map(|e| e.value().clone()))
    }

    fn currently_executing(&self) -> Result<Vec<ExecutingJob>, SchedulerError> {
        self.ensure_running()?;
        Ok(self.executing.iter().map(|e| e.value().clone()).collect())
    }

    fn is_job_group_paused(&self, group: &str) -> Result<bool, SchedulerError> {
        self.ensure_running()?;
        Ok(self.paused_groups.contains(group))
    }

    fn pause_job_group(&self, group: &str) -> Result<(), SchedulerError> {
        self.ensure_running()?;
        self.paused_groups.insert(group.to_string());
        Ok(())
    }

    fn resume_job_group(&self, group: &str) -> Result<(), SchedulerError> {
        self.ensure_running()?;
        self.paused_groups.remove(group);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JobConfig;

    fn job(group: &str, name: &str) -> JobDetail {
        JobDetail {
            key: JobKey::new(group, name),
            description: None,
            job_type: "NoOpJob".into(),
            interruptible: false,
        }
    }

    #[test]
    fn test_groups_are_sorted_and_unique() {
        let scheduler = InMemoryScheduler::new();
        scheduler.add_job(job("reports", "daily"));
        scheduler.add_job(job("DEFAULT", "cleanup"));
        scheduler.add_job(job("reports", "weekly"));

        assert_eq!(scheduler.job_group_names().unwrap(), vec!["DEFAULT", "reports"]);
        assert_eq!(
            scheduler.job_keys("reports").unwrap(),
            vec![JobKey::new("reports", "daily"), JobKey::new("reports", "weekly")]
        );
        assert!(scheduler.job_keys("missing").unwrap().is_empty());
    }

    #[test]
    fn test_pause_and_resume() {
        let scheduler = InMemoryScheduler::new();
        assert!(!scheduler.is_job_group_paused("DEFAULT").unwrap());
        scheduler.pause_job_group("DEFAULT").unwrap();
        assert!(scheduler.is_job_group_paused("DEFAULT").unwrap());
        scheduler.resume_job_group("DEFAULT").unwrap();
        assert!(!scheduler.is_job_group_paused("DEFAULT").unwrap());
    }

    #[test]
    fn test_executing_jobs() {
        let scheduler = InMemoryScheduler::new();
        let key = JobKey::new("DEFAULT", "cleanup");
        scheduler.add_job(job("DEFAULT", "cleanup"));
        let id = scheduler.start(&key);
        let running = scheduler.currently_executing().unwrap();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].fire_instance_id, id);
        scheduler.finish(&key);
        assert!(scheduler.currently_executing().unwrap().is_empty());
    }

    #[test]
    fn test_shutdown_rejects_calls() {
        let scheduler = InMemoryScheduler::new();
        scheduler.shutdown();
        assert!(matches!(scheduler.job_group_names(), Err(SchedulerError::ShutDown)));
    }

    #[test]
    fn test_from_config() {
        let config = SchedulerConfig {
            paused_groups: vec!["reports".into()],
            jobs: vec![JobConfig {
                group: "reports".into(),
                name: "daily".into(),
                job_type: "ReportJob".into(),
                description: Some("Daily report".into()),
                interruptible: true,
                running: true,
            }],
        };
        let scheduler = InMemoryScheduler::from_config(&config);
        let detail = scheduler
            .job_detail(&JobKey::new("reports", "daily"))
            .unwrap()
            .unwrap();
        assert!(detail.interruptible);
        assert!(scheduler.is_job_group_paused("reports").unwrap());
        assert_eq!(scheduler.currently_executing().unwrap().len(), 1);
    }
}
