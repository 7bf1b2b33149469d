//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the console.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the scheduler console.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Seed data for the bundled in-memory scheduler.
    pub scheduler: SchedulerConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// In-memory scheduler contents.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Job groups that start paused.
    pub paused_groups: Vec<String>,

    /// Registered jobs.
    pub jobs: Vec<JobConfig>,
}

/// A job registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobConfig {
    /// Job group name.
    pub group: String,

    /// Job name, unique within its group.
    pub name: String,

    /// Implementation type shown in the console.
    #[serde(default = "default_job_type")]
    pub job_type: String,

    pub description: Option<String>,

    #[serde(default)]
    pub interruptible: bool,

    /// Mark the job as currently executing at startup.
    #[serde(default)]
    pub running: bool,
}

fn default_job_type() -> String {
    "Job".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(config.scheduler.jobs.is_empty());
    }

    #[test]
    fn test_jobs_section() {
        let config: ConsoleConfig = toml::from_str(
            r#"
            [scheduler]
            paused_groups = ["reports"]

            [[scheduler.jobs]]
            group = "reports"
            name = "daily"
            interruptible = true
            "#,
        )
        .unwrap();
        assert_eq!(config.scheduler.paused_groups, vec!["reports"]);
        let job = &config.scheduler.jobs[0];
        assert_eq!(job.job_type, "Job");
        assert!(job.interruptible);
        assert!(!job.running);
        assert!(job.description.is_none());
    }
}
