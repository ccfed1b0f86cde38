use std::str::FromStr;

use chrono::Duration;

use crate::error::config::ConfigError;

/// Settings for a single course update run.
#[derive(Clone, Debug)]
pub struct UpdateConfig {
    /// Length of one cache window.
    pub timeslice_duration: Duration,
    /// Estimated run duration above which optional steps may be skipped.
    pub update_duration_ceiling: Duration,
    /// Estimated update cost per day of course span.
    pub estimated_secs_per_day: i64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            timeslice_duration: Duration::days(1),
            update_duration_ceiling: Duration::hours(1),
            estimated_secs_per_day: 30,
        }
    }
}

/// Settings for the periodic update job.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Cron expression (with seconds) for the course update job.
    pub cron_expression: String,
    /// Maximum number of course updates running at once.
    pub max_concurrent_updates: usize,
    /// Courses keep updating for this long after their end.
    pub grace_period: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cron_expression: "0 0 */6 * * *".to_string(),
            max_concurrent_updates: 4,
            grace_period: Duration::days(30),
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub update: UpdateConfig,
    pub scheduler: SchedulerConfig,
    /// Whether the deployed product variant uses article status annotation.
    pub supports_status_annotation: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let update_defaults = UpdateConfig::default();
        let scheduler_defaults = SchedulerConfig::default();

        let timeslice_secs: i64 = parse_env_or(
            "TIMESLICE_DURATION_SECS",
            update_defaults.timeslice_duration.num_seconds(),
        )?;
        if timeslice_secs <= 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "TIMESLICE_DURATION_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let max_concurrent_updates: usize = parse_env_or(
            "MAX_CONCURRENT_COURSE_UPDATES",
            scheduler_defaults.max_concurrent_updates,
        )?;
        if max_concurrent_updates == 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "MAX_CONCURRENT_COURSE_UPDATES".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            update: UpdateConfig {
                timeslice_duration: Duration::seconds(timeslice_secs),
                update_duration_ceiling: Duration::seconds(parse_env_or(
                    "UPDATE_DURATION_CEILING_SECS",
                    update_defaults.update_duration_ceiling.num_seconds(),
                )?),
                estimated_secs_per_day: parse_env_or(
                    "ESTIMATED_UPDATE_SECS_PER_DAY",
                    update_defaults.estimated_secs_per_day,
                )?,
            },
            scheduler: SchedulerConfig {
                cron_expression: std::env::var("UPDATE_CRON")
                    .unwrap_or(scheduler_defaults.cron_expression),
                max_concurrent_updates,
                grace_period: Duration::days(parse_env_or(
                    "UPDATE_GRACE_DAYS",
                    scheduler_defaults.grace_period.num_days(),
                )?),
            },
            supports_status_annotation: parse_env_or("PRODUCT_SUPPORTS_STATUS_ANNOTATION", true)?,
        })
    }
}

/// Read an optional environment variable, falling back to `default` when unset.
fn parse_env_or<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}
