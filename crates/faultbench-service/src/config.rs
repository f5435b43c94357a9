//! Configuration for faultbench-service

use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Fault model tuning
    #[serde(default)]
    pub faults: FaultProfile,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Fixed RNG seed for reproducible fault sequences
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Name reported by the root endpoint
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, default_port())),
            service_name: default_service_name(),
        }
    }
}

/// Probabilities and budgets for each synthetic failure model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultProfile {
    /// Probability that `/api/process` fails
    #[serde(default = "default_process_error_rate")]
    pub process_error_rate: f64,

    /// Probability that `/api/database` fails
    #[serde(default = "default_database_failure_rate")]
    pub database_failure_rate: f64,

    /// Probability that each `/api/stress` line is an error
    #[serde(default = "default_stress_error_rate")]
    pub stress_error_rate: f64,

    /// Lines emitted per `/api/stress` call
    #[serde(default = "default_stress_lines")]
    pub stress_lines: usize,

    /// Lower bound of the `/api/slow` delay, inclusive
    #[serde(default = "default_slow_min_secs")]
    pub slow_min_secs: f64,

    /// Upper bound of the `/api/slow` delay, exclusive
    #[serde(default = "default_slow_max_secs")]
    pub slow_max_secs: f64,

    /// Wall-clock budget of `/api/cpu-spike`
    #[serde(default = "default_cpu_spike_secs")]
    pub cpu_spike_secs: f64,
}

impl Default for FaultProfile {
    fn default() -> Self {
        Self {
            process_error_rate: default_process_error_rate(),
            database_failure_rate: default_database_failure_rate(),
            stress_error_rate: default_stress_error_rate(),
            stress_lines: default_stress_lines(),
            slow_min_secs: default_slow_min_secs(),
            slow_max_secs: default_slow_max_secs(),
            cpu_spike_secs: default_cpu_spike_secs(),
        }
    }
}

impl FaultProfile {
    /// Reject values the fault models cannot sample from
    pub fn validate(&self) -> ServiceResult<()> {
        for (name, rate) in [
            ("process_error_rate", self.process_error_rate),
            ("database_failure_rate", self.database_failure_rate),
            ("stress_error_rate", self.stress_error_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ServiceError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }

        let slow_min = seconds("slow_min_secs", self.slow_min_secs)?;
        let slow_max = seconds("slow_max_secs", self.slow_max_secs)?;
        if slow_min >= slow_max {
            return Err(ServiceError::Config(format!(
                "slow delay range [{}, {}) is empty",
                self.slow_min_secs, self.slow_max_secs
            )));
        }

        seconds("cpu_spike_secs", self.cpu_spike_secs)?;

        Ok(())
    }
}

// Must be representable as a `Duration`
fn seconds(name: &str, value: f64) -> ServiceResult<Duration> {
    Duration::try_from_secs_f64(value).map_err(|e| {
        ServiceError::Config(format!("{} must be a valid duration, got {}: {}", name, value, e))
    })
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_port() -> u16 {
    8080
}

fn default_service_name() -> String {
    "aiops-demo-service".to_string()
}

fn default_process_error_rate() -> f64 {
    0.3
}

fn default_database_failure_rate() -> f64 {
    0.5
}

fn default_stress_error_rate() -> f64 {
    0.3
}

fn default_stress_lines() -> usize {
    10
}

fn default_slow_min_secs() -> f64 {
    2.0
}

fn default_slow_max_secs() -> f64 {
    5.0
}

fn default_cpu_spike_secs() -> f64 {
    3.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServiceConfig {
    /// Load configuration from defaults, an optional file and `FAULTBENCH__*`
    /// environment variables, in increasing precedence
    pub fn load(path: Option<&str>) -> ServiceResult<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&ServiceConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Nested keys use a double underscore, e.g. FAULTBENCH__FAULTS__PROCESS_ERROR_RATE
        builder = builder.add_source(
            config::Environment::with_prefix("FAULTBENCH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: ServiceConfig = builder.build()?.try_deserialize()?;
        config.faults.validate()?;
        Ok(config)
    }

    /// Override the listening port, keeping the bind address
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.listen_addr.set_port(port);
        self
    }
}
