//! Bounded-duration concurrent traffic generator
//!
//! A session authenticates once, probes `/health`, then keeps scheduling
//! weighted-random requests until the deadline. The deadline is checked before
//! picking and again once a worker slot is free; requests already in flight
//! always run to completion and are drained before the report is produced.

use crate::auth::AuthProvider;
use crate::client::ServiceClient;
use crate::endpoints::EndpointTable;
use crate::error::{TrafficError, TrafficResult};
use crate::output::{print_failure, print_success, print_warning};
use crate::report::SessionReport;
use crate::session::SessionCounters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{sleep, Instant};

/// Traffic session configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// How long new requests keep being scheduled
    pub duration: Duration,

    /// Maximum requests in flight
    pub concurrency: usize,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Timeout for the connectivity probe
    pub probe_timeout: Duration,

    /// Lower bound of the pause between dispatches
    pub min_delay: Duration,

    /// Upper bound of the pause between dispatches
    pub max_delay: Duration,

    /// Weighted endpoint mix
    pub endpoints: EndpointTable,

    /// Fixed RNG seed for a reproducible request sequence
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(5 * 60),
            concurrency: 3,
            request_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(2),
            endpoints: EndpointTable::standard(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_duration_minutes(minutes: u64) -> Self {
        Self {
            duration: Duration::from_secs(minutes * 60),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> TrafficResult<()> {
        if self.concurrency == 0 {
            return Err(TrafficError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.min_delay > self.max_delay {
            return Err(TrafficError::Config(format!(
                "min delay {:?} exceeds max delay {:?}",
                self.min_delay, self.max_delay
            )));
        }
        Ok(())
    }
}

/// Drives weighted random load against one service.
///
/// A generator represents a single session: its counters are never reset.
pub struct TrafficGenerator {
    service_url: String,
    auth: Arc<dyn AuthProvider>,
    config: GeneratorConfig,
    counters: Arc<SessionCounters>,
}

impl TrafficGenerator {
    pub fn new(
        service_url: impl Into<String>,
        auth: Arc<dyn AuthProvider>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            service_url: service_url.into(),
            auth,
            config,
            counters: Arc::new(SessionCounters::new()),
        }
    }

    /// Live session counters, updated as requests complete
    pub fn counters(&self) -> Arc<SessionCounters> {
        self.counters.clone()
    }

    /// Run one session to completion.
    ///
    /// Only authentication and setup failures are returned as errors; every
    /// request failure is counted and the session carries on.
    pub async fn run(&self) -> TrafficResult<SessionReport> {
        self.config.validate()?;

        tracing::info!(provider = self.auth.name(), "Fetching authentication token");
        let token = self.auth.fetch_token().await?;

        let client = Arc::new(ServiceClient::new(
            &self.service_url,
            token,
            self.config.request_timeout,
        )?);

        self.probe(&client).await;

        let counters = self.counters.clone();
        let permits = Arc::new(Semaphore::new(self.config.concurrency));
        let mut in_flight = JoinSet::new();
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let started = Instant::now();
        let deadline = started + self.config.duration;
        tracing::info!(
            service = %client.base_url(),
            duration_secs = self.config.duration.as_secs(),
            "Generating traffic"
        );

        while Instant::now() < deadline {
            let path = self.config.endpoints.pick(&mut rng).path.clone();

            let Ok(permit) = permits.clone().acquire_owned().await else {
                break;
            };

            // Waiting for a free slot can outlast the deadline
            if Instant::now() >= deadline {
                drop(permit);
                break;
            }

            let client = client.clone();
            let counters = counters.clone();
            in_flight.spawn(async move {
                dispatch(&client, &path, &counters).await;
                drop(permit);
            });

            sleep(self.pause(&mut rng)).await;
        }

        tracing::debug!(
            pending = in_flight.len(),
            "Deadline reached, draining in-flight requests"
        );
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("Request task failed: {}", e);
            }
        }

        Ok(SessionReport::new(counters.snapshot(), started.elapsed()))
    }

    /// One authenticated health request; never fatal
    async fn probe(&self, client: &ServiceClient) {
        match client
            .get_with_timeout("/health", self.config.probe_timeout)
            .await
        {
            Ok(status) if status.is_success() => {
                print_success("Service is reachable with authentication");
            }
            Ok(status) => {
                tracing::warn!(status = status.as_u16(), "Connectivity probe returned non-success");
                print_warning(&format!("Service returned status {}", status.as_u16()));
            }
            Err(e) => {
                tracing::warn!("Connectivity probe failed: {}", e);
                print_warning(&format!("Service probe failed: {}", e));
            }
        }
    }

    fn pause(&self, rng: &mut StdRng) -> Duration {
        let min = self.config.min_delay.as_secs_f64();
        let max = self.config.max_delay.as_secs_f64();
        Duration::from_secs_f64(rng.gen_range(min..=max))
    }
}

/// Send one request and account for its outcome
async fn dispatch(client: &ServiceClient, path: &str, counters: &SessionCounters) {
    match client.get(path).await {
        Ok(status) if status.as_u16() >= 400 => {
            counters.record(true);
            print_failure(&format!("{} -> {}", path, status.as_u16()));
        }
        Ok(status) => {
            counters.record(false);
            print_success(&format!("{} -> {}", path, status.as_u16()));
        }
        Err(e) => {
            counters.record(true);
            print_failure(&format!("{} -> Error: {}", path, e));
        }
    }
}
