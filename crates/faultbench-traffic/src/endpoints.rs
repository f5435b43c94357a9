//! Weighted endpoint table
//!
//! Selection uses a cumulative-weight table and a single uniform draw, so the
//! probability of each endpoint is exactly `weight / total`.

use crate::error::{TrafficError, TrafficResult};
use rand::Rng;
use serde::Serialize;

/// One target endpoint and its relative weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSpec {
    pub path: String,
    pub description: String,
    pub weight: u32,
}

impl EndpointSpec {
    pub fn new(path: impl Into<String>, description: impl Into<String>, weight: u32) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            weight,
        }
    }
}

/// Immutable table of endpoints with precomputed cumulative weights
#[derive(Debug, Clone)]
pub struct EndpointTable {
    endpoints: Vec<EndpointSpec>,
    cumulative: Vec<u64>,
}

impl EndpointTable {
    /// Build a table; every weight must be positive
    pub fn new(endpoints: Vec<EndpointSpec>) -> TrafficResult<Self> {
        if endpoints.is_empty() {
            return Err(TrafficError::Config("endpoint table is empty".to_string()));
        }

        if let Some(endpoint) = endpoints.iter().find(|e| e.weight == 0) {
            return Err(TrafficError::Config(format!(
                "endpoint {} has zero weight",
                endpoint.path
            )));
        }

        Ok(Self::from_validated(endpoints))
    }

    /// The default traffic mix: `/api/process` at three times every other endpoint
    pub fn standard() -> Self {
        let endpoints = vec![
            EndpointSpec::new("/api/process", "Normal requests with 30% errors", 3),
            EndpointSpec::new("/api/slow", "Slow endpoint (2-5s)", 1),
            EndpointSpec::new("/api/database", "Database errors (50% fail)", 1),
            EndpointSpec::new("/api/permission", "Permission errors", 1),
            EndpointSpec::new("/api/network", "Network errors", 1),
        ];
        Self::from_validated(endpoints)
    }

    fn from_validated(endpoints: Vec<EndpointSpec>) -> Self {
        let cumulative = endpoints
            .iter()
            .scan(0u64, |total, e| {
                *total += u64::from(e.weight);
                Some(*total)
            })
            .collect();

        Self {
            endpoints,
            cumulative,
        }
    }

    pub fn endpoints(&self) -> &[EndpointSpec] {
        &self.endpoints
    }

    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Probability of selecting `path`
    pub fn probability(&self, path: &str) -> f64 {
        let weight: u64 = self
            .endpoints
            .iter()
            .filter(|e| e.path == path)
            .map(|e| u64::from(e.weight))
            .sum();
        weight as f64 / self.total_weight() as f64
    }

    /// Pick an endpoint with one uniform draw
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &EndpointSpec {
        let draw = rng.gen_range(0..self.total_weight());
        &self.endpoints[self.index_for(draw)]
    }

    // First endpoint whose cumulative bound exceeds the draw
    fn index_for(&self, draw: u64) -> usize {
        self.cumulative.partition_point(|&bound| bound <= draw)
    }
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self::standard()
    }
}
