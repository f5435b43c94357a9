//! Latency and resource-exhaustion handlers
//!
//! `/api/slow` and `/api/cpu-spike` hold the runtime worker thread that polls
//! them for their full duration. Concurrent calls therefore eat into request
//! handling capacity, which is the signal a diagnosis agent should pick up.

use crate::api::state::AppState;
use crate::state::LEAK_BLOCK_BYTES;
use axum::{extract::State, Json};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Leak size past which every call also logs a critical event
pub const LEAK_CRITICAL_BLOCKS: usize = 10;

/// `/api/slow` response
#[derive(Debug, Serialize, Deserialize)]
pub struct SlowResponse {
    pub status: String,
    /// Sampled delay in seconds
    pub delay: f64,
    /// Measured time spent blocked, in seconds
    pub elapsed: f64,
    pub message: String,
}

/// Block for a delay sampled from the configured range
pub async fn slow(State(state): State<AppState>) -> Json<SlowResponse> {
    let (min, max) = (state.profile.slow_min_secs, state.profile.slow_max_secs);
    let delay = state.sample(|rng| rng.gen_range(min..max));

    state
        .events
        .warning(format!("Slow endpoint called, sleeping for {:.2}s", delay));

    let started = Instant::now();
    std::thread::sleep(Duration::from_secs_f64(delay));
    let elapsed = started.elapsed().as_secs_f64();

    state.events.info("Slow endpoint completed");

    Json(SlowResponse {
        status: "completed".to_string(),
        delay,
        elapsed,
        message: "This endpoint is intentionally slow".to_string(),
    })
}

/// `/api/memory-leak` response
#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryLeakResponse {
    pub status: String,
    pub leaked_mb: usize,
}

/// Retain one more megabyte for the life of the process
pub async fn memory_leak(State(state): State<AppState>) -> Json<MemoryLeakResponse> {
    let blocks = state.process.leak_block();
    let leaked_mb = blocks * LEAK_BLOCK_BYTES / (1024 * 1024);

    state
        .events
        .warning(format!("Memory leak: {}MB allocated", leaked_mb));

    if blocks > LEAK_CRITICAL_BLOCKS {
        state.events.critical(format!(
            "Memory leak over {}MB: {}MB retained",
            LEAK_CRITICAL_BLOCKS, leaked_mb
        ));
    }

    Json(MemoryLeakResponse {
        status: "ok".to_string(),
        leaked_mb,
    })
}

/// `/api/cpu-spike` response
#[derive(Debug, Serialize, Deserialize)]
pub struct CpuSpikeResponse {
    pub status: String,
    pub computation_result: u64,
    pub elapsed: f64,
}

/// Busy-loop for the configured budget
pub async fn cpu_spike(State(state): State<AppState>) -> Json<CpuSpikeResponse> {
    state.events.warning("CPU spike endpoint called");

    let started = Instant::now();
    let checksum = burn_cpu(Duration::from_secs_f64(state.profile.cpu_spike_secs));
    let elapsed = started.elapsed().as_secs_f64();

    state.events.info("CPU spike completed");

    Json(CpuSpikeResponse {
        status: "completed".to_string(),
        computation_result: checksum,
        elapsed,
    })
}

/// Sum integer ranges until `budget` has elapsed, returning the running checksum
pub fn burn_cpu(budget: Duration) -> u64 {
    let started = Instant::now();
    let mut checksum = 0u64;

    while started.elapsed() < budget {
        let chunk: u64 = (0..10_000u64).map(std::hint::black_box).sum();
        checksum = checksum.wrapping_add(chunk);
    }

    checksum
}
