//! Process-wide mutable state shared by every endpoint handler

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Size of a single leak buffer block (1 MiB)
pub const LEAK_BLOCK_BYTES: usize = 1024 * 1024;

/// Request counter and leak buffer for the lifetime of the process.
///
/// Neither value is ever reset: the counter only moves forward and the leak
/// buffer only grows until the process exits.
#[derive(Debug, Default)]
pub struct ProcessState {
    requests: AtomicU64,
    leak: Mutex<Vec<Box<[u8]>>>,
}

impl ProcessState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one `/api/process` invocation and return its sequence number
    pub fn record_request(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    /// Append one block to the leak buffer, returning the new block count
    pub fn leak_block(&self) -> usize {
        let block = vec![b'x'; LEAK_BLOCK_BYTES].into_boxed_slice();
        let mut leak = self.leak();
        leak.push(block);
        leak.len()
    }

    pub fn leaked_blocks(&self) -> usize {
        self.leak().len()
    }

    pub fn leaked_bytes(&self) -> usize {
        self.leak().iter().map(|block| block.len()).sum()
    }

    // A poisoned lock still holds a valid Vec; keep growing it.
    fn leak(&self) -> MutexGuard<'_, Vec<Box<[u8]>>> {
        self.leak.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
