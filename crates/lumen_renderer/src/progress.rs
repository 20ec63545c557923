//! Lock-free render progress shared by all workers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts finished work units and logs each completed tenth.
#[derive(Debug)]
pub struct Progress {
    total: u64,
    done: AtomicU64,
    unit: &'static str,
}

impl Progress {
    pub fn new(total: u64, unit: &'static str) -> Self {
        Self {
            total,
            done: AtomicU64::new(0),
            unit,
        }
    }

    /// Record `n` finished units.
    pub fn advance(&self, n: u64) {
        if self.total == 0 || n == 0 {
            return;
        }

        let before = self.done.fetch_add(n, Ordering::Relaxed);
        let after = (before + n).min(self.total);

        if decile(before, self.total) != decile(after, self.total) {
            log::info!(
                "{:>3}% ({}/{} {})",
                after * 100 / self.total,
                after,
                self.total,
                self.unit
            );
        }
    }

    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed).min(self.total)
    }

    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done() as f64 / self.total as f64
        }
    }
}

fn decile(done: u64, total: u64) -> u64 {
    done.min(total) * 10 / total
}
