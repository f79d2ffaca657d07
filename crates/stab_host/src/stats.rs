//! Solve-time statistics for a recovery sweep.
//!
//! Collects per-decode wall-clock times and reports min, max, average, and
//! a coarse histogram so slow weights or pathological programs stand out.

use std::time::Duration;

const BUCKETS: usize = 20;
const BUCKET_MICROS: u64 = 1_000;

/// Tracks solve-time statistics.
///
/// Times are stored in microseconds. Buckets are 1 ms wide and the last
/// bucket collects everything slower.
pub struct SolveStats {
    pub min: u64,
    pub max: u64,
    pub sum: u64,
    pub count: u64,
    pub buckets: [u64; BUCKETS],
}

impl SolveStats {
    pub fn new() -> Self {
        Self {
            min: u64::MAX,
            max: 0,
            sum: 0,
            count: 0,
            buckets: [0; BUCKETS],
        }
    }

    /// Records one solve time.
    ///
    /// # Arguments
    ///
    /// * `elapsed` - Wall-clock time of a single decode
    pub fn update(&mut self, elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.min = self.min.min(micros);
        self.max = self.max.max(micros);
        self.sum = self.sum.saturating_add(micros);
        self.count += 1;

        let idx = (micros / BUCKET_MICROS).min(BUCKETS as u64 - 1) as usize;
        self.buckets[idx] += 1;
    }

    /// Average solve time in microseconds, or 0.0 with no samples.
    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    pub fn print_report(&self) {
        println!("\nSolve Time Metrics");
        println!("Count: {}", self.count);
        if self.count == 0 {
            return;
        }

        println!("Min:   {:.3} ms", self.min as f64 / 1000.0);
        println!("Avg:   {:.3} ms", self.avg() / 1000.0);
        println!("Max:   {:.3} ms", self.max as f64 / 1000.0);

        println!("Distribution (1ms buckets):");
        for (i, &count) in self.buckets.iter().enumerate() {
            if count > 0 {
                let open = if i == BUCKETS - 1 { ">" } else { "" };
                println!("[{:3}-{:3}{} ms]: {}", i, i + 1, open, count);
            }
        }
    }
}
