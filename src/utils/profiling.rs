use std::time::{Duration, Instant};

use log::{info, log_enabled, trace, warn, Level};

/// Timing data collected over the most recent step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfiler {
    pub force_time: Duration,
    pub integration_time: Duration,
    pub total_step_time: Duration,

    pub particle_count: usize,
    pub pair_count: usize,
    pub position_substeps: u32,
}

impl StepProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_step_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        info!(
            "step: {} particles, {} pairs, {} position sub-steps, {:.2} ms total (forces {:.1}%, integration {:.1}%)",
            self.particle_count,
            self.pair_count,
            self.position_substeps,
            self.total_step_time.as_secs_f32() * 1000.0,
            (self.force_time.as_micros() as f32 / total_us) * 100.0,
            (self.integration_time.as_micros() as f32 / total_us) * 100.0,
        );
    }

    /// Logs a warning when the last step ran longer than `budget_ms`.
    pub fn warn_if_over_budget(&self, budget_ms: f32) -> bool {
        let elapsed_ms = self.total_step_time.as_secs_f32() * 1000.0;
        if elapsed_ms > budget_ms {
            warn!(
                "Step exceeded budget: {:.2} ms > {:.2} ms ({} particles)",
                elapsed_ms, budget_ms, self.particle_count
            );
            return true;
        }
        false
    }
}

/// Adds the lifetime of the guard to `output`, tracing start and end.
pub struct ScopedTimer<'a> {
    label: &'static str,
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'static str, output: &'a mut Duration) -> Self {
        if log_enabled!(Level::Trace) {
            trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
            output,
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        *self.output += elapsed;
        if log_enabled!(Level::Trace) {
            trace!("end {} ({} µs)", self.label, elapsed.as_micros());
        }
    }
}
