//! Rolling telemetry window
//!
//! A bounded FIFO owned by the host. Analytics never see the buffer itself,
//! only owned snapshots taken from it.

use std::collections::VecDeque;
use tracing::debug;

use crate::config::WindowConfig;
use crate::error::Result;
use crate::models::{FuelType, TelemetrySample};

/// Bounded rolling window of telemetry samples
#[derive(Debug, Clone)]
pub struct TelemetryBuffer {
    samples: VecDeque<TelemetrySample>,
    capacity: usize,
    reset_on_fuel_change: bool,
}

impl TelemetryBuffer {
    /// Create a buffer holding at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self::with_config(&WindowConfig {
            buffer_capacity: capacity,
            ..WindowConfig::default()
        })
    }

    pub fn with_config(config: &WindowConfig) -> Self {
        let capacity = config.buffer_capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            reset_on_fuel_change: config.reset_on_fuel_change,
        }
    }

    /// Append a sample, evicting the oldest at capacity
    ///
    /// Returns the previous fuel type if the sample triggered a history
    /// reset because its fuel differs from the buffered one.
    pub fn push(&mut self, sample: TelemetrySample) -> Option<FuelType> {
        let mut switched_from = None;

        if self.reset_on_fuel_change {
            if let Some(current) = self.fuel_type() {
                if current != sample.fuel_type {
                    debug!(
                        from = %current,
                        to = %sample.fuel_type,
                        discarded = self.samples.len(),
                        "Fuel changed, resetting telemetry window"
                    );
                    self.samples.clear();
                    switched_from = Some(current);
                }
            }
        }

        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);

        switched_from
    }

    /// Validate, then push; the buffer is untouched on error
    pub fn push_checked(&mut self, sample: TelemetrySample) -> Result<Option<FuelType>> {
        sample.validate()?;
        Ok(self.push(sample))
    }

    /// Owned chronological copy of the window, oldest first
    pub fn snapshot(&self) -> Vec<TelemetrySample> {
        self.samples.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.samples.back()
    }

    /// Fuel type of the buffered history
    pub fn fuel_type(&self) -> Option<FuelType> {
        self.latest().map(|s| s.fuel_type)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for TelemetryBuffer {
    fn default() -> Self {
        Self::with_config(&WindowConfig::default())
    }
}
