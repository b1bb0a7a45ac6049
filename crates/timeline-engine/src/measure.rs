//! One-shot capture of the first measured event body.

use tracing::debug;

/// Position and width of an event body as reported by the host after
/// layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasuredGeometry {
    pub x: f32,
    pub width: f32,
}

impl MeasuredGeometry {
    pub fn new(x: f32, width: f32) -> Self {
        Self { x, width }
    }

    /// A measurement with both fields at zero carries no layout information.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.width == 0.0
    }
}

/// Holds the first non-zero measurement for the component's lifetime.
#[derive(Debug, Default)]
pub struct MeasurementCache {
    captured: Option<MeasuredGeometry>,
}

impl MeasurementCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured measurement, if any.
    pub fn get(&self) -> Option<MeasuredGeometry> {
        self.captured
    }

    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    /// Offer a measurement.
    ///
    /// Returns `true` only when this call captured it, in which case rows
    /// rendered so far carry stale circle geometry and need another pass.
    pub fn record(&mut self, measurement: MeasuredGeometry) -> bool {
        if self.captured.is_some() || measurement.is_zero() {
            return false;
        }
        debug!(
            x = measurement.x,
            width = measurement.width,
            "captured event body measurement"
        );
        self.captured = Some(measurement);
        true
    }

    pub fn reset(&mut self) {
        self.captured = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_nonzero_measurement_wins() {
        let mut cache = MeasurementCache::new();
        assert!(cache.get().is_none());

        assert!(cache.record(MeasuredGeometry::new(60.0, 240.0)));
        assert!(!cache.record(MeasuredGeometry::new(10.0, 10.0)));
        assert_eq!(cache.get(), Some(MeasuredGeometry::new(60.0, 240.0)));
    }

    #[test]
    fn test_zero_measurement_is_ignored() {
        let mut cache = MeasurementCache::new();
        assert!(!cache.record(MeasuredGeometry::default()));
        assert!(!cache.is_captured());

        // Only one field needs to be non-zero.
        assert!(cache.record(MeasuredGeometry::new(0.0, 120.0)));
    }

    #[test]
    fn test_reset_allows_capture_again() {
        let mut cache = MeasurementCache::new();
        cache.record(MeasuredGeometry::new(1.0, 1.0));
        cache.reset();
        assert!(cache.record(MeasuredGeometry::new(2.0, 2.0)));
        assert_eq!(cache.get(), Some(MeasuredGeometry::new(2.0, 2.0)));
    }

    proptest! {
        #[test]
        fn prop_capture_is_at_most_once(
            first in (1.0f32..500.0, 1.0f32..500.0),
            rest in prop::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 0..20),
        ) {
            let mut cache = MeasurementCache::new();
            let first = MeasuredGeometry::new(first.0, first.1);
            prop_assert!(cache.record(first));
            for (x, width) in rest {
                prop_assert!(!cache.record(MeasuredGeometry::new(x, width)));
                prop_assert_eq!(cache.get(), Some(first));
            }
        }
    }
}
