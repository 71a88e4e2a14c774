//! Running min/max accumulator for per-polygon property values.

/// Tracks the `[min, max]` range of observed property values.
///
/// Absent (`None`) and non-finite values are skipped. If nothing valid was
/// ever observed, [`PropertyRange::bounds`] returns `None` rather than
/// exposing sentinel extremes.
#[derive(Debug, Clone, Copy)]
pub struct PropertyRange {
    min: f32,
    max: f32,
    seen: bool,
}

impl Default for PropertyRange {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyRange {
    /// Creates an empty range.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            seen: false,
        }
    }

    /// Folds one optional property value into the range.
    pub fn observe(&mut self, value: Option<f32>) {
        if let Some(v) = value {
            if v.is_finite() {
                self.min = self.min.min(v);
                self.max = self.max.max(v);
                self.seen = true;
            }
        }
    }

    /// Returns `[min, max]`, or `None` if no finite value was observed.
    #[must_use]
    pub fn bounds(&self) -> Option<[f32; 2]> {
        self.seen.then_some([self.min, self.max])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that an untouched range reports no bounds.
    #[test]
    fn test_empty_range_is_none() {
        let range = PropertyRange::new();
        assert_eq!(range.bounds(), None);
    }

    /// Test min/max accumulation over mixed values.
    #[test]
    fn test_observe_values() {
        let mut range = PropertyRange::new();
        range.observe(Some(5.0));
        range.observe(Some(-2.0));
        range.observe(Some(3.0));
        assert_eq!(range.bounds(), Some([-2.0, 5.0]));
    }

    /// Test that absent values occupy no part of the range.
    #[test]
    fn test_none_values_skipped() {
        let mut range = PropertyRange::new();
        range.observe(None);
        assert_eq!(range.bounds(), None);

        range.observe(Some(1.0));
        range.observe(None);
        assert_eq!(range.bounds(), Some([1.0, 1.0]));
    }

    /// Test that NaN and infinities never poison the bounds.
    #[test]
    fn test_non_finite_skipped() {
        let mut range = PropertyRange::new();
        range.observe(Some(f32::NAN));
        range.observe(Some(f32::INFINITY));
        assert_eq!(range.bounds(), None);

        range.observe(Some(2.5));
        assert_eq!(range.bounds(), Some([2.5, 2.5]));
    }
}
