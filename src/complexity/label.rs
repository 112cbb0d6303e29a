//! Complexity-class labels - presentation-layer policy
//!
//! Mapping a fitted exponent to a class name is a tolerance decision, not a
//! derived fact: over practical size ranges an `O(n log n)` algorithm fits
//! a slope near 1.0, so the band width is the caller's policy to set.

/// One labeling band: exponents within `tolerance` of `exponent` get
/// `label`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityBand {
    exponent: f64,
    tolerance: f64,
    label: String,
}

impl ComplexityBand {
    /// Create a band around a canonical exponent.
    #[must_use]
    pub fn new(exponent: f64, tolerance: f64, label: impl Into<String>) -> Self {
        Self {
            exponent,
            tolerance,
            label: label.into(),
        }
    }

    /// Check whether a fitted exponent falls inside this band.
    #[must_use]
    pub fn contains(&self, fitted: f64) -> bool {
        (fitted - self.exponent).abs() <= self.tolerance
    }

    /// The band's class label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Configurable exponent-to-label classifier.
///
/// Bands are tried in declaration order, first match wins; an exponent no
/// band covers falls back to `O(n^x)` with the fitted value.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityLabeler {
    bands: Vec<ComplexityBand>,
}

impl Default for ComplexityLabeler {
    /// Canonical bands: 1.0 ± 0.3 reads as linearithmic, 2.0 ± 0.3 as
    /// quadratic.
    fn default() -> Self {
        Self {
            bands: vec![
                ComplexityBand::new(1.0, 0.3, "O(n log n)"),
                ComplexityBand::new(2.0, 0.3, "O(n^2)"),
            ],
        }
    }
}

impl ComplexityLabeler {
    /// Create a labeler with no bands (every exponent falls back to
    /// `O(n^x)`).
    #[must_use]
    pub const fn empty() -> Self {
        Self { bands: Vec::new() }
    }

    /// Append a band. Declaration order is match priority.
    #[must_use]
    pub fn with_band(mut self, band: ComplexityBand) -> Self {
        self.bands.push(band);
        self
    }

    /// Label a fitted exponent.
    #[must_use]
    pub fn label(&self, exponent: f64) -> String {
        self.bands
            .iter()
            .find(|band| band.contains(exponent))
            .map_or_else(|| format!("O(n^{exponent:.2})"), |band| band.label().to_string())
    }
}
