#![forbid(unsafe_code)]

//! Tunable constants for placement and edge assignment.
//!
//! `PlacementConfig::default()` matches the documented pixel constants, so
//! the free functions [`decide_placement`](crate::decide_placement) and
//! [`assign_edges`](crate::assign_edges) behave exactly like a default
//! config.

/// Clearance needed beyond the overlay size before a side is kept (arrow plus margin).
pub const EDGE_BUFFER: f64 = 12.0;

/// Distance between anchor and overlay.
pub const GAP: f64 = 20.0;

/// Vertical inset of left/right overlays when step numbers are shown.
pub const STEP_NUMBER_INSET: f64 = 15.0;

/// Horizontal clearance an alignment needs on its open side.
pub const ALIGNMENT_MARGIN: f64 = 10.0;

/// Placement tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Clearance added to the overlay size in the side filters.
    pub edge_buffer: f64,
    /// Gap between anchor and overlay.
    pub gap: f64,
    /// Vertical inset for left/right overlays showing a step number badge.
    pub step_number_inset: f64,
    /// Extra clearance for the alignment fit checks.
    pub alignment_margin: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            edge_buffer: EDGE_BUFFER,
            gap: GAP,
            step_number_inset: STEP_NUMBER_INSET,
            alignment_margin: ALIGNMENT_MARGIN,
        }
    }
}

impl PlacementConfig {
    /// Set the side-filter buffer.
    #[must_use]
    pub fn edge_buffer(mut self, buffer: f64) -> Self {
        self.edge_buffer = buffer;
        self
    }

    /// Set the anchor/overlay gap.
    #[must_use]
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the step-number inset.
    #[must_use]
    pub fn step_number_inset(mut self, inset: f64) -> Self {
        self.step_number_inset = inset;
        self
    }

    /// Set the alignment margin.
    #[must_use]
    pub fn alignment_margin(mut self, margin: f64) -> Self {
        self.alignment_margin = margin;
        self
    }

    /// Problems with the configured values; empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let fields = [
            ("edge_buffer", self.edge_buffer),
            ("gap", self.gap),
            ("step_number_inset", self.step_number_inset),
            ("alignment_margin", self.alignment_margin),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("placement.{name} must be a finite value >= 0, got {value}"));
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = PlacementConfig::default();
        assert_eq!(config.edge_buffer, 12.0);
        assert_eq!(config.gap, 20.0);
        assert_eq!(config.step_number_inset, 15.0);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn negative_or_nan_values_are_reported() {
        let config = PlacementConfig::default().gap(-1.0).edge_buffer(f64::NAN);
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.starts_with("placement.gap")));
        assert!(errors.iter().any(|e| e.starts_with("placement.edge_buffer")));
    }
}
