#![forbid(unsafe_code)]

//! Tour-wide options.
//!
//! With the `config` feature the options load from TOML or JSON:
//!
//! ```toml
//! position_precedence = ["bottom", "top", "right", "left"]
//! tooltip_position = "bottom-middle-aligned"
//! scroll_padding = 40
//!
//! [placement]
//! gap = 16
//! ```
//!
//! `TourOptions::default()` matches the built-in pixel constants.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use waypost_layout::{HIGHLIGHT_PADDING, PlacementConfig, Position, ScrollTo, Side};

/// Default scroll padding around a scrolled-to target.
pub const SCROLL_PADDING: f64 = 30.0;

/// Options shared by every step of a tour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TourOptions {
    /// Sides tried in order when a step's position does not fit.
    pub position_precedence: Vec<Side>,
    /// Run the fit checks; when `false` the requested position is used as-is.
    pub auto_position: bool,
    /// Position for steps that do not name one.
    pub tooltip_position: Position,
    /// Offset left/right overlays to clear the step number badge.
    pub show_step_numbers: bool,
    /// Request a scroll when the anchor is off screen.
    pub scroll_to_element: bool,
    /// Default scroll target for steps that do not name one.
    pub scroll_to: ScrollTo,
    pub scroll_padding: f64,
    /// Padding around the highlight layer.
    pub helper_element_padding: f64,
    /// Cover the anchor with an interaction blocker.
    pub disable_interaction: bool,
    /// Extra class for every overlay.
    pub tooltip_class: Option<String>,
    /// Extra class for every highlight layer.
    pub highlight_class: Option<String>,
    /// Only scan elements in this `data-intro-group`.
    pub group: Option<String>,
    pub placement: PlacementConfig,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            position_precedence: Side::DEFAULT_PRECEDENCE.to_vec(),
            auto_position: true,
            tooltip_position: Position::default(),
            show_step_numbers: false,
            scroll_to_element: true,
            scroll_to: ScrollTo::Element,
            scroll_padding: SCROLL_PADDING,
            helper_element_padding: HIGHLIGHT_PADDING,
            disable_interaction: false,
            tooltip_class: None,
            highlight_class: None,
            group: None,
            placement: PlacementConfig::default(),
        }
    }
}

impl TourOptions {
    #[must_use]
    pub fn position_precedence(mut self, precedence: impl Into<Vec<Side>>) -> Self {
        self.position_precedence = precedence.into();
        self
    }

    #[must_use]
    pub fn auto_position(mut self, enabled: bool) -> Self {
        self.auto_position = enabled;
        self
    }

    #[must_use]
    pub fn tooltip_position(mut self, position: Position) -> Self {
        self.tooltip_position = position;
        self
    }

    #[must_use]
    pub fn show_step_numbers(mut self, show: bool) -> Self {
        self.show_step_numbers = show;
        self
    }

    #[must_use]
    pub fn scroll_to_element(mut self, enabled: bool) -> Self {
        self.scroll_to_element = enabled;
        self
    }

    #[must_use]
    pub fn scroll_to(mut self, target: ScrollTo) -> Self {
        self.scroll_to = target;
        self
    }

    #[must_use]
    pub fn disable_interaction(mut self, disable: bool) -> Self {
        self.disable_interaction = disable;
        self
    }

    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        toml::from_str(s).map_err(OptionsError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OptionsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(s).map_err(OptionsError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OptionsError::Io)?;
        Self::from_json_str(&content)
    }

    /// Problems with the configured values; empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, side) in self.position_precedence.iter().enumerate() {
            if self.position_precedence[..i].contains(side) {
                errors.push(format!("position_precedence lists {side} more than once"));
            }
        }
        for (name, value) in [
            ("scroll_padding", self.scroll_padding),
            ("helper_element_padding", self.helper_element_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be a finite value >= 0, got {value}"));
            }
        }
        if self.group.as_deref().is_some_and(str::is_empty) {
            errors.push("group must not be empty when set".to_string());
        }
        errors.extend(self.placement.validate());
        errors
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn validated(self) -> Result<Self, OptionsError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(OptionsError::Validation(errors))
        }
    }
}

/// Errors from loading or validating [`TourOptions`].
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
