use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::{RenderOptions, ScaleLimits};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Multiplicative zoom per zoom-in request; zoom-out uses the inverse.
    pub zoom_step: f64,
    pub label_visibility_scale_threshold: f64,
    /// Pointer travel below this between press and release counts as a click.
    pub drag_threshold_pixels: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 6.0,
            zoom_step: 1.1,
            label_visibility_scale_threshold: 0.8,
            drag_threshold_pixels: 4.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("min_scale must be positive, got {0}")]
    NonPositiveMinScale(f64),
    #[error("min_scale {min} is larger than max_scale {max}")]
    InvertedScaleRange { min: f64, max: f64 },
    #[error("zoom_step must be greater than 1, got {0}")]
    ZoomStepTooSmall(f64),
    #[error("drag_threshold_pixels must not be negative, got {0}")]
    NegativeDragThreshold(f64),
}

impl ViewConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read view config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid view config JSON in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_scale.is_nan() || self.min_scale <= 0.0 {
            return Err(ConfigError::NonPositiveMinScale(self.min_scale));
        }
        if self.min_scale > self.max_scale || self.max_scale.is_nan() {
            return Err(ConfigError::InvertedScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.zoom_step.is_nan() || self.zoom_step <= 1.0 {
            return Err(ConfigError::ZoomStepTooSmall(self.zoom_step));
        }
        if self.drag_threshold_pixels.is_nan() || self.drag_threshold_pixels < 0.0 {
            return Err(ConfigError::NegativeDragThreshold(
                self.drag_threshold_pixels,
            ));
        }
        Ok(())
    }

    pub fn scale_limits(&self) -> ScaleLimits {
        ScaleLimits {
            min: self.min_scale,
            max: self.max_scale,
        }
    }

    pub fn render_options(&self, show_labels: bool) -> RenderOptions {
        RenderOptions {
            show_labels,
            label_visibility_scale_threshold: self.label_visibility_scale_threshold,
        }
    }
}
