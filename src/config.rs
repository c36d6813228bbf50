// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conversion configuration

use crate::geometry::{Color, PrintLimits};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One PostScript point (1/72 inch) in millimetres
pub const POSTSCRIPT_POINT_MM: f64 = 25.4 / 72.0;

/// File looked up in the working directory by [`ConvertConfig::load`]
pub const DEFAULT_CONFIG_FILE: &str = "ps3d.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Required prefix of the first input line
    pub header_prefix: String,
    /// Accept a plain `%!ps` header (with a warning)
    pub allow_plain_postscript: bool,
    /// Factor from input units to output units
    pub unit_scale: f64,
    /// Thinnest printable line width, in output units
    pub min_thickness: f64,
    /// Color substituted when `setgray` asks for black
    pub neutral_gray: [f64; 3],
    /// Decimal places of vertex coordinates
    pub precision: usize,
    /// Reported by `currentpagedevice`
    pub page_size: [f64; 2],
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            header_prefix: "%!ps3d".to_string(),
            allow_plain_postscript: false,
            unit_scale: 1.0,
            min_thickness: 0.1,
            neutral_gray: [0.5, 0.5, 0.5],
            precision: 6,
            page_size: [0.0, 0.0],
        }
    }
}

impl ConvertConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ConvertConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// `ps3d.toml` if present, else defaults, then environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `PS3D_UNIT_SCALE` and `PS3D_MIN_THICKNESS`
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(scale) = std::env::var("PS3D_UNIT_SCALE") {
            self.unit_scale = scale
                .parse()
                .with_context(|| format!("Invalid PS3D_UNIT_SCALE: {}", scale))?;
        }
        if let Ok(min) = std::env::var("PS3D_MIN_THICKNESS") {
            self.min_thickness = min
                .parse()
                .with_context(|| format!("Invalid PS3D_MIN_THICKNESS: {}", min))?;
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn limits(&self) -> PrintLimits {
        PrintLimits {
            unit_scale: self.unit_scale,
            min_thickness: self.min_thickness,
        }
    }

    pub fn neutral_color(&self) -> Color {
        Color::from_array(self.neutral_gray)
    }
}
