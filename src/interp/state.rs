// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Graphics state

use crate::geometry::{Color, Path};
use serde::{Deserialize, Serialize};

/// Line width, color and current path
///
/// A plain value: `gsave` stores a clone, so later drawing never
/// reaches into a saved snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsState {
    pub line_width: f64,
    pub color: Color,
    pub path: Path,
}

impl GraphicsState {
    pub fn new(color: Color) -> Self {
        Self {
            line_width: 1.0,
            color,
            path: Path::new(),
        }
    }
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}
