// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! ps3d
//!
//! Interprets a small PostScript-like drawing language and compiles its
//! stroked and filled paths into a solid OBJ mesh with an MTL material
//! table, ready for 3D printing.

pub mod config;
pub mod converter;
pub mod error;
pub mod geometry;
pub mod interp;
pub mod io;
pub mod utils;

pub use config::{ConvertConfig, POSTSCRIPT_POINT_MM};
pub use converter::{convert_reader, convert_str, convert_with_config, ConversionSummary, Converted};
pub use error::Ps3dError;
pub use geometry::{Mesh, Path};
pub use interp::{Interpreter, Operator, Value};

use anyhow::Result;

/// Convert a ps3d file into `mesh_path` (OBJ) and `material_path` (MTL)
/// with the default configuration
pub fn convert(
    input: impl AsRef<std::path::Path>,
    mesh_path: impl AsRef<std::path::Path>,
    material_path: impl AsRef<std::path::Path>,
) -> Result<ConversionSummary> {
    convert_with_config(
        input.as_ref(),
        mesh_path.as_ref(),
        material_path.as_ref(),
        &ConvertConfig::default(),
    )
}
