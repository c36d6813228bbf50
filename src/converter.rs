// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conversion driver: source lines in, OBJ and MTL out

use crate::config::ConvertConfig;
use crate::geometry::BoundingBox;
use crate::interp::Interpreter;
use crate::io::{check_header, open_input, ObjEmitter};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

/// What a conversion produced
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub lines: usize,
    pub vertices: usize,
    pub faces: usize,
    pub materials: usize,
    /// In output units
    pub bounding_box: BoundingBox,
}

/// In-memory conversion result
#[derive(Debug, Clone)]
pub struct Converted {
    pub summary: ConversionSummary,
    pub obj: String,
    pub mtl: String,
}

/// Run a whole source through the interpreter
///
/// The first line must carry the ps3d header. Any error aborts the
/// conversion; output already written is left as is.
pub fn convert_reader<R, O, M>(
    reader: R,
    obj: O,
    mtl: M,
    material_file: &str,
    config: &ConvertConfig,
) -> Result<(ConversionSummary, O, M)>
where
    R: BufRead,
    O: Write,
    M: Write,
{
    let mut lines = reader.lines();
    let header = lines.next().transpose().context("Failed to read input header")?;
    check_header(header.as_deref(), config)?;

    let emitter = ObjEmitter::new(obj, mtl, material_file, config)
        .context("Failed to start mesh output")?;
    let mut interpreter = Interpreter::new(emitter, config);

    let mut count = 1;
    for (i, line) in lines.enumerate() {
        let number = i + 2;
        let line = line.with_context(|| format!("Failed to read line {}", number))?;
        interpreter
            .process_line(&line)
            .with_context(|| format!("line {}: {}", number, line.trim()))?;
        count = number;
    }

    let mesh = interpreter.mesh();
    let summary = ConversionSummary {
        lines: count,
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
        materials: interpreter.materials().len(),
        bounding_box: mesh.bounding_box().scaled(config.unit_scale),
    };
    let (obj, mtl) = interpreter.finish().context("Failed to finish output")?;
    Ok((summary, obj, mtl))
}

/// Convert source text held in memory
pub fn convert_str(source: &str, material_file: &str, config: &ConvertConfig) -> Result<Converted> {
    let (summary, obj, mtl) =
        convert_reader(source.as_bytes(), Vec::new(), Vec::new(), material_file, config)?;
    Ok(Converted {
        summary,
        obj: String::from_utf8(obj).context("Mesh output is not UTF-8")?,
        mtl: String::from_utf8(mtl).context("Material output is not UTF-8")?,
    })
}

/// Convert `input` into a mesh file and its companion material file
pub fn convert_with_config(
    input: &Path,
    mesh_path: &Path,
    material_path: &Path,
    config: &ConvertConfig,
) -> Result<ConversionSummary> {
    let reader = open_input(input)?;
    let obj = File::create(mesh_path)
        .with_context(|| format!("Failed to create mesh file: {}", mesh_path.display()))?;
    let mtl = File::create(material_path)
        .with_context(|| format!("Failed to create material file: {}", material_path.display()))?;
    let material_file = material_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| material_path.display().to_string());

    let (summary, _, _) = convert_reader(
        reader,
        BufWriter::new(obj),
        BufWriter::new(mtl),
        &material_file,
        config,
    )
    .with_context(|| format!("Failed to convert {}", input.display()))?;
    Ok(summary)
}
