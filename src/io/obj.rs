// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wavefront OBJ/MTL emitter
//!
//! Records are streamed: comments and material switches are written as
//! they happen, geometry is written when a page is flushed. Vertex
//! numbering is global across pages.

use crate::config::ConvertConfig;
use crate::geometry::{Material, MaterialRegistry, Mesh};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub vertices: usize,
    pub faces: usize,
    pub materials: usize,
}

pub struct ObjEmitter<O: Write, M: Write> {
    obj: O,
    mtl: M,
    precision: usize,
    unit_scale: f64,
    vertices_written: usize,
    faces_written: usize,
    materials_written: usize,
    current_material: Option<String>,
}

impl<O: Write, M: Write> ObjEmitter<O, M> {
    /// Start a mesh stream that references `material_file` for its materials
    pub fn new(mut obj: O, mtl: M, material_file: &str, config: &ConvertConfig) -> io::Result<Self> {
        writeln!(obj, "mtllib {}", material_file)?;
        Ok(Self {
            obj,
            mtl,
            precision: config.precision,
            unit_scale: config.unit_scale,
            vertices_written: 0,
            faces_written: 0,
            materials_written: 0,
            current_material: None,
        })
    }

    /// Write `#text` to the mesh stream
    ///
    /// Embedded line breaks start a new `#` line each, so no text can
    /// land in the file as a record.
    pub fn comment(&mut self, text: &str) -> io::Result<()> {
        for line in text.split(['\n', '\r']) {
            writeln!(self.obj, "#{}", line)?;
        }
        Ok(())
    }

    /// Switch the active material, skipping redundant switches
    pub fn use_material(&mut self, material: &Material) -> io::Result<()> {
        if self.current_material.as_deref() == Some(material.name.as_str()) {
            return Ok(());
        }
        writeln!(self.obj, "usemtl {}", material.name)?;
        self.current_material = Some(material.name.clone());
        Ok(())
    }

    /// Faces recorded in `mesh` that no page has written yet
    pub fn pending_faces(&self, mesh: &Mesh) -> usize {
        mesh.face_count().saturating_sub(self.faces_written)
    }

    /// Write everything added since the previous page
    pub fn flush_page(&mut self, mesh: &Mesh, materials: &MaterialRegistry) -> io::Result<PageReport> {
        let report = PageReport {
            vertices: mesh.vertex_count() - self.vertices_written,
            faces: self.pending_faces(mesh),
            materials: materials.len() - self.materials_written,
        };

        for vertex in &mesh.pool.vertices()[self.vertices_written..] {
            let [x, y, z] = [vertex.x, vertex.y, vertex.z].map(|c| self.scaled(c));
            writeln!(
                self.obj,
                "v {:.*} {:.*} {:.*}",
                self.precision, x, self.precision, y, self.precision, z
            )?;
        }
        self.vertices_written = mesh.vertex_count();

        for face in &mesh.faces[self.faces_written..] {
            if let Some(material) = materials.get(face.material) {
                self.use_material(material)?;
            }
            write!(self.obj, "f")?;
            for index in &face.indices {
                write!(self.obj, " {}", index + 1)?;
            }
            writeln!(self.obj)?;
        }
        self.faces_written = mesh.face_count();

        for material in &materials.materials()[self.materials_written..] {
            let [r, g, b] = material.color.to_array().map(|c| c.clamp(0.0, 1.0));
            writeln!(self.mtl, "newmtl {}", material.name)?;
            writeln!(self.mtl, "Kd {:.6} {:.6} {:.6}", r, g, b)?;
            writeln!(self.mtl)?;
        }
        self.materials_written = materials.len();

        self.obj.flush()?;
        self.mtl.flush()?;
        Ok(report)
    }

    fn scaled(&self, coordinate: f64) -> f64 {
        let value = coordinate * self.unit_scale;
        // no "-0.000000" in the output
        if value == 0.0 {
            0.0
        } else {
            value
        }
    }

    /// Flush and hand back the underlying writers
    pub fn finish(mut self) -> io::Result<(O, M)> {
        self.obj.flush()?;
        self.mtl.flush()?;
        Ok((self.obj, self.mtl))
    }
}
