// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - reading ps3d sources and writing OBJ/MTL

mod importer;
mod obj;

pub use importer::{check_header, open_input};
pub use obj::{ObjEmitter, PageReport};
