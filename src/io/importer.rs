// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! ps3d source importer

use crate::config::ConvertConfig;
use crate::error::{Ps3dError, Result as Ps3dResult};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Open a source file for line-wise reading; `-` reads stdin
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open ps3d file: {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Validate the first line of the input
pub fn check_header(first_line: Option<&str>, config: &ConvertConfig) -> Ps3dResult<()> {
    let Some(line) = first_line else {
        return Err(Ps3dError::Format("input is empty".to_string()));
    };
    if line.starts_with(&config.header_prefix) {
        return Ok(());
    }
    if config.allow_plain_postscript && (line.starts_with("%!ps") || line.starts_with("%!PS")) {
        log::warn!("plain postscript (not ps3d) file!");
        return Ok(());
    }
    Err(Ps3dError::Format(format!(
        "valid input should start with \"{}\"",
        config.header_prefix
    )))
}
