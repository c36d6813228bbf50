// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error taxonomy for conversion
//!
//! Every error is fatal: the interpreter stops at the first one and the
//! caller discards whatever output was already written.

use thiserror::Error;

/// Result alias used throughout the interpreter and geometry engine
pub type Result<T> = std::result::Result<T, Ps3dError>;

#[derive(Error, Debug)]
pub enum Ps3dError {
    /// Missing or invalid input header
    #[error("format error: {0}")]
    Format(String),

    /// Unrecognized token or malformed literal
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("stack underflow: `{operator}` needs {needed} operand(s), found {found}")]
    StackUnderflow {
        operator: &'static str,
        needed: usize,
        found: usize,
    },

    /// Operand of the wrong kind
    #[error("type error: `{operator}` expected {expected}, found {found}")]
    Type {
        operator: &'static str,
        expected: &'static str,
        found: String,
    },

    /// Index, count or key out of range
    #[error("range error: {0}")]
    Range(String),

    #[error("no current point for `{0}`")]
    NoCurrentPoint(&'static str),

    #[error("unbalanced graphics state: grestore without matching gsave")]
    UnbalancedState,

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Ps3dError {
    /// Short kind name, stable across message changes
    pub fn kind(&self) -> &'static str {
        match self {
            Ps3dError::Format(_) => "FormatError",
            Ps3dError::Syntax(_) => "SyntaxError",
            Ps3dError::StackUnderflow { .. } => "StackUnderflow",
            Ps3dError::Type { .. } => "TypeError",
            Ps3dError::Range(_) => "RangeError",
            Ps3dError::NoCurrentPoint(_) => "NoCurrentPointError",
            Ps3dError::UnbalancedState => "UnbalancedStateError",
            Ps3dError::InvalidPath(_) => "InvalidPathError",
            Ps3dError::DegenerateGeometry(_) => "DegenerateGeometryError",
            Ps3dError::DivisionByZero => "DivisionByZero",
            Ps3dError::Io(_) => "IoError",
        }
    }
}
