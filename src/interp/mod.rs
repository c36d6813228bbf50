// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interpreter module
//!
//! Tokenizes ps3d source line by line and runs it on a stack machine

mod interpreter;
mod lexer;
mod operator;
mod state;
mod value;

pub use interpreter::Interpreter;
pub use lexer::{tokenize, Token};
pub use operator::Operator;
pub use state::GraphicsState;
pub use value::Value;
