// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operator table
//!
//! Operators take no explicit arguments; they read and write the operand
//! stack. Stack effects are written `( before -- after )` with the top of
//! the stack rightmost.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Dup,
    Exch,
    Pop,
    Index,
    Roll,
    MoveTo,
    RMoveTo,
    LineTo,
    RLineTo,
    ClosePath,
    NewPath,
    CurrentPoint,
    GSave,
    GRestore,
    SetLineWidth,
    CurrentLineWidth,
    SetRgbColor,
    SetGray,
    CurrentPageDevice,
    Get,
    Stroke,
    Fill,
    ShowPage,
    Print,
}

impl Operator {
    pub const ALL: [Operator; 28] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Dup,
        Operator::Exch,
        Operator::Pop,
        Operator::Index,
        Operator::Roll,
        Operator::MoveTo,
        Operator::RMoveTo,
        Operator::LineTo,
        Operator::RLineTo,
        Operator::ClosePath,
        Operator::NewPath,
        Operator::CurrentPoint,
        Operator::GSave,
        Operator::GRestore,
        Operator::SetLineWidth,
        Operator::CurrentLineWidth,
        Operator::SetRgbColor,
        Operator::SetGray,
        Operator::CurrentPageDevice,
        Operator::Get,
        Operator::Stroke,
        Operator::Fill,
        Operator::ShowPage,
        Operator::Print,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::Div => "div",
            Operator::Dup => "dup",
            Operator::Exch => "exch",
            Operator::Pop => "pop",
            Operator::Index => "index",
            Operator::Roll => "roll",
            Operator::MoveTo => "moveto",
            Operator::RMoveTo => "rmoveto",
            Operator::LineTo => "lineto",
            Operator::RLineTo => "rlineto",
            Operator::ClosePath => "closepath",
            Operator::NewPath => "newpath",
            Operator::CurrentPoint => "currentpoint",
            Operator::GSave => "gsave",
            Operator::GRestore => "grestore",
            Operator::SetLineWidth => "setlinewidth",
            Operator::CurrentLineWidth => "currentlinewidth",
            Operator::SetRgbColor => "setrgbcolor",
            Operator::SetGray => "setgray",
            Operator::CurrentPageDevice => "currentpagedevice",
            Operator::Get => "get",
            Operator::Stroke => "stroke",
            Operator::Fill => "fill",
            Operator::ShowPage => "showpage",
            Operator::Print => "=",
        }
    }

    pub fn from_name(name: &str) -> Option<Operator> {
        Operator::ALL.iter().copied().find(|op| op.name() == name)
    }

    pub fn stack_effect(self) -> &'static str {
        match self {
            Operator::Add => "( a b -- a+b )",
            Operator::Sub => "( a b -- a-b )",
            Operator::Mul => "( a b -- a*b )",
            Operator::Div => "( a b -- a/b )",
            Operator::Dup => "( a -- a a )",
            Operator::Exch => "( a b -- b a )",
            Operator::Pop => "( a -- )",
            Operator::Index => "( an ... a0 n -- an ... a0 an )",
            Operator::Roll => "( a(n-1) ... a0 n j -- rotated by j )",
            Operator::MoveTo => "( x y -- )",
            Operator::RMoveTo => "( dx dy -- )",
            Operator::LineTo => "( x y -- )",
            Operator::RLineTo => "( dx dy -- )",
            Operator::ClosePath => "( -- )",
            Operator::NewPath => "( -- )",
            Operator::CurrentPoint => "( -- x y )",
            Operator::GSave => "( -- )",
            Operator::GRestore => "( -- )",
            Operator::SetLineWidth => "( w -- )",
            Operator::CurrentLineWidth => "( -- w )",
            Operator::SetRgbColor => "( r g b -- )",
            Operator::SetGray => "( g -- )",
            Operator::CurrentPageDevice => "( -- dict )",
            Operator::Get => "( collection key -- value )",
            Operator::Stroke => "( -- )",
            Operator::Fill => "( -- )",
            Operator::ShowPage => "( -- )",
            Operator::Print => "( a -- )",
        }
    }
}
