// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Line tokenizer using pest

use crate::error::{Ps3dError, Result};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "interp/ps3d.pest"]
struct LineParser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text after `%`, up to the end of the line
    Comment(String),
    /// `/name`, pushed without being executed
    LiteralName(String),
    /// `(...)` with escapes resolved
    Str(String),
    /// Operator name or numeric literal
    Word(String),
}

/// Split one source line into tokens
pub fn tokenize(line: &str) -> Result<Vec<Token>> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut pairs = LineParser::parse(Rule::line, line)
        .map_err(|e| Ps3dError::Syntax(format!("cannot tokenize `{}`: {}", line, e)))?;

    let mut tokens = Vec::new();
    let Some(root) = pairs.next() else {
        return Ok(tokens);
    };
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::comment => {
                let text = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                tokens.push(Token::Comment(text.to_string()));
            }
            Rule::literal_name => {
                let name = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                tokens.push(Token::LiteralName(name.to_string()));
            }
            Rule::string => {
                let body = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                tokens.push(Token::Str(unescape(body)));
            }
            Rule::word => tokens.push(Token::Word(pair.as_str().to_string())),
            _ => {}
        }
    }
    Ok(tokens)
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
