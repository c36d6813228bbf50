// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stack machine
//!
//! The interpreter owns the whole conversion context: operand stack,
//! graphics state and its save stack, the mesh being built, the material
//! table and the output emitter.

use super::lexer::{tokenize, Token};
use super::{GraphicsState, Operator, Value};
use crate::config::ConvertConfig;
use crate::error::{Ps3dError, Result};
use crate::geometry::{self, Color, MaterialRegistry, Mesh, PrintLimits};
use crate::io::ObjEmitter;
use std::collections::BTreeMap;
use std::io::Write;

pub struct Interpreter<O: Write, M: Write> {
    stack: Vec<Value>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    mesh: Mesh,
    materials: MaterialRegistry,
    emitter: ObjEmitter<O, M>,
    limits: PrintLimits,
    neutral: Color,
    page_size: [f64; 2],
}

impl<O: Write, M: Write> Interpreter<O, M> {
    pub fn new(emitter: ObjEmitter<O, M>, config: &ConvertConfig) -> Self {
        let neutral = config.neutral_color();
        Self {
            stack: Vec::new(),
            state: GraphicsState::new(neutral),
            saved: Vec::new(),
            mesh: Mesh::new(),
            materials: MaterialRegistry::new(),
            emitter,
            limits: config.limits(),
            neutral,
            page_size: config.page_size,
        }
    }

    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Tokenize and run one line of source
    pub fn process_line(&mut self, line: &str) -> Result<()> {
        for token in tokenize(line)? {
            match token {
                Token::Comment(text) => {
                    self.emitter.comment(&text)?;
                    break;
                }
                Token::LiteralName(name) => self.stack.push(Value::Name(name)),
                Token::Str(s) => self.stack.push(Value::String(s)),
                Token::Word(word) => match Operator::from_name(&word) {
                    Some(op) => self.execute(op)?,
                    None => self.stack.push(Value::Number(parse_number(&word)?)),
                },
            }
            log::debug!("STACK: {}", self.stack_snapshot());
        }
        Ok(())
    }

    fn stack_snapshot(&self) -> String {
        let items: Vec<String> = self.stack.iter().map(|v| v.to_string()).collect();
        format!("[{}]", items.join(", "))
    }

    /// Run a single operator against the current stack and state
    pub fn execute(&mut self, op: Operator) -> Result<()> {
        let name = op.name();
        match op {
            Operator::Add => self.binary(name, |a, b| Ok(a + b))?,
            Operator::Sub => self.binary(name, |a, b| Ok(a - b))?,
            Operator::Mul => self.binary(name, |a, b| Ok(a * b))?,
            Operator::Div => self.binary(name, |a, b| {
                if b == 0.0 {
                    Err(Ps3dError::DivisionByZero)
                } else {
                    Ok(a / b)
                }
            })?,
            Operator::Dup => {
                self.require(name, 1)?;
                let top = self.stack[self.stack.len() - 1].clone();
                self.stack.push(top);
            }
            Operator::Exch => {
                self.require(name, 2)?;
                let len = self.stack.len();
                self.stack.swap(len - 2, len - 1);
            }
            Operator::Pop => {
                self.pop(name)?;
            }
            Operator::Index => {
                let n = self.pop_count(name)?;
                self.require(name, n + 1)?;
                let value = self.stack[self.stack.len() - 1 - n].clone();
                self.stack.push(value);
            }
            Operator::Roll => {
                self.require(name, 2)?;
                let j = self.pop_integer(name)?;
                let n = self.pop_count(name)?;
                self.require(name, n)?;
                if n > 0 {
                    let len = self.stack.len();
                    let shift = j.rem_euclid(n as i64) as usize;
                    self.stack[len - n..].rotate_right(shift);
                }
            }
            Operator::MoveTo => {
                let (x, y) = self.pop_pair(name)?;
                self.state.path.move_to(x, y);
            }
            Operator::RMoveTo => {
                let (dx, dy) = self.pop_pair(name)?;
                self.state.path.rmove_to(dx, dy)?;
            }
            Operator::LineTo => {
                let (x, y) = self.pop_pair(name)?;
                self.state.path.line_to(x, y)?;
            }
            Operator::RLineTo => {
                let (dx, dy) = self.pop_pair(name)?;
                self.state.path.rline_to(dx, dy)?;
            }
            Operator::ClosePath => self.state.path.close(),
            Operator::NewPath => self.state.path.clear(),
            Operator::CurrentPoint => {
                let point = self.state.path.current_point(name)?;
                self.stack.push(Value::Number(point.x()));
                self.stack.push(Value::Number(point.y()));
            }
            Operator::GSave => self.saved.push(self.state.clone()),
            Operator::GRestore => {
                self.state = self.saved.pop().ok_or(Ps3dError::UnbalancedState)?;
            }
            Operator::SetLineWidth => {
                self.state.line_width = self.pop_number(name)?;
            }
            Operator::CurrentLineWidth => {
                self.stack.push(Value::Number(self.state.line_width));
            }
            Operator::SetRgbColor => {
                self.require(name, 3)?;
                let b = self.pop_number(name)?;
                let g = self.pop_number(name)?;
                let r = self.pop_number(name)?;
                self.set_color(Color::new(r, g, b))?;
            }
            Operator::SetGray => {
                let level = self.pop_number(name)?;
                let color = Color::gray(level);
                // black faces vanish in unlit viewers
                let color = if color.is_black() { self.neutral } else { color };
                self.set_color(color)?;
            }
            Operator::CurrentPageDevice => {
                let device = self.page_device();
                self.stack.push(device);
            }
            Operator::Get => {
                self.require(name, 2)?;
                let key = self.pop(name)?;
                let collection = self.pop(name)?;
                self.stack.push(get(collection, key)?);
            }
            Operator::Stroke => {
                let material = self.materials.register(self.state.color);
                let report = geometry::stroke(
                    &self.state.path,
                    self.state.line_width,
                    material,
                    &self.limits,
                    &mut self.mesh,
                )?;
                log::debug!("stroke: {} segment(s), {} face(s)", report.segments, report.faces);
            }
            Operator::Fill => {
                let material = self.materials.register(self.state.color);
                let report = geometry::fill(
                    &self.state.path,
                    self.state.line_width,
                    material,
                    &self.limits,
                    &mut self.mesh,
                )?;
                log::debug!("fill: {} corner(s), {} face(s)", report.corners, report.faces);
            }
            Operator::ShowPage => {
                let report = self.emitter.flush_page(&self.mesh, &self.materials)?;
                log::info!(
                    "showpage: wrote {} vertices, {} faces, {} materials",
                    report.vertices,
                    report.faces,
                    report.materials
                );
            }
            Operator::Print => {
                let value = self.pop(name)?;
                log::info!("stdout: {}", value);
                self.emitter.comment(&format!(" {}", value))?;
            }
        }
        Ok(())
    }

    /// Flush the writers; geometry after the last `showpage` is dropped
    pub fn finish(self) -> Result<(O, M)> {
        let pending = self.emitter.pending_faces(&self.mesh);
        if pending > 0 {
            log::warn!("input ended without showpage; {} face(s) discarded", pending);
        }
        Ok(self.emitter.finish()?)
    }

    fn set_color(&mut self, color: Color) -> Result<()> {
        self.state.color = color;
        let index = self.materials.register(color);
        if let Some(material) = self.materials.get(index) {
            self.emitter.use_material(material)?;
        }
        log::debug!("color now: {:?}", color);
        Ok(())
    }

    fn page_device(&self) -> Value {
        let path = self
            .state
            .path
            .points()
            .iter()
            .map(|p| Value::numbers(&[p.x(), p.y()]))
            .collect();

        let mut device = BTreeMap::new();
        device.insert("PageSize".to_string(), Value::numbers(&self.page_size));
        device.insert("LineWidth".to_string(), Value::Number(self.state.line_width));
        device.insert(
            "RGBColor".to_string(),
            Value::numbers(&self.state.color.to_array()),
        );
        device.insert("Path".to_string(), Value::Array(path));
        Value::Dictionary(device)
    }

    fn require(&self, operator: &'static str, needed: usize) -> Result<()> {
        if self.stack.len() < needed {
            return Err(Ps3dError::StackUnderflow {
                operator,
                needed,
                found: self.stack.len(),
            });
        }
        Ok(())
    }

    fn pop(&mut self, operator: &'static str) -> Result<Value> {
        self.require(operator, 1)?;
        self.stack.pop().ok_or(Ps3dError::StackUnderflow {
            operator,
            needed: 1,
            found: 0,
        })
    }

    fn pop_number(&mut self, operator: &'static str) -> Result<f64> {
        match self.pop(operator)? {
            Value::Number(n) => Ok(n),
            other => Err(Ps3dError::Type {
                operator,
                expected: "number",
                found: other.type_name().to_string(),
            }),
        }
    }

    fn pop_integer(&mut self, operator: &'static str) -> Result<i64> {
        let n = self.pop_number(operator)?;
        if n.fract() != 0.0 || !n.is_finite() {
            return Err(Ps3dError::Range(format!("`{}` needs an integer, got {}", operator, n)));
        }
        Ok(n as i64)
    }

    fn pop_count(&mut self, operator: &'static str) -> Result<usize> {
        let n = self.pop_integer(operator)?;
        usize::try_from(n)
            .map_err(|_| Ps3dError::Range(format!("`{}` needs a non-negative count, got {}", operator, n)))
    }

    /// Pop `x y` with `y` on top
    fn pop_pair(&mut self, operator: &'static str) -> Result<(f64, f64)> {
        self.require(operator, 2)?;
        let y = self.pop_number(operator)?;
        let x = self.pop_number(operator)?;
        Ok((x, y))
    }

    fn binary<F>(&mut self, operator: &'static str, f: F) -> Result<()>
    where
        F: FnOnce(f64, f64) -> Result<f64>,
    {
        let (a, b) = self.pop_pair(operator)?;
        self.stack.push(Value::Number(f(a, b)?));
        Ok(())
    }
}

fn parse_number(word: &str) -> Result<f64> {
    match word.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(Ps3dError::Syntax(format!("unknown value {}", word))),
    }
}

/// `get` on a dictionary (name key), array or string (index in characters,
/// yielding the code point)
fn get(collection: Value, key: Value) -> Result<Value> {
    let index = |key: &Value, len: usize| -> Result<usize> {
        match key {
            Value::Number(n) if n.fract() == 0.0 && *n >= 0.0 && (*n as usize) < len => {
                Ok(*n as usize)
            }
            Value::Number(n) => Err(Ps3dError::Range(format!("index {} out of range 0..{}", n, len))),
            other => Err(Ps3dError::Type {
                operator: "get",
                expected: "integer index",
                found: other.type_name().to_string(),
            }),
        }
    };

    match collection {
        Value::Dictionary(mut entries) => {
            let name = match key {
                Value::Name(name) | Value::String(name) => name,
                other => {
                    return Err(Ps3dError::Type {
                        operator: "get",
                        expected: "name key",
                        found: other.type_name().to_string(),
                    })
                }
            };
            entries
                .remove(&name)
                .ok_or_else(|| Ps3dError::Range(format!("undefined key /{}", name)))
        }
        Value::Array(mut items) => {
            let i = index(&key, items.len())?;
            Ok(items.swap_remove(i))
        }
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            let i = index(&key, chars.len())?;
            Ok(Value::Number(u32::from(chars[i]) as f64))
        }
        other => Err(Ps3dError::Type {
            operator: "get",
            expected: "dictionary, array or string",
            found: other.type_name().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EdgeKind;
    use nalgebra::Point3;

    type TestInterpreter = Interpreter<Vec<u8>, Vec<u8>>;

    fn interpreter() -> TestInterpreter {
        let config = ConvertConfig::default();
        let emitter = ObjEmitter::new(Vec::new(), Vec::new(), "test.mtl", &config).unwrap();
        Interpreter::new(emitter, &config)
    }

    fn run(source: &str) -> TestInterpreter {
        let mut interp = interpreter();
        for line in source.lines() {
            interp.process_line(line).unwrap();
        }
        interp
    }

    fn run_err(source: &str) -> Ps3dError {
        let mut interp = interpreter();
        for line in source.lines() {
            if let Err(e) = interp.process_line(line) {
                return e;
            }
        }
        panic!("expected an error from {:?}", source);
    }

    fn numbers(interp: &TestInterpreter) -> Vec<f64> {
        interp.stack().iter().filter_map(Value::as_number).collect()
    }

    fn obj_text(interp: TestInterpreter) -> String {
        let (obj, _) = interp.finish().unwrap();
        String::from_utf8(obj).unwrap()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(numbers(&run("1 2 add 10 4 sub 3 mul 9 2 div")), vec![3.0, 18.0, 4.5]);
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(run_err("1 0 div"), Ps3dError::DivisionByZero));
    }

    #[test]
    fn test_stack_underflow_reports_operator() {
        match run_err("1 add") {
            Ps3dError::StackUnderflow { operator, needed, found } => {
                assert_eq!((operator, needed, found), ("add", 2, 1));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_type_error_on_name_operand() {
        assert!(matches!(run_err("/x 1 add"), Ps3dError::Type { operator: "add", .. }));
    }

    #[test]
    fn test_unknown_word_is_syntax_error() {
        assert!(matches!(run_err("1 2 curveto"), Ps3dError::Syntax(_)));
        assert!(matches!(run_err("inf"), Ps3dError::Syntax(_)));
    }

    #[test]
    fn test_dup_exch_pop() {
        assert_eq!(numbers(&run("1 2 exch dup")), vec![2.0, 1.0, 1.0]);
        assert_eq!(numbers(&run("1 2 pop")), vec![1.0]);
    }

    #[test]
    fn test_index() {
        assert_eq!(numbers(&run("10 20 30 2 index")), vec![10.0, 20.0, 30.0, 10.0]);
        assert_eq!(numbers(&run("10 20 30 0 index")), vec![10.0, 20.0, 30.0, 30.0]);
        assert!(matches!(run_err("10 20 5 index"), Ps3dError::StackUnderflow { .. }));
        assert!(matches!(run_err("10 -1 index"), Ps3dError::Range(_)));
    }

    #[test]
    fn test_roll_both_directions() {
        assert_eq!(numbers(&run("1 2 3 3 1 roll")), vec![3.0, 1.0, 2.0]);
        assert_eq!(numbers(&run("1 2 3 3 -1 roll")), vec![2.0, 3.0, 1.0]);
        assert_eq!(numbers(&run("0 1 2 3 3 4 roll")), vec![0.0, 3.0, 1.0, 2.0]);
        assert_eq!(numbers(&run("1 2 0 5 roll")), vec![1.0, 2.0]);
    }

    #[test]
    fn test_path_construction() {
        let interp = run("10 10 moveto 5 0 rlineto");
        let points = interp.state().path.points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].position, Point3::new(10.0, 10.0, 0.0));
        assert_eq!(points[0].kind, EdgeKind::MoveTo);
        assert_eq!(points[1].position, Point3::new(15.0, 10.0, 0.0));
        assert_eq!(points[1].kind, EdgeKind::LineTo);
    }

    #[test]
    fn test_currentpoint() {
        assert_eq!(numbers(&run("3 4 moveto 1 1 rlineto currentpoint")), vec![4.0, 5.0]);
        assert!(matches!(
            run_err("currentpoint"),
            Ps3dError::NoCurrentPoint("currentpoint")
        ));
        assert!(matches!(run_err("1 1 lineto"), Ps3dError::NoCurrentPoint("lineto")));
    }

    #[test]
    fn test_newpath_empties_path() {
        let interp = run("1 1 moveto 2 2 lineto newpath");
        assert!(interp.state().path.is_empty());
    }

    #[test]
    fn test_gsave_grestore_restores_everything() {
        let interp = run("1 1 moveto 3 setlinewidth gsave 5 5 lineto 9 setlinewidth 1 0 0 setrgbcolor grestore");
        assert_eq!(interp.state().line_width, 3.0);
        assert_eq!(interp.state().path.len(), 1);
        assert_eq!(interp.state().color, ConvertConfig::default().neutral_color());
        assert_eq!(interp.save_depth(), 0);
    }

    #[test]
    fn test_grestore_without_gsave() {
        assert!(matches!(run_err("grestore"), Ps3dError::UnbalancedState));
    }

    #[test]
    fn test_setgray_black_uses_neutral() {
        let interp = run("0 setgray");
        assert_eq!(interp.state().color, Color::gray(0.5));
        assert!(obj_text(interp).contains("usemtl color_808080"));
    }

    #[test]
    fn test_setrgbcolor_keeps_black() {
        let interp = run("0 0 0 setrgbcolor");
        assert_eq!(interp.state().color, Color::BLACK);
        assert!(obj_text(interp).contains("usemtl color_000000"));
    }

    #[test]
    fn test_repeated_color_is_one_material() {
        let interp = run("0.2 0.4 0.6 setrgbcolor\n0.2 0.4 0.6 setrgbcolor");
        assert_eq!(interp.materials().len(), 1);
        assert_eq!(obj_text(interp).matches("usemtl").count(), 1);
    }

    #[test]
    fn test_currentpagedevice_get() {
        let interp = run("currentpagedevice /LineWidth get 2 setlinewidth currentlinewidth");
        assert_eq!(numbers(&interp), vec![1.0, 2.0]);

        let interp = run("currentpagedevice /PageSize get 1 get");
        assert_eq!(numbers(&interp), vec![0.0]);

        assert!(matches!(run_err("currentpagedevice /Nope get"), Ps3dError::Range(_)));
        assert!(matches!(run_err("1 2 get"), Ps3dError::Type { operator: "get", .. }));
    }

    #[test]
    fn test_get_on_string_returns_char_code() {
        assert_eq!(numbers(&run("(AB) 1 get")), vec![66.0]);
        assert_eq!(numbers(&run("(été) 1 get")), vec![116.0]);
        assert_eq!(numbers(&run("(été) 2 get")), vec![233.0]);
        assert!(matches!(run_err("(été) 3 get"), Ps3dError::Range(_)));
    }

    #[test]
    fn test_comments_and_print_go_to_mesh_stream() {
        let interp = run("% a comment line\n(hello) =\n7 =");
        let text = obj_text(interp);
        assert!(text.contains("\n# a comment line\n"));
        assert!(text.contains("\n# hello\n"));
        assert!(text.contains("\n# 7\n"));
    }

    #[test]
    fn test_stroke_example() {
        let interp = run("10 10 moveto 5 0 rlineto 1 setlinewidth stroke");
        assert_eq!(interp.mesh().face_count(), 6);
        assert_eq!(interp.mesh().vertex_count(), 8);
        assert_eq!(interp.state().path.len(), 2);
    }

    #[test]
    fn test_fill_needs_closepath() {
        assert!(matches!(
            run_err("0 0 moveto 1 0 lineto 1 1 lineto fill"),
            Ps3dError::InvalidPath(_)
        ));
        let interp = run("0 0 moveto 1 0 lineto 1 1 lineto closepath fill");
        assert_eq!(interp.mesh().face_count(), 5);
    }

    #[test]
    fn test_thin_line_is_rejected() {
        assert!(matches!(
            run_err("0 0 moveto 1 0 lineto 0.01 setlinewidth stroke"),
            Ps3dError::DegenerateGeometry(_)
        ));
    }

    #[test]
    fn test_showpage_writes_faces() {
        let interp = run("0 0 moveto 4 0 lineto stroke showpage");
        let text = obj_text(interp);
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 8);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 6);
        assert!(text.contains("usemtl color_808080"));
    }
}
