// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: JSON case loader
//! Mirrors: canvas conformance test descriptions (name, ops, expected pixels)

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::OffscreenCanvas;
use crate::harness::{assert_pixel_approx, AssertionError, AsyncTest, Case, TestResult};
use crate::paint::CanvasGradient;
use crate::types::FillRule;

/// Failure to load a case document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read case: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed case: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid case {name:?}: {reason}")]
    Invalid { name: String, reason: &'static str },
}

/// One drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Op {
    FillStyle { color: String },
    GlobalAlpha { value: f32 },
    FillRect { x: f32, y: f32, w: f32, h: f32 },
    ClearRect { x: f32, y: f32, w: f32, h: f32 },
    LinearGradient {
        id: String,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
    },
    RadialGradient {
        id: String,
        x0: f32,
        y0: f32,
        r0: f32,
        x1: f32,
        y1: f32,
        r1: f32,
    },
    AddColorStop { id: String, offset: f32, color: String },
    UseGradient { id: String },
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    BezierCurveTo {
        cp1x: f32,
        cp1y: f32,
        cp2x: f32,
        cp2y: f32,
        x: f32,
        y: f32,
    },
    ClosePath,
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Fill {
        #[serde(default)]
        rule: FillRule,
    },
}

/// Expected color of one pixel after all ops ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelExpectation {
    pub x: usize,
    pub y: usize,
    pub rgba: [u8; 4],
    #[serde(default)]
    pub tolerance: u8,
}

/// A data-driven conformance case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonCase {
    pub name: String,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    pub ops: Vec<Op>,
    #[serde(default)]
    pub expect: Vec<PixelExpectation>,
}

fn default_width() -> usize {
    100
}

fn default_height() -> usize {
    50
}

const MAX_PIXELS: usize = 4096 * 4096;

/// Load a case from a reader containing JSON.
pub fn from_reader<R: Read>(mut reader: R) -> Result<JsonCase, LoadError> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    from_str(&s)
}

pub fn from_slice(data: &[u8]) -> Result<JsonCase, LoadError> {
    validate(serde_json::from_slice(data)?)
}

pub fn from_str(s: &str) -> Result<JsonCase, LoadError> {
    validate(serde_json::from_str(s)?)
}

fn validate(case: JsonCase) -> Result<JsonCase, LoadError> {
    let invalid = |reason| LoadError::Invalid {
        name: case.name.clone(),
        reason,
    };
    if case.width == 0 || case.height == 0 {
        return Err(invalid("canvas must not be empty"));
    }
    if case.width.saturating_mul(case.height) > MAX_PIXELS {
        return Err(invalid("canvas too large"));
    }
    if case.expect.is_empty() {
        return Err(invalid("no pixel expectations"));
    }
    Ok(case)
}

fn lookup(
    gradients: &HashMap<&str, CanvasGradient>,
    id: &str,
) -> Result<CanvasGradient, AssertionError> {
    gradients
        .get(id)
        .cloned()
        .ok_or_else(|| AssertionError::Other(format!("unknown gradient {id:?}")))
}

impl JsonCase {
    fn execute(&self, canvas: &mut OffscreenCanvas) -> Result<(), AssertionError> {
        let mut gradients: HashMap<&str, CanvasGradient> = HashMap::new();
        let mut ctx = canvas.get_context("2d")?;
        for op in &self.ops {
            match op {
                Op::FillStyle { color } => ctx.set_fill_style(color),
                Op::GlobalAlpha { value } => ctx.set_global_alpha(*value),
                Op::FillRect { x, y, w, h } => ctx.fill_rect(*x, *y, *w, *h),
                Op::ClearRect { x, y, w, h } => ctx.clear_rect(*x, *y, *w, *h),
                Op::LinearGradient { id, x0, y0, x1, y1 } => {
                    let g = ctx.create_linear_gradient(*x0, *y0, *x1, *y1)?;
                    gradients.insert(id.as_str(), g);
                }
                Op::RadialGradient {
                    id,
                    x0,
                    y0,
                    r0,
                    x1,
                    y1,
                    r1,
                } => {
                    let g = ctx.create_radial_gradient(*x0, *y0, *r0, *x1, *y1, *r1)?;
                    gradients.insert(id.as_str(), g);
                }
                Op::AddColorStop { id, offset, color } => {
                    lookup(&gradients, id)?.add_color_stop(*offset, color)?;
                }
                Op::UseGradient { id } => ctx.set_fill_paint(lookup(&gradients, id)?),
                Op::BeginPath => ctx.begin_path(),
                Op::MoveTo { x, y } => ctx.move_to(*x, *y),
                Op::LineTo { x, y } => ctx.line_to(*x, *y),
                Op::BezierCurveTo {
                    cp1x,
                    cp1y,
                    cp2x,
                    cp2y,
                    x,
                    y,
                } => ctx.bezier_curve_to(*cp1x, *cp1y, *cp2x, *cp2y, *x, *y),
                Op::ClosePath => ctx.close_path(),
                Op::Rect { x, y, w, h } => ctx.rect(*x, *y, *w, *h),
                Op::Fill { rule } => ctx.fill_with_rule(*rule),
            }
        }
        for e in &self.expect {
            let pos = format!("{},{}", e.x, e.y);
            let color = e.rgba.map(|c| c.to_string()).join(",");
            assert_pixel_approx(canvas, e.x, e.y, e.rgba, &pos, &color, e.tolerance)?;
        }
        Ok(())
    }
}

impl Case for JsonCase {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self) -> (TestResult, OffscreenCanvas) {
        let mut canvas = OffscreenCanvas::new(self.width, self.height);
        let mut t = AsyncTest::new(self.name.clone());
        t.step(|t| {
            self.execute(&mut canvas)?;
            t.done();
            Ok(())
        });
        (t.result(), canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::TestStatus;

    const HALF_AND_HALF: &str = r##"{
        "name": "half",
        "width": 4,
        "height": 2,
        "ops": [
            {"op": "fillStyle", "color": "#0f0"},
            {"op": "fillRect", "x": 0, "y": 0, "w": 2, "h": 2},
            {"op": "linearGradient", "id": "g", "x0": 0, "y0": 0, "x1": 4, "y1": 0},
            {"op": "addColorStop", "id": "g", "offset": 0, "color": "#00f"},
            {"op": "useGradient", "id": "g"},
            {"op": "beginPath"},
            {"op": "rect", "x": 2, "y": 0, "w": 2, "h": 2},
            {"op": "fill"}
        ],
        "expect": [
            {"x": 0, "y": 0, "rgba": [0, 255, 0, 255]},
            {"x": 3, "y": 1, "rgba": [0, 0, 254, 255], "tolerance": 1}
        ]
    }"##;

    #[test]
    fn parse_and_run() {
        let case = from_str(HALF_AND_HALF).unwrap();
        assert_eq!(case.ops.len(), 8);
        assert_eq!(case.ops[7], Op::Fill { rule: FillRule::NonZero });
        let (result, canvas) = case.run();
        assert_eq!(result.status, TestStatus::Pass, "{:?}", result.message);
        assert_eq!(canvas.width(), 4);
    }

    #[test]
    fn bezier_op_fills_curve() {
        let case = from_str(
            r##"{"name": "bulge", "width": 20, "height": 20, "ops": [
                {"op": "fillStyle", "color": "#0f0"},
                {"op": "moveTo", "x": 0, "y": 10},
                {"op": "bezierCurveTo", "cp1x": 0, "cp1y": -6, "cp2x": 20, "cp2y": -6, "x": 20, "y": 10},
                {"op": "fill"}
            ], "expect": [
                {"x": 10, "y": 1, "rgba": [0, 255, 0, 255]},
                {"x": 0, "y": 0, "rgba": [0, 0, 0, 0]}
            ]}"##,
        )
        .unwrap();
        let (result, _) = case.run();
        assert_eq!(result.status, TestStatus::Pass, "{:?}", result.message);
    }

    #[test]
    fn defaults_apply() {
        let case = from_str(
            r#"{"name": "d", "ops": [], "expect": [{"x": 0, "y": 0, "rgba": [0, 0, 0, 0]}]}"#,
        )
        .unwrap();
        assert_eq!((case.width, case.height), (100, 50));
        assert_eq!(case.expect[0].tolerance, 0);
        assert_eq!(case.run().0.status, TestStatus::Pass);
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(from_str("{"), Err(LoadError::Json(_))));
        assert!(matches!(
            from_str(r#"{"name": "x", "ops": [{"op": "spin"}], "expect": []}"#),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            from_str(r#"{"name": "x", "width": 0, "ops": [], "expect": [{"x": 0, "y": 0, "rgba": [0,0,0,0]}]}"#),
            Err(LoadError::Invalid { reason: "canvas must not be empty", .. })
        ));
        assert!(matches!(
            from_slice(br#"{"name": "x", "ops": []}"#),
            Err(LoadError::Invalid { reason: "no pixel expectations", .. })
        ));
    }

    #[test]
    fn unknown_gradient_fails_the_case() {
        let case = from_str(
            r#"{"name": "u", "ops": [{"op": "useGradient", "id": "nope"}],
                "expect": [{"x": 0, "y": 0, "rgba": [0, 0, 0, 0]}]}"#,
        )
        .unwrap();
        let (result, _) = case.run();
        assert_eq!(result.status, TestStatus::Fail);
        assert_eq!(result.message.as_deref(), Some("unknown gradient \"nope\""));
    }

    #[test]
    fn bad_radius_fails_the_case() {
        let case = from_str(
            r#"{"name": "r", "ops": [{"op": "radialGradient", "id": "g",
                "x0": 0, "y0": 0, "r0": -1, "x1": 0, "y1": 0, "r1": 1}],
                "expect": [{"x": 0, "y": 0, "rgba": [0, 0, 0, 0]}]}"#,
        )
        .unwrap();
        let (result, _) = case.run();
        assert_eq!(result.status, TestStatus::Fail);
        assert!(result.message.unwrap().starts_with("IndexSizeError"));
    }
}
