// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: built-in conformance cases
//! Mirrors: offscreen-canvas/fill-and-stroke-styles

use std::fmt;

use crate::canvas::OffscreenCanvas;
use crate::harness::{assert_pixel, AssertionError, AsyncTest, Case, TestResult};

type Script = fn(&mut OffscreenCanvas) -> Result<(), AssertionError>;

/// A case written directly against the context API.
#[derive(Clone, Copy)]
pub struct ScriptCase {
    name: &'static str,
    width: usize,
    height: usize,
    script: Script,
}

impl fmt::Debug for ScriptCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptCase")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Case for ScriptCase {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self) -> (TestResult, OffscreenCanvas) {
        let mut canvas = OffscreenCanvas::new(self.width, self.height);
        let mut t = AsyncTest::new(self.name);
        t.step(|t| {
            (self.script)(&mut canvas)?;
            t.done();
            Ok(())
        });
        (t.result(), canvas)
    }
}

/// All built-in cases.
pub fn builtin() -> Vec<ScriptCase> {
    vec![gradient_radial_cone_shape2()]
}

/// Two non-nested circles open a cone to the right of (30,40); nothing
/// outside that cone may be painted.
pub fn gradient_radial_cone_shape2() -> ScriptCase {
    ScriptCase {
        name: "2d.gradient.radial.cone.shape2",
        width: 100,
        height: 50,
        script: radial_cone_shape2,
    }
}

const LIME_SAMPLES: [(usize, usize); 9] = [
    (1, 1),
    (50, 1),
    (98, 1),
    (1, 25),
    (50, 25),
    (98, 25),
    (1, 48),
    (50, 48),
    (98, 48),
];

fn radial_cone_shape2(canvas: &mut OffscreenCanvas) -> Result<(), AssertionError> {
    let tol = 1.0; // tolerance to avoid antialiasing artifacts
    let mut ctx = canvas.get_context("2d")?;
    ctx.set_fill_style("#0f0");
    ctx.fill_rect(0.0, 0.0, 100.0, 50.0);
    let g = ctx.create_radial_gradient(
        30.0 + 10.0 * 5.0 / 2.0,
        40.0,
        10.0 * 3.0 / 2.0,
        30.0 + 10.0 * 15.0 / 4.0,
        40.0,
        10.0 * 9.0 / 4.0,
    )?;
    g.add_color_stop(0.0, "#f00")?;
    g.add_color_stop(1.0, "#f00")?;
    ctx.set_fill_paint(g);
    ctx.fill_rect(0.0, 0.0, 100.0, 50.0);
    ctx.set_fill_style("#0f0");
    ctx.begin_path();
    ctx.move_to(30.0 - tol, 40.0);
    ctx.line_to(110.0, -20.0 - tol);
    ctx.line_to(110.0, 100.0 + tol);
    ctx.fill();
    for (x, y) in LIME_SAMPLES {
        assert_pixel(canvas, x, y, 0, 255, 0, 255, &format!("{x},{y}"), "0,255,0,255")?;
    }
    Ok(())
}
