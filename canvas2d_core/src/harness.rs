// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: conformance harness
//! Mirrors: testharness.js async_test and the canvas-tests pixel helpers

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::OffscreenCanvas;
use crate::error::CanvasError;

/// Why a test step failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssertionError {
    #[error("got pixel [{actual}] at ({x},{y}) [{pos}], expected [{expected}] [{color}]")]
    Pixel {
        x: usize,
        y: usize,
        actual: String,
        expected: String,
        pos: String,
        color: String,
    },
    #[error("pixel ({x},{y}) lies outside the {width}x{height} canvas")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error("{0}")]
    Other(String),
}

fn join(px: [u8; 4]) -> String {
    px.map(|c| c.to_string()).join(",")
}

/// Fail unless the pixel at `(x, y)` is exactly `r,g,b,a`.
///
/// `pos` and `color` are the human-readable labels carried into the message.
#[allow(clippy::too_many_arguments)]
pub fn assert_pixel(
    canvas: &OffscreenCanvas,
    x: usize,
    y: usize,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    pos: &str,
    color: &str,
) -> Result<(), AssertionError> {
    assert_pixel_approx(canvas, x, y, [r, g, b, a], pos, color, 0)
}

/// Fail unless every channel of the pixel at `(x, y)` is within `tolerance`.
pub fn assert_pixel_approx(
    canvas: &OffscreenCanvas,
    x: usize,
    y: usize,
    expected: [u8; 4],
    pos: &str,
    color: &str,
    tolerance: u8,
) -> Result<(), AssertionError> {
    let actual = canvas
        .pixel(x, y)
        .ok_or(AssertionError::OutOfBounds {
            x,
            y,
            width: canvas.width(),
            height: canvas.height(),
        })?
        .to_array();
    let close = actual
        .iter()
        .zip(expected)
        .all(|(&got, want)| got.abs_diff(want) <= tolerance);
    if close {
        return Ok(());
    }
    Err(AssertionError::Pixel {
        x,
        y,
        actual: join(actual),
        expected: join(expected),
        pos: pos.to_string(),
        color: color.to_string(),
    })
}

/// Outcome of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    Pass,
    Fail,
    /// The test never signalled completion.
    Timeout,
}

impl TestStatus {
    pub fn is_pass(self) -> bool {
        self == TestStatus::Pass
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Timeout => "TIMEOUT",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    pub message: Option<String>,
}

/// A test whose steps run one at a time until `done` is called.
///
/// The first failing step fails the test; later steps are skipped.
#[derive(Debug)]
pub struct AsyncTest {
    name: String,
    failure: Option<String>,
    done: bool,
}

impl AsyncTest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failure: None,
            done: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run one step. Errors are recorded, not returned.
    pub fn step<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self) -> Result<(), AssertionError>,
    {
        if self.failure.is_some() || self.done {
            debug!("{}: skipping step after completion", self.name);
            return;
        }
        if let Err(e) = f(self) {
            warn!("{}: {e}", self.name);
            self.failure = Some(e.to_string());
            self.done = true;
        }
    }

    /// Signal completion.
    pub fn done(&mut self) {
        self.done = true;
    }

    pub fn result(&self) -> TestResult {
        let (status, message) = match (&self.failure, self.done) {
            (Some(msg), _) => (TestStatus::Fail, Some(msg.clone())),
            (None, true) => (TestStatus::Pass, None),
            (None, false) => (TestStatus::Timeout, None),
        };
        TestResult {
            name: self.name.clone(),
            status,
            message,
        }
    }
}

/// Something the harness can execute.
pub trait Case {
    fn name(&self) -> &str;

    /// Execute the case, returning its result and the final canvas.
    fn run(&self) -> (TestResult, OffscreenCanvas);
}

/// Aggregated counts over a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub pass: usize,
    pub fail: usize,
    pub timeout: usize,
}

impl Summary {
    pub fn all_passed(&self) -> bool {
        self.fail == 0 && self.timeout == 0
    }
}

/// Collects results from a sequence of cases.
#[derive(Debug, Default)]
pub struct Harness {
    results: Vec<TestResult>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `case` and record its result; the final canvas is handed back.
    pub fn run(&mut self, case: &dyn Case) -> OffscreenCanvas {
        let (result, canvas) = case.run();
        debug!("{}: {}", result.name, result.status);
        self.results.push(result);
        canvas
    }

    pub fn record(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn summary(&self) -> Summary {
        let mut s = Summary::default();
        for r in &self.results {
            match r.status {
                TestStatus::Pass => s.pass += 1,
                TestStatus::Fail => s.fail += 1,
                TestStatus::Timeout => s.timeout += 1,
            }
        }
        s
    }
}
