// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: fill styles
//! Mirrors: CanvasFillStrokeStyles

mod gradient;

pub use gradient::{CanvasGradient, GradientKind};

use crate::types::{Color, Vec2};

/// Anything that can be assigned to `fillStyle`.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(CanvasGradient),
}

impl Paint {
    /// Color of the paint at `p`, or `None` where the paint leaves the
    /// destination untouched.
    pub fn sample(&self, p: Vec2) -> Option<Color> {
        match self {
            Paint::Solid(c) => Some(*c),
            Paint::Gradient(g) => g.sample(p),
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<CanvasGradient> for Paint {
    fn from(g: CanvasGradient) -> Self {
        Paint::Gradient(g)
    }
}
