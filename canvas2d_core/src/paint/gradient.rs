// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: linear and radial gradients
//! Mirrors: CanvasGradient

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::parse_color;
use crate::error::{CanvasError, Result};
use crate::types::{Color, GradientStop, Vec2};

/// Geometry of a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientKind {
    /// Color varies along the line from `start` to `end`.
    Linear { start: Vec2, end: Vec2 },
    /// Two-point conical gradient between circle 0 and circle 1.
    Radial {
        c0: Vec2,
        r0: f32,
        c1: Vec2,
        r1: f32,
    },
}

#[derive(Debug, PartialEq)]
struct GradientData {
    kind: GradientKind,
    stops: Vec<GradientStop>,
}

/// A gradient handle. Clones share their stop list, so stops added after
/// the gradient was assigned to `fillStyle` still affect later fills.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasGradient {
    inner: Rc<RefCell<GradientData>>,
}

fn require_finite(values: &[f32], name: &'static str) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CanvasError::NotFinite(name))
    }
}

impl CanvasGradient {
    fn with_kind(kind: GradientKind) -> Self {
        Self {
            inner: Rc::new(RefCell::new(GradientData {
                kind,
                stops: Vec::new(),
            })),
        }
    }

    /// `createLinearGradient(x0, y0, x1, y1)`.
    pub fn linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Result<Self> {
        require_finite(&[x0, y0, x1, y1], "createLinearGradient argument")?;
        Ok(Self::with_kind(GradientKind::Linear {
            start: Vec2::new(x0, y0),
            end: Vec2::new(x1, y1),
        }))
    }

    /// `createRadialGradient(x0, y0, r0, x1, y1, r1)`.
    pub fn radial(x0: f32, y0: f32, r0: f32, x1: f32, y1: f32, r1: f32) -> Result<Self> {
        require_finite(&[x0, y0, r0, x1, y1, r1], "createRadialGradient argument")?;
        if r0 < 0.0 || r1 < 0.0 {
            return Err(CanvasError::IndexSize("radius must not be negative"));
        }
        Ok(Self::with_kind(GradientKind::Radial {
            c0: Vec2::new(x0, y0),
            r0,
            c1: Vec2::new(x1, y1),
            r1,
        }))
    }

    /// Snapshot of the stop list in evaluation order.
    pub fn stops(&self) -> Vec<GradientStop> {
        self.inner.borrow().stops.clone()
    }

    /// `addColorStop(offset, color)`.
    pub fn add_color_stop(&self, offset: f32, color: &str) -> Result<()> {
        if !offset.is_finite() || !(0.0..=1.0).contains(&offset) {
            return Err(CanvasError::IndexSize("offset must be in 0..=1"));
        }
        let color = parse_color(color)?;
        self.insert_stop(GradientStop { offset, color });
        Ok(())
    }

    /// Insert an already parsed stop after any stops sharing its offset.
    pub fn insert_stop(&self, stop: GradientStop) {
        let mut data = self.inner.borrow_mut();
        let idx = data.stops.partition_point(|s| s.offset <= stop.offset);
        data.stops.insert(idx, stop);
    }

    /// Color at `p`, or `None` where the gradient paints nothing.
    pub fn sample(&self, p: Vec2) -> Option<Color> {
        let data = self.inner.borrow();
        if data.stops.is_empty() {
            return None;
        }
        let t = match data.kind {
            GradientKind::Linear { start, end } => linear_t(start, end, p)?,
            GradientKind::Radial { c0, r0, c1, r1 } => radial_t(c0, r0, c1, r1, p)?,
        };
        Some(color_at(&data.stops, t))
    }
}

fn linear_t(start: Vec2, end: Vec2, p: Vec2) -> Option<f32> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return None;
    }
    Some(((p.x - start.x) * dx + (p.y - start.y) * dy) / len_sq)
}

/// Largest ω such that `p` lies on the circle interpolated at ω and that
/// circle's radius is not negative.
///
/// Solves `|p - c(ω)|² = r(ω)²` with `c(ω) = c0 + ω(c1 - c0)` and
/// `r(ω) = r0 + ω(r1 - r0)`, which expands to `aω² - 2bω + c = 0`.
fn radial_t(c0: Vec2, r0: f32, c1: Vec2, r1: f32, p: Vec2) -> Option<f32> {
    if c0 == c1 && r0 == r1 {
        return None;
    }
    let cdx = (c1.x - c0.x) as f64;
    let cdy = (c1.y - c0.y) as f64;
    let dr = (r1 - r0) as f64;
    let pdx = (p.x - c0.x) as f64;
    let pdy = (p.y - c0.y) as f64;
    let r0 = r0 as f64;

    let a = cdx * cdx + cdy * cdy - dr * dr;
    let b = pdx * cdx + pdy * cdy + r0 * dr;
    let c = pdx * pdx + pdy * pdy - r0 * r0;
    let radius_ok = |w: f64| r0 + w * dr >= 0.0;

    if a.abs() < 1e-9 {
        // circles touch internally: the equation degenerates to a line
        if b == 0.0 {
            return None;
        }
        let w = c / (2.0 * b);
        return radius_ok(w).then_some(w as f32);
    }
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let (hi, lo) = {
        let w1 = (b + sq) / a;
        let w2 = (b - sq) / a;
        if w1 >= w2 {
            (w1, w2)
        } else {
            (w2, w1)
        }
    };
    if radius_ok(hi) {
        Some(hi as f32)
    } else if radius_ok(lo) {
        Some(lo as f32)
    } else {
        None
    }
}

fn color_at(stops: &[GradientStop], t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let next = stops.partition_point(|s| s.offset <= t);
    if next == 0 {
        return stops[0].color;
    }
    if next == stops.len() {
        return stops[stops.len() - 1].color;
    }
    let s0 = stops[next - 1];
    let s1 = stops[next];
    let span = s1.offset - s0.offset;
    let local = if span > 0.0 { (t - s0.offset) / span } else { 0.0 };
    lerp_color(s0.color, s1.color, local)
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let clamped = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * clamped).round() as u8;
    Color {
        r: mix(a.r, b.r),
        g: mix(a.g, b.g),
        b: mix(a.b, b.b),
        a: mix(a.a, b.a),
    }
}
