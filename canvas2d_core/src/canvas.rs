// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: OffscreenCanvas and its 2D context
//! Mirrors: OffscreenCanvas / OffscreenCanvasRenderingContext2D

use log::debug;

use crate::color::{parse_color, serialize};
use crate::error::{CanvasError, Result};
use crate::geometry::{contains, coverage_mask, Path};
use crate::paint::{CanvasGradient, Paint};
use crate::renderer::Surface;
use crate::types::{Color, FillRule, Vec2};

#[derive(Debug, Clone)]
struct DrawingState {
    fill: Paint,
    global_alpha: f32,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill: Paint::Solid(Color::BLACK),
            global_alpha: 1.0,
        }
    }
}

/// An off-screen drawing surface.
#[derive(Debug)]
pub struct OffscreenCanvas {
    surface: Surface,
    state: DrawingState,
    saved: Vec<DrawingState>,
    path: Path,
}

impl OffscreenCanvas {
    /// # Panics
    ///
    /// Panics when the pixel buffer size overflows `usize`; see [`OffscreenCanvas::try_new`].
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_surface(Surface::new(width, height))
    }

    /// Like [`OffscreenCanvas::new`] but reports oversized dimensions as `IndexSize`.
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        Surface::try_new(width, height).map(Self::from_surface)
    }

    fn from_surface(surface: Surface) -> Self {
        Self {
            surface,
            state: DrawingState::default(),
            saved: Vec::new(),
            path: Path::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.surface.pixel(x, y)
    }

    /// `getContext(id)`; only `"2d"` is supported.
    pub fn get_context(&mut self, id: &str) -> Result<Context2d<'_>> {
        if id != "2d" {
            return Err(CanvasError::UnsupportedContext(id.to_string()));
        }
        Ok(self.context_2d())
    }

    /// The 2D context. Drawing state persists on the canvas between calls.
    pub fn context_2d(&mut self) -> Context2d<'_> {
        Context2d { canvas: self }
    }
}

/// Drawing API bound to an [`OffscreenCanvas`].
#[derive(Debug)]
pub struct Context2d<'a> {
    canvas: &'a mut OffscreenCanvas,
}

fn all_finite(values: &[f32]) -> bool {
    values.iter().all(|v| v.is_finite())
}

impl Context2d<'_> {
    pub fn fill_style(&self) -> &Paint {
        &self.canvas.state.fill
    }

    /// Serialized `fillStyle` for solid colors, `None` for gradients.
    pub fn fill_style_string(&self) -> Option<String> {
        match &self.canvas.state.fill {
            Paint::Solid(c) => Some(serialize(*c)),
            Paint::Gradient(_) => None,
        }
    }

    /// Assign a CSS color; unparsable strings leave the style unchanged.
    pub fn set_fill_style(&mut self, color: &str) {
        match parse_color(color) {
            Ok(c) => self.canvas.state.fill = Paint::Solid(c),
            Err(e) => debug!("ignoring fillStyle {color:?}: {e}"),
        }
    }

    /// Assign a color or gradient directly.
    pub fn set_fill_paint(&mut self, paint: impl Into<Paint>) {
        self.canvas.state.fill = paint.into();
    }

    pub fn global_alpha(&self) -> f32 {
        self.canvas.state.global_alpha
    }

    /// Values outside `0..=1` are ignored.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.canvas.state.global_alpha = alpha;
        } else {
            debug!("ignoring globalAlpha {alpha}");
        }
    }

    /// Push the drawing state. The current path is not part of it.
    pub fn save(&mut self) {
        let state = self.canvas.state.clone();
        self.canvas.saved.push(state);
    }

    /// Pop the drawing state; a no-op on an empty stack.
    pub fn restore(&mut self) {
        if let Some(state) = self.canvas.saved.pop() {
            self.canvas.state = state;
        }
    }

    pub fn create_linear_gradient(
        &self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
    ) -> Result<CanvasGradient> {
        CanvasGradient::linear(x0, y0, x1, y1)
    }

    pub fn create_radial_gradient(
        &self,
        x0: f32,
        y0: f32,
        r0: f32,
        x1: f32,
        y1: f32,
        r1: f32,
    ) -> Result<CanvasGradient> {
        CanvasGradient::radial(x0, y0, r0, x1, y1, r1)
    }

    /// Paint a rectangle with the fill style without touching the current path.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let Some(mask) = self.rect_mask(x, y, w, h) else {
            return;
        };
        let canvas = &mut *self.canvas;
        canvas
            .surface
            .fill_mask(&mask, &canvas.state.fill, canvas.state.global_alpha);
    }

    /// Reset a rectangle to transparent black.
    pub fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if let Some(mask) = self.rect_mask(x, y, w, h) {
            self.canvas.surface.clear_mask(&mask);
        }
    }

    fn rect_mask(&self, x: f32, y: f32, w: f32, h: f32) -> Option<Vec<u8>> {
        if !all_finite(&[x, y, w, h]) || w == 0.0 || h == 0.0 {
            return None;
        }
        let mut rect = Path::new();
        rect.rect(x, y, w, h);
        Some(coverage_mask(
            &rect,
            self.canvas.width(),
            self.canvas.height(),
            FillRule::NonZero,
        ))
    }

    pub fn begin_path(&mut self) {
        self.canvas.path.clear();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        if all_finite(&[x, y]) {
            self.canvas.path.move_to(Vec2::new(x, y));
        }
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        if all_finite(&[x, y]) {
            self.canvas.path.line_to(Vec2::new(x, y));
        }
    }

    pub fn bezier_curve_to(&mut self, cp1x: f32, cp1y: f32, cp2x: f32, cp2y: f32, x: f32, y: f32) {
        if all_finite(&[cp1x, cp1y, cp2x, cp2y, x, y]) {
            let (c1, c2) = (Vec2::new(cp1x, cp1y), Vec2::new(cp2x, cp2y));
            self.canvas.path.cubic_to(c1, c2, Vec2::new(x, y));
        }
    }

    pub fn close_path(&mut self) {
        self.canvas.path.close();
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if all_finite(&[x, y, w, h]) {
            self.canvas.path.rect(x, y, w, h);
        }
    }

    /// Fill the current path with the non-zero rule.
    pub fn fill(&mut self) {
        self.fill_with_rule(FillRule::NonZero);
    }

    pub fn fill_with_rule(&mut self, rule: FillRule) {
        let canvas = &mut *self.canvas;
        if canvas.path.is_empty() {
            return;
        }
        let mask = coverage_mask(&canvas.path, canvas.width(), canvas.height(), rule);
        canvas
            .surface
            .fill_mask(&mask, &canvas.state.fill, canvas.state.global_alpha);
    }

    pub fn is_point_in_path(&self, x: f32, y: f32, rule: FillRule) -> bool {
        all_finite(&[x, y]) && contains(&self.canvas.path, Vec2::new(x, y), rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIME: Color = Color::rgba(0, 255, 0, 255);

    #[test]
    fn oversized_canvas_is_an_error() {
        assert!(matches!(
            OffscreenCanvas::try_new(usize::MAX, usize::MAX),
            Err(CanvasError::IndexSize(_))
        ));
        assert_eq!(OffscreenCanvas::try_new(100, 50).unwrap().width(), 100);
    }

    #[test]
    fn only_2d_contexts() {
        let mut canvas = OffscreenCanvas::new(4, 4);
        assert!(canvas.get_context("2d").is_ok());
        assert_eq!(
            canvas.get_context("webgl").unwrap_err(),
            CanvasError::UnsupportedContext("webgl".into())
        );
    }

    #[test]
    fn fill_style_roundtrip_and_invalid_ignored() {
        let mut canvas = OffscreenCanvas::new(1, 1);
        let mut ctx = canvas.context_2d();
        assert_eq!(ctx.fill_style_string().as_deref(), Some("#000000"));
        ctx.set_fill_style("#0f0");
        assert_eq!(ctx.fill_style_string().as_deref(), Some("#00ff00"));
        ctx.set_fill_style("not a color");
        assert_eq!(ctx.fill_style_string().as_deref(), Some("#00ff00"));
    }

    #[test]
    fn fill_rect_and_clear_rect() {
        let mut canvas = OffscreenCanvas::new(10, 10);
        let mut ctx = canvas.context_2d();
        ctx.set_fill_style("lime");
        ctx.fill_rect(0.0, 0.0, 10.0, 10.0);
        ctx.clear_rect(8.0, 8.0, -4.0, -4.0);
        ctx.fill_rect(f32::NAN, 0.0, 10.0, 10.0);
        assert_eq!(canvas.pixel(0, 0), Some(LIME));
        assert_eq!(canvas.pixel(5, 5), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(8, 8), Some(LIME));
    }

    #[test]
    fn save_restore_fill_and_alpha() {
        let mut canvas = OffscreenCanvas::new(1, 1);
        let mut ctx = canvas.context_2d();
        ctx.save();
        ctx.set_fill_style("#f00");
        ctx.set_global_alpha(0.5);
        ctx.set_global_alpha(2.0);
        assert_eq!(ctx.global_alpha(), 0.5);
        ctx.restore();
        ctx.restore();
        assert_eq!(ctx.global_alpha(), 1.0);
        assert_eq!(ctx.fill_style_string().as_deref(), Some("#000000"));
    }

    #[test]
    fn path_fill_and_hit_testing() {
        let mut canvas = OffscreenCanvas::new(10, 10);
        let mut ctx = canvas.context_2d();
        ctx.set_fill_style("lime");
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.line_to(10.0, 0.0);
        ctx.line_to(0.0, 10.0);
        ctx.line_to(f32::INFINITY, 3.0);
        assert!(ctx.is_point_in_path(2.0, 2.0, FillRule::NonZero));
        assert!(!ctx.is_point_in_path(8.0, 8.0, FillRule::NonZero));
        ctx.fill();
        assert_eq!(canvas.pixel(1, 1), Some(LIME));
        assert_eq!(canvas.pixel(8, 8), Some(Color::TRANSPARENT));
    }

    #[test]
    fn bezier_bulge_is_filled() {
        let mut canvas = OffscreenCanvas::new(20, 20);
        let mut ctx = canvas.context_2d();
        ctx.set_fill_style("lime");
        ctx.begin_path();
        ctx.move_to(0.0, 10.0);
        // bulges upward to y = 10 - 0.75 * 16 = -2 at x = 10
        ctx.bezier_curve_to(0.0, -6.0, 20.0, -6.0, 20.0, 10.0);
        ctx.close_path();
        ctx.fill();
        assert_eq!(canvas.pixel(10, 1), Some(LIME));
        assert_eq!(canvas.pixel(3, 9), Some(LIME));
        assert_eq!(canvas.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(10, 12), Some(Color::TRANSPARENT));
    }

    #[test]
    fn gradient_fill_style_is_live() {
        let mut canvas = OffscreenCanvas::new(4, 1);
        let mut ctx = canvas.context_2d();
        let g = ctx.create_linear_gradient(0.0, 0.0, 4.0, 0.0).unwrap();
        ctx.set_fill_paint(g.clone());
        assert_eq!(ctx.fill_style_string(), None);
        g.add_color_stop(0.0, "lime").unwrap();
        ctx.fill_rect(0.0, 0.0, 4.0, 1.0);
        assert_eq!(canvas.pixel(3, 0), Some(LIME));
    }
}
