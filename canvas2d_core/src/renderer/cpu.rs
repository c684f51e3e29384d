// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: software rasterizer
//! Mirrors: OffscreenCanvas bitmap with source-over compositing

use std::io::Cursor;

use base64::Engine as _;
use image::{ImageFormat, RgbaImage};

use crate::error::{CanvasError, Result};
use crate::paint::Paint;
use crate::types::{Color, Vec2};

/// RGBA8888 bitmap with straight alpha, initially transparent black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface.
    ///
    /// # Panics
    ///
    /// Panics when `width * height * 4` overflows `usize`; use
    /// [`Surface::try_new`] for untrusted sizes.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(surface) => surface,
            Err(e) => panic!("{e}"),
        }
    }

    /// Allocate a transparent surface, rejecting sizes whose byte length overflows.
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|px| px.checked_mul(4))
            .ok_or(CanvasError::IndexSize("canvas dimensions overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.width * 4
    }

    /// Raw pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = y * self.stride() + x * 4;
        Some(Color::rgba(
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ))
    }

    /// Copy a rectangle out of the surface; pixels outside read as transparent.
    pub fn image_data(&self, sx: i64, sy: i64, sw: usize, sh: usize) -> Vec<u8> {
        let mut out = vec![0u8; sw * sh * 4];
        for row in 0..sh {
            let y = sy + row as i64;
            if y < 0 || y >= self.height as i64 {
                continue;
            }
            for col in 0..sw {
                let x = sx + col as i64;
                if x < 0 || x >= self.width as i64 {
                    continue;
                }
                let src = y as usize * self.stride() + x as usize * 4;
                let dst = (row * sw + col) * 4;
                out[dst..dst + 4].copy_from_slice(&self.data[src..src + 4]);
            }
        }
        out
    }

    /// Reset every covered pixel to transparent black.
    pub fn clear_mask(&mut self, mask: &[u8]) {
        for (px, &m) in self.data.chunks_exact_mut(4).zip(mask) {
            if m != 0 {
                px.fill(0);
            }
        }
    }

    /// Composite `paint` through `mask` with source-over and `global_alpha`.
    pub fn fill_mask(&mut self, mask: &[u8], paint: &Paint, global_alpha: f32) {
        let width = self.width;
        for (i, (px, &m)) in self.data.chunks_exact_mut(4).zip(mask).enumerate() {
            if m == 0 {
                continue;
            }
            let centre = Vec2::new((i % width) as f32 + 0.5, (i / width) as f32 + 0.5);
            let Some(color) = paint.sample(centre) else {
                continue;
            };
            let coverage = global_alpha * m as f32 / 255.0;
            blend_pixel(px, color, coverage);
        }
    }

    /// Encode the surface as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let img = RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .ok_or_else(|| CanvasError::Encode("buffer size mismatch".into()))?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)
            .map_err(|e| CanvasError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }

    /// `data:image/png;base64,...` URL of the surface.
    pub fn to_data_url(&self) -> Result<String> {
        let png = self.to_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }
}

/// Source-over of a straight-alpha color onto a straight-alpha pixel.
fn blend_pixel(dst: &mut [u8], src: Color, coverage: f32) {
    let sa = src.a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let ia = 1.0 - sa;
    let out_a = sa + da * ia;
    if out_a <= 0.0 {
        dst.fill(0);
        return;
    }
    let mix = |s: u8, d: u8| {
        let v = (s as f32 * sa + d as f32 * da * ia) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    dst[0] = mix(src.r, dst[0]);
    dst[1] = mix(src.g, dst[1]);
    dst[2] = mix(src.b, dst[2]);
    dst[3] = (out_a * 255.0).round().min(255.0) as u8;
}
