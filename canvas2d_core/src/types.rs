// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: type definitions
//! Mirrors: HTML Canvas 2D data types

use serde::{Deserialize, Serialize};

/// 2D vector used throughout the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Vec2 {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Vec2 {
    /// Shorthand constructor.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from(v: [u8; 4]) -> Self {
        Color::rgba(v[0], v[1], v[2], v[3])
    }
}

/// Gradient color stop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GradientStop {
    /// Offset along the gradient, in `0..=1`
    pub offset: f32,
    /// Color at this offset
    pub color: Color,
}

/// Winding rule used when filling a path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    /// Whether a pixel with the given winding number is inside the path.
    pub fn contains(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rule_winding() {
        assert!(FillRule::NonZero.contains(2));
        assert!(!FillRule::EvenOdd.contains(2));
        assert!(FillRule::EvenOdd.contains(-1));
        assert!(!FillRule::NonZero.contains(0));
    }

    #[test]
    fn fill_rule_serde_names() {
        let rule: FillRule = serde_json::from_str("\"evenodd\"").unwrap();
        assert_eq!(rule, FillRule::EvenOdd);
        assert_eq!(serde_json::to_string(&FillRule::NonZero).unwrap(), "\"nonzero\"");
    }
}
