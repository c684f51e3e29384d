// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: CSS color parsing
//! Mirrors: CSS Color 4 (hex, rgb()/rgba() and named keywords)

use thiserror::Error;

use crate::types::Color;

/// Failure to parse a CSS color string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color {0:?}")]
    Hex(String),
    #[error("invalid color function {0:?}")]
    Function(String),
    #[error("unknown color keyword {0:?}")]
    Keyword(String),
}

const NAMED: &[(&str, [u8; 4])] = &[
    ("transparent", [0, 0, 0, 0]),
    ("black", [0, 0, 0, 255]),
    ("silver", [192, 192, 192, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("white", [255, 255, 255, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("red", [255, 0, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("fuchsia", [255, 0, 255, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("green", [0, 128, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("olive", [128, 128, 0, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("navy", [0, 0, 128, 255]),
    ("blue", [0, 0, 255, 255]),
    ("teal", [0, 128, 128, 255]),
    ("aqua", [0, 255, 255, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("orange", [255, 165, 0, 255]),
];

/// Parse a CSS color string such as `#0f0`, `rgba(255, 0, 0, 0.5)` or `lime`.
pub fn parse_color(input: &str) -> Result<Color, ColorError> {
    let s = input.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::Hex(input.to_string()));
    }
    if let Some(open) = s.find('(') {
        let name = s[..open].trim();
        let body = s[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| ColorError::Function(input.to_string()))?;
        return match name {
            "rgb" | "rgba" => {
                parse_rgb_args(body).ok_or_else(|| ColorError::Function(input.to_string()))
            }
            _ => Err(ColorError::Function(input.to_string())),
        };
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == s)
        .map(|(_, rgba)| Color::from(*rgba))
        .ok_or_else(|| ColorError::Keyword(input.to_string()))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        4 => Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_rgb_args(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let a = match parts.get(3) {
        Some(p) => parse_alpha(p)?,
        None => 255,
    };
    Some(Color::rgba(r, g, b, a))
}

fn parse_channel(s: &str) -> Option<u8> {
    let v = if let Some(pct) = s.strip_suffix('%') {
        pct.trim().parse::<f32>().ok()? * 2.55
    } else {
        s.parse::<f32>().ok()?
    };
    v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(s: &str) -> Option<u8> {
    let v = if let Some(pct) = s.strip_suffix('%') {
        pct.trim().parse::<f32>().ok()? / 100.0
    } else {
        s.parse::<f32>().ok()?
    };
    v.is_finite()
        .then(|| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Serialize a color the way `fillStyle` reads back.
pub fn serialize(c: Color) -> String {
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, alpha_string(c.a))
    }
}

// Shortest decimal that maps back to the same byte.
fn alpha_string(a: u8) -> String {
    if a == 0 {
        return "0".to_string();
    }
    for digits in 1..=3 {
        let s = format!("{:.*}", digits, a as f32 / 255.0);
        if let Ok(v) = s.parse::<f32>() {
            if (v * 255.0).round() as u8 == a {
                return s.trim_end_matches('0').to_string();
            }
        }
    }
    format!("{}", a as f32 / 255.0)
}
