// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: path coverage
//! Mirrors: Canvas 2D fill() with pixel-centre sampling

use super::{LineSegment, Path};
use crate::types::{FillRule, Vec2};

const FLATTEN_TOLERANCE: f32 = 0.1;

/// Rasterize `path` into a `width * height` coverage mask (255 inside, 0 outside).
///
/// Each pixel is sampled once at its centre, so edges are aliased.
pub fn coverage_mask(path: &Path, width: usize, height: usize, rule: FillRule) -> Vec<u8> {
    let mut mask = vec![0u8; width * height];
    let segs = path.flatten(FLATTEN_TOLERANCE);
    if segs.is_empty() || width == 0 {
        return mask;
    }
    let mut crossings: Vec<(f32, i32)> = Vec::new();
    for (y, row) in mask.chunks_exact_mut(width).enumerate() {
        let py = y as f32 + 0.5;
        crossings.clear();
        crossings.extend(segs.iter().filter_map(|s| crossing(s, py)));
        if crossings.is_empty() {
            continue;
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].1;
            if !rule.contains(winding) {
                continue;
            }
            let start = span_index(pair[0].0, width);
            let end = span_index(pair[1].0, width);
            if start < end {
                row[start..end].fill(255);
            }
        }
    }
    mask
}

const ON_EDGE_EPSILON: f32 = 1e-4;

/// Whether `p` is inside `path` under `rule`. Points on the path count as inside.
pub fn contains(path: &Path, p: Vec2, rule: FillRule) -> bool {
    let segs = path.flatten(FLATTEN_TOLERANCE);
    if segs.iter().any(|s| on_segment(s, p)) {
        return true;
    }
    let winding: i32 = segs
        .iter()
        .filter_map(|s| crossing(s, p.y))
        .filter(|&(x, _)| x <= p.x)
        .map(|(_, dir)| dir)
        .sum();
    rule.contains(winding)
}

fn on_segment(seg: &LineSegment, p: Vec2) -> bool {
    let (a, b) = (seg.from, seg.to);
    let in_box = p.x >= a.x.min(b.x) - ON_EDGE_EPSILON
        && p.x <= a.x.max(b.x) + ON_EDGE_EPSILON
        && p.y >= a.y.min(b.y) - ON_EDGE_EPSILON
        && p.y <= a.y.max(b.y) + ON_EDGE_EPSILON;
    if !in_box {
        return false;
    }
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    let cross = (p.x - a.x) * dy - (p.y - a.y) * dx;
    if len == 0.0 {
        return true;
    }
    // distance from the carrier line
    (cross / len).abs() <= ON_EDGE_EPSILON
}

// X position where the segment crosses the horizontal line `y`, with its
// direction. The interval is half-open so shared vertices count once.
fn crossing(seg: &LineSegment, y: f32) -> Option<(f32, i32)> {
    let (a, b, dir) = if seg.from.y <= seg.to.y {
        (seg.from, seg.to, 1)
    } else {
        (seg.to, seg.from, -1)
    };
    if y < a.y || y >= b.y {
        return None;
    }
    let t = (y - a.y) / (b.y - a.y);
    Some((a.x + t * (b.x - a.x), dir))
}

// First pixel whose centre is at or right of `x`, clamped to the row.
fn span_index(x: f32, width: usize) -> usize {
    (x - 0.5).ceil().clamp(0.0, width as f32) as usize
}
