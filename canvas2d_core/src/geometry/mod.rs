// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: geometry primitives
//! Mirrors: Canvas 2D current default path

mod path;
mod raster;

pub use path::{LineSegment, Path, PathSeg};
pub use raster::{contains, coverage_mask};
