// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: canvas2d core library
//! Mirrors: HTML Canvas 2D / OffscreenCanvas (software subset)

pub mod canvas;
pub mod cases;
pub mod color;
pub mod error;
pub mod geometry;
pub mod harness;
pub mod loader;
pub mod paint;
pub mod renderer;
pub mod types;

pub use canvas::{Context2d, OffscreenCanvas};
pub use error::CanvasError;
