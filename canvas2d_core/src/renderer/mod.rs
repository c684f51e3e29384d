// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: rendering backends
//! Mirrors: OffscreenCanvas bitmap (simplified)

pub mod cpu;
pub use cpu::*;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod wasm;
