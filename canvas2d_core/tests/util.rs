// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
#![allow(dead_code)]
use canvas2d_core::harness::Case;
use sha2::{Digest, Sha256};

pub fn render_hash(case: &dyn Case) -> [u8; 32] {
    let (_, canvas) = case.run();
    let mut hasher = Sha256::new();
    hasher.update(canvas.surface().data());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}
