// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
#![no_main]
use canvas2d_core::harness::Case;
use canvas2d_core::loader::json;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(case) = json::from_slice(data) {
        if case.width * case.height <= 256 * 256 {
            let _ = case.run();
        }
    }
});
