// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: wasm export
//! Mirrors: ImageData hand-off to a browser canvas

use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::ImageData;

use crate::cases;
use crate::harness::Case;

/// Runs built-in conformance cases and exposes the rendered surface to JS.
#[wasm_bindgen]
pub struct CaseRunnerWasm {
    name: String,
    passed: bool,
    message: Option<String>,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl CaseRunnerWasm {
    /// Run the built-in case called `name`.
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str) -> Result<CaseRunnerWasm, JsValue> {
        let case = cases::builtin()
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown case {name}")))?;
        let (result, canvas) = case.run();
        Ok(Self {
            name: result.name,
            passed: result.status.is_pass(),
            message: result.message,
            pixels: canvas.surface().data().to_vec(),
            width: canvas.width() as u32,
            height: canvas.height() as u32,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn passed(&self) -> bool {
        self.passed
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> Option<String> {
        self.message.clone()
    }

    /// The final surface as [`ImageData`].
    #[wasm_bindgen]
    pub fn image_data(&self) -> Result<ImageData, JsValue> {
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(&self.pixels), self.width, self.height)
    }
}
