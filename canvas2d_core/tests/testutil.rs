// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
#![allow(dead_code)]
use canvas2d_core::types::{Color, Vec2};
use proptest::prelude::*;

pub fn vec2_strategy() -> impl Strategy<Value = Vec2> {
    (-1000.0f32..1000.0f32, -1000.0f32..1000.0f32).prop_map(|(x, y)| Vec2 { x, y })
}

pub fn vec2_positive_strategy() -> impl Strategy<Value = Vec2> {
    (0.0f32..100.0f32, 0.0f32..100.0f32).prop_map(|(x, y)| Vec2 { x, y })
}

pub fn color_strategy() -> impl Strategy<Value = Color> {
    any::<[u8; 4]>().prop_map(Color::from)
}
