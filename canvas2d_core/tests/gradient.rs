// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
use canvas2d_core::types::Color;
use canvas2d_core::OffscreenCanvas;

#[test]
fn linear_gradient_rect() {
    let mut canvas = OffscreenCanvas::new(8, 8);
    let mut ctx = canvas.context_2d();
    let grad = ctx.create_linear_gradient(0.0, 0.0, 8.0, 0.0).unwrap();
    grad.add_color_stop(0.0, "#f00").unwrap();
    grad.add_color_stop(1.0, "#00f").unwrap();
    ctx.set_fill_paint(grad);
    ctx.fill_rect(0.0, 0.0, 8.0, 8.0);
    let left = canvas.pixel(0, 0).unwrap();
    let right = canvas.pixel(7, 7).unwrap();
    assert!(left.r > right.r);
    assert!(right.b > left.b);
}

#[test]
fn radial_gradient_over_background_keeps_background_outside() {
    let mut canvas = OffscreenCanvas::new(20, 20);
    let mut ctx = canvas.context_2d();
    ctx.set_fill_style("#0f0");
    ctx.fill_rect(0.0, 0.0, 20.0, 20.0);
    // circle 1 contains circle 0, so every point is painted
    let grad = ctx
        .create_radial_gradient(10.0, 10.0, 0.0, 10.0, 10.0, 5.0)
        .unwrap();
    grad.add_color_stop(0.0, "#f00").unwrap();
    grad.add_color_stop(1.0, "#00f").unwrap();
    ctx.set_fill_paint(grad);
    ctx.fill_rect(0.0, 0.0, 20.0, 20.0);
    assert_eq!(canvas.pixel(0, 0), Some(Color::rgba(0, 0, 255, 255)));
    let centre = canvas.pixel(10, 10).unwrap();
    assert!(centre.r > 200);
}

#[test]
fn translucent_stops_interpolate_alpha() {
    let mut canvas = OffscreenCanvas::new(3, 1);
    let mut ctx = canvas.context_2d();
    let grad = ctx.create_linear_gradient(0.5, 0.0, 2.5, 0.0).unwrap();
    grad.add_color_stop(0.0, "rgba(255, 0, 0, 0)").unwrap();
    grad.add_color_stop(1.0, "rgba(255, 0, 0, 1)").unwrap();
    ctx.set_fill_paint(grad);
    ctx.fill_rect(0.0, 0.0, 3.0, 1.0);
    assert_eq!(canvas.pixel(0, 0), Some(Color::TRANSPARENT));
    assert_eq!(canvas.pixel(1, 0), Some(Color::rgba(255, 0, 0, 128)));
    assert_eq!(canvas.pixel(2, 0), Some(Color::rgba(255, 0, 0, 255)));
}
