// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
use canvas2d_core::color::{parse_color, serialize};
use canvas2d_core::geometry::{coverage_mask, Path, PathSeg};
use canvas2d_core::paint::CanvasGradient;
use canvas2d_core::types::FillRule;
use proptest::prelude::*;
mod testutil;

proptest! {
    #[test]
    fn serialized_colors_parse_back(c in testutil::color_strategy()) {
        let parsed = parse_color(&serialize(c)).unwrap();
        prop_assert_eq!(parsed, c);
    }
}

proptest! {
    #[test]
    fn path_flatten_bound(cmds in proptest::collection::vec(path_seg_strategy(), 1..8)) {
        let mut path = Path::new();
        for seg in &cmds {
            match seg {
                PathSeg::MoveTo(p) => path.move_to(*p),
                PathSeg::LineTo(p) => path.line_to(*p),
                PathSeg::Cubic(c1, c2, p) => path.cubic_to(*c1, *c2, *p),
                PathSeg::Close => path.close(),
            }
        }
        let segs = path.flatten(1.0);
        let bound = 8 * (1 << 16) + 8;
        prop_assert!(segs.len() <= bound);
    }
}

proptest! {
    #[test]
    fn fill_rules_agree_on_simple_rects(
        p in testutil::vec2_positive_strategy(),
        w in 1.0f32..50.0,
        h in 1.0f32..50.0,
    ) {
        let mut path = Path::new();
        path.rect(p.x, p.y, w, h);
        let nonzero = coverage_mask(&path, 160, 160, FillRule::NonZero);
        let evenodd = coverage_mask(&path, 160, 160, FillRule::EvenOdd);
        prop_assert_eq!(nonzero, evenodd);
    }
}

proptest! {
    #[test]
    fn outer_circle_gradient_paints_everywhere(
        c in testutil::vec2_positive_strategy(),
        p in testutil::vec2_strategy(),
        r in 1.0f32..50.0,
    ) {
        // circle 0 is a point at the centre of circle 1, so every point lies on some circle
        let g = CanvasGradient::radial(c.x, c.y, 0.0, c.x, c.y, r).unwrap();
        g.add_color_stop(0.0, "#f00").unwrap();
        prop_assert!(g.sample(p).is_some());
    }
}

fn path_seg_strategy() -> impl Strategy<Value = PathSeg> {
    prop_oneof![
        testutil::vec2_strategy().prop_map(PathSeg::MoveTo),
        testutil::vec2_strategy().prop_map(PathSeg::LineTo),
        (
            testutil::vec2_strategy(),
            testutil::vec2_strategy(),
            testutil::vec2_strategy()
        )
            .prop_map(|(c1, c2, p)| PathSeg::Cubic(c1, c2, p)),
        Just(PathSeg::Close),
    ]
}
