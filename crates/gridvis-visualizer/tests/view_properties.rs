//! Property tests for zoom, pan and clear semantics.

use glam::DVec2;
use gridvis_core::{GridRect, Size};
use gridvis_visualizer::{
    GridVisualization, HeadlessToolkit, RecordingSurface, Visualization, Visualizer,
};
use proptest::prelude::*;
use std::sync::Arc;

fn grid() -> Arc<GridVisualization> {
    let toolkit = HeadlessToolkit::new().unwrap();
    GridVisualization::new(&Visualizer::with_toolkit(toolkit))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn zoom_composes_multiplicatively(
        start in 0.1f64..10.0,
        multipliers in prop::collection::vec(0.1f64..4.0, 0..6),
    ) {
        let grid = grid();
        grid.set_scale_factor(start).unwrap();
        let mut expected = start;
        for m in &multipliers {
            grid.zoom(*m).unwrap();
            expected *= m;
        }
        prop_assert_eq!(grid.scale_factor(), expected);
    }

    #[test]
    fn pan_accumulates_ten_per_point(
        points in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 0..8),
    ) {
        let grid = grid();
        let mut expected = DVec2::ZERO;
        for (x, y) in &points {
            let p = DVec2::new(*x, *y);
            grid.center_on_grid_point(p).unwrap();
            expected += -p * 10.0;
        }
        prop_assert_eq!(grid.pan_offset(), expected);

        grid.re_center().unwrap();
        prop_assert_eq!(grid.pan_offset(), DVec2::ZERO);
    }

    #[test]
    fn clear_removes_every_shape(
        rects in prop::collection::vec((-20i32..20, -20i32..20, 1i32..5, 1i32..5), 0..16),
    ) {
        let grid = grid();
        for (x, y, w, h) in &rects {
            grid.add_grid_rectangle(GridRect::new(
                f64::from(*x),
                f64::from(*y),
                f64::from(*w),
                f64::from(*h),
            ))
            .unwrap();
        }
        prop_assert_eq!(grid.shapes().len(), rects.len());

        grid.clear().unwrap();
        let mut surface = RecordingSurface::new(Size::new(64, 64));
        grid.paint(&mut surface).unwrap();
        prop_assert!(grid.is_empty());
        prop_assert_eq!(surface.ops().len(), 1);
    }

    #[test]
    fn fills_scale_with_unit(unit in 1i32..40, scale in 0.5f64..4.0) {
        let grid = grid();
        grid.set_unit(unit).unwrap();
        grid.set_scale_factor(scale).unwrap();
        grid.add_grid_rectangle(GridRect::new(0.0, 0.0, 1.0, 1.0)).unwrap();

        let mut surface = RecordingSurface::new(Size::new(100, 100));
        grid.paint(&mut surface).unwrap();
        let bounds = surface.fills().next().and_then(|op| op.device_rect()).unwrap();
        let side = f64::from(unit) * scale;
        prop_assert!((bounds.width - side).abs() < 1e-9);
        prop_assert!((bounds.height - side).abs() < 1e-9);
    }
}
