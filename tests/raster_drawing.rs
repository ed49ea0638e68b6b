use freehand_canvas::{
    CanvasConfig, DrawingState, HexColor, Point, PointerEvent, RasterSurface, StrokeEngine,
};

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

fn create_test_engine(width: f32) -> StrokeEngine<RasterSurface> {
    StrokeEngine::new(
        RasterSurface::new(120, 80).unwrap(),
        RasterSurface::new(120, 80).unwrap(),
        DrawingState::new(HexColor::BLACK, width),
    )
}

fn drag(engine: &mut StrokeEngine<RasterSurface>, points: &[Point]) {
    PointerEvent::DragStart(points[0]).apply(engine);
    for p in points {
        PointerEvent::Move(*p).apply(engine);
    }
    PointerEvent::DragEnd.apply(engine);
}

fn horizontal_line() -> Vec<Point> {
    (0..=10).map(|i| Point::new(20.0 + i as f32 * 8.0, 40.0)).collect()
}

#[test]
fn test_drag_paints_continuous_line() {
    let mut engine = create_test_engine(10.0);
    drag(&mut engine, &horizontal_line());

    for x in (22..98).step_by(5) {
        assert_eq!(engine.canvas().pixel(x, 40), Some(BLACK), "gap at x={x}");
    }
    assert_eq!(engine.canvas().pixel(60, 10), Some(TRANSPARENT));
}

#[test]
fn test_moves_without_drag_paint_nothing() {
    let mut engine = create_test_engine(10.0);
    for p in horizontal_line() {
        PointerEvent::Move(p).apply(&mut engine);
    }
    assert!(engine.canvas().is_blank());
    // The indicator still follows the pointer.
    assert!(!engine.indicator().is_blank());
}

#[test]
fn test_colored_stroke() {
    let mut engine = create_test_engine(10.0);
    engine.set_color("#FF0000");
    drag(&mut engine, &horizontal_line());
    assert_eq!(engine.canvas().pixel(60, 40), Some([255, 0, 0, 255]));
}

#[test]
fn test_eraser_paints_background_white() {
    let mut engine = create_test_engine(10.0);
    drag(&mut engine, &horizontal_line());
    assert_eq!(engine.canvas().pixel(60, 40), Some(BLACK));

    engine.set_color(CanvasConfig::default().eraser_color);
    engine.set_stroke_width(16.0);
    drag(&mut engine, &horizontal_line());

    for x in (22..98).step_by(5) {
        assert_eq!(engine.canvas().pixel(x, 40), Some(WHITE), "black left at x={x}");
    }
}

#[test]
fn test_clear_surface_resets_every_pixel() {
    let mut engine = create_test_engine(12.0);
    drag(&mut engine, &horizontal_line());
    drag(&mut engine, &[Point::new(10.0, 10.0), Point::new(110.0, 70.0)]);
    assert!(!engine.canvas().is_blank());

    engine.clear_surface();
    assert!(engine.canvas().is_blank());

    // Clearing a blank surface is the same.
    engine.clear_surface();
    assert!(engine.canvas().is_blank());
}

#[test]
fn test_indicator_does_not_leave_ghosts() {
    let mut engine = create_test_engine(20.0);
    PointerEvent::Move(Point::new(20.0, 20.0)).apply(&mut engine);
    PointerEvent::Move(Point::new(90.0, 60.0)).apply(&mut engine);

    let indicator = engine.indicator();
    // Nothing remains around the first position.
    for y in 5..35 {
        for x in 5..35 {
            assert_eq!(indicator.pixel(x, y), Some(TRANSPARENT), "ghost at ({x}, {y})");
        }
    }
    // The current circle has radius 10 around (90, 60).
    assert!(indicator.pixel(100, 60).is_some_and(|p| p[3] > 0) || indicator.pixel(99, 60).is_some_and(|p| p[3] > 0));
    assert_eq!(indicator.pixel(90, 60), Some(TRANSPARENT));
}

#[test]
fn test_indicator_never_touches_canvas() {
    let mut engine = create_test_engine(20.0);
    engine.render_width_indicator(Point::new(50.0, 50.0));
    assert!(engine.canvas().is_blank());
    assert_eq!(engine.canvas().revision(), 0);
}

#[test]
fn test_points_outside_surface_are_clipped() {
    let mut engine = create_test_engine(6.0);
    drag(&mut engine, &[Point::new(-50.0, 40.0), Point::new(500.0, 40.0)]);
    assert_eq!(engine.canvas().pixel(0, 40), Some(BLACK));
    assert_eq!(engine.canvas().pixel(119, 40), Some(BLACK));
}
