use super::{LineCap, LineJoin, Surface};
use crate::color::HexColor;
use crate::geometry::Point;

/// A single call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    SetLineWidth(f32),
    SetStrokeColor(HexColor),
    BeginPath,
    ClosePath,
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Stroke,
    ClearRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// A straight segment committed by a `Stroke` call, with the style it was stroked in.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: HexColor,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

/// Surface that draws nothing and keeps an ordered log of every call.
///
/// Used as a headless backend wherever the sequence of drawing commands
/// matters more than the pixels.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Number of clears that covered the whole surface.
    pub fn full_clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| match op {
                SurfaceOp::ClearRect { x, y, width, height } => {
                    *x <= 0.0 && *y <= 0.0 && *width >= self.width && *height >= self.height
                }
                _ => false,
            })
            .count()
    }

    /// Replays the log and returns every line segment that a `Stroke` committed, in order.
    ///
    /// A stroke commits the segments added since the previous stroke or
    /// `BeginPath`, which is how [`super::RasterSurface`] paints them.
    pub fn segments(&self) -> Vec<Segment> {
        let mut cap = LineCap::default();
        let mut join = LineJoin::default();
        let mut width = 1.0;
        let mut color = HexColor::BLACK;
        let mut cursor: Option<Point> = None;
        let mut subpath_start: Option<Point> = None;
        let mut pending: Vec<(Point, Point)> = Vec::new();
        let mut segments = Vec::new();

        for op in &self.ops {
            match op {
                SurfaceOp::SetLineCap(c) => cap = *c,
                SurfaceOp::SetLineJoin(j) => join = *j,
                SurfaceOp::SetLineWidth(w) => width = *w,
                SurfaceOp::SetStrokeColor(c) => color = c.clone(),
                SurfaceOp::BeginPath => {
                    pending.clear();
                    cursor = None;
                    subpath_start = None;
                }
                SurfaceOp::MoveTo(p) => {
                    cursor = Some(*p);
                    subpath_start = Some(*p);
                }
                SurfaceOp::LineTo(p) => {
                    match cursor {
                        Some(from) => pending.push((from, *p)),
                        None => subpath_start = Some(*p),
                    }
                    cursor = Some(*p);
                }
                SurfaceOp::ClosePath => {
                    if let (Some(from), Some(start)) = (cursor, subpath_start) {
                        if from != start {
                            pending.push((from, start));
                        }
                        cursor = Some(start);
                    }
                }
                SurfaceOp::Arc { .. } => {
                    // Not a line segment; the cursor ends up somewhere on the circle.
                    cursor = None;
                }
                SurfaceOp::Stroke => {
                    segments.extend(pending.drain(..).map(|(from, to)| Segment {
                        from,
                        to,
                        color: color.clone(),
                        width,
                        cap,
                        join,
                    }));
                }
                SurfaceOp::ClearRect { .. } => {}
            }
        }

        segments
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(SurfaceOp::SetLineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ops.push(SurfaceOp::SetLineJoin(join));
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(SurfaceOp::SetLineWidth(width));
    }

    fn set_stroke_color(&mut self, color: &HexColor) {
        self.ops.push(SurfaceOp::SetStrokeColor(color.clone()));
    }

    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn close_path(&mut self) {
        self.ops.push(SurfaceOp::ClosePath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(SurfaceOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(SurfaceOp::LineTo(p));
    }

    fn arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32) {
        self.ops.push(SurfaceOp::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        self.ops.push(SurfaceOp::Stroke);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(SurfaceOp::ClearRect { x, y, width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_commit_only_on_stroke() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.begin_path();
        surface.move_to(Point::new(1.0, 1.0));
        surface.line_to(Point::new(5.0, 1.0));
        assert!(surface.segments().is_empty());

        surface.stroke();
        let segments = surface.segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].from, Point::new(1.0, 1.0));
        assert_eq!(segments[0].to, Point::new(5.0, 1.0));
    }

    #[test]
    fn test_begin_path_discards_pending_segments() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.move_to(Point::new(1.0, 1.0));
        surface.line_to(Point::new(5.0, 1.0));
        surface.begin_path();
        surface.stroke();
        assert!(surface.segments().is_empty());
    }

    #[test]
    fn test_close_path_adds_closing_segment() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.move_to(Point::new(0.0, 0.0));
        surface.line_to(Point::new(10.0, 0.0));
        surface.close_path();
        surface.stroke();
        let segments = surface.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].to, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_full_clear_count_ignores_partial_clears() {
        let mut surface = RecordingSurface::new(100.0, 50.0);
        surface.clear_rect(10.0, 10.0, 5.0, 5.0);
        surface.clear();
        assert_eq!(surface.full_clear_count(), 1);
    }

    #[test]
    fn test_close_path_at_start_adds_nothing() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.move_to(Point::new(4.0, 4.0));
        surface.line_to(Point::new(4.0, 4.0));
        surface.close_path();
        surface.stroke();
        let segments = surface.segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].from, segments[0].to);
    }
}
