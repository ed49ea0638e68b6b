use std::f32::consts::TAU;

use tiny_skia::{BlendMode, Color, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::{LineCap, LineJoin, Surface};
use crate::color::HexColor;
use crate::error::{CanvasError, Result};
use crate::geometry::Point;

/// Path pieces added since the last stroke.
#[derive(Debug, Clone)]
enum PathItem {
    Line(Point, Point),
    Circle { center: Point, radius: f32 },
    Polyline(Vec<Point>),
}

/// An RGBA pixel surface rasterized with tiny-skia.
///
/// Starts fully transparent. Strokes are anti-aliased and painted with
/// source-over blending; once stroked, path items become pixels and are never
/// replayed, so each [`Surface::stroke`] paints only what was added since the
/// previous one.
pub struct RasterSurface {
    pixmap: Pixmap,
    line_cap: LineCap,
    line_join: LineJoin,
    line_width: f32,
    stroke_color: [u8; 4],
    cursor: Option<Point>,
    subpath_start: Option<Point>,
    pending: Vec<PathItem>,
    revision: u64,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(CanvasError::InvalidDimensions { width, height })?;

        Ok(Self {
            pixmap,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            line_width: 1.0,
            stroke_color: [0, 0, 0, 255],
            cursor: None,
            subpath_start: None,
            pending: Vec::new(),
            revision: 0,
        })
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Incremented on every pixel mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Straight-alpha RGBA value of a pixel, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// True when every pixel is transparent.
    pub fn is_blank(&self) -> bool {
        self.pixmap.data().iter().all(|&b| b == 0)
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(
            [self.pixmap.width() as usize, self.pixmap.height() as usize],
            self.pixmap.data(),
        )
    }

    fn paint(&self) -> Paint<'static> {
        let [r, g, b, a] = self.stroke_color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn skia_stroke(&self) -> Stroke {
        Stroke {
            width: self.line_width,
            line_cap: match self.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match self.line_join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..Stroke::default()
        }
    }
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("revision", &self.revision)
            .finish()
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> f32 {
        self.pixmap.width() as f32
    }

    fn height(&self) -> f32 {
        self.pixmap.height() as f32
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.line_join = join;
    }

    fn set_line_width(&mut self, width: f32) {
        // Non-positive and non-finite widths are ignored.
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn set_stroke_color(&mut self, color: &HexColor) {
        match color.to_rgba() {
            Some(rgba) => self.stroke_color = rgba,
            None => log::warn!("Ignoring unparsable stroke color {color:?}"),
        }
    }

    fn begin_path(&mut self) {
        self.pending.clear();
        self.cursor = None;
        self.subpath_start = None;
    }

    fn close_path(&mut self) {
        if let (Some(from), Some(start)) = (self.cursor, self.subpath_start) {
            if from != start {
                self.pending.push(PathItem::Line(from, start));
            }
            self.cursor = Some(start);
        }
    }

    fn move_to(&mut self, p: Point) {
        self.cursor = Some(p);
        self.subpath_start = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        match self.cursor {
            Some(from) => self.pending.push(PathItem::Line(from, p)),
            None => self.subpath_start = Some(p),
        }
        self.cursor = Some(p);
    }

    fn arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32) {
        if !(radius.is_finite() && radius > 0.0) {
            return;
        }
        let at = |angle: f32| {
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        };
        let start = at(start_angle);
        if let Some(from) = self.cursor {
            self.pending.push(PathItem::Line(from, start));
        }
        if self.subpath_start.is_none() {
            self.subpath_start = Some(start);
        }

        let raw_sweep = end_angle - start_angle;
        if raw_sweep >= TAU {
            self.pending.push(PathItem::Circle { center, radius });
            self.cursor = Some(at(end_angle));
            return;
        }

        let sweep = raw_sweep.rem_euclid(TAU);
        let steps = ((sweep * radius / 2.0).ceil() as usize).clamp(8, 256);
        let points = (0..=steps)
            .map(|i| at(start_angle + sweep * i as f32 / steps as f32))
            .collect::<Vec<_>>();
        self.cursor = points.last().copied();
        self.pending.push(PathItem::Polyline(points));
    }

    fn stroke(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let mut pb = PathBuilder::new();
        for item in self.pending.drain(..) {
            match item {
                PathItem::Line(a, b) => {
                    pb.move_to(a.x, a.y);
                    pb.line_to(b.x, b.y);
                }
                PathItem::Circle { center, radius } => pb.push_circle(center.x, center.y, radius),
                PathItem::Polyline(points) => {
                    let mut points = points.into_iter();
                    if let Some(first) = points.next() {
                        pb.move_to(first.x, first.y);
                        for p in points {
                            pb.line_to(p.x, p.y);
                        }
                    }
                }
            }
        }

        let Some(path) = pb.finish() else {
            return;
        };
        let paint = self.paint();
        let stroke = self.skia_stroke();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        self.revision += 1;
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (surface_w, surface_h) = (self.width(), self.height());
        let left = x.min(x + width).max(0.0);
        let top = y.min(y + height).max(0.0);
        let right = x.max(x + width).min(surface_w);
        let bottom = y.max(y + height).min(surface_h);
        if !(right > left && bottom > top) {
            return;
        }

        if left == 0.0 && top == 0.0 && right == surface_w && bottom == surface_h {
            self.pixmap.fill(Color::TRANSPARENT);
        } else if let Some(rect) = Rect::from_ltrb(left, top, right, bottom) {
            let mut paint = Paint::default();
            paint.blend_mode = BlendMode::Clear;
            paint.anti_alias = false;
            self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];

    fn stroke_line(surface: &mut RasterSurface, from: Point, to: Point, width: f32, color: &str) {
        surface.set_line_cap(LineCap::Round);
        surface.set_line_join(LineJoin::Round);
        surface.set_line_width(width);
        surface.set_stroke_color(&HexColor::from(color));
        surface.move_to(from);
        surface.line_to(to);
        surface.stroke();
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            RasterSurface::new(0, 10),
            Err(CanvasError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_new_surface_is_blank() {
        let surface = RasterSurface::new(16, 16).unwrap();
        assert!(surface.is_blank());
        assert_eq!(surface.revision(), 0);
    }

    #[test]
    fn test_stroke_paints_covered_pixels() {
        let mut surface = RasterSurface::new(100, 50).unwrap();
        stroke_line(&mut surface, Point::new(10.0, 20.0), Point::new(60.0, 20.0), 10.0, "#FF0000");

        assert_eq!(surface.pixel(35, 20), Some(RED));
        assert_eq!(surface.pixel(35, 45), Some([0, 0, 0, 0]));
        assert_eq!(surface.revision(), 1);
    }

    #[test]
    fn test_nothing_is_painted_before_stroke() {
        let mut surface = RasterSurface::new(100, 50).unwrap();
        surface.move_to(Point::new(10.0, 20.0));
        surface.line_to(Point::new(60.0, 20.0));
        assert!(surface.is_blank());
    }

    #[test]
    fn test_unparsable_color_keeps_previous() {
        let mut surface = RasterSurface::new(100, 50).unwrap();
        surface.set_stroke_color(&HexColor::from("#FF0000"));
        stroke_line(&mut surface, Point::new(10.0, 20.0), Point::new(60.0, 20.0), 10.0, "bogus");
        assert_eq!(surface.pixel(35, 20), Some(RED));
    }

    #[test]
    fn test_invalid_width_is_ignored() {
        let mut surface = RasterSurface::new(10, 10).unwrap();
        surface.set_line_width(4.0);
        surface.set_line_width(0.0);
        surface.set_line_width(f32::NAN);
        assert_eq!(surface.skia_stroke().width, 4.0);
    }

    #[test]
    fn test_partial_clear_only_touches_rect() {
        let mut surface = RasterSurface::new(100, 50).unwrap();
        stroke_line(&mut surface, Point::new(0.0, 20.0), Point::new(100.0, 20.0), 10.0, "#FF0000");

        surface.clear_rect(0.0, 0.0, 50.0, 50.0);
        assert_eq!(surface.pixel(20, 20), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(80, 20), Some(RED));
    }

    #[test]
    fn test_clear_outside_bounds_is_noop() {
        let mut surface = RasterSurface::new(10, 10).unwrap();
        surface.clear_rect(20.0, 20.0, 5.0, 5.0);
        assert_eq!(surface.revision(), 0);
    }

    #[test]
    fn test_full_circle_outline() {
        let mut surface = RasterSurface::new(100, 100).unwrap();
        surface.set_line_width(2.0);
        surface.set_stroke_color(&HexColor::from("#0000FF"));
        surface.begin_path();
        surface.arc(Point::new(50.0, 50.0), 20.0, 0.0, TAU);
        surface.stroke();

        // On the ring, not in the middle.
        let on_ring = surface.pixel(70, 50).unwrap();
        assert!(on_ring[3] > 0);
        assert_eq!(surface.pixel(50, 50), Some([0, 0, 0, 0]));
    }
}
