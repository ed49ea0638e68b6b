//! Drawing surfaces the stroke engine renders onto.
//!
//! [`Surface`] mirrors an imperative 2D context: path building, stroking with
//! stateful style attributes, and rectangle clearing. The engine only talks
//! to this trait, which keeps it independent from the UI toolkit.

use crate::color::HexColor;
use crate::geometry::Point;

mod raster;
mod recording;

pub use raster::RasterSurface;
pub use recording::{RecordingSurface, Segment, SurfaceOp};

/// Shape drawn at the open ends of a stroked path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Shape drawn where two stroked segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> f32;

    /// Height in pixels.
    fn height(&self) -> f32;

    fn set_line_cap(&mut self, cap: LineCap);

    fn set_line_join(&mut self, join: LineJoin);

    fn set_line_width(&mut self, width: f32);

    /// Sets the color used by subsequent strokes.
    /// A color the surface cannot interpret leaves the current one in place.
    fn set_stroke_color(&mut self, color: &HexColor);

    /// Discards the current path and starts an empty one.
    fn begin_path(&mut self);

    /// Connects the cursor back to the start of the current subpath.
    fn close_path(&mut self);

    /// Starts a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Adds a straight segment from the cursor to `p`.
    fn line_to(&mut self, p: Point);

    /// Adds a circular arc around `center`, angles in radians clockwise from +x.
    fn arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32);

    /// Strokes the current path with the current style.
    fn stroke(&mut self);

    /// Resets every pixel inside the rectangle to transparent.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Clears the whole surface.
    fn clear(&mut self) {
        let (width, height) = (self.width(), self.height());
        self.clear_rect(0.0, 0.0, width, height);
    }
}
