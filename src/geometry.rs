/// A position in surface-local pixel coordinates.
///
/// Points outside the surface are valid; whatever falls outside is clipped by
/// the surface when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Converts a screen position into coordinates local to `rect`.
pub fn to_local(pos: egui::Pos2, rect: egui::Rect) -> Point {
    let offset = pos - rect.min;
    Point::new(offset.x, offset.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_local_offsets_by_rect_origin() {
        let rect = egui::Rect::from_min_size(egui::pos2(200.0, 40.0), egui::vec2(100.0, 100.0));
        let local = to_local(egui::pos2(210.0, 55.0), rect);
        assert_eq!(local, Point::new(10.0, 15.0));
    }
}
