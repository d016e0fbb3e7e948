use glam::Vec2;

/// Viewport rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl ScreenRect {
    /// Rectangle at the origin with the given size.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Position normalized to `[0, 1]` across the viewport, y down.
    /// Used for zoom and pan anchors.
    #[must_use]
    pub fn normalized(&self, position: Vec2) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (position.x - self.left) / self.width,
            (position.y - self.top) / self.height,
        )
    }

    /// Position on the trackball circle: origin at the viewport center,
    /// y up, both axes scaled by half the viewport *width* so the ball
    /// stays round on non-square viewports. Used for rotation anchors.
    #[must_use]
    pub fn on_circle(&self, position: Vec2) -> Vec2 {
        if self.width <= 0.0 {
            return Vec2::ZERO;
        }
        let half_width = self.width * 0.5;
        Vec2::new(
            (position.x - half_width - self.left) / half_width,
            (self.height + 2.0 * (self.top - position.y)) / self.width,
        )
    }
}

impl Default for ScreenRect {
    fn default() -> Self {
        Self::from_size(1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_origin_is_viewport_center() {
        let screen = ScreenRect::from_size(800.0, 600.0);
        assert_eq!(screen.on_circle(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(screen.on_circle(Vec2::new(800.0, 300.0)), Vec2::new(1.0, 0.0));
        // Up on screen is positive y, scaled by width.
        assert_eq!(screen.on_circle(Vec2::new(400.0, 0.0)), Vec2::new(0.0, 0.75));
    }

    #[test]
    fn normalized_spans_unit_square() {
        let screen = ScreenRect {
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 50.0,
        };
        assert_eq!(screen.normalized(Vec2::new(10.0, 20.0)), Vec2::ZERO);
        assert_eq!(screen.normalized(Vec2::new(110.0, 70.0)), Vec2::ONE);
    }

    #[test]
    fn degenerate_viewport_maps_to_origin() {
        let screen = ScreenRect::from_size(0.0, 0.0);
        assert_eq!(screen.on_circle(Vec2::new(5.0, 5.0)), Vec2::ZERO);
        assert_eq!(screen.normalized(Vec2::new(5.0, 5.0)), Vec2::ZERO);
    }
}
