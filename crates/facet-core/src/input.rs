//! Per-frame input state and viewport to render-target coordinate mapping

/// A pixel position in viewport space (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

/// Where row 0 of a render target lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetOrigin {
    /// wgpu textures.
    #[default]
    TopLeft,
    BottomLeft,
}

impl TargetOrigin {
    /// Map a viewport-space cursor position to a texel of a `width` x `height` target.
    ///
    /// Returns `None` when the position lies outside the target.
    pub fn to_target(self, x: f32, y: f32, width: u32, height: u32) -> Option<PixelCoord> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x.floor() as u32, y.floor() as u32);
        if x >= width || y >= height {
            return None;
        }
        let y = match self {
            Self::TopLeft => y,
            Self::BottomLeft => height - y - 1,
        };
        Some(PixelCoord { x, y })
    }
}

/// Cursor and button state sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Cursor in viewport pixels, `None` while outside the viewport.
    pub cursor: Option<(f32, f32)>,
    /// Primary (left) mouse button held over the viewport.
    pub primary_down: bool,
}

impl InputState {
    /// The cursor position a pick should be issued for this frame, if any.
    pub fn pick_request(&self) -> Option<(f32, f32)> {
        if self.primary_down { self.cursor } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_is_identity() {
        let p = TargetOrigin::TopLeft.to_target(10.7, 3.2, 100, 50).unwrap();
        assert_eq!(p, PixelCoord { x: 10, y: 3 });
    }

    #[test]
    fn test_bottom_left_flips_y() {
        let origin = TargetOrigin::BottomLeft;
        assert_eq!(origin.to_target(0.0, 0.0, 100, 50).unwrap().y, 49);
        assert_eq!(origin.to_target(0.0, 49.0, 100, 50).unwrap().y, 0);
    }

    #[test]
    fn test_outside_target() {
        let origin = TargetOrigin::TopLeft;
        assert!(origin.to_target(-1.0, 0.0, 100, 50).is_none());
        assert!(origin.to_target(100.0, 0.0, 100, 50).is_none());
        assert!(origin.to_target(0.0, 50.0, 100, 50).is_none());
        assert!(origin.to_target(f32::NAN, 0.0, 100, 50).is_none());
    }

    #[test]
    fn test_pick_request_requires_button() {
        let mut input = InputState {
            cursor: Some((4.0, 5.0)),
            primary_down: false,
        };
        assert_eq!(input.pick_request(), None);
        input.primary_down = true;
        assert_eq!(input.pick_request(), Some((4.0, 5.0)));
    }
}
