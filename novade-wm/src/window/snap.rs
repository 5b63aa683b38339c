use serde::{Deserialize, Serialize};

use novade_core::types::RectInt;

/// Screen regions a window can be snapped to in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapPosition {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl SnapPosition {
    pub const ALL: [SnapPosition; 9] = [
        SnapPosition::Left,
        SnapPosition::Right,
        SnapPosition::Top,
        SnapPosition::Bottom,
        SnapPosition::TopLeft,
        SnapPosition::TopRight,
        SnapPosition::BottomLeft,
        SnapPosition::BottomRight,
        SnapPosition::Center,
    ];

    /// Computes the snapped geometry within `screen`.
    ///
    /// Halves and quarters use integer division of the screen size; `Center` is a
    /// half-size rectangle inset by a quarter on each axis.
    pub fn geometry(self, screen: RectInt) -> RectInt {
        let (w, h) = (screen.width(), screen.height());
        let (half_w, half_h) = (w / 2, h / 2);
        let (x0, y0) = (screen.x(), screen.y());
        let mid_x = x0.saturating_add(half_w as i32);
        let mid_y = y0.saturating_add(half_h as i32);

        match self {
            SnapPosition::Left => RectInt::from_coords(x0, y0, half_w, h),
            SnapPosition::Right => RectInt::from_coords(mid_x, y0, half_w, h),
            SnapPosition::Top => RectInt::from_coords(x0, y0, w, half_h),
            SnapPosition::Bottom => RectInt::from_coords(x0, mid_y, w, half_h),
            SnapPosition::TopLeft => RectInt::from_coords(x0, y0, half_w, half_h),
            SnapPosition::TopRight => RectInt::from_coords(mid_x, y0, half_w, half_h),
            SnapPosition::BottomLeft => RectInt::from_coords(x0, mid_y, half_w, half_h),
            SnapPosition::BottomRight => RectInt::from_coords(mid_x, mid_y, half_w, half_h),
            SnapPosition::Center => RectInt::from_coords(
                x0.saturating_add((w / 4) as i32),
                y0.saturating_add((h / 4) as i32),
                half_w,
                half_h,
            ),
        }
    }
}
