use crate::metrics::OverlayMetrics;
use egui::{Pos2, Rect, Vec2};

/// Clamps one coordinate to `[margin, extent - size - margin]`.
///
/// When the viewport is too small for the button the lower bound wins, so the
/// button sticks to the top/left margin instead of leaving the screen.
fn clamp_axis(value: f32, extent: f32, size: f32, margin: f32) -> f32 {
    let upper = extent - size - margin;
    value.min(upper).max(margin)
}

/// Keeps a toggle button position inside the viewport.
pub fn clamp_position(target: Pos2, viewport: Vec2, metrics: &OverlayMetrics) -> Pos2 {
    Pos2::new(
        clamp_axis(target.x, viewport.x, metrics.button_size, metrics.margin),
        clamp_axis(target.y, viewport.y, metrics.button_size, metrics.margin),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalPlacement {
    Above,
    Below,
    /// Neither side fits; the panel overflows symmetrically around the button.
    Centered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalPlacement {
    RightOf,
    LeftOf,
    Centered,
}

/// Where the expanded panel sits relative to the toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelPlacement {
    pub vertical: VerticalPlacement,
    pub horizontal: HorizontalPlacement,
}

impl PanelPlacement {
    /// Picks a placement from the space left around `button` in a viewport
    /// of size `viewport`. Both axes are decided independently.
    pub fn choose(button: Rect, viewport: Vec2, metrics: &OverlayMetrics) -> Self {
        let panel = metrics.panel_size;

        let space_above = button.top();
        let space_below = viewport.y - button.bottom();
        let vertical = if space_above >= panel.y + metrics.margin {
            VerticalPlacement::Above
        } else if space_below >= panel.y + metrics.margin {
            VerticalPlacement::Below
        } else {
            VerticalPlacement::Centered
        };

        let space_left = button.left();
        let space_right = viewport.x - button.right();
        let horizontal = if space_right >= panel.x {
            HorizontalPlacement::RightOf
        } else if space_left >= panel.x {
            HorizontalPlacement::LeftOf
        } else {
            HorizontalPlacement::Centered
        };

        Self {
            vertical,
            horizontal,
        }
    }

    /// Offset of the panel's top-left corner from the button's top-left corner.
    pub fn offset(&self, metrics: &OverlayMetrics) -> Vec2 {
        let button = metrics.button_size;
        let panel = metrics.panel_size;

        let y = match self.vertical {
            VerticalPlacement::Above => -(metrics.panel_gap + panel.y),
            VerticalPlacement::Below => button + metrics.panel_gap,
            VerticalPlacement::Centered => -panel.y / 2.0 + button / 2.0,
        };
        let x = match self.horizontal {
            HorizontalPlacement::RightOf => 0.0,
            HorizontalPlacement::LeftOf => button - panel.x,
            HorizontalPlacement::Centered => -panel.x / 2.0 + button / 2.0,
        };
        Vec2::new(x, y)
    }

    pub fn panel_rect(&self, button_min: Pos2, metrics: &OverlayMetrics) -> Rect {
        Rect::from_min_size(button_min + self.offset(metrics), metrics.panel_size)
    }
}
