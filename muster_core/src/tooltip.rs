//! Viewport-aware tooltip placement.
//!
//! Given the clicked event element's rectangle and the tooltip's own
//! measured size, compute a fixed position that keeps the tooltip inside
//! the viewport. The tooltip must be rendered (and measured) before this
//! runs; the caller re-invokes it whenever the anchor or the tooltip's
//! measured size changes.

use crate::types::{Position, Rect, Size, Viewport};

/// Minimum gap kept between the tooltip and the viewport edges / anchor
const MARGIN: f64 = 8.0;

/// Compute where to place the tooltip relative to its anchor.
///
/// Horizontal: aligned to the anchor's left edge, clamped so the right
/// edge stays inside the viewport, then the left edge.
///
/// Vertical: preferred below the anchor; on bottom overflow it flips above
/// the anchor, and if that pushes it off the top it clamps to the lowest
/// position that still fits (never above the top margin).
pub fn compute_tooltip_position(anchor: Rect, tooltip: Size, viewport: Viewport) -> Position {
    let mut x = anchor.x;
    if x + tooltip.width > viewport.width - MARGIN {
        x = viewport.width - tooltip.width - MARGIN;
    }
    if x < MARGIN {
        x = MARGIN;
    }

    let mut y = anchor.bottom() + MARGIN;
    if y + tooltip.height > viewport.height - MARGIN {
        y = anchor.y - tooltip.height - MARGIN;
        if y < MARGIN {
            y = (viewport.height - tooltip.height - MARGIN).max(MARGIN);
        }
    }

    Position { x, y }
}
