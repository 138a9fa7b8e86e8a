//! Orthogonal routing for batch arrows: axis-aligned segments only, except
//! for the same-cell fallback which keeps the task level's smooth curve.

use crate::layout::{BatchCellConfig, Connection, GridRect};

use super::ArrowClass;
use super::path::PathBuilder;
use super::types::{ArrowPath, PathKind};

/// Perpendicular offsets below this collapse the midpoint bend into a
/// straight segment; a two-pixel jog reads as a rendering glitch.
const STRAIGHT_TOLERANCE: f64 = 2.0;

/// Control-point offset for the same-cell fallback curve.
const FALLBACK_BEND: f64 = 20.0;

pub(super) fn route(
    conn: &Connection,
    from: &GridRect,
    to: &GridRect,
    config: &BatchCellConfig,
) -> ArrowPath {
    match super::classify(from, to) {
        ArrowClass::Horizontal => horizontal(conn, from, to),
        ArrowClass::Vertical => vertical(conn, from, to),
        ArrowClass::Backwards => backwards(conn, from, to, config),
        ArrowClass::Fallback => fallback(conn, from, to),
    }
}

/// Right-center to left-center with one bend at the horizontal midpoint,
/// or a single straight segment when the centers already line up.
fn horizontal(conn: &Connection, from: &GridRect, to: &GridRect) -> ArrowPath {
    let (sx, sy) = (from.right(), from.center_y());
    let (ex, ey) = (to.x, to.center_y());

    let mut p = PathBuilder::new();
    p.move_to(sx, sy);
    if (sy - ey).abs() <= STRAIGHT_TOLERANCE {
        p.line_to(ex, ey);
    } else {
        let mid_x = (sx + ex) / 2.0;
        p.line_to(mid_x, sy);
        p.line_to(mid_x, ey);
        p.line_to(ex, ey);
    }
    arrow(conn, p, PathKind::Horizontal)
}

/// Bottom-center of the upper container to top-center of the lower one,
/// flowing from the smaller row to the larger like the task level.
fn vertical(conn: &Connection, from: &GridRect, to: &GridRect) -> ArrowPath {
    let (upper, lower) = if from.row <= to.row {
        (from, to)
    } else {
        (to, from)
    };
    let (sx, sy) = (upper.center_x(), upper.bottom());
    let (ex, ey) = (lower.center_x(), lower.y);

    let mut p = PathBuilder::new();
    p.move_to(sx, sy);
    if (sx - ex).abs() <= STRAIGHT_TOLERANCE {
        p.line_to(ex, ey);
    } else {
        let mid_y = (sy + ey) / 2.0;
        p.line_to(sx, mid_y);
        p.line_to(ex, mid_y);
        p.line_to(ex, ey);
    }
    arrow(conn, p, PathKind::Vertical)
}

/// Backwards edge, mirrored from the task level but without curve
/// smoothing: a five-segment polyline around the row band. The clearing
/// offset is half the taller container plus half the vertical gap, so the
/// detour never grazes either box.
fn backwards(
    conn: &Connection,
    from: &GridRect,
    to: &GridRect,
    config: &BatchCellConfig,
) -> ArrowPath {
    let (sx, sy) = (from.right(), from.center_y());
    let (ex, ey) = (to.x, to.center_y());
    let exit_x = sx + config.horizontal_gap / 2.0;
    let entry_x = ex - config.horizontal_gap / 2.0;

    let clearance = from.height.max(to.height) / 2.0 + config.vertical_gap / 2.0;
    let mid_y = if to.row < from.row {
        sy.min(ey) - clearance
    } else {
        sy.max(ey) + clearance
    };

    let mut p = PathBuilder::new();
    p.move_to(sx, sy);
    p.line_to(exit_x, sy);
    p.line_to(exit_x, mid_y);
    p.line_to(entry_x, mid_y);
    p.line_to(entry_x, ey);
    p.line_to(ex, ey);
    arrow(conn, p, PathKind::Complex)
}

/// Same-cell fallback: no clean orthogonal route applies, so keep the
/// smooth right-to-left curve for visual continuity with the task level.
fn fallback(conn: &Connection, from: &GridRect, to: &GridRect) -> ArrowPath {
    let (sx, sy) = (from.right(), from.center_y());
    let (ex, ey) = (to.x, to.center_y());

    let mut p = PathBuilder::new();
    p.move_to(sx, sy);
    p.cubic_to(sx + FALLBACK_BEND, sy, ex - FALLBACK_BEND, ey, ex, ey);
    arrow(conn, p, PathKind::Complex)
}

fn arrow(conn: &Connection, p: PathBuilder, kind: PathKind) -> ArrowPath {
    ArrowPath {
        from: conn.from,
        to: conn.to,
        path: p.finish(),
        kind,
    }
}
