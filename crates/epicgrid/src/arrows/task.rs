//! Curved routing for task arrows inside one batch.

use crate::layout::{Connection, GridRect, TaskCellConfig};

use super::ArrowClass;
use super::path::PathBuilder;
use super::types::{ArrowPath, PathKind};

/// Fraction of the anchor distance used for control-point offsets.
const BEND_RATIO: f64 = 0.4;
/// Minimum control-point offset for left-to-right curves.
const MIN_H_BEND: f64 = 20.0;
/// Minimum control-point offset for same-column curves.
const MIN_V_BEND: f64 = 15.0;
/// Corner radius for the quarter turns of a backwards detour.
const CORNER_RADIUS: f64 = 10.0;

pub(super) fn route(
    conn: &Connection,
    from: &GridRect,
    to: &GridRect,
    config: &TaskCellConfig,
) -> ArrowPath {
    match super::classify(from, to) {
        ArrowClass::Horizontal => s_curve(conn, from, to, PathKind::Horizontal),
        ArrowClass::Vertical => column_curve(conn, from, to),
        ArrowClass::Backwards => backwards(conn, from, to, config),
        ArrowClass::Fallback => s_curve(conn, from, to, PathKind::Complex),
    }
}

/// Right-center to left-center cubic. Control points offset horizontally
/// from each anchor so the curve leaves and enters perpendicular to the
/// box edges.
fn s_curve(conn: &Connection, from: &GridRect, to: &GridRect, kind: PathKind) -> ArrowPath {
    let (sx, sy) = (from.right(), from.center_y());
    let (ex, ey) = (to.x, to.center_y());
    let bend = (BEND_RATIO * (ex - sx).abs()).max(MIN_H_BEND);

    let mut p = PathBuilder::new();
    p.move_to(sx, sy);
    p.cubic_to(sx + bend, sy, ex - bend, ey, ex, ey);
    arrow(conn, p, kind)
}

/// Same-column connector: bottom-center of the upper node to top-center of
/// the lower one. Endpoints swap as needed so the curve always flows from
/// the smaller row to the larger; the arrow record keeps the logical
/// direction untouched.
fn column_curve(conn: &Connection, from: &GridRect, to: &GridRect) -> ArrowPath {
    let (upper, lower) = if from.row <= to.row {
        (from, to)
    } else {
        (to, from)
    };
    let (sx, sy) = (upper.center_x(), upper.bottom());
    let (ex, ey) = (lower.center_x(), lower.y);
    let bend = (BEND_RATIO * (ey - sy).abs()).max(MIN_V_BEND);

    let mut p = PathBuilder::new();
    p.move_to(sx, sy);
    p.cubic_to(sx, sy + bend, ex, ey - bend, ex, ey);
    arrow(conn, p, PathKind::Vertical)
}

/// Backwards edge: the target sits in an earlier column, so a straight
/// connector would cut through every column in between. Exit right by half
/// the horizontal gap, clear the row band of both nodes (above when the
/// dependency runs upward, below otherwise), run left past the target's
/// column, and enter from the left. Each quarter turn is rounded.
fn backwards(
    conn: &Connection,
    from: &GridRect,
    to: &GridRect,
    config: &TaskCellConfig,
) -> ArrowPath {
    let (sx, sy) = (from.right(), from.center_y());
    let (ex, ey) = (to.x, to.center_y());
    let exit_x = sx + config.horizontal_gap / 2.0;
    let entry_x = ex - config.horizontal_gap / 2.0;
    let detour_y = if to.row < from.row {
        from.y.min(to.y) - config.vertical_gap / 2.0
    } else {
        from.bottom().max(to.bottom()) + config.vertical_gap / 2.0
    };

    let waypoints = [
        (sx, sy),
        (exit_x, sy),
        (exit_x, detour_y),
        (entry_x, detour_y),
        (entry_x, ey),
        (ex, ey),
    ];
    ArrowPath {
        from: conn.from,
        to: conn.to,
        path: rounded_polyline(&waypoints, CORNER_RADIUS),
        kind: PathKind::Complex,
    }
}

/// Polyline with every interior corner rounded by a quadratic arc. The
/// radius is clamped to half the shorter adjacent segment so short jogs
/// never fold back on themselves.
fn rounded_polyline(points: &[(f64, f64)], radius: f64) -> String {
    let mut p = PathBuilder::new();
    let (x0, y0) = points[0];
    p.move_to(x0, y0);

    for i in 1..points.len() - 1 {
        let (px, py) = points[i - 1];
        let (cx, cy) = points[i];
        let (nx, ny) = points[i + 1];

        let in_len = (cx - px).hypot(cy - py);
        let out_len = (nx - cx).hypot(ny - cy);
        let r = radius.min(in_len / 2.0).min(out_len / 2.0);
        if r < 1.0 {
            p.line_to(cx, cy);
            continue;
        }

        let (in_dx, in_dy) = ((cx - px) / in_len, (cy - py) / in_len);
        let (out_dx, out_dy) = ((nx - cx) / out_len, (ny - cy) / out_len);
        p.line_to(cx - in_dx * r, cy - in_dy * r);
        p.quad_to(cx, cy, cx + out_dx * r, cy + out_dy * r);
    }

    let (xn, yn) = points[points.len() - 1];
    p.line_to(xn, yn);
    p.finish()
}

fn arrow(conn: &Connection, p: PathBuilder, kind: PathKind) -> ArrowPath {
    ArrowPath {
        from: conn.from,
        to: conn.to,
        path: p.finish(),
        kind,
    }
}
