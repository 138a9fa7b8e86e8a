use std::collections::{HashMap, HashSet};

use super::types::{CellSizing, Connection, GridRect, LayoutError, LayoutMap, NodeId};

/// Assign every node a grid cell and a pixel rect.
///
/// Columns follow topological depth: a node sits one column to the right of
/// its deepest dependency, and nodes without dependencies land in column 0.
/// Within a column, rows fill in input order; the input sequence is the
/// only tie-break, so the same input always produces the same picture.
///
/// Connections whose endpoints are not both present in `nodes` contribute
/// nothing; upstream extraction legitimately filters edges by scope.
///
/// An empty `nodes` slice yields an empty mapping, not an error.
pub fn layout(
    nodes: &[NodeId],
    connections: &[Connection],
    sizing: &impl CellSizing,
) -> Result<LayoutMap, LayoutError> {
    sizing.validate()?;

    if nodes.is_empty() {
        return Ok(LayoutMap::new());
    }

    let mut known = HashSet::with_capacity(nodes.len());
    for &id in nodes {
        if !known.insert(id) {
            return Err(LayoutError::DuplicateNode { id });
        }
    }

    let columns = assign_columns(nodes, connections, &known)?;

    // Rows: count how many earlier nodes already landed in the same column.
    let mut rows: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());
    let mut fill: HashMap<usize, usize> = HashMap::new();
    for &id in nodes {
        let next = fill.entry(columns[&id]).or_insert(0);
        rows.insert(id, *next);
        *next += 1;
    }

    Ok(place(nodes, &columns, &rows, sizing))
}

/// Column per node: the longest dependency chain leading to it.
///
/// Depth-first with an explicit on-stack set so a genuine cycle fails fast
/// with the cycle's members instead of recursing forever.
fn assign_columns(
    nodes: &[NodeId],
    connections: &[Connection],
    known: &HashSet<NodeId>,
) -> Result<HashMap<NodeId, usize>, LayoutError> {
    // deps[to] = everything `to` depends on, restricted to in-scope ids.
    let mut deps: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for conn in connections {
        if known.contains(&conn.from) && known.contains(&conn.to) {
            deps.entry(conn.to).or_default().push(conn.from);
        }
    }

    let mut columns = HashMap::with_capacity(nodes.len());
    let mut stack = Vec::new();
    for &id in nodes {
        column_of(id, &deps, &mut columns, &mut stack)?;
    }
    Ok(columns)
}

fn column_of(
    id: NodeId,
    deps: &HashMap<NodeId, Vec<NodeId>>,
    columns: &mut HashMap<NodeId, usize>,
    stack: &mut Vec<NodeId>,
) -> Result<usize, LayoutError> {
    if let Some(&col) = columns.get(&id) {
        return Ok(col);
    }
    if let Some(pos) = stack.iter().position(|&n| n == id) {
        return Err(LayoutError::Cycle {
            ids: stack[pos..].to_vec(),
        });
    }

    stack.push(id);
    let mut col = 0;
    if let Some(list) = deps.get(&id) {
        for &dep in list {
            col = col.max(column_of(dep, deps, columns, stack)? + 1);
        }
    }
    stack.pop();

    columns.insert(id, col);
    Ok(col)
}

/// Pixel placement from grid cells.
///
/// Column x-offsets are prefix sums of each column's widest cell plus the
/// horizontal gap; within a column, nodes stack top to bottom with the
/// vertical gap between them. With fixed cells this reduces to
/// `x = col * (w + h_gap)`, `y = row * (h + v_gap)`; with variable cells it
/// keeps rects disjoint.
fn place(
    nodes: &[NodeId],
    columns: &HashMap<NodeId, usize>,
    rows: &HashMap<NodeId, usize>,
    sizing: &impl CellSizing,
) -> LayoutMap {
    let col_count = columns.values().copied().max().map_or(0, |c| c + 1);

    let mut col_widths = vec![0.0_f64; col_count];
    for &id in nodes {
        let (width, _) = sizing.cell_size(id);
        let col = columns[&id];
        if width > col_widths[col] {
            col_widths[col] = width;
        }
    }

    let mut col_x = vec![0.0_f64; col_count];
    let mut x = 0.0;
    for col in 0..col_count {
        col_x[col] = x;
        x += col_widths[col] + sizing.horizontal_gap();
    }

    let mut col_y = vec![0.0_f64; col_count];
    let mut out = LayoutMap::new();
    for &id in nodes {
        let (width, height) = sizing.cell_size(id);
        let col = columns[&id];
        let y = col_y[col];
        col_y[col] = y + height + sizing.vertical_gap();
        out.insert(
            id,
            GridRect {
                x: col_x[col],
                y,
                width,
                height,
                row: rows[&id],
                col,
            },
        );
    }
    out
}
