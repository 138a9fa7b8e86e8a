use super::*;

#[test]
fn scenario_a_single_horizontal_arrow() {
    // Task 2 depends on task 1; the router sees the engine's real layout.
    let config = TaskCellConfig::default();
    let connections = vec![conn(1, 2)];
    let layouts = layout(&[1, 2], &connections, &config).unwrap();
    let arrows = route_task_arrows(&connections, &layouts, &config);

    assert_eq!(arrows.len(), 1);
    let arrow = &arrows[0];
    assert_eq!(arrow.kind, PathKind::Horizontal);
    assert_eq!(path_start(&arrow.path), (180.0, 40.0));
    assert_eq!(path_end(&arrow.path), (240.0, 40.0));
}

#[test]
fn horizontal_curve_has_expected_control_points() {
    // 60px apart: the 0.4 ratio gives 24, above the 20px floor.
    let layouts = layouts(&[(1, task_rect(0, 0)), (2, task_rect(1, 0))]);
    let arrows = route_task_arrows(&[conn(1, 2)], &layouts, &TaskCellConfig::default());
    assert_eq!(arrows[0].path, "M 180 40 C 204 40, 216 40, 240 40");
}

#[test]
fn horizontal_bend_never_drops_below_the_floor() {
    // Nearly touching columns: 0.4 x distance would be under 20px.
    let mut near = task_rect(1, 0);
    near.x = task_rect(0, 0).right() + 10.0;
    let layouts = layouts(&[(1, task_rect(0, 0)), (2, near)]);
    let arrows = route_task_arrows(&[conn(1, 2)], &layouts, &TaskCellConfig::default());
    assert_eq!(arrows[0].path, "M 180 40 C 200 40, 170 40, 190 40");
}

#[test]
fn vertical_arrow_flows_down_between_rows() {
    let layouts = layouts(&[(1, task_rect(0, 0)), (2, task_rect(0, 1))]);
    let arrows = route_task_arrows(&[conn(1, 2)], &layouts, &TaskCellConfig::default());

    let arrow = &arrows[0];
    assert_eq!(arrow.kind, PathKind::Vertical);
    // Bottom-center of the upper cell to top-center of the lower one,
    // 40px apart: the 15px floor loses to 0.4 x 40 = 16.
    assert_eq!(arrow.path, "M 90 80 C 90 96, 90 104, 90 120");
}

#[test]
fn vertical_arrow_swaps_anchors_when_drawn_upward() {
    // 2 (row 1) points at 1 (row 0): geometry still flows downward from
    // the smaller row, only the record keeps the logical direction.
    let layouts = layouts(&[(1, task_rect(0, 0)), (2, task_rect(0, 1))]);
    let arrows = route_task_arrows(&[conn(2, 1)], &layouts, &TaskCellConfig::default());

    let arrow = &arrows[0];
    assert_eq!((arrow.from, arrow.to), (2, 1));
    assert_eq!(arrow.kind, PathKind::Vertical);
    assert_eq!(path_start(&arrow.path), (90.0, 80.0));
    assert_eq!(path_end(&arrow.path), (90.0, 120.0));
}

#[test]
fn arrows_preserve_connection_order() {
    let layouts = layouts(&[
        (1, task_rect(0, 0)),
        (2, task_rect(1, 0)),
        (3, task_rect(1, 1)),
    ]);
    let connections = vec![conn(1, 3), conn(1, 2), conn(2, 3)];
    let arrows = route_task_arrows(&connections, &layouts, &TaskCellConfig::default());

    let endpoints: Vec<(u64, u64)> = arrows.iter().map(|a| (a.from, a.to)).collect();
    assert_eq!(endpoints, vec![(1, 3), (1, 2), (2, 3)]);
}

#[test]
fn duplicate_connections_are_not_deduplicated() {
    // Uniqueness is the caller's job; the router draws what it is given.
    let layouts = layouts(&[(1, task_rect(0, 0)), (2, task_rect(1, 0))]);
    let arrows = route_task_arrows(
        &[conn(1, 2), conn(1, 2)],
        &layouts,
        &TaskCellConfig::default(),
    );
    assert_eq!(arrows.len(), 2);
    assert_eq!(arrows[0], arrows[1]);
}

#[test]
fn every_curve_starts_and_ends_on_box_edges() {
    let layouts = layouts(&[
        (1, task_rect(0, 0)),
        (2, task_rect(1, 0)),
        (3, task_rect(1, 1)),
        (4, task_rect(2, 0)),
    ]);
    let connections = vec![conn(1, 2), conn(1, 3), conn(2, 4), conn(3, 4), conn(2, 3)];
    let arrows = route_task_arrows(&connections, &layouts, &TaskCellConfig::default());

    for arrow in &arrows {
        let (sx, sy) = path_start(&arrow.path);
        let (ex, ey) = path_end(&arrow.path);
        for (x, y) in [(sx, sy), (ex, ey)] {
            let on_an_edge = layouts.values().any(|r| {
                let on_vertical = (x == r.x || x == r.right()) && y >= r.y && y <= r.bottom();
                let on_horizontal = (y == r.y || y == r.bottom()) && x >= r.x && x <= r.right();
                on_vertical || on_horizontal
            });
            assert!(on_an_edge, "anchor ({x}, {y}) floats free: {}", arrow.path);
        }
    }
}
