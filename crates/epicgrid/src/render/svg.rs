//! SVG renderer: serializes a built diagram to an SVG document.
//!
//! The routers' path strings go into `<path d>` attributes verbatim. Task
//! coordinates are batch-local, so each batch's contents sit inside a
//! translated `<g>` group; arrows draw before boxes in every scope so
//! boxes always sit on top.

use std::collections::HashMap;

use crate::arrows::PathKind;
use crate::diagram::{BATCH_HEADER, BATCH_PADDING, BatchDiagram, EpicDiagram};
use crate::epic::{Batch, Epic, Task, TaskStatus};
use crate::layout::NodeId;

/// Outer margin. Backwards detours overshoot the container band by half a
/// gap, so this stays comfortably larger than the default gaps' halves.
const MARGIN: f64 = 60.0;

const FONT_FAMILY: &str = "system-ui, sans-serif";
const TASK_FONT_SIZE: i32 = 13;
const BATCH_FONT_SIZE: i32 = 15;

const TASK_STROKE: &str = "#d0d7de";
const ARROW_STROKE: &str = "#57606a";
const BATCH_FILL: &str = "#ffffff";
const BATCH_STROKE: &str = "#8c959f";
const TEXT_PRIMARY: &str = "#24292f";
const TEXT_MUTED: &str = "#57606a";
const CANVAS_FILL: &str = "#ffffff";

fn status_fill(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "#f6f8fa",
        TaskStatus::InProgress => "#fff8c5",
        TaskStatus::Done => "#dafbe1",
        TaskStatus::Blocked => "#ffebe9",
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a built diagram to an SVG string.
pub fn render(epic: &Epic, diagram: &EpicDiagram) -> String {
    let width = diagram
        .batch_layouts
        .values()
        .map(|r| r.right())
        .fold(0.0, f64::max)
        + 2.0 * MARGIN;
    let height = diagram
        .batch_layouts
        .values()
        .map(|r| r.bottom())
        .fold(0.0, f64::max)
        + 2.0 * MARGIN;
    let (width, height) = (width.max(2.0 * MARGIN + 120.0), height.max(2.0 * MARGIN));

    let batches_by_id: HashMap<NodeId, &Batch> =
        epic.batches.iter().map(|b| (b.id, b)).collect();

    let mut parts = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        ),
        "<defs>".to_string(),
        r#"  <marker id="arrowhead" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto">"#.to_string(),
        format!(r#"    <polygon points="0 0, 10 3.5, 0 7" fill="{ARROW_STROKE}"/>"#),
        "  </marker>".to_string(),
        "</defs>".to_string(),
        format!(r#"<rect width="{width}" height="{height}" fill="{CANVAS_FILL}"/>"#),
        format!(r#"<g transform="translate({MARGIN} {MARGIN})">"#),
    ];

    // Batch arrows first so containers draw over any grazing segment.
    for arrow in &diagram.batch_arrows {
        parts.push(path_element(&arrow.path, arrow.kind));
    }

    for (id, rect) in &diagram.batch_layouts {
        let title = batches_by_id
            .get(id)
            .map(|b| b.title.as_str())
            .unwrap_or_default();
        parts.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="8" fill="{BATCH_FILL}" stroke="{BATCH_STROKE}" stroke-width="1.5"/>"#,
            rect.x, rect.y, rect.width, rect.height
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{BATCH_FONT_SIZE}" font-weight="600" fill="{TEXT_PRIMARY}">{}</text>"#,
            rect.x + BATCH_PADDING,
            rect.y + 24.0,
            escape(title)
        ));

        if let (Some(batch), Some(built)) = (batches_by_id.get(id), diagram.batches.get(id)) {
            parts.push(format!(
                r#"<g transform="translate({} {})">"#,
                rect.x + BATCH_PADDING,
                rect.y + BATCH_HEADER + BATCH_PADDING
            ));
            render_batch_content(&mut parts, batch, built);
            parts.push("</g>".to_string());
        }
    }

    parts.push("</g>".to_string());
    parts.push("</svg>".to_string());
    parts.join("\n")
}

fn render_batch_content(parts: &mut Vec<String>, batch: &Batch, built: &BatchDiagram) {
    let tasks_by_id: HashMap<NodeId, &Task> = batch.tasks.iter().map(|t| (t.id, t)).collect();

    for arrow in &built.arrows {
        parts.push(path_element(&arrow.path, arrow.kind));
    }

    for (id, rect) in &built.layouts {
        let Some(task) = tasks_by_id.get(id) else {
            continue;
        };
        let cx = rect.center_x();
        parts.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="6" fill="{}" stroke="{TASK_STROKE}" stroke-width="1"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            status_fill(task.status)
        ));
        parts.push(format!(
            r#"<text x="{cx}" y="{}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{TASK_FONT_SIZE}" fill="{TEXT_PRIMARY}">{}</text>"#,
            rect.center_y() - 6.0,
            escape(&task.title)
        ));
        let meta = if task.number > 0 {
            format!("#{} · {}", task.number, task.status.display_name())
        } else {
            task.status.display_name().to_string()
        };
        parts.push(format!(
            r#"<text x="{cx}" y="{}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{}" fill="{TEXT_MUTED}">{}</text>"#,
            rect.center_y() + 14.0,
            TASK_FONT_SIZE - 2,
            escape(&meta)
        ));
    }
}

fn path_element(d: &str, kind: PathKind) -> String {
    // The kind is a styling hint: detour routes render dashed.
    let dash = match kind {
        PathKind::Complex => r#" stroke-dasharray="6 4""#,
        _ => "",
    };
    format!(
        r#"<path d="{d}" fill="none" stroke="{ARROW_STROKE}" stroke-width="1.5"{dash} marker-end="url(#arrowhead)"/>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{self, DiagramConfig};
    use crate::epic::TaskStatus;

    fn sample_epic() -> Epic {
        Epic {
            id: 1,
            title: "Epic & <friends>".into(),
            batches: vec![
                Batch {
                    id: 10,
                    title: "Parser & lexer".into(),
                    depends_on: vec![],
                    tasks: vec![
                        Task {
                            id: 100,
                            number: 451,
                            title: "Tokenize <input>".into(),
                            status: TaskStatus::Done,
                            depends_on: vec![],
                        },
                        Task {
                            id: 101,
                            number: 452,
                            title: "Parse".into(),
                            status: TaskStatus::InProgress,
                            depends_on: vec![100],
                        },
                    ],
                },
                Batch {
                    id: 11,
                    title: "Backend".into(),
                    depends_on: vec![10],
                    tasks: vec![Task {
                        id: 102,
                        number: 460,
                        title: "Codegen".into(),
                        status: TaskStatus::Todo,
                        depends_on: vec![101],
                    }],
                },
            ],
        }
    }

    fn rendered() -> String {
        let epic = sample_epic();
        let diagram = diagram::build(&epic, &DiagramConfig::default()).unwrap();
        render(&epic, &diagram)
    }

    #[test]
    fn emits_a_well_formed_document() {
        let svg = rendered();
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"<marker id="arrowhead""#));
    }

    #[test]
    fn titles_are_escaped() {
        let svg = rendered();
        assert!(svg.contains("Tokenize &lt;input&gt;"));
        assert!(svg.contains("Parser &amp; lexer"));
        assert!(!svg.contains("Tokenize <input>"));
    }

    #[test]
    fn router_paths_appear_verbatim() {
        let epic = sample_epic();
        let diagram = diagram::build(&epic, &DiagramConfig::default()).unwrap();
        let svg = render(&epic, &diagram);
        for arrow in diagram
            .batch_arrows
            .iter()
            .chain(diagram.batches.values().flat_map(|b| &b.arrows))
        {
            assert!(
                svg.contains(&format!(r#"d="{}""#, arrow.path)),
                "missing path {}",
                arrow.path
            );
        }
    }

    #[test]
    fn task_boxes_carry_status_fills() {
        let svg = rendered();
        assert!(svg.contains(status_fill(TaskStatus::Done)));
        assert!(svg.contains(status_fill(TaskStatus::InProgress)));
        assert!(svg.contains(status_fill(TaskStatus::Todo)));
    }

    #[test]
    fn output_is_deterministic() {
        let first = rendered();
        for _ in 0..3 {
            assert_eq!(rendered(), first);
        }
    }

    #[test]
    fn empty_epic_still_renders_a_canvas() {
        let epic = Epic {
            id: 1,
            title: "Empty".into(),
            batches: vec![],
        };
        let diagram = diagram::build(&epic, &DiagramConfig::default()).unwrap();
        let svg = render(&epic, &diagram);
        assert!(svg.starts_with("<svg "));
        assert!(!svg.contains("<path"));
    }
}
