//! Machine-readable output: the built diagram serialized as JSON, for
//! rendering surfaces that consume structures instead of SVG.

use anyhow::Result;
use serde::Serialize;

use crate::diagram::EpicDiagram;
use crate::epic::Epic;
use crate::layout::NodeId;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Document<'a> {
    epic: NodeId,
    title: &'a str,
    #[serde(flatten)]
    diagram: &'a EpicDiagram,
}

pub fn render(epic: &Epic, diagram: &EpicDiagram) -> Result<String> {
    let document = Document {
        epic: epic.id,
        title: &epic.title,
        diagram,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
