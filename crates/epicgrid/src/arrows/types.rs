use serde::Serialize;

use crate::layout::NodeId;

/// Rendering hint attached to every routed arrow. Downstream styling may
/// key off it; routing decisions never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Horizontal,
    Vertical,
    Complex,
}

/// A routed arrow: the connection's endpoints, the path description in the
/// vector mini-grammar (`M`/`L`/`C`/`Q`, absolute coordinates), and the
/// styling hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowPath {
    pub from: NodeId,
    pub to: NodeId,
    pub path: String,
    #[serde(rename = "pathType")]
    pub kind: PathKind,
}
