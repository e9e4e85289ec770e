use serde::{Deserialize, Serialize};

/// How a point takes part in its contour
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum NodeType {
    Move,
    Line,
    OffCurve,
    Curve,
    QCurve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub nodetype: NodeType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub smooth: bool,
}

impl Node {
    pub fn new(x: f64, y: f64, nodetype: NodeType) -> Self {
        Node {
            x,
            y,
            nodetype,
            smooth: false,
        }
    }

    pub fn point(&self) -> kurbo::Point {
        (self.x, self.y).into()
    }

    /// The same node moved to `point`
    pub(crate) fn moved_to(&self, point: kurbo::Point) -> Self {
        Node {
            x: point.x,
            y: point.y,
            ..self.clone()
        }
    }
}
