//! Draw-list description of a chart
//!
//! A [`Scene`] is plain data: rendering the same series twice yields equal
//! scenes, and the Leptos adapter replaces the whole SVG content with it.

use crate::ChartArea;
use trend_core::Bounds;

/// Horizontal text alignment (`text-anchor`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// One SVG primitive
#[derive(Debug, Clone, PartialEq)]
pub enum SceneElement {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: &'static str,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        anchor: TextAnchor,
        /// SVG `transform`, e.g. a rotation about the anchor point
        transform: Option<String>,
        text_length: Option<f64>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: &'static str,
        /// Hover label (the sample's day)
        label: Option<String>,
    },
    Path {
        d: String,
        stroke: &'static str,
    },
}

impl SceneElement {
    /// Unrotated text at a point
    pub fn text(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self::Text {
            x,
            y,
            content: content.into(),
            anchor: TextAnchor::Start,
            transform: None,
            text_length: None,
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: &'static str) -> Self {
        Self::Line { x1, y1, x2, y2, stroke }
    }
}

/// Complete chart description for one layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub area: ChartArea,
    /// Bounds the elements were mapped with; `None` for the placeholder scene
    pub bounds: Option<Bounds>,
    pub elements: Vec<SceneElement>,
}

impl Scene {
    pub fn viewbox(&self) -> String {
        self.area.viewbox()
    }

    pub fn is_placeholder(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements of a kind, for diagnostics
    pub fn count(&self, pred: impl Fn(&SceneElement) -> bool) -> usize {
        self.elements.iter().filter(|e| pred(e)).count()
    }
}
