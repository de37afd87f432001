// Plotly figure model.
//
// Only the attributes the dashboard sets are modelled. Unset options are
// skipped during serialization so Plotly falls back to its own defaults.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

/// A complete figure: `{"data": [...], "layout": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// A figure with no traces, shown while nothing is selected.
    pub fn empty() -> Self {
        Figure::default()
    }

    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Figure { data, layout }
    }

    /// A blank figure carrying a centered message instead of a chart.
    pub fn placeholder(message: impl Into<String>) -> Self {
        Figure {
            data: Vec::new(),
            layout: Layout {
                annotations: vec![Annotation::centered(message)],
                ..Layout::default()
            },
        }
    }

    /// Placeholder variant that also uses the message as the title.
    pub fn no_data(message: &str) -> Self {
        let mut annotation = Annotation::centered(message);
        annotation.font = Some(Font::size(20));
        Figure {
            data: Vec::new(),
            layout: Layout {
                title: Some(Title::new(message)),
                annotations: vec![annotation],
                ..Layout::default()
            },
        }
    }

    /// True when the figure shows a message rather than data.
    pub fn is_placeholder(&self) -> bool {
        self.data.is_empty() && !self.layout.annotations.is_empty()
    }

    /// Text of the first annotation, if any.
    pub fn message(&self) -> Option<&str> {
        self.layout.annotations.first().map(|a| a.text.as_str())
    }
}

// ---------------------------------------------------------------------------
// Traces
// ---------------------------------------------------------------------------

/// Axis values: category labels or numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Series {
    Text(Vec<String>),
    Numbers(Vec<f64>),
}

impl From<Vec<String>> for Series {
    fn from(v: Vec<String>) -> Self {
        Series::Text(v)
    }
}

impl From<Vec<f64>> for Series {
    fn from(v: Vec<f64>) -> Self {
        Series::Numbers(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatterpolar(ScatterPolar),
    Scatter(Scatter),
    Bar(Bar),
    Box(BoxTrace),
    Sunburst(Sunburst),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPolar {
    pub name: String,
    pub r: Vec<f64>,
    pub theta: Vec<String>,
    pub fill: &'static str,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Series,
    pub y: Series,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Series,
    pub y: Series,
    /// Bar start offsets; used for interval bars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<Vec<Option<f64>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl Bar {
    pub fn new(x: impl Into<Series>, y: impl Into<Series>) -> Self {
        Bar {
            name: None,
            x: x.into(),
            y: y.into(),
            base: None,
            orientation: None,
            text: None,
            textposition: None,
            customdata: None,
            hovertemplate: None,
            marker: None,
        }
    }
}

/// A box plot built by Plotly from the raw values in `y`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxTrace {
    pub name: String,
    pub y: Vec<f64>,
    pub boxpoints: &'static str,
    pub jitter: f64,
    pub pointpos: f64,
    /// Precomputed summary, exposed to hover templates as `%{meta}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sunburst {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<f64>,
    pub branchvalues: &'static str,
    pub maxdepth: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<Polar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunburstcolorway: Option<Vec<&'static str>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Title {
            text: text.into(),
            x: None,
            xanchor: None,
            font: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Annotation {
    /// Message in the middle of the plotting area.
    pub fn centered(text: impl Into<String>) -> Self {
        Annotation {
            text: text.into(),
            xref: "paper",
            yref: "paper",
            x: 0.5,
            y: 0.5,
            showarrow: false,
            font: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polar {
    pub radialaxis: Axis,
    pub angularaxis: Axis,
    pub bgcolor: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl Font {
    pub fn color(color: &'static str) -> Self {
        Font {
            color: Some(color),
            size: None,
        }
    }

    pub fn size(size: u32) -> Self {
        Font {
            color: None,
            size: Some(size),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Margin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<u32>,
}
