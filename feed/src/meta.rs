use serde::{Deserialize, Serialize};

/// How record dates collapse into buckets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    #[default]
    Day,
    Week,
}

impl Cadence {
    pub const ALL: [Cadence; 2] = [Cadence::Day, Cadence::Week];
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cadence::Day => write!(f, "Daily"),
            Cadence::Week => write!(f, "Weekly"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    #[default]
    Calendar,
    Line,
}

impl GraphKind {
    pub const ALL: [GraphKind; 2] = [GraphKind::Calendar, GraphKind::Line];
}

impl std::fmt::Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphKind::Calendar => write!(f, "Calendar"),
            GraphKind::Line => write!(f, "Line"),
        }
    }
}

/// How multiple same-bucket values reduce to one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Mean,
    Sum,
    Min,
    Max,
}

impl Aggregation {
    pub const ALL: [Aggregation; 4] = [
        Aggregation::Mean,
        Aggregation::Sum,
        Aggregation::Min,
        Aggregation::Max,
    ];
}

impl std::fmt::Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aggregation::Mean => write!(f, "Mean"),
            Aggregation::Sum => write!(f, "Sum"),
            Aggregation::Min => write!(f, "Min"),
            Aggregation::Max => write!(f, "Max"),
        }
    }
}

/// Per-metric display configuration, as served by the tracker backend.
///
/// Every field except `key` is optional on the wire; absent fields take
/// the defaults below so a bare `{"key": "..."}` entry is renderable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricMeta {
    pub key: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub min_range: f64,
    #[serde(default)]
    pub max_range: f64,
    /// Whether high values are good. Renderers use it for color polarity,
    /// the aggregation pipeline carries it through untouched.
    #[serde(default = "default_is_positive")]
    pub is_positive: bool,
    #[serde(default)]
    pub is_reverse: bool,
    #[serde(default)]
    pub cadence: Cadence,
    #[serde(default, rename = "graphType")]
    pub graph: GraphKind,
    #[serde(default)]
    pub aggregation: Aggregation,
}

fn default_is_positive() -> bool {
    true
}

impl MetricMeta {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Title shown above the chart: the display name when one is set,
    /// otherwise the metric key itself.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.key)
    }
}

impl Default for MetricMeta {
    fn default() -> Self {
        Self {
            key: String::new(),
            display_name: None,
            min_range: 0.0,
            max_range: 0.0,
            is_positive: true,
            is_reverse: false,
            cadence: Cadence::default(),
            graph: GraphKind::default(),
            aggregation: Aggregation::default(),
        }
    }
}
