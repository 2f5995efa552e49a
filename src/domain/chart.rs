// Chart configuration domain model (Chart.js-compatible documents)
use super::money::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSlot {
    Tips,
    Staff,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 2] = [ChartSlot::Tips, ChartSlot::Staff];

    /// Fixed id of the region the chart is mounted into.
    pub fn mount_id(&self) -> &'static str {
        match self {
            ChartSlot::Tips => "tipsChart",
            ChartSlot::Staff => "staffChart",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "tips" => Some(ChartSlot::Tips),
            "staff" => Some(ChartSlot::Staff),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Category,
}

/// How a numeric value is turned into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueFormat {
    /// Formatted amount only.
    Currency,
    /// `"<dataset label>: <formatted amount>"`.
    LabelledCurrency,
}

/// A colour or a vertical gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    Gradient(Gradient),
}

impl Paint {
    pub fn solid(color: impl Into<String>) -> Self {
        Paint::Solid(color.into())
    }

    /// Top-to-bottom gradient across the chart area.
    pub fn vertical(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Paint::Gradient(Gradient {
            direction: GradientDirection::Vertical,
            stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: top.into(),
                },
                ColorStop {
                    offset: 1.0,
                    color: bottom.into(),
                },
            ],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub direction: GradientDirection,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_percentage: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_percentage: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub intersect: bool,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub tension: f32,
    pub border_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointElement {
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    pub line: LineElement,
    pub point: PointElement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticks {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type")]
    pub kind: ScaleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace: Option<String>,
    pub grid: Grid,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendLabels {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub display: bool,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub format: ValueFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub color: String,
    pub border_color: String,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
    pub elements: Elements,
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// A chart rendered into a mount point.
///
/// Instances are immutable; a refresh drops the old one and builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    slot: ChartSlot,
    generation: u64,
    config: ChartConfig,
    money: Money,
}

impl ChartInstance {
    pub fn new(slot: ChartSlot, generation: u64, config: ChartConfig, money: Money) -> Self {
        Self {
            slot,
            generation,
            config,
            money,
        }
    }

    pub fn slot(&self) -> ChartSlot {
        self.slot
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn labels(&self) -> &[String] {
        &self.config.data.labels
    }

    pub fn series_lengths(&self) -> Vec<usize> {
        self.config.data.datasets.iter().map(|d| d.data.len()).collect()
    }

    /// Y axis tick text for a value in minor units.
    pub fn tick_label(&self, value: f64) -> String {
        match self.config.options.scales.y.ticks.format {
            Some(_) => self.money.format_value(value),
            None => value.to_string(),
        }
    }

    /// Hover text for one point, or `None` when out of range.
    pub fn tooltip(&self, dataset: usize, index: usize) -> Option<String> {
        let ds = self.config.data.datasets.get(dataset)?;
        let value = *ds.data.get(index)?;
        let amount = self.money.format_minor(value);

        Some(match self.config.options.plugins.tooltip.format {
            ValueFormat::Currency => amount,
            ValueFormat::LabelledCurrency => format!("{}: {}", ds.label, amount),
        })
    }

    /// Tooltip text for every point, grouped by dataset.
    pub fn tooltips(&self) -> Vec<Vec<String>> {
        self.config
            .data
            .datasets
            .iter()
            .enumerate()
            .map(|(d, ds)| {
                (0..ds.data.len())
                    .filter_map(|i| self.tooltip(d, i))
                    .collect()
            })
            .collect()
    }
}
