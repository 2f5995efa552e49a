// Chart builder - Turns payload series into styled chart configurations
use crate::domain::chart::{
    Axis, ChartConfig, ChartData, ChartKind, ChartOptions, Dataset, Elements, Font, Grid,
    Interaction, Legend, LegendLabels, LineElement, Paint, Plugins, PointElement, ScaleKind,
    Scales, Ticks, Tooltip, ValueFormat,
};
use crate::domain::money::Money;
use crate::domain::payload::{DailySeries, StaffSeries};
use crate::domain::theme::with_alpha;

const ORANGE: &str = "rgba(255,140,64,1)";
const GRADIENT_FLOOR: &str = "rgba(255,255,255,0.02)";
const GRADIENT_FALLBACK: &str = "rgba(255,255,255,0.35)";

pub const CURRENT_PERIOD_LABEL: &str = "Mes actual";
pub const PREVIOUS_PERIOD_LABEL: &str = "Mes anterior";
pub const STAFF_TOTALS_LABEL: &str = "Propinas por trabajador";

/// Global defaults every chart starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDefaults {
    pub font_family: String,
    pub text_color: String,
    pub border_color: String,
    pub line_tension: f32,
    pub line_border_width: f32,
    pub point_radius: f32,
    pub linear_grid: String,
    pub category_grid: String,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            font_family: "system-ui, sans-serif".to_string(),
            text_color: "#111111".to_string(),
            border_color: "rgba(0,0,0,0.12)".to_string(),
            line_tension: 0.35,
            line_border_width: 2.5,
            point_radius: 0.0,
            linear_grid: "rgba(0,0,0,0.12)".to_string(),
            category_grid: "rgba(0,0,0,0.08)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    money: Money,
    defaults: ChartDefaults,
}

impl ChartBuilder {
    pub fn new(money: Money, defaults: ChartDefaults) -> Self {
        Self { money, defaults }
    }

    pub fn money(&self) -> Money {
        self.money
    }

    /// Current vs previous period line chart.
    pub fn tips_chart(&self, series: &DailySeries<'_>, accent: &str) -> ChartConfig {
        let current = Dataset {
            label: CURRENT_PERIOD_LABEL.to_string(),
            data: series.current.to_vec(),
            border_color: Some(Paint::solid(ORANGE)),
            background_color: Some(Paint::solid("rgba(255,140,64,0.25)")),
            fill: Some(true),
            point_radius: Some(3.0),
            point_hover_radius: Some(5.0),
            border_width: Some(2.5),
            ..Default::default()
        };
        let previous = Dataset {
            label: PREVIOUS_PERIOD_LABEL.to_string(),
            data: series.previous.to_vec(),
            border_color: Some(Paint::solid("rgba(160,164,171,0.9)")),
            background_color: Some(Paint::solid("rgba(160,164,171,0.20)")),
            fill: Some(true),
            point_radius: Some(0.0),
            border_dash: Some(vec![6, 4]),
            border_width: Some(2.0),
            ..Default::default()
        };

        let mut options = self.base_options();
        options.interaction = Some(Interaction {
            intersect: false,
            mode: "index".to_string(),
        });
        options.scales.y.begin_at_zero = Some(true);
        options.scales.y.grace = Some("10%".to_string());
        options.scales.y.ticks.format = Some(ValueFormat::Currency);
        options.plugins.legend.display = true;
        options.plugins.tooltip.format = ValueFormat::LabelledCurrency;

        let mut config = ChartConfig {
            kind: ChartKind::Line,
            data: ChartData {
                labels: series.labels.to_vec(),
                datasets: vec![current, previous],
            },
            options,
        };
        apply_accent_styling(&mut config, accent);
        config
    }

    /// Per-staff totals bar chart.
    pub fn staff_chart(&self, series: &StaffSeries<'_>, accent: &str) -> ChartConfig {
        let totals = Dataset {
            label: STAFF_TOTALS_LABEL.to_string(),
            data: series.totals.to_vec(),
            background_color: Some(Paint::vertical(
                "rgba(255,140,64,0.85)",
                "rgba(255,140,64,0.35)",
            )),
            border_color: Some(Paint::solid(ORANGE)),
            border_width: Some(1.5),
            border_radius: Some(10.0),
            bar_percentage: Some(0.7),
            category_percentage: Some(0.7),
            ..Default::default()
        };

        let mut options = self.base_options();
        options.scales.y.begin_at_zero = Some(true);
        options.scales.y.ticks.format = Some(ValueFormat::Currency);
        options.plugins.legend.display = false;
        options.plugins.tooltip.format = ValueFormat::Currency;

        let mut config = ChartConfig {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: series.labels.to_vec(),
                datasets: vec![totals],
            },
            options,
        };
        apply_accent_styling(&mut config, accent);
        config
    }

    fn base_options(&self) -> ChartOptions {
        let d = &self.defaults;
        ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            color: d.text_color.clone(),
            border_color: d.border_color.clone(),
            font: Font {
                family: d.font_family.clone(),
            },
            interaction: None,
            elements: Elements {
                line: LineElement {
                    tension: d.line_tension,
                    border_width: d.line_border_width,
                },
                point: PointElement {
                    radius: d.point_radius,
                },
            },
            scales: Scales {
                x: self.axis(ScaleKind::Category),
                y: self.axis(ScaleKind::Linear),
            },
            plugins: Plugins {
                legend: Legend {
                    display: true,
                    labels: LegendLabels {
                        color: d.text_color.clone(),
                    },
                },
                tooltip: Tooltip {
                    format: ValueFormat::Currency,
                },
            },
        }
    }

    fn axis(&self, kind: ScaleKind) -> Axis {
        let grid = match kind {
            ScaleKind::Linear => &self.defaults.linear_grid,
            ScaleKind::Category => &self.defaults.category_grid,
        };
        Axis {
            kind,
            begin_at_zero: None,
            grace: None,
            grid: Grid {
                color: grid.clone(),
            },
            ticks: Ticks {
                color: self.defaults.text_color.clone(),
                format: None,
            },
        }
    }
}

/// Fill in accent colours on line datasets that did not pick their own.
///
/// A line without a border colour takes the accent; a filled line without a
/// background gets a vertical gradient fading from the accent.
pub fn apply_accent_styling(config: &mut ChartConfig, accent: &str) {
    let chart_kind = config.kind;
    for ds in config.data.datasets.iter_mut() {
        if ds.kind.unwrap_or(chart_kind) != ChartKind::Line {
            continue;
        }
        if ds.border_color.is_none() {
            ds.border_color = Some(Paint::solid(accent));
        }
        if ds.fill == Some(true) && ds.background_color.is_none() {
            let top = with_alpha(accent, 0.35).unwrap_or_else(|| GRADIENT_FALLBACK.to_string());
            ds.background_color = Some(Paint::vertical(top, GRADIENT_FLOOR));
        }
    }
}
