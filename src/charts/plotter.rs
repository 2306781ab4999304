//! Chart Plotter Module
//! Builds value-count grids and target-proportion charts from a DataFrame.

use crate::charts::{
    Bar, ChartGrid, Color, CountPanel, PaletteSpec, PaletteWrap, ProportionChart, RenderSurface,
    Segment,
};
use crate::config::{RenderConfig, Y_MARGIN};
use crate::data::{categorical_values, lookup_column, validate_selection, Category};
use crate::error::Result;
use crate::stats::{value_counts, CountOrder, CrossTab};
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Renders a grid of value-count bar charts, one panel per column.
#[derive(Debug, Clone, Default)]
pub struct CategoricalCountPlotter {
    order: CountOrder,
}

impl CategoricalCountPlotter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            order: config.count_order,
        }
    }

    pub fn with_order(mut self, order: CountOrder) -> Self {
        self.order = order;
        self
    }

    /// Build the grid. Every column is checked before any counting starts.
    pub fn render<S: AsRef<str>>(&self, df: &DataFrame, columns: &[S]) -> Result<ChartGrid> {
        validate_selection(df, columns)?;

        let panels = columns
            .iter()
            .map(|name| self.count_panel(df, name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let grid = ChartGrid::new(panels);
        log::info!(
            "Built value-count grid: {} panels in {}x{}",
            grid.panels.len(),
            grid.rows,
            grid.cols
        );
        Ok(grid)
    }

    /// Value counts of a single column as a bar panel.
    pub fn count_panel(&self, df: &DataFrame, column: &str) -> Result<CountPanel> {
        let values = categorical_values(df, column)?;
        let bars: Vec<Bar> = value_counts(&values, self.order)
            .into_iter()
            .map(|(category, count)| Bar {
                label: category.to_string(),
                count,
            })
            .collect();

        let tallest = bars.iter().map(|b| b.count).max().unwrap_or(0);
        let y_max = if tallest == 0 {
            1.0
        } else {
            tallest as f64 * (1.0 + Y_MARGIN)
        };

        log::debug!("{}: {} distinct values", column, bars.len());

        Ok(CountPanel {
            column: column.to_string(),
            title: format!("Value counts for {}", column),
            x_label: column.to_string(),
            y_label: "Count".to_string(),
            bars,
            y_max,
        })
    }
}

/// Value-count grid with the default bar order.
pub fn render_value_counts<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<ChartGrid> {
    CategoricalCountPlotter::new().render(df, columns)
}

/// Renders one stacked proportion chart per column and shows each on a surface.
#[derive(Debug, Clone, Default)]
pub struct CategoricalProportionPlotter {
    palette: PaletteSpec,
    wrap: PaletteWrap,
}

impl CategoricalProportionPlotter {
    pub fn new(palette: PaletteSpec) -> Self {
        Self {
            palette,
            wrap: PaletteWrap::default(),
        }
    }

    pub fn from_config(palette: PaletteSpec, config: &RenderConfig) -> Self {
        Self {
            palette,
            wrap: config.palette_wrap,
        }
    }

    pub fn with_wrap(mut self, wrap: PaletteWrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Build and show a chart per column, in selection order.
    ///
    /// Columns, target and palette are all validated before the first chart
    /// reaches the surface.
    pub fn render<S, R>(
        &self,
        df: &DataFrame,
        columns: &[S],
        target_column: &str,
        surface: &mut R,
    ) -> Result<Vec<ProportionChart>>
    where
        S: AsRef<str>,
        R: RenderSurface + ?Sized,
    {
        validate_selection(df, columns)?;
        lookup_column(df, target_column)?;
        self.palette.validate()?;

        let target = categorical_values(df, target_column)?;
        let colors = self.target_colors(&target)?;

        let mut charts = Vec::with_capacity(columns.len());
        for name in columns {
            let chart = self.proportion_chart(df, name.as_ref(), target_column, &target, &colors)?;
            surface.show(&chart)?;
            charts.push(chart);
        }

        log::info!(
            "Rendered {} proportion charts for target {}",
            charts.len(),
            target_column
        );
        Ok(charts)
    }

    /// One color per target category, assigned in natural category order so a
    /// category keeps its color across every chart of the series.
    fn target_colors(&self, target: &[Option<Category>]) -> Result<HashMap<Category, Color>> {
        let categories: BTreeSet<&Category> = target.iter().flatten().collect();
        let colors = self.palette.resolve(categories.len(), self.wrap)?;
        Ok(categories.into_iter().cloned().zip(colors).collect())
    }

    fn proportion_chart(
        &self,
        df: &DataFrame,
        column: &str,
        target_column: &str,
        target: &[Option<Category>],
        colors: &HashMap<Category, Color>,
    ) -> Result<ProportionChart> {
        let source = categorical_values(df, column)?;
        let table = CrossTab::from_pairs(&source, target);
        let shares = table.normalize_rows();

        let mut chart = ProportionChart::new(column, target_column);
        chart.categories = table.rows.iter().map(|c| c.to_string()).collect();
        // Every crosstab column is a present target category, so it has a color
        chart.segments = table
            .columns
            .iter()
            .enumerate()
            .map(|(j, category)| Segment {
                label: category.to_string(),
                color: colors[category],
                proportions: shares.iter().map(|row| row[j]).collect(),
            })
            .collect();

        log::debug!(
            "{} x {}: {} bars, {} segments",
            column,
            target_column,
            chart.categories.len(),
            chart.segments.len()
        );
        Ok(chart)
    }
}

/// Proportion charts for `columns` against `target_column`, each shown on
/// `surface` as it is produced.
pub fn render_proportions<S, R>(
    df: &DataFrame,
    columns: &[S],
    target_column: &str,
    palette: &PaletteSpec,
    surface: &mut R,
) -> Result<Vec<ProportionChart>>
where
    S: AsRef<str>,
    R: RenderSurface + ?Sized,
{
    CategoricalProportionPlotter::new(palette.clone()).render(df, columns, target_column, surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartRecorder;
    use crate::error::ChartError;
    use approx::assert_relative_eq;

    fn churn() -> DataFrame {
        df![
            "status" => ["active", "active", "inactive", "active"],
            "churned" => [0i64, 0, 1, 0],
            "plan" => [Some("basic"), Some("pro"), None, Some("basic")],
        ]
        .unwrap()
    }

    #[test]
    fn test_status_value_counts() {
        let grid = render_value_counts(&churn(), &["status"]).unwrap();
        assert_eq!((grid.rows, grid.cols), (1, 1));
        assert_eq!(grid.panels.len(), 1);

        let panel = &grid.panels[0];
        assert_eq!(panel.title, "Value counts for status");
        assert_eq!(panel.x_label, "status");
        assert_eq!(panel.y_label, "Count");
        assert_eq!(
            panel.bars,
            vec![
                Bar { label: "active".into(), count: 3 },
                Bar { label: "inactive".into(), count: 1 },
            ]
        );
        assert_relative_eq!(panel.y_max, 3.3);
    }

    #[test]
    fn test_missing_values_excluded_from_counts() {
        let grid = render_value_counts(&churn(), &["plan"]).unwrap();
        assert_eq!(grid.panels[0].total(), 3);
    }

    #[test]
    fn test_signed_zeros_share_one_bar() {
        let df = df!["x" => [0.0f64, -0.0, 1.5, 0.0]].unwrap();
        let grid = render_value_counts(&df, &["x"]).unwrap();
        assert_eq!(
            grid.panels[0].bars,
            vec![
                Bar { label: "0.0".into(), count: 3 },
                Bar { label: "1.5".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_first_seen_order() {
        let df = df!["c" => ["x", "y", "y", "z", "z", "z"]].unwrap();
        let grid = CategoricalCountPlotter::new()
            .with_order(CountOrder::FirstSeen)
            .render(&df, &["c"])
            .unwrap();
        let labels: Vec<&str> = grid.panels[0].bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_value_counts_errors() {
        let df = churn();
        let none: [&str; 0] = [];
        assert!(matches!(
            render_value_counts(&df, &none),
            Err(ChartError::EmptySelection)
        ));
        assert!(matches!(
            render_value_counts(&df, &["status", "region"]),
            Err(ChartError::ColumnNotFound(name)) if name == "region"
        ));
    }

    #[test]
    fn test_status_churn_proportions() {
        let mut recorder = ChartRecorder::new();
        let charts = render_proportions(
            &churn(),
            &["status"],
            "churned",
            &PaletteSpec::default(),
            &mut recorder,
        )
        .unwrap();

        assert_eq!(charts.len(), 1);
        let chart = &charts[0];
        assert_eq!(chart.title, "Percentage Distribution of churned across status");
        assert_eq!(chart.y_label, "Percentage");
        assert_eq!(chart.legend_title, "churned");
        assert_eq!(chart.tick_rotation, 45.0);
        assert_eq!(chart.categories, vec!["active", "inactive"]);
        assert_eq!(chart.proportion("active", "0"), Some(1.0));
        assert_eq!(chart.proportion("active", "1"), Some(0.0));
        assert_eq!(chart.proportion("inactive", "1"), Some(1.0));
        assert_eq!(recorder.charts, charts);
    }

    #[test]
    fn test_target_in_columns_is_degenerate() {
        let mut recorder = ChartRecorder::new();
        let charts = render_proportions(
            &churn(),
            &["churned"],
            "churned",
            &PaletteSpec::default(),
            &mut recorder,
        )
        .unwrap();
        assert_eq!(charts[0].proportion("0", "0"), Some(1.0));
        assert_eq!(charts[0].proportion("1", "1"), Some(1.0));
    }

    #[test]
    fn test_colors_shared_across_charts() {
        let mut recorder = ChartRecorder::new();
        let charts = CategoricalProportionPlotter::new(PaletteSpec::from("deep"))
            .render(&churn(), &["status", "plan"], "churned", &mut recorder)
            .unwrap();
        // "plan" has no row with churned = 1, so it only carries the "0" layer
        assert_eq!(charts[1].segments.len(), 1);
        assert_eq!(charts[0].segments[0].color, charts[1].segments[0].color);
        assert_eq!(charts[0].segments[0].color, Color::from_hex("#4C72B0").unwrap());
    }

    #[test]
    fn test_nothing_shown_on_invalid_input() {
        let df = churn();
        let mut recorder = ChartRecorder::new();

        let err = render_proportions(&df, &["status"], "missing", &PaletteSpec::default(), &mut recorder)
            .unwrap_err();
        assert!(matches!(err, ChartError::ColumnNotFound(name) if name == "missing"));

        let err = render_proportions(
            &df,
            &["status", "nope"],
            "churned",
            &PaletteSpec::default(),
            &mut recorder,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::ColumnNotFound(_)));

        let err = render_proportions(
            &df,
            &["status"],
            "churned",
            &PaletteSpec::from("rainbow"),
            &mut recorder,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::UnknownPalette(_)));

        let none: [&str; 0] = [];
        let err = render_proportions(&df, &none, "churned", &PaletteSpec::default(), &mut recorder)
            .unwrap_err();
        assert!(matches!(err, ChartError::EmptySelection));

        assert!(recorder.charts.is_empty());
    }

    #[test]
    fn test_strict_wrap_checked_up_front() {
        let df = df![
            "g" => ["a", "b", "c"],
            "t" => ["x", "y", "z"],
        ]
        .unwrap();
        let mut recorder = ChartRecorder::new();
        let err = CategoricalProportionPlotter::new(PaletteSpec::Colors(vec!["#000000".into()]))
            .with_wrap(PaletteWrap::Strict)
            .render(&df, &["g"], "t", &mut recorder)
            .unwrap_err();
        assert!(matches!(err, ChartError::PaletteExhausted { needed: 3, available: 1 }));
        assert!(recorder.charts.is_empty());
    }
}
