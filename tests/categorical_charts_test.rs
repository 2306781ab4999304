//! Categorical Chart Tests
//!
//! Grid layout, count totals, row normalization and idempotence of the two
//! chart builders, exercised through the public API.

use approx::assert_relative_eq;
use chartify_eda::charts::PaletteWrap;
use chartify_eda::{
    render_proportions, render_value_counts, CategoricalProportionPlotter, ChartError,
    ChartRecorder, PaletteSpec,
};
use polars::prelude::*;
use proptest::prelude::*;

fn churn() -> DataFrame {
    df![
        "status" => ["active", "active", "inactive", "active"],
        "churned" => [0i64, 0, 1, 0],
    ]
    .unwrap()
}

/// DataFrame with `k` string columns named c0..c{k-1}, each cycling through
/// `levels` labels, plus a "target" column cycling through 3 labels.
fn wide_frame(k: usize, rows: usize, levels: usize) -> DataFrame {
    let mut columns: Vec<Column> = (0..k)
        .map(|c| {
            let values: Vec<String> = (0..rows)
                .map(|r| format!("v{}", (r * (c + 1)) % levels))
                .collect();
            Column::new(format!("c{}", c).into(), values)
        })
        .collect();
    let target: Vec<String> = (0..rows).map(|r| format!("t{}", r % 3)).collect();
    columns.push(Column::new("target".into(), target));
    DataFrame::new(columns).unwrap()
}

#[test]
fn status_scenario_value_counts() {
    let grid = render_value_counts(&churn(), &["status"]).unwrap();

    assert_eq!((grid.rows, grid.cols), (1, 1));
    assert_eq!(grid.panels.len(), 1);
    let panel = grid.panel("status").unwrap();
    assert_eq!(panel.title, "Value counts for status");
    assert_eq!(panel.count_of("active"), Some(3));
    assert_eq!(panel.count_of("inactive"), Some(1));
    assert_eq!(panel.bars.len(), 2);
}

#[test]
fn status_scenario_proportions() {
    let mut recorder = ChartRecorder::new();
    let charts = render_proportions(
        &churn(),
        &["status"],
        "churned",
        &PaletteSpec::default(),
        &mut recorder,
    )
    .unwrap();

    let chart = &charts[0];
    assert_eq!(chart.bar(0), vec![("0", 1.0), ("1", 0.0)]);
    assert_eq!(chart.bar(1), vec![("0", 0.0), ("1", 1.0)]);
    assert_eq!(recorder.charts.len(), 1);
}

#[test]
fn empty_selection_for_both() {
    let df = churn();
    let none: Vec<String> = Vec::new();
    assert!(matches!(
        render_value_counts(&df, &none),
        Err(ChartError::EmptySelection)
    ));
    let mut recorder = ChartRecorder::new();
    assert!(matches!(
        render_proportions(&df, &none, "churned", &PaletteSpec::default(), &mut recorder),
        Err(ChartError::EmptySelection)
    ));
}

#[test]
fn four_columns_use_two_rows() {
    let df = wide_frame(4, 30, 5);
    let grid = render_value_counts(&df, &["c0", "c1", "c2", "c3"]).unwrap();
    assert_eq!((grid.rows, grid.cols), (2, 3));
    assert_eq!(grid.row(0).len(), 3);
    assert_eq!(grid.row(1).len(), 1);
    assert_eq!(grid.row(1)[0].column, "c3");
}

#[test]
fn charts_follow_selection_order() {
    let df = wide_frame(3, 12, 4);
    let mut recorder = ChartRecorder::new();
    CategoricalProportionPlotter::new(PaletteSpec::from("colorblind"))
        .render(&df, &["c2", "c0"], "target", &mut recorder)
        .unwrap();
    let shown: Vec<&str> = recorder.charts.iter().map(|c| c.column.as_str()).collect();
    assert_eq!(shown, vec!["c2", "c0"]);
}

#[test]
fn explicit_palette_cycles_over_targets() {
    let df = wide_frame(1, 9, 3);
    let mut recorder = ChartRecorder::new();
    let charts = CategoricalProportionPlotter::new(PaletteSpec::Colors(vec![
        "#112233".into(),
        "#445566".into(),
    ]))
    .with_wrap(PaletteWrap::Cycle)
    .render(&df, &["c0"], "target", &mut recorder)
    .unwrap();

    let colors: Vec<String> = charts[0].segments.iter().map(|s| s.color.to_string()).collect();
    assert_eq!(colors, vec!["#112233", "#445566", "#112233"]);
}

#[test]
fn json_exposes_numeric_content() {
    let grid = render_value_counts(&churn(), &["status"]).unwrap();
    let json = grid.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["panels"][0]["bars"][0]["label"], "active");
    assert_eq!(value["panels"][0]["bars"][0]["count"], 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// k panels, ceil(k/3) rows, never more than 3 per row
    #[test]
    fn prop_grid_shape(k in 1usize..12) {
        let df = wide_frame(k, 10, 4);
        let names: Vec<String> = (0..k).map(|c| format!("c{}", c)).collect();
        let grid = render_value_counts(&df, &names).unwrap();

        prop_assert_eq!(grid.panels.len(), k);
        prop_assert_eq!(grid.rows, k.div_ceil(3));
        prop_assert_eq!(grid.cols, k.min(3));
        for row in 0..grid.rows {
            prop_assert!(grid.row(row).len() <= 3);
            prop_assert!(!grid.row(row).is_empty());
        }
    }

    /// Bar heights add up to the non-missing row count
    #[test]
    fn prop_counts_cover_present_rows(values in prop::collection::vec(prop::option::of(0i64..6), 1..60)) {
        let present = values.iter().filter(|v| v.is_some()).count();
        let df = DataFrame::new(vec![Column::new("x".into(), values)]).unwrap();
        let grid = render_value_counts(&df, &["x"]).unwrap();
        prop_assert_eq!(grid.panels[0].total(), present);
    }

    /// Every bar's stacked proportions sum to one
    #[test]
    fn prop_bars_sum_to_one(
        pairs in prop::collection::vec((0u32..5, 0u32..4), 1..80)
    ) {
        let source: Vec<String> = pairs.iter().map(|(s, _)| format!("s{}", s)).collect();
        let target: Vec<i64> = pairs.iter().map(|(_, t)| *t as i64).collect();
        let df = DataFrame::new(vec![
            Column::new("source".into(), source),
            Column::new("target".into(), target),
        ])
        .unwrap();

        let mut recorder = ChartRecorder::new();
        let charts = render_proportions(&df, &["source"], "target", &PaletteSpec::default(), &mut recorder)
            .unwrap();
        let chart = &charts[0];
        for i in 0..chart.categories.len() {
            assert_relative_eq!(chart.bar_total(i), 1.0, epsilon = 1e-9);
        }
    }

    /// Identical inputs give identical numeric content
    #[test]
    fn prop_idempotent(k in 1usize..5, rows in 1usize..40) {
        let df = wide_frame(k, rows, 3);
        let names: Vec<String> = (0..k).map(|c| format!("c{}", c)).collect();

        prop_assert_eq!(
            render_value_counts(&df, &names).unwrap(),
            render_value_counts(&df, &names).unwrap()
        );

        let mut first = ChartRecorder::new();
        let mut second = ChartRecorder::new();
        let a = render_proportions(&df, &names, "target", &PaletteSpec::default(), &mut first).unwrap();
        let b = render_proportions(&df, &names, "target", &PaletteSpec::default(), &mut second).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(first.charts, second.charts);
    }
}
