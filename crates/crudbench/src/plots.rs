//! SVG chart generation for benchmark results.
//!
//! One line chart per operation, stacked vertically in a single document.
//! X-axis: record count. Y-axis: duration in seconds. One line per backend.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::suite::{Operation, ResultTable};

/// Full document size; each chart gets a third of the height.
pub const CHART_SIZE: (u32, u32) = (1000, 1500);

const PALETTE: [RGBColor; 4] = [
    RGBColor(52, 152, 219), // blue
    RGBColor(230, 126, 34), // orange
    RGBColor(46, 204, 113), // emerald
    RGBColor(231, 76, 60),  // red
];

fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Chart title for an operation.
pub fn chart_title(operation: Operation) -> String {
    format!("{operation} Operation Duration (lower is better)")
}

/// Render the charts to an SVG file at `path`.
pub fn render_to_file(results: &ResultTable, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    draw_charts(&root, results).map_err(chart_error)?;
    tracing::info!(path = %path.display(), "chart written");
    Ok(())
}

/// Render the charts to an SVG document in memory.
pub fn render_to_string(results: &ResultTable) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        draw_charts(&root, results).map_err(chart_error)?;
    }
    Ok(svg)
}

fn chart_error(err: Box<dyn std::error::Error>) -> Error {
    Error::Chart(err.to_string())
}

fn draw_charts<DB>(
    root: &DrawingArea<DB, Shift>,
    results: &ResultTable,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    // databases() keeps colors stable across the three charts
    let databases = results.databases();
    let areas = root.split_evenly((Operation::ALL.len(), 1));

    for (operation, area) in Operation::ALL.into_iter().zip(areas.iter()) {
        draw_operation(area, results, operation, &databases)?;
    }

    root.present()?;
    Ok(())
}

fn draw_operation<DB>(
    area: &DrawingArea<DB, Shift>,
    results: &ResultTable,
    operation: Operation,
    databases: &[&str],
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let series = results.series(operation);

    let (mut x_min, mut x_max) = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(x, _)| x as f64))
        .fold((f64::MAX, f64::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
    if x_min > x_max {
        (x_min, x_max) = (0.0, 1.0);
    } else if x_min == x_max {
        x_min -= 1.0;
        x_max += 1.0;
    }

    let y_max = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(_, y)| y))
        .fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(chart_title(operation), ("sans-serif", 20))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Records")
        .y_desc("Time (s)")
        // plain notation, no scientific suffixes
        .x_label_formatter(&|x| format!("{}", x.round() as u64))
        .y_label_formatter(&|y| format!("{y:.3}"))
        .draw()?;

    for (name, points) in &series {
        let index = databases.iter().position(|d| d == name).unwrap_or(0);
        let color = series_color(index);
        let xy: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x as f64, y)).collect();

        chart
            .draw_series(LineSeries::new(xy.clone(), color.stroke_width(2)))?
            .label(*name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart.draw_series(
            xy.iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
        )?;
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .margin(12)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK.mix(0.3))
            .label_font(("sans-serif", 14))
            .draw()?;
    }

    Ok(())
}
