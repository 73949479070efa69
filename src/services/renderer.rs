use std::path::{Path, PathBuf};

use chrono::Datelike;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::{FontStyle, FontTransform};

use super::excel::utils::parse_period_label;
use super::selector::WorkingTable;
use crate::error::AppError;

pub const PAGE_TITLE: &str = "Marketing Channel Performance Alongside ESP and Sage Spend";

const PAGE_WIDTH: u32 = 1400;
const PANEL_HEIGHT: u32 = 700;

fn chart_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Render(e.to_string())
}

/// Base output name for the run, keyed by the month of the first period and
/// forced to year 2025. An unparsable first period falls back to the bare
/// name; the failure is logged, not fatal.
pub fn base_filename(first_period_label: &str) -> String {
    match parse_period_label(first_period_label) {
        Some(date) => format!("adspend_vs_category_sales_{:02}-2025", date.month()),
        None => {
            tracing::warn!(
                "Date parsing error for {:?}, using fallback filename",
                first_period_label
            );
            "adspend_vs_category_sales".to_string()
        }
    }
}

/// Renders one line chart per tracked channel, overlaying the channel series
/// with both spend series, paginated into PNG files under `output_dir`.
/// Returns the paths written, in page order.
pub fn render_charts(
    table: &WorkingTable,
    output_dir: &Path,
    charts_per_page: usize,
) -> Result<Vec<PathBuf>, AppError> {
    if table.channels.is_empty() || table.periods.is_empty() {
        tracing::warn!("Nothing to plot, skipping chart rendering");
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(output_dir)?;

    let first_label = &table.periods[0].label;
    tracing::info!("Original date from working table: {}", first_label);
    let base = base_filename(first_label);

    let labels: Vec<String> = table.periods.iter().map(|p| p.label.clone()).collect();
    let esp = table.series("ESP Spend");
    let sage = table.series("Sage Spend");

    let total_pages = (table.channels.len() + charts_per_page - 1) / charts_per_page;
    let mut written = Vec::new();
    for page in 0..total_pages {
        let start = page * charts_per_page;
        let end = ((page + 1) * charts_per_page).min(table.channels.len());
        let page_channels = &table.channels[start..end];
        if page_channels.is_empty() {
            continue;
        }

        let path = output_dir.join(format!("{}_page{}.png", base, page + 1));
        draw_page(
            &path,
            table,
            page_channels,
            charts_per_page,
            esp.as_deref(),
            sage.as_deref(),
            &labels,
        )?;
        tracing::info!("Saved page {} to {}", page + 1, path.display());
        written.push(path);
    }

    Ok(written)
}

#[allow(clippy::too_many_arguments)]
fn draw_page(
    path: &Path,
    table: &WorkingTable,
    page_channels: &[String],
    charts_per_page: usize,
    esp: Option<&[f64]>,
    sage: Option<&[f64]>,
    labels: &[String],
) -> Result<(), AppError> {
    let height = PANEL_HEIGHT * charts_per_page as u32;
    let root = BitMapBackend::new(path, (PAGE_WIDTH, height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let titled = root
        .titled(
            PAGE_TITLE,
            ("sans-serif", 34).into_font().style(FontStyle::Bold),
        )
        .map_err(chart_err)?;
    let panels = titled.split_evenly((charts_per_page, 1));

    for (panel, channel) in panels.iter().zip(page_channels) {
        let Some(values) = table.series(channel) else {
            continue;
        };
        draw_channel_chart(panel, channel, &values, esp, sage, labels)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

fn draw_channel_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    channel: &str,
    values: &[f64],
    esp: Option<&[f64]>,
    sage: Option<&[f64]>,
    labels: &[String],
) -> Result<(), AppError> {
    let n = values.len();
    let mut lo = 0.0f64;
    let mut hi = f64::MIN;
    for v in values
        .iter()
        .chain(esp.into_iter().flatten())
        .chain(sage.into_iter().flatten())
    {
        lo = lo.min(*v);
        hi = hi.max(*v);
    }
    if !hi.is_finite() || hi <= lo {
        hi = lo + 1.0;
    }
    hi += (hi - lo) * 0.05;

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("{} Performance with Spend", channel),
            ("sans-serif", 26).into_font().style(FontStyle::Bold),
        )
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), lo..hi)
        .map_err(chart_err)?;

    let fmt = |x: &f64| {
        let i = x.round();
        if (x - i).abs() > 0.25 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_desc("Months")
        .y_desc("Value")
        .x_labels(n.min(24))
        .x_label_formatter(&fmt)
        .x_label_style(
            ("sans-serif", 15)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_style(("sans-serif", 15))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(index_points(values), RED.stroke_width(3)))
        .map_err(chart_err)?
        .label(channel)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(3)));
    chart
        .draw_series(
            index_points(values)
                .into_iter()
                .map(|pt| Circle::new(pt, 4, RED.filled())),
        )
        .map_err(chart_err)?;

    for (series, name, color) in [(esp, "ESP Spend", BLUE), (sage, "Sage Spend", GREEN)] {
        let Some(series) = series else { continue };
        chart
            .draw_series(DashedLineSeries::new(
                index_points(series),
                8,
                6,
                color.stroke_width(3),
            ))
            .map_err(chart_err)?
            .label(name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });
        chart
            .draw_series(
                index_points(series)
                    .into_iter()
                    .map(move |pt| Circle::new(pt, 4, color.filled())),
            )
            .map_err(chart_err)?;
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(chart_err)?;

    Ok(())
}

fn index_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::excel::cleaner::clean_sheet;
    use crate::services::selector::build_working_table;
    use calamine::Data;

    #[test]
    fn filename_uses_month_of_first_period_forced_to_2025() {
        assert_eq!(base_filename("Jan-25"), "adspend_vs_category_sales_01-2025");
        assert_eq!(base_filename("2025-07-01"), "adspend_vs_category_sales_07-2025");
        // Year is forced even when the label carries a different one.
        assert_eq!(base_filename("Mar-24"), "adspend_vs_category_sales_03-2025");
    }

    #[test]
    fn unparsable_first_period_falls_back_to_bare_name() {
        assert_eq!(base_filename("not a date"), "adspend_vs_category_sales");
    }

    #[test]
    fn end_to_end_renders_one_page_for_one_channel() {
        let s = |v: &str| Data::String(v.to_string());
        let rows = vec![
            vec![s("Channel"), s("Jan-25"), s("Feb-25"), s("Mar-25")],
            vec![s("SP"), Data::Float(5.0), Data::Float(15.0), Data::Float(25.0)],
            vec![s("ESP Spend"), Data::Float(1.0), Data::Float(2.0), Data::Float(3.0)],
        ];
        let table = build_working_table(&clean_sheet(rows).unwrap()).unwrap();
        assert_eq!(table.series("SP").unwrap(), vec![5.0, 15.0, 25.0]);
        assert_eq!(table.series("ESP Spend").unwrap(), vec![1.0, 2.0, 3.0]);

        let dir = tempfile::tempdir().unwrap();
        let written = render_charts(&table, dir.path(), 2).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(
            written[0].file_name().unwrap().to_str().unwrap(),
            "adspend_vs_category_sales_01-2025_page1.png"
        );
        assert!(written[0].metadata().unwrap().len() > 0);
    }

    #[test]
    fn empty_working_table_renders_nothing() {
        let s = |v: &str| Data::String(v.to_string());
        let rows = vec![
            vec![s("Channel"), s("Jan-25")],
            vec![s("ESP Spend"), Data::Float(1.0)],
        ];
        let table = build_working_table(&clean_sheet(rows).unwrap()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let written = render_charts(&table, dir.path(), 2).unwrap();
        assert!(written.is_empty());
    }
}
