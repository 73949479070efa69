use std::fmt::Write;

use polars::prelude::*;

use super::selector::{WorkingTable, SPEND_ROWS};
use super::stats;
use crate::error::AppError;

/// Summary statistics for one channel series, in describe() order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

pub fn describe(values: &[f64]) -> SummaryStats {
    SummaryStats {
        count: values.len(),
        mean: stats::mean(values),
        std: stats::std_dev(values),
        min: stats::quantile(values, 0.0),
        q1: stats::quantile(values, 0.25),
        median: stats::quantile(values, 0.5),
        q3: stats::quantile(values, 0.75),
        max: stats::quantile(values, 1.0),
    }
}

fn format_describe(s: &SummaryStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {}", "count", s.count);
    for (name, value) in [
        ("mean", s.mean),
        ("std", s.std),
        ("min", s.min),
        ("25%", s.q1),
        ("50%", s.median),
        ("75%", s.q3),
        ("max", s.max),
    ] {
        let _ = writeln!(out, "{:<8} {:.6}", name, value);
    }
    out
}

/// One row per channel, with the Pearson correlation of that channel against
/// each spend series. A missing spend row or a constant series yields NaN.
pub fn correlation_frame(table: &WorkingTable) -> Result<DataFrame, AppError> {
    let mut columns = vec![Series::new("Channel", table.channels.clone())];
    for spend in SPEND_ROWS {
        let spend_values = table.series(spend);
        let corrs: Vec<f64> = table
            .channels
            .iter()
            .map(|channel| {
                let channel_values = table.series(channel).unwrap_or_default();
                match &spend_values {
                    Some(sv) => stats::pearson(&channel_values, sv),
                    None => f64::NAN,
                }
            })
            .collect();
        columns.push(Series::new(&format!("{} Correlation", spend), corrs));
    }
    Ok(DataFrame::new(columns)?)
}

/// Prints the per-channel summary blocks and the correlation table to stdout.
pub fn print_report(table: &WorkingTable) -> Result<(), AppError> {
    println!("\nPerformance Summary by Channel:");
    for channel in &table.channels {
        let Some(values) = table.series(channel) else {
            continue;
        };
        println!("\n{} Channel:", channel);
        print!("{}", format_describe(&describe(&values)));
    }

    println!("\nCorrelation between Channels and Spend:");
    println!("{}", correlation_frame(table)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::excel::types::{CategoryRow, CleanSheet, Period};
    use crate::services::selector::build_working_table;
    use chrono::NaiveDate;

    const EPS: f64 = 1e-9;

    fn table_with(rows: Vec<(&str, Vec<f64>)>) -> WorkingTable {
        let n = rows.first().map_or(0, |(_, v)| v.len());
        let sheet = CleanSheet {
            periods: (1..=n as u32)
                .map(|m| {
                    let date = NaiveDate::from_ymd_opt(2025, m, 1).unwrap();
                    Period {
                        label: date.format("%b-%y").to_string(),
                        date,
                    }
                })
                .collect(),
            rows: rows
                .into_iter()
                .map(|(label, values)| CategoryRow {
                    label: label.to_string(),
                    values: values.into_iter().map(Some).collect(),
                })
                .collect(),
        };
        build_working_table(&sheet).unwrap()
    }

    #[test]
    fn describe_matches_standard_definitions() {
        let s = describe(&[10.0, 20.0, 30.0]);
        assert_eq!(s.count, 3);
        assert!((s.mean - 20.0).abs() < EPS);
        assert!((s.min - 10.0).abs() < EPS);
        assert!((s.max - 30.0).abs() < EPS);
        assert!((s.median - 20.0).abs() < EPS);
    }

    #[test]
    fn sp_summary_mean_is_fifteen() {
        let table = table_with(vec![
            ("SP", vec![5.0, 15.0, 25.0]),
            ("ESP Spend", vec![1.0, 2.0, 3.0]),
        ]);
        let s = describe(&table.series("SP").unwrap());
        assert!((s.mean - 15.0).abs() < EPS);
    }

    #[test]
    fn correlation_with_scaled_spend_is_one() {
        let table = table_with(vec![
            ("SP", vec![5.0, 15.0, 25.0]),
            ("ESP Spend", vec![1.0, 3.0, 5.0]),
            ("Sage Spend", vec![7.0, 7.0, 7.0]),
        ]);
        let frame = correlation_frame(&table).unwrap();
        assert_eq!(frame.height(), 1);

        let esp = frame
            .column("ESP Spend Correlation")
            .unwrap()
            .f64()
            .unwrap()
            .get(0)
            .unwrap();
        assert!((esp - 1.0).abs() < EPS);

        // Constant spend series: correlation is undefined, reported as NaN.
        let sage = frame
            .column("Sage Spend Correlation")
            .unwrap()
            .f64()
            .unwrap()
            .get(0)
            .unwrap();
        assert!(sage.is_nan());
    }

    #[test]
    fn missing_spend_row_reports_nan_without_error() {
        let table = table_with(vec![
            ("SP", vec![5.0, 15.0, 25.0]),
            ("ESP Spend", vec![1.0, 2.0, 3.0]),
        ]);
        let frame = correlation_frame(&table).unwrap();
        let sage = frame
            .column("Sage Spend Correlation")
            .unwrap()
            .f64()
            .unwrap()
            .get(0)
            .unwrap();
        assert!(sage.is_nan());
    }

    #[test]
    fn print_report_handles_a_full_table() {
        let table = table_with(vec![
            ("SP", vec![5.0, 15.0, 25.0]),
            ("MG", vec![2.0, 4.0, 6.0]),
            ("ESP Spend", vec![1.0, 2.0, 3.0]),
            ("Sage Spend", vec![3.0, 2.0, 1.0]),
        ]);
        print_report(&table).unwrap();
    }
}
