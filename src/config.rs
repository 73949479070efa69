use std::env;
use std::path::PathBuf;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

const DEFAULT_INPUT_PATH: &str = "data/2025 Marketing Digital Marketing Tracker.xlsx";
const DEFAULT_SHEET_NAME: &str = "Performance vs Spend";
const DEFAULT_OUTPUT_DIR: &str = "report_outputs";
const DEFAULT_CHARTS_PER_PAGE: usize = 2;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub input_path: PathBuf,
    pub sheet_name: String,
    pub output_dir: PathBuf,
    pub charts_per_page: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file first, if one exists
        dotenv().ok();

        let input_path = env::var("SPEND_REPORT_INPUT")
            .unwrap_or_else(|_| DEFAULT_INPUT_PATH.to_string())
            .into();
        let sheet_name = env::var("SPEND_REPORT_SHEET")
            .unwrap_or_else(|_| DEFAULT_SHEET_NAME.to_string());
        let output_dir = env::var("SPEND_REPORT_OUTPUT_DIR")
            .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
            .into();
        let charts_per_page = env::var("SPEND_REPORT_CHARTS_PER_PAGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_CHARTS_PER_PAGE);

        Ok(Config {
            input_path,
            sheet_name,
            output_dir,
            charts_per_page,
        })
    }
}
