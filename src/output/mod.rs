//! Output module for crawl reports
//!
//! This module handles:
//! - Building a serializable report from a finished crawl
//! - Rendering the report as a human-readable summary
//! - Rendering the report as JSON

mod report;
mod text;

pub use report::{CrawlReport, EdgeRecord};
pub use text::render_text;

use crate::OutputError;

/// Prints a crawl report to stdout
///
/// # Arguments
///
/// * `report` - The report to display
/// * `json` - Print JSON instead of the text summary
pub fn print_report(report: &CrawlReport, json: bool) -> Result<(), OutputError> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", render_text(report)?);
    }
    Ok(())
}
