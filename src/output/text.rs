use crate::output::CrawlReport;
use std::fmt::{self, Write};

const NO_NODES_WARNING: &str = "No nodes found - check the URL or increase max pages/depth.";

/// Renders a report as the plain-text crawl summary
///
/// Classification and metrics are always printed; a zero-node graph
/// additionally gets a warning line.
pub fn render_text(report: &CrawlReport) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "=== Website Graph ===\n")?;
    writeln!(out, "Seed: {}", report.seed)?;
    writeln!(
        out,
        "Stopped: {} after {:.1}s",
        report.stop_reason, report.elapsed_seconds
    )?;
    writeln!(out)?;

    writeln!(out, "Classification: {}", report.classification_name)?;
    writeln!(out, "Undirected view: {}", report.undirected_classification)?;
    if !report.shape_tags.is_empty() {
        let tags: Vec<String> = report.shape_tags.iter().map(|t| t.to_string()).collect();
        writeln!(out, "Shape: {}", tags.join(", "))?;
    }
    writeln!(out)?;

    writeln!(out, "Metrics:")?;
    writeln!(out, "  {:<16} {}", "Nodes", report.node_count)?;
    writeln!(out, "  {:<16} {}", "Edges", report.edge_count)?;
    writeln!(out, "  {:<16} {:.2}", "Average degree", report.average_degree)?;
    writeln!(out, "  {:<16} {}", "Pages crawled", report.pages_crawled)?;

    if report.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", NO_NODES_WARNING)?;
    }

    Ok(out)
}
