//! Terminal rendering of a health report

use std::fmt::Write as _;

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::runner::HealthCheckReport;

/// Result table followed by a summary block
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Check", "Status", "Time", "Message"]);

    for (name, result) in &report.results {
        builder.push_record([
            name.clone(),
            result.status.label(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{table}\n{}", format_summary(report))
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "Summary".bold().underline());
    let _ = writeln!(out, "  {} of {} checks passed", report.passed(), report.total());
    if report.has_warnings() {
        let _ = writeln!(out, "  {} {} warned", "⚠".yellow(), report.warned());
    }
    if !report.is_healthy() {
        let _ = writeln!(out, "  {} {} failed", "✗".red(), report.failed());
    }

    let overall = match (report.is_healthy(), report.has_warnings()) {
        (false, _) => "Overall: UNHEALTHY".red().bold(),
        (true, true) => "Overall: HEALTHY (with warnings)".yellow().bold(),
        (true, false) => "Overall: HEALTHY".green().bold(),
    };
    let _ = writeln!(out, "\n  {overall}");
    out
}

/// Prints the table, then the notes of every check that has some
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    for (name, result) in report.results.iter().filter(|(_, r)| !r.notes.is_empty()) {
        println!("\n{}:", name.bold());
        for note in &result.notes {
            println!("{note}");
        }
    }
}
