//! Coloured rendering of config reports.

use super::colors_enabled;
use kiln_config::ConfigReport;
use owo_colors::OwoColorize;

/// Print a config report to stderr.
pub fn print_report(report: &ConfigReport) {
    let rendered = report.render();
    if colors_enabled() {
        eprintln!("{}", style_report(&rendered));
    } else {
        eprintln!("{}", rendered);
    }
}

/// Colour a rendered report line by line.
///
/// Finding lines are coloured by their marker, headings are bolded and the
/// indented message lines are left alone.
pub fn style_report(rendered: &str) -> String {
    rendered
        .lines()
        .enumerate()
        .map(|(index, line)| style_line(index, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn style_line(index: usize, line: &str) -> String {
    if index == 0 {
        return line.bold().to_string();
    }
    if let Some(rest) = line.strip_prefix("✗ ") {
        return format!("{} {}", "✗".red().bold(), rest.red());
    }
    if let Some(rest) = line.strip_prefix("⚠ ") {
        return format!("{} {}", "⚠".yellow().bold(), rest.yellow());
    }
    if let Some(rest) = line.strip_prefix("ℹ ") {
        return format!("{} {}", "ℹ".blue().bold(), rest.blue());
    }
    if let Some(rest) = line.strip_prefix("✓ ") {
        return format!("{} {}", "✓".green().bold(), rest.green());
    }
    if line.is_empty() || line.starts_with(' ') {
        return line.to_string();
    }
    line.bold().underline().to_string()
}
