//! Validation findings collected while normalizing user configuration.
//!
//! A [`ConfigReport`] never fails on its own. Validators append to it and the
//! engine decides afterwards whether the collected errors are fatal.

use std::fmt;
use std::path::PathBuf;

use crate::value::Value;

/// A fatal finding: the offending value at `path` and how to fix it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportError {
    pub path: String,
    pub value: Value,
    pub message: String,
}

/// A non-fatal finding (deprecation or hint) with one or more messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportNotice {
    pub path: String,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigReport {
    config_path: Option<PathBuf>,
    has_argument_overrides: bool,
    errors: Vec<ReportError>,
    deprecations: Vec<ReportNotice>,
    hints: Vec<ReportNotice>,
}

impl ConfigReport {
    /// Create a report for a config file at `config_path`, or for no file.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            ..Self::default()
        }
    }

    pub fn error(
        &mut self,
        path: impl Into<String>,
        value: impl Into<Value>,
        message: impl Into<String>,
    ) {
        self.errors.push(ReportError {
            path: path.into(),
            value: value.into(),
            message: message.into(),
        });
    }

    pub fn deprecated<I, S>(&mut self, path: impl Into<String>, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deprecations.push(ReportNotice {
            path: path.into(),
            messages: messages.into_iter().map(Into::into).collect(),
        });
    }

    pub fn hint<I, S>(&mut self, path: impl Into<String>, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hints.push(ReportNotice {
            path: path.into(),
            messages: messages.into_iter().map(Into::into).collect(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_something_to_report(&self) -> bool {
        !(self.errors.is_empty() && self.deprecations.is_empty() && self.hints.is_empty())
    }

    pub fn errors(&self) -> &[ReportError] {
        &self.errors
    }

    pub fn deprecations(&self) -> &[ReportNotice] {
        &self.deprecations
    }

    pub fn hints(&self) -> &[ReportNotice] {
        &self.hints
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    /// Mark that CLI argument overrides were merged into the config.
    pub fn set_argument_overrides(&mut self) {
        self.has_argument_overrides = true;
    }

    pub fn has_argument_overrides(&self) -> bool {
        self.has_argument_overrides
    }

    /// Describe where the reported config came from.
    pub fn config_source(&self) -> String {
        match (&self.config_path, self.has_argument_overrides) {
            (Some(path), false) => path.display().to_string(),
            (Some(path), true) => format!("{} (with CLI argument overrides)", path.display()),
            (None, true) => "CLI argument overrides".to_string(),
            (None, false) => "default configuration".to_string(),
        }
    }

    /// Render the report as plain text.
    ///
    /// Output is deterministic: findings appear in the order they were
    /// recorded, grouped as errors, then deprecations, then hints.
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("kiln config report for {}", self.config_source()),
            String::new(),
        ];

        if !self.has_something_to_report() {
            lines.push("✓ Nothing to report!".to_string());
            return lines.join("\n");
        }

        if !self.errors.is_empty() {
            lines.push(heading(self.errors.len(), "Error"));
            lines.push(String::new());
            for error in &self.errors {
                lines.push(format!("✗ {} = {}", error.path, error.value));
                lines.push(format!("  {}", error.message));
                lines.push(String::new());
            }
        }

        push_notices(&mut lines, &self.deprecations, "Deprecation Warning", "⚠");
        push_notices(&mut lines, &self.hints, "Hint", "ℹ");

        let mut rendered = lines.join("\n");
        rendered.truncate(rendered.trim_end().len());
        rendered
    }
}

fn heading(count: usize, noun: &str) -> String {
    if count > 1 {
        format!("{count} {noun}s")
    } else {
        noun.to_string()
    }
}

fn push_notices(lines: &mut Vec<String>, notices: &[ReportNotice], noun: &str, marker: &str) {
    if notices.is_empty() {
        return;
    }
    lines.push(heading(notices.len(), noun));
    lines.push(String::new());
    for notice in notices {
        lines.push(format!("{marker} {}", notice.path));
        for message in &notice.messages {
            lines.push(format!("  {message}"));
        }
        lines.push(String::new());
    }
}

impl fmt::Display for ConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_has_nothing_to_report() {
        let report = ConfigReport::new(None);
        assert!(!report.has_errors());
        assert!(!report.has_something_to_report());
        assert_eq!(
            report.render(),
            "kiln config report for default configuration\n\n✓ Nothing to report!"
        );
    }

    #[test]
    fn hints_alone_are_not_errors() {
        let mut report = ConfigReport::new(None);
        report.hint("transpiler.loose", ["Loose mode is enabled by default"]);
        assert!(!report.has_errors());
        assert!(report.has_something_to_report());
    }

    #[test]
    fn config_source_mentions_overrides() {
        let mut report = ConfigReport::new(Some(PathBuf::from("kiln.config.toml")));
        assert_eq!(report.config_source(), "kiln.config.toml");
        report.set_argument_overrides();
        assert_eq!(
            report.config_source(),
            "kiln.config.toml (with CLI argument overrides)"
        );

        let mut report = ConfigReport::new(None);
        report.set_argument_overrides();
        assert_eq!(report.config_source(), "CLI argument overrides");
    }

    #[test]
    fn render_groups_findings_by_category() {
        let mut report = ConfigReport::new(Some(PathBuf::from("kiln.config.json")));
        report.error("bundler.copy", Value::object(), "Must include patterns or options");
        report.error("type", "nope", "Must be one of: react-app or web-app");
        report.deprecated(
            "bundler.uglify",
            ["Deprecated - renamed to bundler.terser", "It will be removed"],
        );

        let rendered = report.render();
        assert!(rendered.starts_with("kiln config report for kiln.config.json\n\n2 Errors\n"));
        assert!(rendered.contains("✗ bundler.copy = {}\n  Must include patterns or options"));
        assert!(rendered.contains("✗ type = 'nope'"));
        assert!(rendered.contains("Deprecation Warning\n\n⚠ bundler.uglify\n"));
        assert!(rendered.ends_with("  It will be removed"));
        assert!(!rendered.contains("Hint"));
    }
}
