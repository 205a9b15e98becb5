use kiln_config::Section;

/// Parse a `PATH=VALUE` override.
///
/// The path is everything before the first `=`. It must start with a config
/// section name and may not contain empty segments. The value is kept as
/// text; it is parsed when the override is applied.
///
/// # Examples
///
/// Valid: `devServer.port=3001`, `bundler.define={"DEBUG":true}`,
/// `devServer={"port":3001}`
/// Invalid: `devServer.port`, `=3001`, `bundler..copy=x`, `type=web-app`,
/// `devServer=3001`
///
/// # Errors
///
/// Returns an error message if the assignment is malformed or doesn't
/// target a section.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let Some((path, value)) = s.split_once('=') else {
        return Err(format!("Expected PATH=VALUE, got '{}'", s));
    };

    let path = path.trim();
    if path.is_empty() {
        return Err("Override path cannot be empty".to_string());
    }
    if path.split('.').any(|segment| segment.is_empty()) {
        return Err(format!("Override path has an empty segment: '{}'", path));
    }

    let root = path.split('.').next().unwrap_or(path);
    if Section::from_key(root).is_none() {
        let sections: Vec<&str> = Section::ALL.iter().map(|s| s.key()).collect();
        return Err(format!(
            "Overrides must start with a config section ({}), got '{}'",
            sections.join(", "),
            path
        ));
    }

    if path == root && !value.trim_start().starts_with('{') {
        return Err(format!(
            "Overriding the whole {} section needs a JSON object, e.g. {}={{\"key\":1}}",
            root, root
        ));
    }

    Ok((path.to_string(), value.to_string()))
}
