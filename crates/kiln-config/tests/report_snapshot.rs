//! Rendered report output.

use kiln_config::{Args, ConfigEngine, LoadOptions, MemorySource};
use serde_json::json;

#[test]
fn renders_errors_deprecations_and_hints() {
    let source = MemorySource::new().with(
        "/project/kiln.config.json",
        json!({
            "type": "web-app",
            "bundler": {"copy": {}, "uglify": false},
            "devServer": {"hot": true, "port": "3000", "proxyy": {}}
        }),
    );
    let engine = ConfigEngine::with_source("/project", source);
    let args = Args::with_command("serve").with_path("devServer.host", "0.0.0.0");
    let report = engine.check(&args, &LoadOptions::new()).unwrap();

    insta::assert_snapshot!(report.render(), @r"
    kiln config report for /project/kiln.config.json (with CLI argument overrides)

    3 Errors

    ✗ bundler.copy = {}
      Must include patterns or options when given as an Object

    ✗ devServer = 'proxyy'
      Unexpected prop in devServer config: proxyy

    ✗ devServer.port = '3000'
      Must be a Number between 1 and 65535

    Deprecation Warning

    ⚠ bundler.uglify
      Deprecated - renamed to bundler.terser.

    Hint

    ℹ devServer.hot
      Hot reloading is enabled by default, so you can remove this config.
    ");
}

#[test]
fn renders_nothing_to_report() {
    let source = MemorySource::new().with("/project/kiln.config.json", json!({"type": "web-app"}));
    let engine = ConfigEngine::with_source("/project", source);
    let report = engine.check(&Args::new(), &LoadOptions::new()).unwrap();

    insta::assert_snapshot!(report.render(), @r"
    kiln config report for /project/kiln.config.json

    ✓ Nothing to report!
    ");
}
