#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_assignment;
    use crate::cli::{Cli, Command, Target};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_assignment_valid() {
        assert_eq!(
            parse_assignment("devServer.port=3001"),
            Ok(("devServer.port".to_string(), "3001".to_string()))
        );
        // Only the first '=' splits
        assert_eq!(
            parse_assignment("bundler.define={\"A\":\"x=y\"}"),
            Ok(("bundler.define".to_string(), "{\"A\":\"x=y\"}".to_string()))
        );
        // Empty values are allowed
        assert_eq!(
            parse_assignment("bundler.publicPath="),
            Ok(("bundler.publicPath".to_string(), String::new()))
        );
    }

    #[test]
    fn test_parse_assignment_invalid() {
        assert!(parse_assignment("devServer.port").is_err());
        assert!(parse_assignment("=3001").is_err());
        assert!(parse_assignment("bundler..copy=x").is_err());
        assert!(parse_assignment(".port=1").is_err());
    }

    #[test]
    fn test_parse_assignment_requires_a_section() {
        for assignment in ["type=web-app", "config.x=1", "plugins=sass", "webpack.debug=true"] {
            let err = parse_assignment(assignment).unwrap_err();
            assert!(err.contains("must start with a config section"), "{assignment}: {err}");
        }
        assert!(parse_assignment("devServer=3000").is_err());
        assert!(parse_assignment("devServer={\"port\":3000}").is_ok());
    }

    #[test]
    fn test_check_config_command() {
        let cli = Cli::try_parse_from(["kiln", "check-config", "serve", "--config", "app.json"])
            .unwrap();
        match cli.command {
            Command::CheckConfig(args) => {
                assert_eq!(args.command.as_deref(), Some("serve"));
                assert_eq!(args.config.config, Some(PathBuf::from("app.json")));
            }
            _ => panic!("Expected CheckConfig command"),
        }
    }

    #[test]
    fn test_inspect_defaults_to_build() {
        let cli = Cli::try_parse_from(["kiln", "inspect"]).unwrap();
        match cli.command {
            Command::Inspect(args) => {
                assert_eq!(args.target, Target::Build);
                assert!(args.section.is_none());
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_repeated_overrides() {
        let cli = Cli::try_parse_from([
            "kiln",
            "inspect",
            "serve",
            "--set",
            "devServer.port=3001",
            "--set",
            "devServer.hot=false",
            "--plugins",
            "sass",
        ])
        .unwrap();
        match cli.command {
            Command::Inspect(args) => {
                assert_eq!(args.target, Target::Serve);
                assert_eq!(args.config.overrides.len(), 2);
                assert_eq!(args.config.overrides[1].0, "devServer.hot");
                assert_eq!(args.config.plugins.as_deref(), Some("sass"));
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_malformed_override_is_rejected() {
        assert!(Cli::try_parse_from(["kiln", "inspect", "--set", "devServer.port"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["kiln", "-v", "-q", "clean"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["kiln", "clean", "--dry-run", "--no-color", "-q"]).unwrap();
        assert!(cli.no_color);
        assert!(cli.quiet);
        match cli.command {
            Command::Clean(args) => assert!(args.dry_run),
            _ => panic!("Expected Clean command"),
        }
    }
}
