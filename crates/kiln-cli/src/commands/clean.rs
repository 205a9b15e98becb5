//! Clean command implementation.

use crate::cli::CleanArgs;
use crate::commands::utils::Session;
use crate::error::{Result, ResultExt};
use crate::ui;
use kiln_config::ProjectType;
use std::fs;

/// Output layout for a family of project types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Apps build into `dist`
    App,
    /// Modules publish `lib`, `es` and `umd` builds plus a demo app
    Module,
}

impl Handler {
    pub fn for_type(project_type: ProjectType) -> Self {
        if project_type.is_module() {
            Handler::Module
        } else {
            Handler::App
        }
    }

    /// Directories removed by `kiln clean`, relative to the project.
    pub fn output_dirs(self) -> &'static [&'static str] {
        match self {
            Handler::App => &["coverage", "dist"],
            Handler::Module => &["coverage", "demo/dist", "es", "lib", "umd"],
        }
    }
}

/// Execute the clean command.
///
/// Only the project type is read from the config, so the rest of the config
/// doesn't have to be valid and plugins don't have to be installed.
///
/// # Errors
///
/// Returns errors when there is no config file, the `type` is missing or
/// unknown, or a directory can't be removed.
pub fn execute(args: CleanArgs) -> Result<()> {
    let session = Session::new(Some("clean"), &args.config)?;
    let project_type = session.engine.project_type(&session.args)?;
    let handler = Handler::for_type(project_type);
    let cwd = session.engine.cwd();
    tracing::debug!("Cleaning {} project ({:?} layout)", project_type, handler);

    let mut removed = 0;
    for dir in handler.output_dirs() {
        let path = cwd.join(dir);
        if !path.is_dir() {
            continue;
        }
        if args.dry_run {
            ui::info(&format!("Would remove {}", dir));
        } else {
            fs::remove_dir_all(&path)
                .with_path(&path)
                .with_hint(format!("Check that nothing is using {} and that it is writable", dir))?;
            ui::success(&format!("Removed {}", dir));
        }
        removed += 1;
    }

    if removed == 0 {
        ui::info("Nothing to clean");
    }
    Ok(())
}
