//! Supported project archetypes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The project type declared by the `type` field of a user config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Single-page React application
    ReactApp,
    /// Reusable React component published to npm
    ReactComponent,
    /// Single-page Preact application
    PreactApp,
    /// Single-page Inferno application
    InfernoApp,
    /// Plain JavaScript web application
    WebApp,
    /// Plain JavaScript module published to npm
    WebModule,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::ReactApp,
        ProjectType::ReactComponent,
        ProjectType::PreactApp,
        ProjectType::InfernoApp,
        ProjectType::WebApp,
        ProjectType::WebModule,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::ReactApp => "react-app",
            ProjectType::ReactComponent => "react-component",
            ProjectType::PreactApp => "preact-app",
            ProjectType::InfernoApp => "inferno-app",
            ProjectType::WebApp => "web-app",
            ProjectType::WebModule => "web-module",
        }
    }

    /// Apps build a deployable bundle into `dist/`.
    pub fn is_app(self) -> bool {
        !self.is_module()
    }

    /// Modules build publishable `lib/`, `es/` and `umd/` outputs.
    pub fn is_module(self) -> bool {
        matches!(self, ProjectType::ReactComponent | ProjectType::WebModule)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProjectType(pub String);

impl fmt::Display for UnknownProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown project type '{}'", self.0)
    }
}

impl std::error::Error for UnknownProjectType {}

impl FromStr for ProjectType {
    type Err = UnknownProjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnknownProjectType(s.to_string()))
    }
}
