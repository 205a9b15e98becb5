//! Parsed command-line arguments as seen by the configuration engine.
//!
//! The engine only needs the command name plus a flat mapping of flag names
//! to values. Dotted flags such as
//! `bundler.copy.patterns` build nested objects, which is how configuration
//! overrides reach the engine.

use crate::value::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    command: Option<String>,
    flags: Map,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments for `command` with no flags.
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            flags: Map::new(),
        }
    }

    /// Builder form of [`Args::set_flag`].
    pub fn with_flag(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_flag(name, value);
        self
    }

    /// Builder form of [`Args::set_path`].
    pub fn with_path(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.set_path(path, value);
        self
    }

    /// The command name, if one was given.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn flags(&self) -> &Map {
        &self.flags
    }

    pub fn flag(&self, name: &str) -> Option<&Value> {
        self.flags.get(name)
    }

    /// A flag's value when it is a string.
    pub fn flag_str(&self, name: &str) -> Option<&str> {
        self.flag(name).and_then(Value::as_str)
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.flags.insert(name.into(), value.into());
    }

    /// Set a dotted flag path, creating intermediate objects.
    ///
    /// A non-object found on the way is replaced by an object, so the last
    /// assignment to a path wins.
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) {
        let mut keys = path.split('.').peekable();
        let mut current = &mut self.flags;
        while let Some(key) = keys.next() {
            if keys.peek().is_none() {
                current.insert(key.to_string(), value.into());
                return;
            }
            let slot = current.entry(key.to_string()).or_insert_with(Value::object);
            if !slot.is_object() {
                *slot = Value::object();
            }
            current = match slot {
                Value::Object(map) => map,
                _ => unreachable!("slot was just made an object"),
            };
        }
    }
}

/// Interpret a raw command-line value.
///
/// `true`/`false` become booleans, numeric text becomes a number, text that
/// parses as a JSON array or object becomes that structure, and anything else
/// stays a string.
pub fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = raw.parse::<f64>() {
        if n.is_finite() {
            return Value::Number(n);
        }
    }
    if raw.starts_with('[') || raw.starts_with('{') {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(raw) {
            return Value::from(json);
        }
    }
    Value::String(raw.to_string())
}
