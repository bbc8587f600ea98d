//! Parameter state snapshots.
//!
//! A [`PluginState`] maps stable parameter identifiers to normalized values.
//! It is what a host stores in a session and what `crunch state` writes to
//! disk. Identifiers, not indices, key the map, so a state survives
//! parameters being reordered or added.
//!
//! # TOML Format
//!
//! ```toml
//! version = 1
//!
//! [params]
//! drive = 0.5
//! mix = 1.0
//! mode = 0.25
//! threshold = 1.0
//! ```
//!
//! JSON carries the same shape: `{"version":1,"params":{"drive":0.5}}`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crunch_core::ParamRegistry;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// Highest state format version this build reads and the one it writes.
pub const STATE_VERSION: u32 = 1;

fn default_version() -> u32 {
    STATE_VERSION
}

/// JSON has no NaN or infinity; `serde_json` writes them as `null`. Read
/// `null` back as NaN so [`PluginState::restore`] rejects it per parameter
/// instead of the whole file failing to parse.
fn lenient_params<'de, D>(deserializer: D) -> Result<BTreeMap<String, f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<f32>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(id, value)| (id, value.unwrap_or(f32::NAN)))
        .collect())
}

/// Serialization format for a state file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFormat {
    /// Compact JSON, the host-session blob format.
    Json,
    /// Pretty TOML, the human-editable format.
    #[default]
    Toml,
}

impl StateFormat {
    /// Picks the format from a file extension: `.json` is JSON, anything
    /// else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => StateFormat::Json,
            _ => StateFormat::Toml,
        }
    }
}

impl FromStr for StateFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(StateFormat::Json),
            "toml" => Ok(StateFormat::Toml),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for StateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateFormat::Json => f.write_str("json"),
            StateFormat::Toml => f.write_str("toml"),
        }
    }
}

/// Snapshot of a processor's normalized parameter values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginState {
    /// Format version the state was written with.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Normalized value per parameter identifier. A JSON `null` reads as NaN.
    #[serde(default, deserialize_with = "lenient_params")]
    pub params: BTreeMap<String, f32>,
}

impl PluginState {
    /// Create an empty state at the current version.
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION,
            params: BTreeMap::new(),
        }
    }

    /// Records the current value of every parameter in `registry`.
    ///
    /// Non-finite values are recorded as they are, with a warning; restoring
    /// the state later reports them as rejected in either format.
    pub fn capture(registry: &ParamRegistry) -> Self {
        let params = registry
            .iter()
            .map(|param| {
                let value = param.value();
                if !value.is_finite() {
                    tracing::warn!(id = %param.id(), value, "capturing a non-finite value");
                }
                (param.id().as_str().to_string(), value)
            })
            .collect();
        Self {
            version: STATE_VERSION,
            params,
        }
    }

    /// Set one normalized value.
    pub fn with_param(mut self, id: impl Into<String>, normalized: f32) -> Self {
        self.params.insert(id.into(), normalized);
        self
    }

    /// Normalized value stored for `id`.
    pub fn get(&self, id: &str) -> Option<f32> {
        self.params.get(id).copied()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the state stores no values.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Applies the stored values to `registry` through `set_value`, so every
    /// parameter's bridge fires.
    ///
    /// Finite values are clamped into \[0, 1\] first. Non-finite values,
    /// identifiers the registry does not know, and registry parameters the
    /// state does not mention are reported, never treated as errors; the
    /// parameters involved keep their current values.
    pub fn restore(&self, registry: &ParamRegistry) -> Result<RestoreReport, ConfigError> {
        self.check_version()?;

        let mut report = RestoreReport::default();
        for (id, &normalized) in &self.params {
            let Some(param) = registry.by_id(id) else {
                tracing::warn!(id = %id, "state names an unknown parameter, skipping");
                report.unknown.push(id.clone());
                continue;
            };
            if !normalized.is_finite() {
                tracing::warn!(id = %id, normalized, "state value is not finite, skipping");
                report.rejected.push(id.clone());
                continue;
            }
            param.set_value(normalized.clamp(0.0, 1.0));
            report.applied.push(id.clone());
        }

        for param in registry {
            if !self.params.contains_key(param.id().as_str()) {
                report.missing.push(param.id().as_str().to_string());
            }
        }

        tracing::debug!(
            applied = report.applied.len(),
            unknown = report.unknown.len(),
            missing = report.missing.len(),
            rejected = report.rejected.len(),
            "state restored"
        );
        Ok(report)
    }

    fn check_version(&self) -> Result<(), ConfigError> {
        if self.version > STATE_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: STATE_VERSION,
            });
        }
        Ok(())
    }

    /// Parse a state from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let state: PluginState = serde_json::from_str(json)?;
        state.check_version()?;
        Ok(state)
    }

    /// Convert the state to compact JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a state from TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let state: PluginState = toml::from_str(toml_str)?;
        state.check_version()?;
        Ok(state)
    }

    /// Convert the state to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parse a state in the given format.
    pub fn parse(text: &str, format: StateFormat) -> Result<Self, ConfigError> {
        match format {
            StateFormat::Json => Self::from_json(text),
            StateFormat::Toml => Self::from_toml(text),
        }
    }

    /// Render the state in the given format.
    pub fn render(&self, format: StateFormat) -> Result<String, ConfigError> {
        match format {
            StateFormat::Json => self.to_json(),
            StateFormat::Toml => self.to_toml(),
        }
    }

    /// Load a state file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let state = Self::parse(&content, StateFormat::from_path(path))?;
        tracing::debug!(path = %path.display(), params = state.len(), "loaded state");
        Ok(state)
    }

    /// Save the state, choosing the format from the file extension and
    /// creating missing parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        self.save_as(path, StateFormat::from_path(path))
    }

    /// Save the state in an explicit format, creating missing parent
    /// directories.
    pub fn save_as(&self, path: impl AsRef<Path>, format: StateFormat) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.render(format)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), %format, params = self.len(), "saved state");
        Ok(())
    }
}

impl Default for PluginState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of [`PluginState::restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Identifiers whose values were applied.
    pub applied: Vec<String>,
    /// Identifiers in the state that the registry does not contain.
    pub unknown: Vec<String>,
    /// Registry parameters the state does not mention, left untouched.
    pub missing: Vec<String>,
    /// Identifiers whose stored value was not finite.
    pub rejected: Vec<String>,
}

impl RestoreReport {
    /// True when every stored value was applied and every parameter covered.
    pub fn is_complete(&self) -> bool {
        self.unknown.is_empty() && self.missing.is_empty() && self.rejected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crunch_core::ParamDescriptor;

    fn registry() -> ParamRegistry {
        let mut registry = ParamRegistry::new();
        registry
            .add(
                ParamDescriptor::ranged("drive", 1.0, 1.0, 25.0, "Drive")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        registry
            .add(ParamDescriptor::normalized("mix", 1.0, "Mix").build().unwrap())
            .unwrap();
        registry
    }

    #[test]
    fn capture_records_every_parameter() {
        let registry = registry();
        registry.by_id("drive").unwrap().set_value(0.25);
        let state = PluginState::capture(&registry);
        assert_eq!(state.version, STATE_VERSION);
        assert_eq!(state.len(), 2);
        assert_eq!(state.get("drive"), Some(0.25));
        assert_eq!(state.get("mix"), Some(1.0));
    }

    #[test]
    fn restore_reports_unknown_and_missing() {
        let registry = registry();
        let state = PluginState::new()
            .with_param("drive", 0.5)
            .with_param("tone", 0.3);

        let report = state.restore(&registry).unwrap();
        assert_eq!(report.applied, ["drive"]);
        assert_eq!(report.unknown, ["tone"]);
        assert_eq!(report.missing, ["mix"]);
        assert!(!report.is_complete());

        assert_eq!(registry.by_id("drive").unwrap().actual_value(), 13.0);
        assert_eq!(registry.by_id("mix").unwrap().value(), 1.0);
    }

    #[test]
    fn restore_clamps_and_rejects() {
        let registry = registry();
        let state = PluginState::new()
            .with_param("drive", 1.5)
            .with_param("mix", f32::NAN);

        let report = state.restore(&registry).unwrap();
        assert_eq!(registry.by_id("drive").unwrap().value(), 1.0);
        assert_eq!(report.rejected, ["mix"]);
        assert_eq!(registry.by_id("mix").unwrap().value(), 1.0);
    }

    #[test]
    fn non_finite_value_survives_json_as_rejected() {
        let registry = registry();
        registry.by_id("drive").unwrap().set_value(0.5);
        registry.by_id("mix").unwrap().set_value(f32::NAN);
        let state = PluginState::capture(&registry);

        let json = state.to_json().unwrap();
        assert!(json.contains(r#""mix":null"#), "got: {json}");
        let loaded = PluginState::from_json(&json).unwrap();
        assert!(loaded.get("mix").unwrap().is_nan());

        let fresh = self::registry();
        let report = loaded.restore(&fresh).unwrap();
        assert_eq!(report.applied, ["drive"]);
        assert_eq!(report.rejected, ["mix"]);
        assert_eq!(fresh.by_id("drive").unwrap().value(), 0.5);
        assert_eq!(fresh.by_id("mix").unwrap().value(), 1.0);
    }

    #[test]
    fn non_finite_value_survives_toml_as_rejected() {
        let state = PluginState::new()
            .with_param("drive", f32::INFINITY)
            .with_param("mix", f32::NAN);
        let loaded = PluginState::from_toml(&state.to_toml().unwrap()).unwrap();

        let registry = registry();
        let report = loaded.restore(&registry).unwrap();
        assert_eq!(report.rejected, ["drive", "mix"]);
        assert!(report.applied.is_empty());
    }

    #[test]
    fn newer_version_is_refused() {
        let err = PluginState::from_json(r#"{"version":2,"params":{}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedVersion {
                found: 2,
                supported: 1
            }
        ));

        let mut state = PluginState::new();
        state.version = 9;
        assert!(state.restore(&registry()).is_err());
    }

    #[test]
    fn missing_version_defaults_to_current() {
        let state = PluginState::from_toml("[params]\ndrive = 0.5\n").unwrap();
        assert_eq!(state.version, STATE_VERSION);
        assert_eq!(state.get("drive"), Some(0.5));
    }

    #[test]
    fn json_and_toml_agree() {
        let state = PluginState::new()
            .with_param("drive", 0.5)
            .with_param("mode", 0.125);

        let json = state.to_json().unwrap();
        assert_eq!(json, r#"{"version":1,"params":{"drive":0.5,"mode":0.125}}"#);
        assert_eq!(PluginState::from_json(&json).unwrap(), state);

        let toml_str = state.to_toml().unwrap();
        assert!(toml_str.contains("[params]"), "got: {toml_str}");
        assert_eq!(PluginState::from_toml(&toml_str).unwrap(), state);
    }

    #[test]
    fn format_selection() {
        assert_eq!(
            StateFormat::from_path(Path::new("a/b.JSON")),
            StateFormat::Json
        );
        assert_eq!(
            StateFormat::from_path(Path::new("a/b.toml")),
            StateFormat::Toml
        );
        assert_eq!(StateFormat::from_path(Path::new("noext")), StateFormat::Toml);
        assert_eq!("Json".parse::<StateFormat>().unwrap(), StateFormat::Json);
        assert!("yaml".parse::<StateFormat>().is_err());
        assert_eq!(StateFormat::Toml.to_string(), "toml");
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(matches!(
            PluginState::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            PluginState::from_toml("params = ["),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
