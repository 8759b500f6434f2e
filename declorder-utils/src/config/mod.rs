//! Configuration utilities
//!
//! Configuration is layered: defaults, then an optional file (TOML, JSON or
//! YAML, picked by extension), then partial overrides such as command-line
//! flags. Layers are merged as JSON values so an override only replaces the
//! keys it actually sets.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration types that can check their own invariants after merging
pub trait ValidateConfig {
    /// Return a `UtilError::Config` describing the first violated invariant
    fn validate(&self) -> crate::Result<()>;
}

/// Merge two JSON values (second overrides first)
fn merge_json_values(base: &mut serde_json::Value, override_value: serde_json::Value) {
    match (base, override_value) {
        (serde_json::Value::Object(base_obj), serde_json::Value::Object(override_obj)) => {
            for (key, value) in override_obj {
                match base_obj.get_mut(&key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_obj.insert(key, value);
                    }
                }
            }
        }
        (base_value, override_value) => {
            *base_value = override_value;
        }
    }
}

/// Load configuration from file
pub fn load_config<T>(path: &Path) -> crate::Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let extension = path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content = std::fs::read_to_string(path)?;

    match extension.as_str() {
        "toml" => toml::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("TOML parse error in {}: {}", path.display(), e))),
        "json" => serde_json::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("JSON parse error in {}: {}", path.display(), e))),
        "yml" | "yaml" => serde_yaml::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("YAML parse error in {}: {}", path.display(), e))),
        _ => Err(crate::UtilError::Config(
            format!("Unsupported config format: {}", path.display())
        )),
    }
}

/// Merge a partial JSON document into a configuration
pub fn merge_value<T>(base: &mut T, override_value: serde_json::Value) -> crate::Result<()>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let mut base_value = serde_json::to_value(&*base)
        .map_err(|e| crate::UtilError::Serialization(format!("Base serialization error: {}", e)))?;

    merge_json_values(&mut base_value, override_value);

    *base = serde_json::from_value(base_value)
        .map_err(|e| crate::UtilError::Serialization(format!("Result deserialization error: {}", e)))?;

    Ok(())
}

/// Configuration builder for fluent API
#[derive(Debug)]
pub struct ConfigBuilder<T> {
    config: T,
}

impl<T> ConfigBuilder<T>
where
    T: Default + Serialize + for<'de> Deserialize<'de> + ValidateConfig,
{
    /// Create new config builder with defaults
    pub fn new() -> Self {
        Self {
            config: T::default(),
        }
    }

    /// Load from file and merge. Keys missing from the file keep their
    /// current value.
    pub fn load_file(mut self, path: &Path) -> crate::Result<Self> {
        let file_value: serde_json::Value = load_config(path)?;
        merge_value(&mut self.config, file_value)?;
        Ok(self)
    }

    /// Merge a partial override
    pub fn merge_value(mut self, other: serde_json::Value) -> crate::Result<Self> {
        merge_value(&mut self.config, other)?;
        Ok(self)
    }

    /// Validate and build final config
    pub fn build(self) -> crate::Result<T> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl<T> Default for ConfigBuilder<T>
where
    T: Default + Serialize + for<'de> Deserialize<'de> + ValidateConfig,
{
    fn default() -> Self {
        Self::new()
    }
}
