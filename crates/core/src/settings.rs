//! Filter settings.
//!
//! Every category flag defaults to `false`, so a fresh install only shuffles
//! plain building blocks. Settings are persisted as camelCase JSON with the
//! pattern lists stored as comma-separated strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::pattern::PatternList;

/// Errors raised when applying a single setting change.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The key does not name a known setting.
    #[error("unknown setting '{0}'")]
    UnknownKey(String),
    /// The value has the wrong JSON type for the setting.
    #[error("setting '{key}' expects a {expected} value, got {found}")]
    InvalidValue {
        /// Setting key.
        key: String,
        /// Expected JSON type.
        expected: &'static str,
        /// The rejected value.
        found: Value,
    },
}

/// Configuration snapshot consulted by the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSettings {
    /// Allow food blocks (meals, cheese, anything with nutrition).
    pub allow_food: bool,
    /// Allow plant-material blocks.
    pub allow_plants: bool,
    /// Allow block entities (chests, vessels, signs, ...).
    pub allow_block_entities: bool,
    /// Allow liquid-material blocks.
    pub allow_liquids: bool,
    /// Allow clay and pottery.
    pub allow_clay: bool,
    /// Trace every filter decision.
    pub debug_mode: bool,
    /// Patterns admitted ahead of the category checks.
    pub whitelist: PatternList,
    /// When set, a non-empty whitelist is the only admission criterion.
    pub whitelist_only: bool,
    /// Patterns that are always rejected.
    pub blacklist: PatternList,
}

impl FilterSettings {
    /// Persisted keys accepted by [`FilterSettings::apply`].
    pub const KEYS: &'static [&'static str] = &[
        "allowFood",
        "allowPlants",
        "allowBlockEntities",
        "allowLiquids",
        "allowClay",
        "debugMode",
        "whitelist",
        "whitelistOnly",
        "blacklist",
    ];

    /// Replace the whitelist from a comma-separated string.
    pub fn set_whitelist(&mut self, list: &str) {
        self.whitelist = PatternList::parse(list);
    }

    /// Replace the blacklist from a comma-separated string.
    pub fn set_blacklist(&mut self, list: &str) {
        self.blacklist = PatternList::parse(list);
    }

    /// Apply one setting change notification by its persisted key.
    pub fn apply(&mut self, key: &str, value: &Value) -> Result<(), SettingsError> {
        match key {
            "whitelist" => self.set_whitelist(expect_str(key, value)?),
            "blacklist" => self.set_blacklist(expect_str(key, value)?),
            _ => {
                let flag = self
                    .flag_mut(key)
                    .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
                *flag = expect_bool(key, value)?;
            }
        }
        Ok(())
    }

    fn flag_mut(&mut self, key: &str) -> Option<&mut bool> {
        let flag = match key {
            "allowFood" => &mut self.allow_food,
            "allowPlants" => &mut self.allow_plants,
            "allowBlockEntities" => &mut self.allow_block_entities,
            "allowLiquids" => &mut self.allow_liquids,
            "allowClay" => &mut self.allow_clay,
            "debugMode" => &mut self.debug_mode,
            "whitelistOnly" => &mut self.whitelist_only,
            _ => return None,
        };
        Some(flag)
    }
}

fn expect_bool(key: &str, value: &Value) -> Result<bool, SettingsError> {
    value.as_bool().ok_or_else(|| SettingsError::InvalidValue {
        key: key.to_string(),
        expected: "boolean",
        found: value.clone(),
    })
}

fn expect_str<'v>(key: &str, value: &'v Value) -> Result<&'v str, SettingsError> {
    value.as_str().ok_or_else(|| SettingsError::InvalidValue {
        key: key.to_string(),
        expected: "string",
        found: value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_restrictive() {
        let settings = FilterSettings::default();
        assert!(!settings.allow_food);
        assert!(!settings.allow_plants);
        assert!(!settings.allow_block_entities);
        assert!(!settings.allow_liquids);
        assert!(!settings.allow_clay);
        assert!(!settings.whitelist_only);
        assert!(!settings.debug_mode);
        assert!(settings.whitelist.is_empty());
        assert!(settings.blacklist.is_empty());
    }

    #[test]
    fn loads_camel_case_json() {
        let json = r#"{
            "allowClay": true,
            "whitelist": "game:log-*, game:planks-oak",
            "blacklist": ""
        }"#;
        let settings: FilterSettings = serde_json::from_str(json).unwrap();
        assert!(settings.allow_clay);
        assert!(!settings.allow_food);
        assert_eq!(settings.whitelist.sources(), vec!["game:log-*", "game:planks-oak"]);
        assert!(settings.blacklist.is_empty());
    }

    #[test]
    fn apply_updates_flags_and_lists() {
        let mut settings = FilterSettings::default();
        settings.apply("allowFood", &json!(true)).unwrap();
        settings.apply("whitelistOnly", &json!(true)).unwrap();
        settings.apply("blacklist", &json!("a, b ,, c")).unwrap();

        assert!(settings.allow_food);
        assert!(settings.whitelist_only);
        assert_eq!(settings.blacklist.sources(), vec!["a", "b", "c"]);
    }

    #[test]
    fn apply_rejects_unknown_keys_and_wrong_types() {
        let mut settings = FilterSettings::default();
        assert!(matches!(
            settings.apply("allowEverything", &json!(true)),
            Err(SettingsError::UnknownKey(_))
        ));
        assert!(matches!(
            settings.apply("allowClay", &json!("yes")),
            Err(SettingsError::InvalidValue { expected: "boolean", .. })
        ));
        assert!(matches!(
            settings.apply("whitelist", &json!(3)),
            Err(SettingsError::InvalidValue { expected: "string", .. })
        ));
        assert_eq!(settings, FilterSettings::default());
    }

    #[test]
    fn every_listed_key_is_accepted() {
        let mut settings = FilterSettings::default();
        for key in FilterSettings::KEYS {
            let value = if matches!(*key, "whitelist" | "blacklist") {
                json!("game:stone")
            } else {
                json!(true)
            };
            settings.apply(key, &value).unwrap();
        }
    }
}
