// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

/// Field keys whose values are shown by default: the identifying metadata
/// of a bulk statement.
pub const DEFAULT_SHOW_KEYS: [&str; 3] = ["_index", "_type", "_id"];

/// Allow-list policy for mapping keys.
///
/// `All` disables quantization entirely; `Keys` preserves the values of the
/// listed keys verbatim wherever they occur, at any nesting depth. Modeled
/// as a sum type so "show everything" cannot be confused with a key named
/// `all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Show {
    All,
    Keys(HashSet<String>),
}

impl Show {
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Show::Keys(keys.into_iter().map(Into::into).collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Show::All)
    }

    pub fn contains(&self, key: &str) -> bool {
        match self {
            Show::All => true,
            Show::Keys(keys) => keys.contains(key),
        }
    }
}

impl Default for Show {
    fn default() -> Self {
        Show::Keys(HashSet::new())
    }
}

// Accepts the wire shape used by instrumentation config: the string "all"
// or a list of field keys.
impl<'de> Deserialize<'de> for Show {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) if s == "all" => Ok(Show::All),
            serde_json::Value::Array(keys) => keys
                .into_iter()
                .map(|key| match key {
                    serde_json::Value::String(key) => Ok(key),
                    other => Err(serde::de::Error::custom(format!(
                        "show keys must be strings, got: {other}"
                    ))),
                })
                .collect::<Result<HashSet<String>, D::Error>>()
                .map(Show::Keys),
            other => Err(serde::de::Error::custom(format!(
                "show must be \"all\" or a list of field keys, got: {other}"
            ))),
        }
    }
}

/// Per-call quantization policy.
///
/// `Default` is the empty caller record; it merges cleanly over
/// [`QuantizeOptions::defaults`], the engine defaults applied by
/// [`format_body`](crate::format_body).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct QuantizeOptions {
    /// Keys whose values are preserved verbatim.
    pub show: Show,
    /// Keys whose key/value pair is dropped entirely. Ignored when `show`
    /// is [`Show::All`]; `show` membership wins over `exclude`.
    pub exclude: HashSet<String>,
}

impl QuantizeOptions {
    /// The engine defaults: show `_index`/`_type`/`_id`, exclude nothing.
    pub fn defaults() -> Self {
        Self {
            show: Show::keys(DEFAULT_SHOW_KEYS),
            exclude: HashSet::new(),
        }
    }

    /// Merges `additional` over `self`.
    ///
    /// `show` becomes `All` if either side is `All`, otherwise the union of
    /// both key sets; `exclude` is always the union. There is no way to
    /// remove a key contributed by the other side.
    #[must_use]
    pub fn merge(&self, additional: &QuantizeOptions) -> QuantizeOptions {
        let show = match (&self.show, &additional.show) {
            (Show::All, _) | (_, Show::All) => Show::All,
            (Show::Keys(original), Show::Keys(added)) => {
                Show::Keys(original.union(added).cloned().collect())
            }
        };

        QuantizeOptions {
            show,
            exclude: self.exclude.union(&additional.exclude).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_unions_exclude() {
        let original = QuantizeOptions {
            exclude: ["password".to_string()].into(),
            ..Default::default()
        };
        let additional = QuantizeOptions {
            exclude: ["password".to_string(), "token".to_string()].into(),
            ..Default::default()
        };

        let merged = original.merge(&additional);
        assert_eq!(
            merged.exclude,
            HashSet::from(["password".to_string(), "token".to_string()])
        );
    }

    #[test]
    fn test_merge_unions_show_keys() {
        let original = QuantizeOptions {
            show: Show::keys(["_index", "title"]),
            ..Default::default()
        };
        let additional = QuantizeOptions {
            show: Show::keys(["title", "name"]),
            ..Default::default()
        };

        let merged = original.merge(&additional);
        assert_eq!(merged.show, Show::keys(["_index", "title", "name"]));
    }

    #[test]
    fn test_merge_all_absorbs() {
        let all = QuantizeOptions {
            show: Show::All,
            ..Default::default()
        };
        let keys = QuantizeOptions {
            show: Show::keys(["_id"]),
            ..Default::default()
        };

        assert_eq!(all.merge(&keys).show, Show::All);
        assert_eq!(keys.merge(&all).show, Show::All);
        assert_eq!(all.merge(&all).show, Show::All);
    }

    #[test]
    fn test_engine_defaults() {
        let defaults = QuantizeOptions::defaults();
        assert_eq!(defaults.show, Show::keys(DEFAULT_SHOW_KEYS));
        assert!(defaults.exclude.is_empty());

        // the caller-side default is the neutral element of merge
        let merged = defaults.merge(&QuantizeOptions::default());
        assert_eq!(merged, QuantizeOptions::defaults());
    }

    #[test]
    fn test_show_contains() {
        assert!(Show::All.contains("anything"));
        assert!(Show::keys(["_id"]).contains("_id"));
        assert!(!Show::keys(["_id"]).contains("_ID"));
    }

    #[test]
    fn test_deserialize_all_marker() {
        let options: QuantizeOptions = serde_json::from_str(r#"{"show":"all"}"#).unwrap();
        assert_eq!(options.show, Show::All);
        assert!(options.exclude.is_empty());
    }

    #[test]
    fn test_deserialize_key_lists() {
        let options: QuantizeOptions =
            serde_json::from_str(r#"{"show":["_index"],"exclude":["password"]}"#).unwrap();
        assert_eq!(options.show, Show::keys(["_index"]));
        assert_eq!(options.exclude, HashSet::from(["password".to_string()]));
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let options: QuantizeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, QuantizeOptions::default());
    }

    #[test]
    fn test_deserialize_rejects_unknown_marker() {
        assert!(serde_json::from_str::<QuantizeOptions>(r#"{"show":"everything"}"#).is_err());
        assert!(serde_json::from_str::<QuantizeOptions>(r#"{"show":[1]}"#).is_err());
    }
}
