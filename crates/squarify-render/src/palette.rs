use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered color key → CSS color lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTable(IndexMap<String, String>);

impl ColorTable {
    /// Scan-report severity classes.
    pub fn severity() -> Self {
        [
            ("high", "#d4003e"),
            ("medium", "#fcb900"),
            ("low", "#7db4d0"),
            ("log", "#bbbbbb"),
            ("false_positive", "#565656"),
            ("debug", "#dddddd"),
            ("error", "#800000"),
            ("none", "#eeeeee"),
        ]
        .into_iter()
        .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the previous color for `key`, if any.
    pub fn insert(&mut self, key: impl Into<String>, color: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), color.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColorTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_palette_covers_report_classes() {
        let table = ColorTable::severity();
        for key in ["high", "medium", "low", "log", "false_positive"] {
            assert!(table.get(key).is_some(), "missing {key}");
        }
        assert_eq!(table.get("critical"), None);
        assert_eq!(table.iter().next(), Some(("high", "#d4003e")));
    }

    #[test]
    fn insert_overrides_in_place() {
        let mut table = ColorTable::severity();
        let before: Vec<_> = table.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(table.insert("medium", "orange"), Some("#fcb900".to_string()));
        let after: Vec<_> = table.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(before, after);
        assert_eq!(table.get("medium"), Some("orange"));
    }

    #[test]
    fn deserializes_from_json_object_in_order() {
        let table: ColorTable =
            serde_json::from_str(r#"{"b": "blue", "a": "red"}"#).expect("color table");
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
