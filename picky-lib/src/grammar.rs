use std::fmt;

use serde::Serialize;
use serde_yaml::{Mapping, Number, Value};

pub(crate) const MAX_ITEMS: &str = "max-items";
pub(crate) const DO: &str = "do";
pub(crate) const CATCH: &str = "catch";

/// Tag names from the instruction root down to one level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TagPath(Vec<String>);

impl TagPath {
    pub fn root(tag: &str) -> Self {
        Self(vec![tag.to_string()])
    }

    pub fn child(&self, tag: &str) -> Self {
        let mut tags = self.0.clone();
        tags.push(tag.to_string());
        Self(tags)
    }

    pub fn tags(&self) -> &[String] {
        &self.0
    }

    pub fn matches<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        self.0.len() == tags.len() && self.0.iter().zip(tags).all(|(a, b)| a == b.as_ref())
    }
}

impl<S: Into<String>> FromIterator<S> for TagPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.0.join(" > "))
    }
}

/// The only operation a `do` directive may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Catch,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Catch => CATCH,
        }
    }
}

/// One item of a level's entry list. Order matters, see `LevelConfig`.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    AttributeFilter { name: String, value: String },
    /// `0` means every match.
    MaxItems(u64),
    Do(Operation),
    Nested(Level),
}

impl Entry {
    pub fn is_nested(&self) -> bool {
        matches!(self, Entry::Nested(_))
    }

    fn to_value(&self) -> Value {
        let mut mapping = Mapping::new();
        match self {
            Entry::AttributeFilter { name, value } => {
                mapping.insert(Value::String(name.clone()), Value::String(value.clone()));
            }
            Entry::MaxItems(n) => {
                mapping.insert(
                    Value::String(MAX_ITEMS.to_string()),
                    Value::Number(Number::from(*n)),
                );
            }
            Entry::Do(operation) => {
                mapping.insert(
                    Value::String(DO.to_string()),
                    Value::String(operation.as_str().to_string()),
                );
            }
            Entry::Nested(level) => return level.to_value(),
        }
        Value::Mapping(mapping)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Interior,
    Leaf,
}

/// One validated node of the instruction tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub(crate) tag_name: String,
    pub(crate) entries: Vec<Entry>,
}

impl Level {
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn nested(&self) -> impl Iterator<Item = &Level> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Nested(level) => Some(level),
            _ => None,
        })
    }

    pub fn kind(&self) -> LevelKind {
        if self.entries.iter().any(Entry::is_nested) {
            LevelKind::Interior
        } else {
            LevelKind::Leaf
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind() == LevelKind::Leaf
    }

    /// Every leaf path below this level, in instruction order, without
    /// duplicates.
    pub fn leaf_paths(&self) -> Vec<TagPath> {
        let mut paths = vec![];
        self.collect_leaf_paths(&TagPath::root(&self.tag_name), &mut paths);
        paths
    }

    fn collect_leaf_paths(&self, path: &TagPath, paths: &mut Vec<TagPath>) {
        match self.kind() {
            LevelKind::Leaf => {
                if !paths.contains(path) {
                    paths.push(path.clone());
                }
            }
            LevelKind::Interior => {
                for nested in self.nested() {
                    nested.collect_leaf_paths(&path.child(&nested.tag_name), paths);
                }
            }
        }
    }

    /// Renders the level back into the raw rule tree it was validated from.
    pub fn to_value(&self) -> Value {
        let mut mapping = Mapping::new();
        mapping.insert(
            Value::String(self.tag_name.clone()),
            Value::Sequence(self.entries.iter().map(Entry::to_value).collect()),
        );
        Value::Mapping(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str) -> Level {
        Level {
            tag_name: tag.to_string(),
            entries: vec![Entry::Do(Operation::Catch)],
        }
    }

    #[test]
    fn kind_follows_nested_entries() {
        let span = leaf("span");
        assert_eq!(span.kind(), LevelKind::Leaf);

        let div = Level {
            tag_name: "div".to_string(),
            entries: vec![Entry::MaxItems(2), Entry::Nested(span)],
        };
        assert_eq!(div.kind(), LevelKind::Interior);
        assert_eq!(div.nested().count(), 1);
    }

    #[test]
    fn leaf_paths_are_deduplicated_in_order() {
        let body = Level {
            tag_name: "body".to_string(),
            entries: vec![
                Entry::Nested(leaf("p")),
                Entry::Nested(leaf("a")),
                Entry::Nested(leaf("p")),
            ],
        };
        let paths = body.leaf_paths();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].matches(&["body", "p"]));
        assert!(paths[1].matches(&["body", "a"]));
    }

    #[test]
    fn tag_path_display() {
        let path = TagPath::root("body").child("div").child("span");
        assert_eq!(path.to_string(), "body > div > span");
        assert_eq!(TagPath::default().to_string(), "<root>");
    }
}
