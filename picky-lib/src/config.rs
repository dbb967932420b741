use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::grammar::{Entry, Level, LevelKind};

/// How many matches a level keeps, in document order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cap {
    #[default]
    All,
    First(usize),
}

impl Cap {
    pub fn from_max_items(max_items: u64) -> Self {
        match max_items {
            0 => Cap::All,
            n => Cap::First(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }

    pub fn limit(&self) -> usize {
        match self {
            Cap::All => usize::MAX,
            Cap::First(n) => *n,
        }
    }

    pub fn apply<I: Iterator>(&self, iter: I) -> std::iter::Take<I> {
        iter.take(self.limit())
    }
}

/// The attribute filters and cap in effect for one level.
///
/// Entries are scanned in declared order:
/// - attribute filters and `max-items` declared after the first nested
///   level are dropped; nested levels themselves always count;
/// - at a leaf, a `max-items` declared after the first `do` is dropped;
/// - a later filter for the same attribute, or a later `max-items`,
///   replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelConfig {
    attrs: BTreeMap<String, String>,
    cap: Cap,
}

#[derive(Default)]
struct Scan {
    attrs: BTreeMap<String, String>,
    max_items: Option<u64>,
    saw_nested: bool,
    saw_do: bool,
}

impl Scan {
    fn step(mut self, entry: &Entry, kind: LevelKind) -> Self {
        match entry {
            Entry::Nested(_) => self.saw_nested = true,
            _ if self.saw_nested => debug!(?entry, "ignoring entry declared after a nested level"),
            Entry::AttributeFilter { name, value } => {
                self.attrs.insert(name.clone(), value.clone());
            }
            Entry::MaxItems(_) if kind == LevelKind::Leaf && self.saw_do => {
                debug!(?entry, "ignoring max-items declared after do");
            }
            Entry::MaxItems(n) => self.max_items = Some(*n),
            Entry::Do(_) => self.saw_do = true,
        }
        self
    }
}

impl LevelConfig {
    pub fn of(level: &Level) -> Self {
        let kind = level.kind();
        let scan = level
            .entries()
            .iter()
            .fold(Scan::default(), |scan, entry| scan.step(entry, kind));
        let config = Self {
            attrs: scan.attrs,
            cap: scan.max_items.map(Cap::from_max_items).unwrap_or_default(),
        };
        trace!(tag = level.tag_name(), ?config, "computed level config");
        config
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn cap(&self) -> Cap {
        self.cap
    }

    /// True when `matches` accepts every attribute filter.
    pub fn admits<F>(&self, mut matches: F) -> bool
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.attrs.iter().all(|(name, value)| matches(name, value))
    }
}
