//! Walks a validated instruction over a parsed document.
//!
//! The root level is located with a single find-first lookup. Every other
//! level is located with a find-all lookup below each surviving element of
//! its parent, so caps apply per parent element. At each level the
//! elements that fail the level's attribute filters are dropped and the
//! rest are truncated to the level's cap; interior levels then descend,
//! leaf levels harvest. A lookup that finds nothing ends its branch with
//! no output.

use tracing::{debug, debug_span};

use crate::config::LevelConfig;
use crate::document::Document;
use crate::grammar::{Level, LevelKind, TagPath};
use crate::result::ResultSet;

pub fn evaluate<D: Document>(root: &Level, document: &D) -> ResultSet<D::Node> {
    let _span = debug_span!("evaluate", root = root.tag_name()).entered();
    let mut results = ResultSet::for_instruction(root);
    let path = TagPath::root(root.tag_name());

    match document.find_first(root.tag_name()) {
        Some(first) => Walker {
            document,
            results: &mut results,
        }
        .visit(root, vec![first], &path),
        None => debug!(path = %path, "root element not found"),
    }
    results
}

struct Walker<'a, D: Document> {
    document: &'a D,
    results: &'a mut ResultSet<D::Node>,
}

impl<'a, D: Document> Walker<'a, D> {
    fn visit(&mut self, level: &Level, located: Vec<D::Node>, path: &TagPath) {
        let config = LevelConfig::of(level);
        let document = self.document;
        let selected: Vec<D::Node> = config
            .cap()
            .apply(located.into_iter().filter(|node| {
                config.admits(|name, value| document.matches(node, name, value))
            }))
            .collect();

        if selected.is_empty() {
            debug!(path = %path, "no matching elements");
            return;
        }

        match level.kind() {
            LevelKind::Leaf => {
                debug!(path = %path, count = selected.len(), "harvested");
                self.results
                    .extend(path, selected, |a, b| document.same(a, b));
            }
            LevelKind::Interior => {
                for nested in level.nested() {
                    let nested_path = path.child(nested.tag_name());
                    for element in &selected {
                        let found = document.find_all(element, nested.tag_name());
                        self.visit(nested, found, &nested_path);
                    }
                }
            }
        }
    }
}
