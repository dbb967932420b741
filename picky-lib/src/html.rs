use std::collections::BTreeMap;
use std::rc::Rc;

use html5ever::rcdom::Node;
use serde::Serialize;
use soup::prelude::Soup;
use soup::{NodeExt, QueryBuilderExt};

use crate::document::Document;
use crate::result::ResultSet;

impl Document for Soup {
    type Node = Rc<Node>;

    fn find_first(&self, tag: &str) -> Option<Rc<Node>> {
        self.tag(tag.to_string()).find()
    }

    fn find_all(&self, scope: &Rc<Node>, tag: &str) -> Vec<Rc<Node>> {
        scope
            .tag(tag.to_string())
            .find_all()
            .filter(|node| !Rc::ptr_eq(node, scope))
            .collect()
    }

    fn matches(&self, node: &Rc<Node>, name: &str, value: &str) -> bool {
        match node.get(name) {
            Some(actual) if actual == value => true,
            Some(actual) if name == "class" => actual.split_whitespace().any(|c| c == value),
            _ => false,
        }
    }

    fn same(&self, a: &Rc<Node>, b: &Rc<Node>) -> bool {
        Rc::ptr_eq(a, b)
    }
}

/// An owned copy of one harvested element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarvestedElement {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub html: String,
}

impl HarvestedElement {
    pub fn of(node: &Rc<Node>) -> Self {
        Self {
            tag: node.name().to_string(),
            attrs: node.attrs(),
            text: node.text(),
            html: node.display(),
        }
    }
}

/// Results detached from the parsed tree, safe to send across threads and
/// to serialize.
pub type Snapshot = ResultSet<HarvestedElement>;

impl ResultSet<Rc<Node>> {
    pub fn snapshot(&self) -> Snapshot {
        self.map(HarvestedElement::of)
    }
}
