/// The read-only view of a parsed HTML tree the evaluator walks.
///
/// Implementations must return nodes in document order (depth first,
/// siblings left to right).
pub trait Document {
    type Node: Clone;

    /// First element named `tag` anywhere in the document.
    fn find_first(&self, tag: &str) -> Option<Self::Node>;

    /// Every element named `tag` below `scope`, excluding `scope` itself.
    fn find_all(&self, scope: &Self::Node, tag: &str) -> Vec<Self::Node>;

    /// Whether `node` carries attribute `name` with `value`.
    fn matches(&self, node: &Self::Node, name: &str, value: &str) -> bool;

    /// Whether `a` and `b` are the same element of this document.
    fn same(&self, a: &Self::Node, b: &Self::Node) -> bool;
}
