use serde::Serialize;

use crate::grammar::{Level, TagPath};

/// The elements harvested for one leaf path, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult<N> {
    path: TagPath,
    elements: Vec<N>,
}

impl<N> ExtractionResult<N> {
    pub fn path(&self) -> &TagPath {
        &self.path
    }

    pub fn elements(&self) -> &[N] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_elements(self) -> Vec<N> {
        self.elements
    }
}

/// Every leaf path of one instruction with what was harvested for it.
///
/// Leaf paths are listed in instruction order and are present even when
/// nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet<N> {
    results: Vec<ExtractionResult<N>>,
}

impl<N> ResultSet<N> {
    pub fn for_instruction(root: &Level) -> Self {
        Self {
            results: root
                .leaf_paths()
                .into_iter()
                .map(|path| ExtractionResult {
                    path,
                    elements: vec![],
                })
                .collect(),
        }
    }

    /// Appends `elements` to the result for `path`, skipping any element
    /// `same` reports as already recorded there.
    pub(crate) fn extend<I, F>(&mut self, path: &TagPath, elements: I, same: F)
    where
        I: IntoIterator<Item = N>,
        F: Fn(&N, &N) -> bool,
    {
        let index = match self.results.iter().position(|r| &r.path == path) {
            Some(index) => index,
            None => {
                self.results.push(ExtractionResult {
                    path: path.clone(),
                    elements: vec![],
                });
                self.results.len() - 1
            }
        };
        let recorded = &mut self.results[index].elements;
        for element in elements {
            if !recorded.iter().any(|r| same(r, &element)) {
                recorded.push(element);
            }
        }
    }

    pub fn get<S: AsRef<str>>(&self, tags: &[S]) -> Option<&ExtractionResult<N>> {
        self.results.iter().find(|r| r.path.matches(tags))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractionResult<N>> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Total number of harvested elements over all paths.
    pub fn harvested(&self) -> usize {
        self.results.iter().map(ExtractionResult::len).sum()
    }

    pub fn map<M, F>(&self, mut f: F) -> ResultSet<M>
    where
        F: FnMut(&N) -> M,
    {
        ResultSet {
            results: self
                .results
                .iter()
                .map(|r| ExtractionResult {
                    path: r.path.clone(),
                    elements: r.elements.iter().map(&mut f).collect(),
                })
                .collect(),
        }
    }
}

impl<N> IntoIterator for ResultSet<N> {
    type Item = ExtractionResult<N>;
    type IntoIter = std::vec::IntoIter<ExtractionResult<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
