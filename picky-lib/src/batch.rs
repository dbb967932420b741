use rayon::prelude::*;
use soup::prelude::Soup;
use tracing::debug;

use crate::evaluator::evaluate;
use crate::grammar::Level;
use crate::html::Snapshot;

/// Runs one instruction over many HTML pages on the rayon pool.
///
/// Each page is parsed and walked on its own worker; only the instruction is
/// shared. Snapshots come back in the order of `pages`.
pub fn extract_pages<S>(instruction: &Level, pages: &[S]) -> Vec<Snapshot>
where
    S: AsRef<str> + Sync,
{
    debug!(pages = pages.len(), root = instruction.tag_name(), "batch extraction");
    pages
        .par_iter()
        .map(|page| extract_page(instruction, page.as_ref()))
        .collect()
}

pub fn extract_page(instruction: &Level, page: &str) -> Snapshot {
    let soup = Soup::new(page);
    evaluate(instruction, &soup).snapshot()
}
