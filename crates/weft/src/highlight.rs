//! Selection-driven link muting.

use std::collections::HashSet;

use weft_core::identifier::Id;

use crate::network::Link;

/// The set of currently selected node ids, externally owned.
pub type Selection = HashSet<Id>;

/// Derives the set of muted link ids from the current selection.
///
/// A link stays active when either endpoint is selected, or when nothing is
/// selected at all (nothing selected means nothing muted). This is cheap
/// enough to recompute unconditionally on every selection change and every
/// simulation tick rather than maintain incrementally.
///
/// # Examples
///
/// ```
/// # use std::collections::HashSet;
/// # use weft::highlight::muted_links;
/// # use weft::network::Link;
/// # use weft_core::identifier::Id;
/// let links = vec![
///     Link::new(Id::new("a-b"), Id::new("a"), Id::new("b")),
///     Link::new(Id::new("b-c"), Id::new("b"), Id::new("c")),
/// ];
/// let selection = HashSet::from([Id::new("a")]);
///
/// let muted = muted_links(&links, &selection);
/// assert!(!muted.contains(&Id::new("a-b")));
/// assert!(muted.contains(&Id::new("b-c")));
/// ```
pub fn muted_links(links: &[Link], selection: &Selection) -> HashSet<Id> {
    if selection.is_empty() {
        return HashSet::new();
    }

    links
        .iter()
        .filter(|link| {
            !selection.contains(&link.source()) && !selection.contains(&link.target())
        })
        .map(|link| link.id())
        .collect()
}
