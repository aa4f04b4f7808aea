//! Renderer protocol: the visitor-style call sequence a back end consumes.
//!
//! The engine drives a [`Renderer`] over the pre-sorted type stream with a
//! two-state namespace machine: on a namespace change, the previous section
//! closes before the new one opens; at stream end the final section closes
//! and `complete` fires exactly once.
//!
//! The stream must already be sorted by `(namespace, name)`; trees built by
//! this crate always are. Driving a hand-assembled, unsorted stream produces
//! duplicate section headers; that is a documented limitation, not something
//! the driver corrects.

use crate::tree::{DiffTree, TypeDiff};

/// A rendering back end for one diff tree.
///
/// A tree is handed to exactly one renderer per run. Implementations write
/// HTML, Markdown, diagrams, or anything else; the engine only promises the
/// call sequence documented on [`render`].
pub trait Renderer {
    /// A namespace section opens.
    fn namespace_enter(&mut self, name: &str);

    /// One type entry, with member diffs grouped by category and pre-sorted.
    fn type_entry(&mut self, entry: &TypeDiff<'_>);

    /// The current namespace section closes.
    fn namespace_exit(&mut self);

    /// The run is complete; called exactly once, last.
    fn on_complete(&mut self);
}

/// Drive a renderer over a diff tree.
///
/// Call sequence: for each namespace group in order, `namespace_enter`,
/// then `type_entry` per type, then `namespace_exit`; finally `on_complete`.
/// An empty tree produces only `on_complete`.
pub fn render<R: Renderer>(tree: &DiffTree<'_>, renderer: &mut R) {
    let mut current: Option<&str> = None;
    for entry in &tree.entries {
        let namespace = entry.type_def().namespace.as_str();
        if current != Some(namespace) {
            if current.is_some() {
                renderer.namespace_exit();
            }
            renderer.namespace_enter(namespace);
            current = Some(namespace);
        }
        renderer.type_entry(entry);
    }
    if current.is_some() {
        renderer.namespace_exit();
    }
    renderer.on_complete();
}

// ============================================================================
// Tests
// ============================================================================
