// ABOUTME: Arena-backed pane tree rooted at a single root pane.
// ABOUTME: Supports attaching, detaching, freeing and walking panes by id.

use std::collections::HashMap;

use tsr_core::Geometry;

use crate::pane::{Extent, Orientation, Pane, PaneId, SizePolicy};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Unknown pane: {0}")]
    UnknownPane(PaneId),

    #[error("{child} is already attached to {parent}")]
    AlreadyAttached { child: PaneId, parent: PaneId },

    #[error("Attaching {child} under {parent} would create a cycle")]
    Cycle { parent: PaneId, child: PaneId },

    #[error("The root pane cannot be attached, detached or freed")]
    RootPane,
}

/// Owns every pane of one display session.
///
/// The root pane is created with the context and lives as long as it does;
/// its geometry is the whole terminal. Panes created with [`LayoutContext::create`]
/// start detached and only take part in reflow once attached below the root.
#[derive(Debug)]
pub struct LayoutContext {
    panes: HashMap<PaneId, Pane>,
    root: PaneId,
    pub(crate) dialog_container: Option<PaneId>,
    next_id: u64,
}

impl LayoutContext {
    pub fn new() -> Self {
        let root = PaneId(0);
        let mut panes = HashMap::new();
        panes.insert(
            root,
            Pane::new(
                "root",
                Orientation::Vertical,
                SizePolicy::Maximise,
                Extent::Unlimited,
                Extent::Unlimited,
            ),
        );
        Self {
            panes,
            root,
            dialog_container: None,
            next_id: 1,
        }
    }

    pub fn root(&self) -> PaneId {
        self.root
    }

    /// Store a detached pane and return its handle
    pub fn create(&mut self, mut pane: Pane) -> PaneId {
        let id = PaneId(self.next_id);
        self.next_id += 1;

        pane.parent = None;
        pane.children.clear();
        tracing::trace!(%id, name = pane.name(), "created pane");
        self.panes.insert(id, pane);
        id
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.panes.contains_key(&id)
    }

    /// Number of live panes, root included
    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.panes.get(&id)
    }

    pub fn pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        self.panes.get_mut(&id)
    }

    pub fn geometry(&self, id: PaneId) -> Option<Geometry> {
        self.panes.get(&id).map(|p| p.geometry)
    }

    /// False for unknown panes
    pub fn is_visible(&self, id: PaneId) -> bool {
        self.panes.get(&id).is_some_and(|p| p.is_visible())
    }

    pub fn set_visible(&mut self, id: PaneId, visible: bool) {
        if let Some(pane) = self.panes.get_mut(&id) {
            pane.set_visible(visible);
        }
    }

    pub fn parent(&self, id: PaneId) -> Option<PaneId> {
        self.panes.get(&id).and_then(|p| p.parent)
    }

    /// Children in stacking order; empty for unknown panes
    pub fn children(&self, id: PaneId) -> &[PaneId] {
        self.panes.get(&id).map(|p| p.children()).unwrap_or(&[])
    }

    pub fn visible_children(&self, id: PaneId) -> Vec<PaneId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_visible(c))
            .collect()
    }

    /// Whether `ancestor` is `id` itself or lies on its parent chain
    pub fn is_ancestor(&self, ancestor: PaneId, id: PaneId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Append `child` to the end of `parent`'s children
    pub fn add_child(&mut self, parent: PaneId, child: PaneId) -> Result<(), LayoutError> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child)
    }

    /// Insert `child` at `index` among `parent`'s children.
    /// An index past the end appends.
    pub fn insert_child(
        &mut self,
        parent: PaneId,
        index: usize,
        child: PaneId,
    ) -> Result<(), LayoutError> {
        self.check_attach(parent, child)?;

        if let Some(p) = self.panes.get_mut(&parent) {
            let index = index.min(p.children.len());
            p.children.insert(index, child);
        }
        if let Some(c) = self.panes.get_mut(&child) {
            c.parent = Some(parent);
        }
        Ok(())
    }

    pub(crate) fn check_attach(&self, parent: PaneId, child: PaneId) -> Result<(), LayoutError> {
        if child == self.root {
            return Err(LayoutError::RootPane);
        }
        let c = self
            .panes
            .get(&child)
            .ok_or(LayoutError::UnknownPane(child))?;
        if !self.panes.contains_key(&parent) {
            return Err(LayoutError::UnknownPane(parent));
        }
        if let Some(existing) = c.parent {
            return Err(LayoutError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        if self.is_ancestor(child, parent) {
            return Err(LayoutError::Cycle { parent, child });
        }
        Ok(())
    }

    /// Detach `child` from its parent, returning the former parent.
    /// The pane and its subtree stay alive and can be attached again.
    ///
    /// Detaching the top dialog shows the dialog beneath it.
    pub fn remove_child(&mut self, child: PaneId) -> Result<Option<PaneId>, LayoutError> {
        if child == self.root {
            return Err(LayoutError::RootPane);
        }
        let c = self
            .panes
            .get_mut(&child)
            .ok_or(LayoutError::UnknownPane(child))?;
        let Some(parent) = c.parent.take() else {
            return Ok(None);
        };
        let mut uncovered = None;
        if let Some(p) = self.panes.get_mut(&parent) {
            let was_top = p.children.last() == Some(&child);
            p.children.retain(|&id| id != child);
            if was_top && self.dialog_container == Some(parent) {
                uncovered = p.children.last().copied();
            }
        }
        if let Some(next) = uncovered {
            self.set_visible(next, true);
        }
        Ok(Some(parent))
    }

    /// Unlink `id` from its parent and release it along with every descendant.
    /// Unknown ids are ignored; the root is never freed.
    pub fn free_subtree(&mut self, id: PaneId) {
        if id == self.root {
            tracing::warn!("Refusing to free the root pane");
            return;
        }
        if !self.panes.contains_key(&id) {
            return;
        }
        let _ = self.remove_child(id);

        let doomed = self.walk(id);
        for pane in &doomed {
            self.panes.remove(pane);
        }
        if self.dialog_container.is_some_and(|c| doomed.contains(&c)) {
            self.dialog_container = None;
        }
        tracing::debug!(%id, released = doomed.len(), "freed subtree");
    }

    /// Release every pane except the root, including detached ones.
    pub fn free_all(&mut self) {
        let root = self.root;
        self.panes.retain(|&id, _| id == root);
        if let Some(r) = self.panes.get_mut(&root) {
            r.children.clear();
        }
        self.dialog_container = None;
    }

    /// Copy one pane's geometry onto another; no-op if either is unknown
    pub fn copy_geometry(&mut self, src: PaneId, dst: PaneId) {
        let Some(geometry) = self.geometry(src) else {
            return;
        };
        if let Some(pane) = self.panes.get_mut(&dst) {
            pane.geometry = geometry;
        }
    }

    /// Pre-order walk of the subtree at `id`, hidden panes included
    pub fn walk(&self, id: PaneId) -> Vec<PaneId> {
        let mut out = Vec::new();
        if self.contains(id) {
            self.collect(id, &mut out);
        }
        out
    }

    fn collect(&self, id: PaneId, out: &mut Vec<PaneId>) {
        out.push(id);
        for &child in self.children(id) {
            self.collect(child, out);
        }
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new()
    }
}
