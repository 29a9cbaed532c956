// ABOUTME: Stack of full-screen dialogs sharing one container pane.
// ABOUTME: Only the most recently pushed dialog is visible.

use crate::pane::PaneId;
use crate::tree::LayoutContext;

impl LayoutContext {
    /// Designate the pane that hosts dialogs; `None` disables the stack
    pub fn set_dialog_container(&mut self, container: Option<PaneId>) {
        self.dialog_container = container.filter(|&c| self.contains(c));
    }

    pub fn dialog_container(&self) -> Option<PaneId> {
        self.dialog_container
    }

    /// The dialog currently on top of the stack
    pub fn top_dialog(&self) -> Option<PaneId> {
        let container = self.dialog_container?;
        self.children(container).last().copied()
    }

    /// Number of dialogs on the stack
    pub fn dialog_depth(&self) -> usize {
        self.dialog_container
            .map(|c| self.children(c).len())
            .unwrap_or(0)
    }

    /// Hide the current top dialog and show `dialog` above it.
    ///
    /// Does not reflow; dialogs normally fill the container, so the caller
    /// reflows the container only when sizes differ.
    pub fn push_dialog(&mut self, dialog: PaneId) {
        let Some(container) = self.dialog_container else {
            return;
        };
        if let Err(e) = self.check_attach(container, dialog) {
            tracing::warn!(%dialog, "Cannot push dialog: {}", e);
            return;
        }

        if let Some(previous) = self.top_dialog() {
            self.set_visible(previous, false);
        }
        if self.add_child(container, dialog).is_ok() {
            self.set_visible(dialog, true);
            tracing::debug!(%dialog, depth = self.dialog_depth(), "pushed dialog");
        }
    }

    /// Detach the top dialog and show the one beneath it.
    ///
    /// The popped subtree is hidden but not freed; it is returned so the
    /// caller can free it or push it again later.
    pub fn pop_dialog(&mut self) -> Option<PaneId> {
        let top = self.top_dialog()?;
        self.set_visible(top, false);
        self.remove_child(top).ok()?;

        tracing::debug!(dialog = %top, depth = self.dialog_depth(), "popped dialog");
        Some(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::{Orientation, Pane};
    use tsr_core::Geometry;

    fn with_container() -> (LayoutContext, PaneId) {
        let mut ctx = LayoutContext::new();
        let root = ctx.root();
        let container = ctx.create(Pane::container("dialogs", Orientation::Vertical));
        ctx.add_child(root, container).unwrap();
        ctx.set_dialog_container(Some(container));
        (ctx, container)
    }

    fn dialog(ctx: &mut LayoutContext, name: &str) -> PaneId {
        ctx.create(Pane::container(name, Orientation::Vertical).hidden())
    }

    #[test]
    fn push_and_pop_are_lifo() {
        let (mut ctx, container) = with_container();
        let d1 = dialog(&mut ctx, "d1");
        let d2 = dialog(&mut ctx, "d2");

        ctx.push_dialog(d1);
        assert!(ctx.is_visible(d1));
        assert_eq!(ctx.top_dialog(), Some(d1));

        ctx.push_dialog(d2);
        assert!(!ctx.is_visible(d1));
        assert!(ctx.is_visible(d2));
        assert_eq!(ctx.children(container), &[d1, d2]);

        assert_eq!(ctx.pop_dialog(), Some(d2));
        assert!(!ctx.is_visible(d2));
        assert!(ctx.is_visible(d1));
        assert!(ctx.contains(d2));
        assert_eq!(ctx.parent(d2), None);

        assert_eq!(ctx.pop_dialog(), Some(d1));
        assert!(ctx.children(container).is_empty());
        assert_eq!(ctx.pop_dialog(), None);
    }

    #[test]
    fn at_most_one_dialog_visible() {
        let (mut ctx, container) = with_container();
        let dialogs: Vec<PaneId> = (0..4).map(|i| dialog(&mut ctx, &format!("d{i}"))).collect();

        for &d in &dialogs {
            ctx.push_dialog(d);
            let visible = ctx.visible_children(container);
            assert_eq!(visible, vec![d]);
        }
        while ctx.pop_dialog().is_some() {
            assert!(ctx.visible_children(container).len() <= 1);
            assert_eq!(ctx.visible_children(container).last(), ctx.top_dialog().as_ref());
        }
    }

    #[test]
    fn popped_dialog_can_be_pushed_again() {
        let (mut ctx, _) = with_container();
        let d1 = dialog(&mut ctx, "d1");
        let d2 = dialog(&mut ctx, "d2");
        ctx.push_dialog(d1);
        ctx.push_dialog(d2);

        let popped = ctx.pop_dialog().unwrap();
        ctx.push_dialog(popped);

        assert_eq!(ctx.top_dialog(), Some(d2));
        assert!(!ctx.is_visible(d1));
        assert_eq!(ctx.dialog_depth(), 2);
    }

    #[test]
    fn stack_without_container_is_inert() {
        let mut ctx = LayoutContext::new();
        let d1 = dialog(&mut ctx, "d1");

        ctx.push_dialog(d1);
        assert_eq!(ctx.parent(d1), None);
        assert_eq!(ctx.pop_dialog(), None);

        ctx.set_dialog_container(Some(PaneId(999)));
        assert_eq!(ctx.dialog_container(), None);
    }

    #[test]
    fn push_rejects_attached_or_unknown_dialog() {
        let (mut ctx, container) = with_container();
        let d1 = dialog(&mut ctx, "d1");
        ctx.push_dialog(d1);

        ctx.push_dialog(d1);
        ctx.push_dialog(PaneId(31337));

        assert_eq!(ctx.children(container), &[d1]);
        assert!(ctx.is_visible(d1));
    }

    #[test]
    fn pushed_dialog_fills_container_after_reflow() {
        let (mut ctx, container) = with_container();
        let root = ctx.root();
        let message = ctx.create(Pane::bar("message"));
        ctx.add_child(root, message).unwrap();
        let d1 = dialog(&mut ctx, "d1");
        let d2 = dialog(&mut ctx, "d2");
        ctx.resize(24, 80);

        ctx.push_dialog(d1);
        ctx.reflow(container);
        ctx.push_dialog(d2);
        ctx.reflow(container);

        assert_eq!(ctx.geometry(d2), Some(Geometry::new(23, 80, 0, 0)));
        assert_eq!(ctx.geometry(d1), ctx.geometry(d2));
    }

    #[test]
    fn freeing_top_dialog_uncovers_the_one_beneath() {
        let (mut ctx, container) = with_container();
        let d1 = dialog(&mut ctx, "d1");
        let d2 = dialog(&mut ctx, "d2");
        ctx.push_dialog(d1);
        ctx.push_dialog(d2);

        ctx.free_subtree(d2);

        assert_eq!(ctx.top_dialog(), Some(d1));
        assert!(ctx.is_visible(d1));
        assert_eq!(ctx.visible_children(container), vec![d1]);
    }

    #[test]
    fn removing_buried_dialog_keeps_top_visible() {
        let (mut ctx, container) = with_container();
        let d1 = dialog(&mut ctx, "d1");
        let d2 = dialog(&mut ctx, "d2");
        let d3 = dialog(&mut ctx, "d3");
        ctx.push_dialog(d1);
        ctx.push_dialog(d2);
        ctx.push_dialog(d3);

        assert_eq!(ctx.remove_child(d2), Ok(Some(container)));

        assert_eq!(ctx.children(container), &[d1, d3]);
        assert_eq!(ctx.visible_children(container), vec![d3]);

        ctx.remove_child(d3).unwrap();
        assert_eq!(ctx.visible_children(container), vec![d1]);
    }

    #[test]
    fn freeing_container_disables_stack() {
        let (mut ctx, container) = with_container();
        let d1 = dialog(&mut ctx, "d1");
        ctx.push_dialog(d1);

        ctx.free_subtree(container);

        assert_eq!(ctx.dialog_container(), None);
        assert!(!ctx.contains(d1));
        assert_eq!(ctx.top_dialog(), None);
    }
}
