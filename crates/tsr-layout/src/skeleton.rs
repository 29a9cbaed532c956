// ABOUTME: The application's standard screen layout built from panes.
// ABOUTME: Help bar, sidebar, index/pager panels, status bars and message line.

use tsr_core::LayoutSettings;

use crate::pane::{Extent, Orientation, Pane, PaneId, SizePolicy};
use crate::reflow::ReflowReport;
use crate::tree::{LayoutContext, LayoutError};

/// Handles to the panes of the standard layout:
///
/// ```text
/// root (V)
/// ├── dialogs (V, container)
/// │   └── index dialog (V)
/// │       ├── help (1 row)
/// │       └── body (H)
/// │           ├── sidebar (fixed cols)
/// │           └── panels (V)
/// │               ├── index panel (V): index + status
/// │               └── pager panel (V, hidden): pager + pager bar
/// └── message (1 row)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skeleton {
    pub root: PaneId,
    pub dialogs: PaneId,
    pub message: PaneId,
    pub index_dialog: PaneId,
    pub help: PaneId,
    pub body: PaneId,
    pub sidebar: PaneId,
    pub panels: PaneId,
    pub index_panel: PaneId,
    pub index: PaneId,
    pub status: PaneId,
    pub pager_panel: PaneId,
    pub pager: PaneId,
    pub pager_bar: PaneId,
}

impl Skeleton {
    /// Create the standard panes below the context's root and make the dialog
    /// container the context's dialog stack. The index dialog is pushed as the
    /// first dialog. Call [`LayoutContext::resize`] or `reflow` afterwards.
    pub fn build(
        ctx: &mut LayoutContext,
        settings: &LayoutSettings,
    ) -> Result<Self, LayoutError> {
        let root = ctx.root();
        let dialogs = ctx.create(Pane::container("dialogs", Orientation::Vertical));
        let message = ctx.create(Pane::bar("message"));
        ctx.add_child(root, dialogs)?;
        ctx.add_child(root, message)?;

        let index_dialog = ctx.create(Pane::container("index-dialog", Orientation::Vertical));
        let help = ctx.create(Pane::bar("help"));
        let body = ctx.create(Pane::container("body", Orientation::Horizontal));
        ctx.add_child(index_dialog, help)?;
        ctx.add_child(index_dialog, body)?;

        let sidebar = ctx.create(Pane::new(
            "sidebar",
            Orientation::Horizontal,
            SizePolicy::Fixed,
            Extent::Unlimited,
            Extent::Cells(settings.sidebar_width),
        ));
        let panels = ctx.create(Pane::container("panels", Orientation::Vertical));
        ctx.add_child(body, sidebar)?;
        ctx.add_child(body, panels)?;

        let index_panel = ctx.create(Pane::container("index-panel", Orientation::Vertical));
        let index = ctx.create(Pane::container("index", Orientation::Vertical));
        let status = ctx.create(Pane::bar("status"));
        ctx.add_child(panels, index_panel)?;
        ctx.add_child(index_panel, index)?;
        ctx.add_child(index_panel, status)?;

        let pager_panel =
            ctx.create(Pane::container("pager-panel", Orientation::Vertical).hidden());
        let pager = ctx.create(Pane::container("pager", Orientation::Vertical));
        let pager_bar = ctx.create(Pane::bar("pager-bar"));
        ctx.add_child(panels, pager_panel)?;
        ctx.add_child(pager_panel, pager)?;
        ctx.add_child(pager_panel, pager_bar)?;

        ctx.set_dialog_container(Some(dialogs));
        ctx.push_dialog(index_dialog);

        let skeleton = Self {
            root,
            dialogs,
            message,
            index_dialog,
            help,
            body,
            sidebar,
            panels,
            index_panel,
            index,
            status,
            pager_panel,
            pager,
            pager_bar,
        };
        skeleton.apply(ctx, settings)?;
        tracing::debug!(panes = ctx.len(), "built layout skeleton");
        Ok(skeleton)
    }

    /// Bring visibility, ordering and sidebar width in line with `settings`.
    /// With the status bar on top, the help bar drops to the bottom of the
    /// index dialog. Does not reflow.
    pub fn apply(
        &self,
        ctx: &mut LayoutContext,
        settings: &LayoutSettings,
    ) -> Result<(), LayoutError> {
        ctx.set_visible(self.help, settings.help);
        place(ctx, self.index_dialog, self.help, !settings.status_on_top)?;

        ctx.set_visible(self.sidebar, settings.sidebar_visible);
        if let Some(sidebar) = ctx.pane_mut(self.sidebar) {
            sidebar.set_requested_cols(Extent::Cells(settings.sidebar_width));
        }
        place(ctx, self.body, self.sidebar, !settings.sidebar_on_right)?;

        place(ctx, self.index_panel, self.status, settings.status_on_top)?;
        place(ctx, self.pager_panel, self.pager_bar, settings.status_on_top)?;
        Ok(())
    }

    /// Switch the panels area between the index and the pager. Does not reflow.
    pub fn show_pager(&self, ctx: &mut LayoutContext, show: bool) {
        ctx.set_visible(self.pager_panel, show);
        ctx.set_visible(self.index_panel, !show);
    }

    /// Pane currently showing the main content
    pub fn content(&self, ctx: &LayoutContext) -> PaneId {
        if ctx.is_visible(self.pager_panel) {
            self.pager
        } else {
            self.index
        }
    }

    /// Grow the message line to `rows` rows for a multi-line message,
    /// squeezing the panes above it. Undone by the next full reflow.
    pub fn reflow_message_rows(&self, ctx: &mut LayoutContext, rows: u16) -> ReflowReport {
        ctx.reflow_rows(self.root, self.message, rows)
    }
}

/// Move `child` to the front or back of `parent`'s children
fn place(
    ctx: &mut LayoutContext,
    parent: PaneId,
    child: PaneId,
    first: bool,
) -> Result<(), LayoutError> {
    ctx.remove_child(child)?;
    let index = if first { 0 } else { ctx.children(parent).len() };
    ctx.insert_child(parent, index, child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsr_core::Geometry;

    fn build(settings: &LayoutSettings) -> (LayoutContext, Skeleton) {
        let mut ctx = LayoutContext::new();
        let skeleton = Skeleton::build(&mut ctx, settings).unwrap();
        ctx.resize(24, 80);
        (ctx, skeleton)
    }

    fn geo(ctx: &LayoutContext, id: PaneId) -> Geometry {
        ctx.geometry(id).unwrap()
    }

    #[test]
    fn default_layout() {
        let (ctx, s) = build(&LayoutSettings::default());

        assert_eq!(ctx.top_dialog(), Some(s.index_dialog));
        assert_eq!(geo(&ctx, s.help), Geometry::new(1, 80, 0, 0));
        assert_eq!(geo(&ctx, s.index), Geometry::new(21, 80, 1, 0));
        assert_eq!(geo(&ctx, s.status), Geometry::new(1, 80, 22, 0));
        assert_eq!(geo(&ctx, s.message), Geometry::new(1, 80, 23, 0));
        assert!(!ctx.is_visible(s.sidebar));
        assert!(!ctx.is_visible(s.pager_panel));
        assert_eq!(s.content(&ctx), s.index);
    }

    #[test]
    fn sidebar_and_status_on_top() {
        let settings = LayoutSettings {
            help: false,
            status_on_top: true,
            sidebar_visible: true,
            sidebar_width: 20,
            sidebar_on_right: false,
        };
        let (ctx, s) = build(&settings);

        assert_eq!(geo(&ctx, s.sidebar), Geometry::new(23, 20, 0, 0));
        assert_eq!(geo(&ctx, s.status), Geometry::new(1, 60, 0, 20));
        assert_eq!(geo(&ctx, s.index), Geometry::new(22, 60, 1, 20));
    }

    #[test]
    fn sidebar_on_right() {
        let settings = LayoutSettings {
            sidebar_visible: true,
            sidebar_width: 25,
            sidebar_on_right: true,
            ..LayoutSettings::default()
        };
        let (ctx, s) = build(&settings);

        assert_eq!(ctx.children(s.body), &[s.panels, s.sidebar]);
        assert_eq!(geo(&ctx, s.panels), Geometry::new(22, 55, 1, 0));
        assert_eq!(geo(&ctx, s.sidebar), Geometry::new(22, 25, 1, 55));
    }

    #[test]
    fn reapplying_settings_after_change() {
        let mut settings = LayoutSettings::default();
        let (mut ctx, s) = build(&settings);

        settings.sidebar_visible = true;
        settings.sidebar_width = 30;
        s.apply(&mut ctx, &settings).unwrap();
        let report = ctx.reflow(s.root);

        assert!(report.changed.contains(&s.index));
        assert_eq!(geo(&ctx, s.index), Geometry::new(21, 50, 1, 30));
        assert_eq!(ctx.pane(s.index).unwrap().previous_geometry(), Geometry::new(21, 80, 1, 0));
    }

    #[test]
    fn pager_replaces_index() {
        let (mut ctx, s) = build(&LayoutSettings::default());

        s.show_pager(&mut ctx, true);
        ctx.reflow(s.root);

        assert_eq!(s.content(&ctx), s.pager);
        assert_eq!(geo(&ctx, s.pager), Geometry::new(21, 80, 1, 0));
        assert_eq!(geo(&ctx, s.pager_bar), Geometry::new(1, 80, 22, 0));
    }

    #[test]
    fn multi_line_message_squeezes_index() {
        let (mut ctx, s) = build(&LayoutSettings::default());

        let report = s.reflow_message_rows(&mut ctx, 3);

        assert!(report.redraw.full);
        assert!(!report.redraw.flow);
        assert_eq!(geo(&ctx, s.message), Geometry::new(3, 80, 21, 0));
        assert_eq!(geo(&ctx, s.status), Geometry::new(1, 80, 20, 0));
        assert_eq!(geo(&ctx, s.index), Geometry::new(19, 80, 1, 0));
        assert_eq!(geo(&ctx, s.help), Geometry::new(1, 80, 0, 0));
    }

    #[test]
    fn status_on_top_moves_help_above_message() {
        let settings = LayoutSettings {
            status_on_top: true,
            ..LayoutSettings::default()
        };
        let (mut ctx, s) = build(&settings);

        assert_eq!(geo(&ctx, s.status), Geometry::new(1, 80, 0, 0));
        assert_eq!(geo(&ctx, s.index), Geometry::new(21, 80, 1, 0));
        assert_eq!(geo(&ctx, s.help), Geometry::new(1, 80, 22, 0));
        assert_eq!(geo(&ctx, s.message), Geometry::new(1, 80, 23, 0));

        s.apply(&mut ctx, &LayoutSettings::default()).unwrap();
        ctx.reflow(s.root);
        assert_eq!(geo(&ctx, s.help), Geometry::new(1, 80, 0, 0));
        assert_eq!(geo(&ctx, s.status), Geometry::new(1, 80, 22, 0));
    }

    #[test]
    fn freeing_pushed_dialog_restores_index() {
        let (mut ctx, s) = build(&LayoutSettings::default());
        let compose = ctx.create(Pane::container("compose", Orientation::Vertical));
        ctx.push_dialog(compose);

        ctx.free_subtree(compose);

        assert_eq!(ctx.top_dialog(), Some(s.index_dialog));
        assert!(ctx.is_visible(s.index_dialog));
    }

    #[test]
    fn dialog_covers_index_and_returns() {
        let (mut ctx, s) = build(&LayoutSettings::default());
        let compose = ctx.create(Pane::container("compose", Orientation::Vertical));

        ctx.push_dialog(compose);
        ctx.reflow(s.dialogs);
        assert_eq!(geo(&ctx, compose), Geometry::new(23, 80, 0, 0));
        assert!(!ctx.is_visible(s.index_dialog));

        assert_eq!(ctx.pop_dialog(), Some(compose));
        ctx.free_subtree(compose);
        assert!(ctx.is_visible(s.index_dialog));
        assert_eq!(ctx.top_dialog(), Some(s.index_dialog));
    }

    #[test]
    fn tiny_terminal_degrades() {
        let (mut ctx, s) = build(&LayoutSettings::default());

        ctx.resize(2, 10);

        assert_eq!(geo(&ctx, s.message), Geometry::new(1, 10, 1, 0));
        assert_eq!(geo(&ctx, s.help), Geometry::new(1, 10, 0, 0));
        assert_eq!(geo(&ctx, s.index).rows, 0);
        assert_eq!(geo(&ctx, s.status).rows, 0);
    }
}
