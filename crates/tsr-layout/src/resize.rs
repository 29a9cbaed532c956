// ABOUTME: Entry point for terminal size changes and the text wrap-column policy.
// ABOUTME: Reflows the whole tree only when the terminal size actually changed.

use tsr_core::Geometry;

use crate::pane::PaneId;
use crate::reflow::ReflowReport;
use crate::tree::LayoutContext;

impl LayoutContext {
    /// Feed a new terminal size into the root pane.
    ///
    /// Returns `None` without touching any geometry when the size is unchanged;
    /// otherwise reflows the whole tree and reports what moved.
    pub fn resize(&mut self, rows: u16, cols: u16) -> Option<ReflowReport> {
        let root = self.root();
        let pane = self.pane_mut(root)?;
        if pane.geometry.rows == rows && pane.geometry.cols == cols {
            tracing::trace!(rows, cols, "terminal size unchanged");
            return None;
        }

        tracing::debug!(
            from_rows = pane.geometry.rows,
            from_cols = pane.geometry.cols,
            rows,
            cols,
            "terminal resized"
        );
        pane.previous_geometry = pane.geometry;
        pane.geometry = Geometry::screen(rows, cols);

        let mut report = self.reflow(root);
        report.changed.insert(0, root);
        Some(report)
    }

    /// Wrap column for text drawn into `id`, see [`wrap_cols`]
    pub fn wrap_cols(&self, id: PaneId, wrap: i16) -> Option<u16> {
        self.geometry(id).map(|g| wrap_cols(g.cols, wrap))
    }
}

/// Column at which prose should wrap inside a pane `width` columns wide.
///
/// `wrap > 0` wraps at that column, or at `width` if the pane is narrower.
/// `wrap < 0` keeps a right margin of `|wrap|` columns, unless the pane is
/// too narrow to spare it. `wrap == 0` uses the full width.
pub fn wrap_cols(width: u16, wrap: i16) -> u16 {
    if wrap < 0 {
        let margin = wrap.unsigned_abs();
        if width > margin {
            width - margin
        } else {
            width
        }
    } else if wrap > 0 {
        (wrap as u16).min(width)
    } else {
        width
    }
}
