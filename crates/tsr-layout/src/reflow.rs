// ABOUTME: Recomputes pane geometry from size policies and the parent's rectangle.
// ABOUTME: Bottom-up natural-size pass followed by a top-down allocation pass.

use std::collections::HashMap;

use tsr_core::Geometry;

use crate::pane::{Extent, Orientation, PaneId, SizePolicy};
use crate::tree::LayoutContext;

/// What the drawing layer should repaint after a reflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    /// Repaint every visible pane
    pub full: bool,
    /// Re-wrap pane content for new widths before repainting
    pub flow: bool,
}

/// Receives redraw requests produced by reflow passes
pub trait RedrawScheduler {
    fn mark_full(&mut self);
    fn mark_flow(&mut self);
}

/// Outcome of a reflow pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflowReport {
    /// Panes whose geometry differs from what it was before the pass
    pub changed: Vec<PaneId>,
    pub redraw: Redraw,
}

impl ReflowReport {
    pub fn is_changed(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Forward the redraw request to the drawing layer
    pub fn schedule(&self, scheduler: &mut dyn RedrawScheduler) {
        if self.redraw.full {
            scheduler.mark_full();
        }
        if self.redraw.flow {
            scheduler.mark_flow();
        }
    }
}

/// Space a child asks for along its parent's stacking axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Demand {
    Exact(u16),
    Share,
}

/// Split `avail` cells between children in order.
///
/// Exact demands are granted first, each clamped to what is still free.
/// Whatever is left is divided equally between the sharers, earlier sharers
/// taking one extra cell each until the division remainder is used up.
pub(crate) fn distribute(avail: u16, demands: &[Demand]) -> Vec<u16> {
    let mut remaining = avail;
    let mut sizes: Vec<u16> = demands
        .iter()
        .map(|demand| match *demand {
            Demand::Exact(n) => {
                let take = n.min(remaining);
                remaining -= take;
                take
            }
            Demand::Share => 0,
        })
        .collect();

    let sharers = demands.iter().filter(|d| **d == Demand::Share).count();
    if sharers > 0 {
        let base = remaining as usize / sharers;
        let mut extra = remaining as usize % sharers;
        for (size, demand) in sizes.iter_mut().zip(demands) {
            if *demand == Demand::Share {
                let bonus = if extra > 0 {
                    extra -= 1;
                    1
                } else {
                    0
                };
                *size = (base + bonus) as u16;
            }
        }
    }
    sizes
}

/// Size a pane would like when nothing pushes on it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Natural {
    rows: u16,
    cols: u16,
}

impl Natural {
    fn along(self, axis: Orientation) -> u16 {
        match axis {
            Orientation::Vertical => self.rows,
            Orientation::Horizontal => self.cols,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axes {
    Both,
    RowsOnly,
}

#[derive(Debug, Clone, Copy)]
struct Pass {
    axes: Axes,
    /// Snapshot geometry into previous_geometry before overwriting it
    snapshot: bool,
    /// Pane whose row count is forced for this pass
    row_override: Option<(PaneId, u16)>,
}

impl LayoutContext {
    /// Recompute geometry for every descendant of `id` from `id`'s current geometry.
    ///
    /// Callers set the geometry of `id` first (the resize adapter does this for
    /// the root). Unknown ids produce an empty report.
    pub fn reflow(&mut self, id: PaneId) -> ReflowReport {
        let pass = Pass {
            axes: Axes::Both,
            snapshot: true,
            row_override: None,
        };
        let Some(report) = self.run(id, pass) else {
            return ReflowReport::default();
        };
        ReflowReport {
            changed: report,
            redraw: Redraw {
                full: true,
                flow: true,
            },
        }
    }

    /// Force `target` to `rows` rows and restack rows below `scope` to make room.
    ///
    /// Only row extents and row offsets are rewritten; columns and
    /// previous_geometry are left alone. The override lasts until the next
    /// full [`LayoutContext::reflow`], which restores the requested size.
    pub fn reflow_rows(&mut self, scope: PaneId, target: PaneId, rows: u16) -> ReflowReport {
        if !self.is_ancestor(scope, target) {
            tracing::warn!(%scope, %target, "row override target is outside the scope");
            return ReflowReport::default();
        }
        let pass = Pass {
            axes: Axes::RowsOnly,
            snapshot: false,
            row_override: Some((target, rows)),
        };

        if target == scope {
            if let Some(pane) = self.pane_mut(target) {
                pane.geometry.rows = rows;
            }
        }
        let Some(changed) = self.run(scope, pass) else {
            return ReflowReport::default();
        };
        ReflowReport {
            changed,
            redraw: Redraw {
                full: true,
                flow: false,
            },
        }
    }

    fn run(&mut self, id: PaneId, pass: Pass) -> Option<Vec<PaneId>> {
        let area = self.geometry(id)?;
        tracing::debug!(
            pane = %id,
            rows = area.rows,
            cols = area.cols,
            rows_only = pass.axes == Axes::RowsOnly,
            "reflow"
        );

        let mut natural = HashMap::new();
        self.measure(id, pass.row_override, &mut natural);

        let mut changed = Vec::new();
        self.allocate(id, &natural, pass, &mut changed);
        Some(changed)
    }

    /// Bottom-up pass: natural size of every visible pane in the subtree.
    ///
    /// Fixed panes want their requested size (zero for unlimited), Maximise
    /// panes want nothing, Minimise panes want the sum of their visible
    /// children along their own stacking axis and the largest child across it.
    fn measure(
        &self,
        id: PaneId,
        row_override: Option<(PaneId, u16)>,
        out: &mut HashMap<PaneId, Natural>,
    ) -> Natural {
        let Some(pane) = self.pane(id) else {
            return Natural::default();
        };

        let mut inner = Natural::default();
        for child in self.visible_children(id) {
            let n = self.measure(child, row_override, out);
            match pane.orientation() {
                Orientation::Vertical => {
                    inner.rows = inner.rows.saturating_add(n.rows);
                    inner.cols = inner.cols.max(n.cols);
                }
                Orientation::Horizontal => {
                    inner.cols = inner.cols.saturating_add(n.cols);
                    inner.rows = inner.rows.max(n.rows);
                }
            }
        }

        let mut own = match pane.size_policy() {
            SizePolicy::Fixed => Natural {
                rows: pane.requested_rows().cells().unwrap_or(0),
                cols: pane.requested_cols().cells().unwrap_or(0),
            },
            SizePolicy::Minimise => inner,
            SizePolicy::Maximise => Natural::default(),
        };
        if let Some((target, rows)) = row_override {
            if target == id {
                own.rows = rows;
            }
        }
        out.insert(id, own);
        own
    }

    fn demand(
        &self,
        child: PaneId,
        axis: Orientation,
        natural: &HashMap<PaneId, Natural>,
        pass: Pass,
    ) -> Demand {
        if let Some((target, rows)) = pass.row_override {
            if target == child && axis == Orientation::Vertical {
                return Demand::Exact(rows);
            }
        }
        let Some(pane) = self.pane(child) else {
            return Demand::Exact(0);
        };
        match pane.size_policy() {
            SizePolicy::Fixed => match pane.requested(axis) {
                Extent::Cells(n) => Demand::Exact(n),
                Extent::Unlimited => Demand::Share,
            },
            SizePolicy::Minimise => {
                Demand::Exact(natural.get(&child).copied().unwrap_or_default().along(axis))
            }
            SizePolicy::Maximise => Demand::Share,
        }
    }

    /// Top-down pass: carve `parent`'s rectangle up between its visible children
    fn allocate(
        &mut self,
        parent: PaneId,
        natural: &HashMap<PaneId, Natural>,
        pass: Pass,
        changed: &mut Vec<PaneId>,
    ) {
        let Some(p) = self.pane(parent) else {
            return;
        };
        let area = p.geometry();
        let axis = p.orientation();
        let children = p.children().to_vec();

        if pass.snapshot {
            for &child in &children {
                if let Some(pane) = self.pane_mut(child) {
                    pane.previous_geometry = pane.geometry;
                }
            }
        }

        let visible: Vec<PaneId> = children
            .into_iter()
            .filter(|&c| self.is_visible(c))
            .collect();
        let demands: Vec<Demand> = visible
            .iter()
            .map(|&c| self.demand(c, axis, natural, pass))
            .collect();
        let sizes = distribute(axis.extent(&area), &demands);

        let mut cursor = axis.offset(&area);
        for (&child, size) in visible.iter().zip(sizes) {
            let Some(pane) = self.pane_mut(child) else {
                continue;
            };
            let before = pane.geometry;
            let next = place(before, &area, axis, cursor, size, pass.axes);
            cursor = cursor.saturating_add(size);

            tracing::trace!(pane = %child, name = pane.name(), ?next, "allocated");
            pane.geometry = next;
            let baseline = if pass.snapshot {
                pane.previous_geometry
            } else {
                before
            };
            if next != baseline {
                changed.push(child);
            }

            self.allocate(child, natural, pass, changed);
        }
    }
}

/// Geometry for one child given its slot along the parent's stacking axis.
/// The cross axis always spans the parent completely.
fn place(
    current: Geometry,
    area: &Geometry,
    axis: Orientation,
    offset: u16,
    size: u16,
    axes: Axes,
) -> Geometry {
    let slot = match axis {
        Orientation::Vertical => Geometry::new(size, area.cols, offset, area.col_offset),
        Orientation::Horizontal => Geometry::new(area.rows, size, area.row_offset, offset),
    };
    match axes {
        Axes::Both => slot,
        Axes::RowsOnly => Geometry {
            rows: slot.rows,
            row_offset: slot.row_offset,
            ..current
        },
    }
}
