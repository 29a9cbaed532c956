// ABOUTME: A single node of the pane tree.
// ABOUTME: Holds size policy, requested extent, visibility and computed geometry.

use std::fmt;

use tsr_core::Geometry;

/// Stable handle to a pane stored in a [`crate::LayoutContext`].
/// Handles are never reused, so a freed pane's id simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneId(pub u64);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

/// Axis along which a pane stacks its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Children stacked top to bottom, each spanning the full width
    Vertical,
    /// Children stacked left to right, each spanning the full height
    Horizontal,
}

impl Orientation {
    /// Extent of `area` along this stacking axis
    pub fn extent(self, area: &Geometry) -> u16 {
        match self {
            Orientation::Vertical => area.rows,
            Orientation::Horizontal => area.cols,
        }
    }

    /// Offset of `area` along this stacking axis
    pub fn offset(self, area: &Geometry) -> u16 {
        match self {
            Orientation::Vertical => area.row_offset,
            Orientation::Horizontal => area.col_offset,
        }
    }
}

/// How a pane's extent along its parent's stacking axis is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePolicy {
    /// Exactly the requested rows/cols
    Fixed,
    /// An equal share of whatever the siblings leave over
    Maximise,
    /// Just enough to hold the pane's own visible children
    Minimise,
}

/// A requested row or column count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    Cells(u16),
    /// Take whatever is available
    Unlimited,
}

impl Extent {
    pub fn cells(self) -> Option<u16> {
        match self {
            Extent::Cells(n) => Some(n),
            Extent::Unlimited => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pane {
    name: String,
    orientation: Orientation,
    size_policy: SizePolicy,
    requested_rows: Extent,
    requested_cols: Extent,
    visible: bool,
    pub(crate) geometry: Geometry,
    pub(crate) previous_geometry: Geometry,
    pub(crate) parent: Option<PaneId>,
    pub(crate) children: Vec<PaneId>,
}

impl Pane {
    pub fn new(
        name: impl Into<String>,
        orientation: Orientation,
        size_policy: SizePolicy,
        requested_rows: Extent,
        requested_cols: Extent,
    ) -> Self {
        Self {
            name: name.into(),
            orientation,
            size_policy,
            requested_rows,
            requested_cols,
            visible: true,
            geometry: Geometry::default(),
            previous_geometry: Geometry::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Container that takes all the space its parent can spare
    pub fn container(name: impl Into<String>, orientation: Orientation) -> Self {
        Self::new(
            name,
            orientation,
            SizePolicy::Maximise,
            Extent::Unlimited,
            Extent::Unlimited,
        )
    }

    /// One-line bar, e.g. a status or help line
    pub fn bar(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Orientation::Vertical,
            SizePolicy::Fixed,
            Extent::Cells(1),
            Extent::Unlimited,
        )
    }

    /// Builder form of [`Pane::set_visible`] for panes that start hidden
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn size_policy(&self) -> SizePolicy {
        self.size_policy
    }

    pub fn requested_rows(&self) -> Extent {
        self.requested_rows
    }

    pub fn requested_cols(&self) -> Extent {
        self.requested_cols
    }

    /// Requested extent along the given stacking axis
    pub fn requested(&self, axis: Orientation) -> Extent {
        match axis {
            Orientation::Vertical => self.requested_rows,
            Orientation::Horizontal => self.requested_cols,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Geometry computed by the most recent reflow
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Geometry as it was before the most recent reflow
    pub fn previous_geometry(&self) -> Geometry {
        self.previous_geometry
    }

    pub fn parent(&self) -> Option<PaneId> {
        self.parent
    }

    pub fn children(&self) -> &[PaneId] {
        &self.children
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_size_policy(&mut self, size_policy: SizePolicy) {
        self.size_policy = size_policy;
    }

    pub fn set_requested_rows(&mut self, rows: Extent) {
        self.requested_rows = rows;
    }

    pub fn set_requested_cols(&mut self, cols: Extent) {
        self.requested_cols = cols;
    }

    /// Changes take effect on the next reflow
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
