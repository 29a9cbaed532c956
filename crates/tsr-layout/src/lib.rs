// ABOUTME: Pane layout management for terminal applications.
// ABOUTME: Splits the terminal into a tree of panes and keeps their geometry current.

mod dialog;
mod pane;
mod reflow;
mod resize;
mod skeleton;
mod tree;

pub use pane::{Extent, Orientation, Pane, PaneId, SizePolicy};
pub use reflow::{Redraw, RedrawScheduler, ReflowReport};
pub use resize::wrap_cols;
pub use skeleton::Skeleton;
pub use tree::{LayoutContext, LayoutError};
pub use tsr_core::Geometry;
