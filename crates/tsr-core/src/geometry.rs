// ABOUTME: Absolute screen rectangles measured in character cells.
// ABOUTME: Shared by the layout engine and everything that draws into a pane.

use serde::{Deserialize, Serialize};

/// A rectangle of character cells in absolute screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    pub rows: u16,
    pub cols: u16,
    pub row_offset: u16,
    pub col_offset: u16,
}

impl Geometry {
    pub const fn new(rows: u16, cols: u16, row_offset: u16, col_offset: u16) -> Self {
        Self {
            rows,
            cols,
            row_offset,
            col_offset,
        }
    }

    /// Full-screen rectangle anchored at the top-left corner
    pub const fn screen(rows: u16, cols: u16) -> Self {
        Self::new(rows, cols, 0, 0)
    }

    /// First row past the bottom edge
    pub fn bottom(&self) -> u32 {
        self.row_offset as u32 + self.rows as u32
    }

    /// First column past the right edge
    pub fn right(&self) -> u32 {
        self.col_offset as u32 + self.cols as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn same_size(&self, other: &Geometry) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Whether `other` lies entirely inside this rectangle.
    /// Empty rectangles are contained as long as their anchor is in bounds.
    pub fn contains(&self, other: &Geometry) -> bool {
        other.row_offset >= self.row_offset
            && other.col_offset >= self.col_offset
            && other.bottom() <= self.bottom()
            && other.right() <= self.right()
    }

    /// Whether the two rectangles share at least one cell
    pub fn overlaps(&self, other: &Geometry) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        (self.row_offset as u32) < other.bottom()
            && (other.row_offset as u32) < self.bottom()
            && (self.col_offset as u32) < other.right()
            && (other.col_offset as u32) < self.right()
    }

    /// Map a pane-relative cursor position to absolute screen coordinates.
    /// Positions outside the pane are not clamped.
    pub fn to_absolute(&self, row: u16, col: u16) -> (u16, u16) {
        (
            self.row_offset.saturating_add(row),
            self.col_offset.saturating_add(col),
        )
    }

    /// Map an absolute screen position into pane-relative coordinates.
    /// Returns None when the position lies above or left of the pane.
    pub fn to_relative(&self, row: u16, col: u16) -> Option<(u16, u16)> {
        Some((
            row.checked_sub(self.row_offset)?,
            col.checked_sub(self.col_offset)?,
        ))
    }
}
