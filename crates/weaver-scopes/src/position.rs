//! Buffer positions, ranges and the comparisons the resolver relies on.
//!
//! Positions are zero-based `(row, column)` pairs ordered row-major. Columns
//! and indices are byte offsets, which is how Tree-sitter reports them.

use std::cmp::Ordering;
use std::fmt;

/// A zero-based location in a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based byte column within the row.
    pub column: usize,
}

impl Position {
    /// Creates a position from a row and column.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

impl From<tree_sitter::Point> for Position {
    fn from(point: tree_sitter::Point) -> Self {
        Self::new(point.row, point.column)
    }
}

/// Identifies a range by its exact index pair.
///
/// Two captures target "the same range" when their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeKey {
    /// Index of the first byte in the range.
    pub start: usize,
    /// Index one past the last byte in the range.
    pub end: usize,
}

/// A span of buffer text described by both positions and indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    /// Position where the range starts.
    pub start_position: Position,
    /// Position where the range ends.
    pub end_position: Position,
    /// Index where the range starts.
    pub start_index: usize,
    /// Index where the range ends.
    pub end_index: usize,
}

impl TextRange {
    /// Creates a range from its four components.
    #[must_use]
    pub const fn new(
        start_position: Position,
        end_position: Position,
        start_index: usize,
        end_index: usize,
    ) -> Self {
        Self {
            start_position,
            end_position,
            start_index,
            end_index,
        }
    }

    /// Returns the exact index pair used to key per-range state.
    #[must_use]
    pub const fn key(&self) -> RangeKey {
        RangeKey {
            start: self.start_index,
            end: self.end_index,
        }
    }
}

/// Compares two positions row-major.
#[must_use]
pub fn compare_points(a: Position, b: Position) -> Ordering {
    a.row.cmp(&b.row).then(a.column.cmp(&b.column))
}

/// Returns whether `point` lies in the closed interval spanned by `a` and `b`.
///
/// The bounds may be given in either order.
#[must_use]
pub fn is_between_points(point: Position, a: Position, b: Position) -> bool {
    let (low, high) = if compare_points(a, b).is_gt() {
        (b, a)
    } else {
        (a, b)
    };
    compare_points(point, low).is_ge() && compare_points(point, high).is_le()
}

/// Returns whether a range can carry a scope.
///
/// The start index must not exceed the end index and the start position must
/// strictly precede the end position, so empty ranges are rejected.
#[must_use]
pub fn is_valid_range(range: &TextRange) -> bool {
    range.start_index <= range.end_index
        && compare_points(range.start_position, range.end_position).is_lt()
}
