//! The buffer collaborator: position and index arithmetic over source text.

use crate::position::Position;

/// Position and index arithmetic over the text being highlighted.
///
/// Implementations are expected to be cheap and free of side effects; the
/// resolver calls them freely while adjusting ranges.
pub trait TextBuffer {
    /// Converts a byte index into a position. Out-of-range indices clamp to
    /// the end of the buffer.
    fn position_for_index(&self, index: usize) -> Position;

    /// Converts a position into a byte index, clipping it first.
    fn index_for_position(&self, position: Position) -> usize;

    /// Clamps a position to the nearest valid location in the buffer.
    fn clip_position(&self, position: Position) -> Position;

    /// Returns the text of a row without its line terminator.
    fn line_for_row(&self, row: usize) -> Option<&str>;

    /// Moves a byte index by `delta` characters, clamping at either end of
    /// the buffer.
    fn offset_index(&self, index: usize, delta: isize) -> usize;
}

/// An in-memory [`TextBuffer`] over owned text.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    text: String,
    line_starts: Vec<usize>,
}

impl SourceBuffer {
    /// Creates a buffer, indexing the start of every line.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let owned = text.into();
        let line_starts = std::iter::once(0)
            .chain(owned.match_indices('\n').map(|(index, _)| index.saturating_add(1)))
            .collect();
        Self {
            text: owned,
            line_starts,
        }
    }

    /// Returns the full buffer text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the number of rows in the buffer.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.line_starts.len()
    }

    fn last_row(&self) -> usize {
        self.row_count().saturating_sub(1)
    }

    fn line_start(&self, row: usize) -> usize {
        self.line_starts.get(row).copied().unwrap_or(self.text.len())
    }

    fn floor_char_boundary(&self, index: usize) -> usize {
        let mut floored = index.min(self.text.len());
        while !self.text.is_char_boundary(floored) {
            floored = floored.saturating_sub(1);
        }
        floored
    }
}

impl TextBuffer for SourceBuffer {
    fn position_for_index(&self, index: usize) -> Position {
        let floored = self.floor_char_boundary(index);
        let row = self
            .line_starts
            .partition_point(|start| *start <= floored)
            .saturating_sub(1);
        Position::new(row, floored.saturating_sub(self.line_start(row)))
    }

    fn index_for_position(&self, position: Position) -> usize {
        let clipped = self.clip_position(position);
        self.line_start(clipped.row).saturating_add(clipped.column)
    }

    fn clip_position(&self, position: Position) -> Position {
        if position.row > self.last_row() {
            let row = self.last_row();
            let length = self.line_for_row(row).map_or(0, str::len);
            return Position::new(row, length);
        }
        let length = self.line_for_row(position.row).map_or(0, str::len);
        let start = self.line_start(position.row);
        let index = self.floor_char_boundary(start.saturating_add(position.column.min(length)));
        Position::new(position.row, index.saturating_sub(start))
    }

    fn line_for_row(&self, row: usize) -> Option<&str> {
        let start = *self.line_starts.get(row)?;
        let end = self
            .line_starts
            .get(row.saturating_add(1))
            .map_or(self.text.len(), |next| next.saturating_sub(1));
        let line = self.text.get(start..end)?;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    fn offset_index(&self, index: usize, delta: isize) -> usize {
        let origin = self.floor_char_boundary(index);
        let steps = delta.unsigned_abs();
        if delta >= 0 {
            let Some(rest) = self.text.get(origin..) else {
                return origin;
            };
            rest.char_indices()
                .map(|(offset, _)| offset)
                .chain(std::iter::once(rest.len()))
                .nth(steps)
                .map_or(self.text.len(), |offset| origin.saturating_add(offset))
        } else {
            let Some(head) = self.text.get(..origin) else {
                return origin;
            };
            head.char_indices()
                .rev()
                .nth(steps.saturating_sub(1))
                .map_or(0, |(offset, _)| offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TEXT: &str = "fn main() {\n    let é = 1;\n}";

    #[rstest]
    #[case(0, Position::new(0, 0))]
    #[case(11, Position::new(0, 11))]
    #[case(12, Position::new(1, 0))]
    #[case(16, Position::new(1, 4))]
    #[case(20, Position::new(1, 8))]
    #[case(21, Position::new(1, 8))]
    #[case(500, Position::new(2, 1))]
    fn position_for_index_clamps_and_floors(#[case] index: usize, #[case] expected: Position) {
        let buffer = SourceBuffer::new(TEXT);
        assert_eq!(buffer.position_for_index(index), expected);
    }

    #[rstest]
    #[case(Position::new(0, 3), 3)]
    #[case(Position::new(1, 4), 16)]
    #[case(Position::new(0, 40), 11)]
    #[case(Position::new(9, 9), 29)]
    fn index_for_position_clips_first(#[case] position: Position, #[case] expected: usize) {
        let buffer = SourceBuffer::new(TEXT);
        assert_eq!(buffer.index_for_position(position), expected);
    }

    #[test]
    fn index_and_position_round_trip_on_boundaries() {
        let buffer = SourceBuffer::new(TEXT);
        for (index, _) in TEXT.char_indices() {
            let position = buffer.position_for_index(index);
            assert_eq!(buffer.index_for_position(position), index);
        }
    }

    #[rstest]
    #[case(20, 1, 22)]
    #[case(22, -1, 20)]
    #[case(19, 2, 22)]
    #[case(23, -3, 19)]
    #[case(21, 0, 20)]
    #[case(0, -5, 0)]
    #[case(28, 10, 29)]
    fn offset_index_steps_over_characters(
        #[case] index: usize,
        #[case] delta: isize,
        #[case] expected: usize,
    ) {
        let buffer = SourceBuffer::new(TEXT);
        assert_eq!(buffer.offset_index(index, delta), expected);
    }

    #[test]
    fn line_for_row_strips_terminators() {
        let buffer = SourceBuffer::new("one\r\ntwo\nthree");
        assert_eq!(buffer.row_count(), 3);
        assert_eq!(buffer.line_for_row(0), Some("one"));
        assert_eq!(buffer.line_for_row(1), Some("two"));
        assert_eq!(buffer.line_for_row(2), Some("three"));
        assert_eq!(buffer.line_for_row(3), None);
    }

    #[test]
    fn trailing_newline_opens_an_empty_row() {
        let buffer = SourceBuffer::new("x\n");
        assert_eq!(buffer.line_for_row(1), Some(""));
        assert_eq!(buffer.position_for_index(2), Position::new(1, 0));
    }
}
