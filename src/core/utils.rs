use crate::core::definitions::Square;

/// Walks the squares strictly between two squares on one line.
#[derive(Debug)]
pub struct BetweenIterator {
    row: i8,
    col: i8,
    target: (i8, i8),
    step: (i8, i8),
}

impl Iterator for BetweenIterator {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.row += self.step.0;
        self.col += self.step.1;
        if (self.row, self.col) == self.target {
            return None;
        }
        Square::new(self.row as u8, self.col as u8).ok()
    }
}

/// Squares strictly between `from` and `to`, exclusive of both ends.
///
/// Only straight and diagonal pairs make sense here; anything else walks
/// off the board and stops there.
pub fn between(from: Square, to: Square) -> BetweenIterator {
    #[cfg(debug_assertions)]
    if from != to && !is_in_diagonal_line(from, to) && !is_in_straight_line(from, to) {
        panic!("Points can't form line to search between them!")
    }
    let (row_diff, col_diff) = offset(from, to);
    let step = if from == to {
        (0, 0)
    } else {
        (row_diff.signum(), col_diff.signum())
    };
    BetweenIterator {
        row: from.row() as i8,
        col: from.col() as i8,
        // a zero step must not spin forever
        target: if from == to {
            (from.row() as i8, from.col() as i8)
        } else {
            (to.row() as i8, to.col() as i8)
        },
        step,
    }
}

/// Signed (row, col) displacement from `from` to `to`.
#[inline]
pub fn offset(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

pub fn is_in_straight_line(a: Square, b: Square) -> bool {
    a.row() == b.row() || a.col() == b.col()
}

pub fn is_in_diagonal_line(a: Square, b: Square) -> bool {
    a.row().abs_diff(b.row()) == a.col().abs_diff(b.col())
}

#[inline]
pub fn is_knight_jump(a: Square, b: Square) -> bool {
    matches!(
        (a.row().abs_diff(b.row()), a.col().abs_diff(b.col())),
        (2, 1) | (1, 2)
    )
}

#[inline]
pub fn is_adjacent(a: Square, b: Square) -> bool {
    a != b && a.row().abs_diff(b.row()) <= 1 && a.col().abs_diff(b.col()) <= 1
}
