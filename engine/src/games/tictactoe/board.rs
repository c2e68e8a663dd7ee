use super::types::{BOARD_SIZE, Line, Mark, Player, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn from_rows(rows: [[Mark; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells: rows }
    }

    pub fn get(&self, pos: Position) -> Option<Mark> {
        if !pos.in_bounds() {
            return None;
        }
        Some(self.cells[pos.row][pos.col])
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Some(Mark::Empty)
    }

    /// Places `player` at `pos`. Returns false and leaves the board untouched
    /// when the cell is occupied or out of bounds.
    pub fn place(&mut self, pos: Position, player: Player) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        self.cells[pos.row][pos.col] = player.mark();
        true
    }

    /// Empties a cell. Only trial placements are ever cleared.
    pub fn clear(&mut self, pos: Position) {
        if pos.in_bounds() {
            self.cells[pos.row][pos.col] = Mark::Empty;
        }
    }

    /// Runs `f` with `player` tentatively at `pos` and empties the cell again
    /// before returning. `None` when `pos` is occupied or out of bounds; `f`
    /// is not called then.
    pub fn with_trial_move<R>(
        &mut self,
        pos: Position,
        player: Player,
        f: impl FnOnce(&Board) -> R,
    ) -> Option<R> {
        if !self.place(pos, player) {
            return None;
        }
        let result = f(self);
        self.clear(pos);
        Some(result)
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn count_marks(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell != Mark::Empty)
            .count()
    }

    pub fn rows(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> Option<[Mark; BOARD_SIZE]> {
        self.cells.get(row).copied()
    }

    pub fn column(&self, col: usize) -> Option<[Mark; BOARD_SIZE]> {
        (col < BOARD_SIZE).then(|| [self.cells[0][col], self.cells[1][col], self.cells[2][col]])
    }

    pub fn diagonal(&self) -> [Mark; BOARD_SIZE] {
        [self.cells[0][0], self.cells[1][1], self.cells[2][2]]
    }

    pub fn anti_diagonal(&self) -> [Mark; BOARD_SIZE] {
        [self.cells[0][2], self.cells[1][1], self.cells[2][0]]
    }

    pub fn line(&self, line: &Line) -> [Mark; 3] {
        line.map(|pos| self.cells[pos.row][pos.col])
    }
}

/// Empty cells in row-major order. Ties between candidate moves are resolved
/// by this order, so it must not change.
pub fn available_moves(board: &Board) -> Vec<Position> {
    Position::ALL
        .iter()
        .copied()
        .filter(|&pos| board.is_empty(pos))
        .collect()
}

#[cfg(test)]
pub(crate) fn board_from(rows: [&str; 3]) -> Board {
    let mut cells = [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (r, row) in rows.iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            cells[r][c] = match ch {
                'X' => Mark::X,
                'O' => Mark::O,
                _ => Mark::Empty,
            };
        }
    }
    Board::from_rows(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_on_occupied_cell_is_noop() {
        let mut board = Board::new();
        assert!(board.place(Position::new(0, 0), Player::X));
        assert!(!board.place(Position::new(0, 0), Player::O));
        assert_eq!(board.get(Position::new(0, 0)), Some(Mark::X));
    }

    #[test]
    fn test_place_out_of_bounds_is_noop() {
        let mut board = Board::new();
        assert!(!board.place(Position::new(3, 0), Player::X));
        assert_eq!(board, Board::new());
        assert_eq!(board.get(Position::new(0, 5)), None);
    }

    #[test]
    fn test_trial_move_is_reverted() {
        let mut board = board_from(["X..", ".O.", "..."]);
        let before = board;
        let seen = board.with_trial_move(Position::new(2, 2), Player::O, |b| {
            b.get(Position::new(2, 2))
        });
        assert_eq!(seen, Some(Some(Mark::O)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_trial_move_on_occupied_cell_is_skipped() {
        let mut board = board_from(["X..", ".O.", "..."]);
        let before = board;
        let mut called = false;
        let seen = board.with_trial_move(Position::new(0, 0), Player::O, |_| called = true);
        assert_eq!(seen, None);
        assert!(!called);
        assert_eq!(board, before);
    }

    #[test]
    fn test_trial_move_out_of_bounds_is_skipped() {
        let mut board = Board::new();
        assert_eq!(board.with_trial_move(Position::new(3, 0), Player::X, |_| ()), None);
        assert_eq!(board.with_trial_move(Position::new(0, 3), Player::O, |_| ()), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_available_moves_row_major() {
        let board = board_from(["X.O", "...", "O.X"]);
        assert_eq!(
            available_moves(&board),
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board = board_from(["XOX", "XOO", "OXX"]);
        assert!(board.is_full());
        assert_eq!(board.count_marks(), 9);
        assert!(available_moves(&board).is_empty());
    }

    #[test]
    fn test_read_helpers() {
        let board = board_from(["XO.", ".X.", "O.X"]);
        assert_eq!(board.row(0), Some([Mark::X, Mark::O, Mark::Empty]));
        assert_eq!(board.column(0), Some([Mark::X, Mark::Empty, Mark::O]));
        assert_eq!(board.row(3), None);
        assert_eq!(board.column(3), None);
        assert_eq!(board.diagonal(), [Mark::X, Mark::X, Mark::X]);
        assert_eq!(board.anti_diagonal(), [Mark::Empty, Mark::X, Mark::O]);
    }
}
