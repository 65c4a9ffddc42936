use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

pub const BOARD_SIZE: i32 = 8;

/// Side owning a piece. Serialized as `"W"` / `"B"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "B")]
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single pawn step. White starts on y=6 and walks toward y=0.
    pub fn pawn_direction(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_rank(self) -> i32 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A piece token. Uppercase letters are White, lowercase Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    pub fn to_char(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

impl TryFrom<char> for Piece {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Piece::from_char(c).ok_or_else(|| format!("unknown piece token '{}'", c))
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> char {
        piece.to_char()
    }
}

/// Board coordinate: `x` is the file (0-7), `y` the row of `board[y][x]`.
/// Coordinates outside the board are representable so that untrusted input
/// can be checked instead of rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: i32,
    pub y: i32,
}

impl Square {
    pub const fn new(x: i32, y: i32) -> Self {
        Square { x, y }
    }

    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Square {
        Square::new(self.x + dx, self.y + dy)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Square::new(x, y)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// 8x8 grid of optional pieces, row-major (`cells[y][x]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

const INITIAL_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Standard starting position: Black on rows 0-1, White on rows 6-7.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for (y, row) in INITIAL_PLACEMENT.split('/').enumerate() {
            for (x, c) in row.chars().enumerate() {
                board.cells[y][x] = Piece::from_char(c);
            }
        }
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !square.is_on_board() {
            return None;
        }
        self.cells[square.y as usize][square.x as usize]
    }

    /// Off-board writes are ignored.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if square.is_on_board() {
            self.cells[square.y as usize][square.x as usize] = piece;
        }
    }

    /// Copy of this board with the piece on `from` moved to `to`. Whatever
    /// stood on `to` is overwritten.
    pub fn with_move(&self, from: Square, to: Square) -> Board {
        let mut next = self.clone();
        let piece = next.piece_at(from);
        next.set(to, piece);
        next.set(from, None);
        next
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| {
            self.piece_at(square)
                .filter(|piece| piece.color == color)
                .map(|piece| (square, piece))
        })
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        Square::all().find(|&square| self.piece_at(square) == Some(king))
    }

    /// FEN piece-placement field. Row 0 is the eighth rank.
    pub fn placement(&self) -> String {
        let mut rows = Vec::with_capacity(8);
        for row in &self.cells {
            let mut out = String::new();
            let mut gap = 0;
            for cell in row {
                match cell {
                    Some(piece) => {
                        if gap > 0 {
                            out.push_str(&gap.to_string());
                            gap = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push_str(&gap.to_string());
            }
            rows.push(out);
        }
        rows.join("/")
    }

    /// Full FEN with no castling or en-passant rights, since neither exists here.
    pub fn to_fen(&self, side_to_move: Color) -> String {
        let side = match side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {} - - 0 1", self.placement(), side)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

/// Parses a FEN piece-placement field (anything after the first space is ignored).
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let placement = s.split_whitespace().next().unwrap_or_default();
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(GameError::InvalidPlacement(format!(
                "expected 8 rows, found {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (y, row) in rows.iter().enumerate() {
            let mut x = 0usize;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    x += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or_else(|| {
                    GameError::InvalidPlacement(format!("unknown piece '{}' in row {}", c, y))
                })?;
                if x >= 8 {
                    return Err(GameError::InvalidPlacement(format!("row {} is too long", y)));
                }
                board.cells[y][x] = Some(piece);
                x += 1;
            }
            if x != 8 {
                return Err(GameError::InvalidPlacement(format!(
                    "row {} covers {} squares",
                    y, x
                )));
            }
        }
        Ok(board)
    }
}
