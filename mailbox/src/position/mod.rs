//! Contains structures related to the `Position`.
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use crate::*;
use PieceCode::*;
use Square::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The castling rights retained by the two players, as a set of one right per
/// side and wing.
///
/// A right records only that castling has not been forfeited by a king or
/// rook move (or the rook's capture). Whether the castle is playable in the
/// current position is the move generator's concern.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No rights
    pub const NONE: CastlingRights = CastlingRights(0);
    /// White's king-side right
    pub const WHITE_SHORT: CastlingRights = CastlingRights(0b0001);
    /// White's queen-side right
    pub const WHITE_LONG: CastlingRights = CastlingRights(0b0010);
    /// Black's king-side right
    pub const BLACK_SHORT: CastlingRights = CastlingRights(0b0100);
    /// Black's queen-side right
    pub const BLACK_LONG: CastlingRights = CastlingRights(0b1000);
    /// All four rights
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// The number of distinct rights values
    pub const COUNT: usize = 16;

    /// The king-side right of `color`.
    pub fn short(color: Color) -> CastlingRights {
        match color {
            White => Self::WHITE_SHORT,
            Black => Self::BLACK_SHORT,
        }
    }

    /// The queen-side right of `color`.
    pub fn long(color: Color) -> CastlingRights {
        match color {
            White => Self::WHITE_LONG,
            Black => Self::BLACK_LONG,
        }
    }

    /// Both rights of `color`.
    pub fn both(color: Color) -> CastlingRights {
        Self::short(color).with(Self::long(color))
    }

    /// Returns `true` if every right in `other` is also in `self`.
    pub fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// The rights of `self` together with those of `other`.
    pub fn with(self, other: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 | other.0)
    }

    /// The rights of `self` with those of `other` removed.
    pub fn without(self, other: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 & !other.0)
    }

    /// Returns `true` if no rights remain.
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    pub (crate) fn index(self) -> usize {
        self.0 as usize
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A representation of the arrangement of pieces on the board at a given
/// point in the game, as well as castling availability, en-passant legality
/// and whose turn it is.
///
/// # Instantiation
/// There are two ways of creating a `Position` structure.
///  -  The [`new`](#method.new) method (or `Default`) creates a `Position`
///     containing the standard starting position.
///  -  The [`from_parts`](#method.from_parts) method builds a `Position`
///     from an arbitrary arrangement, validating it first.
///
/// There is deliberately no textual constructor or formatter here; notation
/// belongs to the caller.
///
/// # Making moves
/// [`legal_moves`](#method.legal_moves) generates the fully-legal moves for
/// the side to move. [`apply`](#method.apply) plays one of them in place and
/// [`undo`](#method.undo) takes it back, restoring the prior position
/// exactly. A typical flow looks something like this:
///
/// ```rust
/// use mailbox::Position;
///
/// let mut pos = Position::new();
///
/// for mv in pos.legal_moves() {
///     pos.apply(&mv);
///     // examine the resulting position
///     pos.undo();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Position {
    squares: [PieceCode; Square::COUNT],
    king_square: [Square; Color::COUNT],
    turn: Color,
    castling_rights: CastlingRights,
    en_passant_file: Option<File>,
    zobrist: Zobrist,
    undo_stack: Vec<(Move, Zobrist)>,
}

const STARTING_SQUARES: [PieceCode; Square::COUNT] = [
    BlackRook, BlackKnight, BlackBishop, BlackQueen, BlackKing, BlackBishop, BlackKnight, BlackRook,
    BlackPawn, BlackPawn, BlackPawn, BlackPawn, BlackPawn, BlackPawn, BlackPawn, BlackPawn,
    Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty,
    Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty,
    Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty,
    Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty,
    WhitePawn, WhitePawn, WhitePawn, WhitePawn, WhitePawn, WhitePawn, WhitePawn, WhitePawn,
    WhiteRook, WhiteKnight, WhiteBishop, WhiteQueen, WhiteKing, WhiteBishop, WhiteKnight, WhiteRook,
];

impl Position {
    /// Returns the standard starting Position.
    pub fn new() -> Position {
        let mut pos = Position {
            squares: STARTING_SQUARES,
            king_square: [E1, E8],
            turn: White,
            castling_rights: CastlingRights::ALL,
            en_passant_file: None,
            zobrist: Zobrist::new(),
            undo_stack: Vec::new(),
        };
        pos.calc_zobrist();

        pos
    }

    /// Builds a position from its observable parts.
    ///
    /// Validation rejects arrangements the move rules could never produce or
    /// that move generation cannot handle:
    ///  -  each side must have exactly one king
    ///     ([`InvalidKingCount`](../enum.Error.html#variant.InvalidKingCount));
    ///  -  no pawn may stand on the first or last rank
    ///     ([`InvalidPawnRank`](../enum.Error.html#variant.InvalidPawnRank));
    ///  -  each castling right requires its king and rook on their home
    ///     squares
    ///     ([`InvalidCastlingFlags`](../enum.Error.html#variant.InvalidCastlingFlags));
    ///  -  an en-passant file requires the opposing just-advanced pawn with
    ///     an empty wake behind it
    ///     ([`MissingEnPassantPawn`](../enum.Error.html#variant.MissingEnPassantPawn),
    ///     [`EnPassantSquareOccupied`](../enum.Error.html#variant.EnPassantSquareOccupied));
    ///  -  the side not on move must not be in check
    ///     ([`KingCapturable`](../enum.Error.html#variant.KingCapturable)).
    ///
    /// # Examples
    /// ```rust
    /// use mailbox::{CastlingRights, Color, PieceCode, Position, Square};
    ///
    /// let mut squares = [PieceCode::Empty; Square::COUNT];
    /// squares[Square::E1 as usize] = PieceCode::WhiteKing;
    /// squares[Square::E8 as usize] = PieceCode::BlackKing;
    /// squares[Square::D1 as usize] = PieceCode::WhiteQueen;
    ///
    /// let pos = Position::from_parts(squares, Color::White, CastlingRights::NONE, None)?;
    /// assert_eq!(pos.piece_on(Square::D1), PieceCode::WhiteQueen);
    /// assert_eq!(pos.king_square(Color::Black), Square::E8);
    /// # Ok::<(), mailbox::Error>(())
    /// ```
    pub fn from_parts(
        squares: [PieceCode; Square::COUNT],
        turn: Color,
        castling_rights: CastlingRights,
        en_passant_file: Option<File>,
    ) -> Result<Position> {
        let mut kings = [None; Color::COUNT];

        for sq in Square::iter() {
            match squares[sq as usize] {
                WhiteKing | BlackKing => {
                    let color = match squares[sq as usize] {
                        WhiteKing => White,
                        _ => Black,
                    };

                    if kings[color as usize].is_some() {
                        return Err(Error::InvalidKingCount);
                    }
                    kings[color as usize] = Some(sq);
                },
                WhitePawn | BlackPawn => {
                    if sq.rank() == Rank::R1 || sq.rank() == Rank::R8 {
                        return Err(Error::InvalidPawnRank);
                    }
                },
                _ => { },
            }
        }

        let king_square = match kings {
            [Some(white), Some(black)] => [white, black],
            _ => return Err(Error::InvalidKingCount),
        };

        for &(right, king, king_home, rook_home) in &[
            (CastlingRights::WHITE_SHORT, WhiteKing, E1, H1),
            (CastlingRights::WHITE_LONG, WhiteKing, E1, A1),
            (CastlingRights::BLACK_SHORT, BlackKing, E8, H8),
            (CastlingRights::BLACK_LONG, BlackKing, E8, A8),
        ] {
            let rook = match king {
                WhiteKing => WhiteRook,
                _ => BlackRook,
            };

            if castling_rights.contains(right)
                && (squares[king_home as usize] != king || squares[rook_home as usize] != rook)
            {
                return Err(Error::InvalidCastlingFlags);
            }
        }

        if let Some(file) = en_passant_file {
            // the opponent's pawn has just advanced two squares through an
            // empty wake
            let (victim_rank, skipped_rank, origin_rank) = match turn {
                White => (Rank::R5, Rank::R6, Rank::R7),
                Black => (Rank::R4, Rank::R3, Rank::R2),
            };

            if squares[Square::from_coord(file, victim_rank) as usize]
                != PieceCode::new(!turn, Pawn)
            {
                return Err(Error::MissingEnPassantPawn);
            }
            for &rank in &[skipped_rank, origin_rank] {
                if !squares[Square::from_coord(file, rank) as usize].is_empty() {
                    return Err(Error::EnPassantSquareOccupied);
                }
            }
        }

        let mut pos = Position {
            squares,
            king_square,
            turn,
            castling_rights,
            en_passant_file,
            zobrist: Zobrist::new(),
            undo_stack: Vec::new(),
        };

        if pos.square_attacked_by(pos.king_square(!turn), turn) {
            return Err(Error::KingCapturable);
        }
        pos.calc_zobrist();

        Ok(pos)
    }

    /// Returns the color whose turn it is.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the contents of the given square.
    pub fn piece_on(&self, sq: Square) -> PieceCode {
        self.squares[sq as usize]
    }

    /// Returns the square where the king of the given color is located.
    pub fn king_square(&self, color: Color) -> Square {
        self.king_square[color as usize]
    }

    /// Returns the retained castling rights.
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Returns the file of the pawn that has just advanced two squares, if
    /// any.
    pub fn en_passant_file(&self) -> Option<File> {
        self.en_passant_file
    }

    /// Returns the position's Zobrist key.
    pub fn zobrist(&self) -> Zobrist {
        self.zobrist
    }

    /// Returns the number of applied moves available to
    /// [`undo`](#method.undo).
    pub fn applied_moves(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns `true` if the king of the given color is attacked.
    pub fn in_check(&self, color: Color) -> bool {
        self.square_attacked_by(self.king_square(color), !color)
    }

    /// Returns `true` if either side retains enough material to ever deliver
    /// checkmate.
    ///
    /// Any pawn, rook or queen suffices. Otherwise a side needs two bishops,
    /// a bishop and a knight, or three knights; two knights are only enough
    /// when the opponent has a minor piece that could shut in his own king.
    pub fn sufficient_material(&self) -> bool {
        let mut knights = [0; Color::COUNT];
        let mut bishops = [0; Color::COUNT];

        for sq in Square::iter() {
            let color = match self.squares[sq as usize].color() {
                Some(color) => color as usize,
                None => continue,
            };

            match self.squares[sq as usize].piece() {
                Some(Pawn) | Some(Rook) | Some(Queen) => return true,
                Some(Knight) => knights[color] += 1,
                Some(Bishop) => bishops[color] += 1,
                _ => { },
            }
        }

        for &color in &[White, Black] {
            let (own, other) = (color as usize, !color as usize);

            if bishops[own] >= 2
                || (bishops[own] >= 1 && knights[own] >= 1)
                || knights[own] >= 3
                || (knights[own] >= 2 && knights[other] + bishops[other] >= 1)
            {
                return true;
            }
        }

        false
    }

    /// Applies to this position a move generated from it, updating the
    /// board, the castling and en-passant state, the side to move and the
    /// hash, all in place.
    ///
    /// The move and the prior hash are pushed onto an internal stack so that
    /// [`undo`](#method.undo) can reverse the move exactly.
    ///
    /// # Panics
    /// In debug builds, panics if `mv` was not generated from this position
    /// (the moved piece or the recorded prior state disagree with the
    /// board).
    pub fn apply(&mut self, mv: &Move) {
        debug_assert_eq!(self.squares[mv.orig as usize], mv.piece);
        debug_assert_eq!(self.castling_rights, mv.rights_before);
        debug_assert_eq!(self.en_passant_file, mv.ep_before);

        self.undo_stack.push((*mv, self.zobrist));

        if let Some((sq, _)) = mv.capture {
            self.put(sq, Empty);
        }
        let landed = match mv.promotion {
            Some(prom) => PieceCode::new(self.turn, prom.into()),
            None => mv.piece,
        };
        self.put(mv.orig, Empty);
        self.put(mv.dest, landed);
        if let Some((rook_orig, rook_dest)) = mv.castling_rook {
            self.put(rook_orig, Empty);
            self.put(rook_dest, PieceCode::new(self.turn, Rook));
        }
        if mv.piece.piece() == Some(King) {
            self.king_square[self.turn as usize] = mv.dest;
        }

        self.zobrist.toggle_castling(self.castling_rights);
        self.zobrist.toggle_castling(mv.rights_after);
        self.castling_rights = mv.rights_after;

        self.zobrist.toggle_en_passant(self.en_passant_file);
        self.zobrist.toggle_en_passant(mv.ep_after);
        self.en_passant_file = mv.ep_after;

        self.zobrist.toggle_turn(self.turn);
        self.turn = !self.turn;
        self.zobrist.toggle_turn(self.turn);
    }

    /// Reverses the most recently applied move, restoring every field of the
    /// prior position, and returns the move.
    ///
    /// The hash is restored from the undo record rather than recomputed.
    ///
    /// # Panics
    /// Panics if no applied move remains; [`applied_moves`](#method.applied_moves)
    /// gives the number available.
    pub fn undo(&mut self) -> Move {
        let (mv, zobrist) = match self.undo_stack.pop() {
            Some(record) => record,
            None => panic!("undo without an applied move"),
        };

        self.turn = !self.turn;
        self.squares[mv.dest as usize] = Empty;
        if let Some((sq, code)) = mv.capture {
            self.squares[sq as usize] = code;
        }
        self.squares[mv.orig as usize] = mv.piece;
        if let Some((rook_orig, rook_dest)) = mv.castling_rook {
            self.squares[rook_dest as usize] = Empty;
            self.squares[rook_orig as usize] = PieceCode::new(self.turn, Rook);
        }
        if mv.piece.piece() == Some(King) {
            self.king_square[self.turn as usize] = mv.orig;
        }
        self.castling_rights = mv.rights_before;
        self.en_passant_file = mv.ep_before;
        self.zobrist = zobrist;

        mv
    }

    /// Writes a slot and keeps the hash in step. The key for an empty slot
    /// is zero, so the old and new contents can both be toggled without an
    /// occupancy check.
    fn put(&mut self, sq: Square, code: PieceCode) {
        self.zobrist.toggle_piece(sq, self.squares[sq as usize]);
        self.zobrist.toggle_piece(sq, code);
        self.squares[sq as usize] = code;
    }

    /// Computes the hash from scratch. Used at construction only; applying
    /// and reversing moves updates the hash incrementally.
    fn calc_zobrist(&mut self) {
        let mut key = Zobrist::new();

        for sq in Square::iter() {
            key.toggle_piece(sq, self.squares[sq as usize]);
        }
        key.toggle_castling(self.castling_rights);
        key.toggle_en_passant(self.en_passant_file);
        key.toggle_turn(self.turn);

        self.zobrist = key;
    }
}

impl Default for Position {
    /// Returns the standard starting Position.
    fn default() -> Self {
        Position::new()
    }
}

impl PartialEq for Position {
    /// Positions compare by their observable state: piece placement, side to
    /// move, castling rights and en-passant file. The history of applied
    /// moves is not part of the comparison.
    fn eq(&self, other: &Position) -> bool {
        self.squares[..] == other.squares[..]
            && self.turn == other.turn
            && self.castling_rights == other.castling_rights
            && self.en_passant_file == other.en_passant_file
    }
}

impl Eq for Position { }

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod zobrist;
mod attacks;
mod movegen;

pub use zobrist::Zobrist;
