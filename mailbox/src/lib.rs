//! A mailbox chess position core.
//!
//! Maintains a mutable 64-slot board state, generates fully-legal moves
//! (check, pin, double check, castling, en passant and promotion rules),
//! and applies or reverses moves in place while keeping an incrementally
//! updated Zobrist hash of the position.
//!
//! The crate deliberately has no textual interface: positions are built
//! from typed parts and moves are opaque values read through accessors.
//! Notation belongs to the caller.
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::convert::TryFrom;
use std::fmt;
use std::mem;

pub mod error;
pub mod moves;
pub mod position;
mod tables;

pub use error::{Error, Result};
pub use moves::{Move, Promotion};
pub use position::{CastlingRights, Position, Zobrist};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The color of the players or pieces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// The player who moves first
    White,
    /// The player who moves second
    Black,
}
pub use Color::*;

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        match self {
            White => Black,
            Black => White,
        }
    }
}

impl Default for Color {
    fn default() -> Color {
        White
    }
}

impl TryFrom<usize> for Color {
    type Error = Error;

    fn try_from(val: usize) -> Result<Color> {
        if val < Color::COUNT {
            Ok(unsafe { mem::transmute(val as u8) })
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The kind of a piece, independent of its color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Piece {
    /// A pawn
    Pawn,
    /// A knight
    Knight,
    /// A bishop
    Bishop,
    /// A rook
    Rook,
    /// A queen
    Queen,
    /// A king
    King,
}
pub use Piece::*;

impl Piece {
    /// The number of piece kinds
    pub const COUNT: usize = 6;

    /// Returns `true` for the pieces that attack along blockable rays
    /// (bishop, rook and queen).
    pub fn is_slider(self) -> bool {
        match self {
            Bishop | Rook | Queen => true,
            Pawn | Knight | King => false,
        }
    }
}

impl Default for Piece {
    fn default() -> Piece {
        Pawn
    }
}

impl TryFrom<usize> for Piece {
    type Error = Error;

    fn try_from(val: usize) -> Result<Piece> {
        if val < Piece::COUNT {
            Ok(unsafe { mem::transmute(val as u8) })
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The contents of one board slot: empty, or a piece of a particular color.
///
/// The numeric values are part of the data model — they index the Zobrist
/// key tables — so they are fixed: 0 is empty, 1–6 are the white pieces in
/// the order of [`Piece`], 7–12 the black pieces in the same order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceCode {
    /// No piece
    Empty = 0,
    /// A white pawn
    WhitePawn = 1,
    /// A white knight
    WhiteKnight = 2,
    /// A white bishop
    WhiteBishop = 3,
    /// A white rook
    WhiteRook = 4,
    /// A white queen
    WhiteQueen = 5,
    /// The white king
    WhiteKing = 6,
    /// A black pawn
    BlackPawn = 7,
    /// A black knight
    BlackKnight = 8,
    /// A black bishop
    BlackBishop = 9,
    /// A black rook
    BlackRook = 10,
    /// A black queen
    BlackQueen = 11,
    /// The black king
    BlackKing = 12,
}

impl PieceCode {
    /// The number of distinct slot values
    pub const COUNT: usize = 13;

    /// The code for a piece of the given color and kind.
    ///
    /// # Examples
    /// ```
    /// use mailbox::{Color, Piece, PieceCode};
    ///
    /// assert_eq!(PieceCode::new(Color::White, Piece::Pawn), PieceCode::WhitePawn);
    /// assert_eq!(PieceCode::new(Color::Black, Piece::King), PieceCode::BlackKing);
    /// ```
    pub fn new(color: Color, piece: Piece) -> PieceCode {
        let val = 1 + color as u8 * Piece::COUNT as u8 + piece as u8;

        unsafe { mem::transmute(val) }
    }

    /// Returns `true` if the slot holds no piece.
    pub fn is_empty(self) -> bool {
        self == PieceCode::Empty
    }

    /// The color of the piece, or `None` for an empty slot.
    pub fn color(self) -> Option<Color> {
        match self as u8 {
            0 => None,
            1..=6 => Some(White),
            _ => Some(Black),
        }
    }

    /// The kind of the piece, or `None` for an empty slot.
    pub fn piece(self) -> Option<Piece> {
        if self.is_empty() {
            None
        } else {
            let val = (self as u8 - 1) % Piece::COUNT as u8;

            Some(unsafe { mem::transmute(val) })
        }
    }

    /// Returns `true` if the slot holds a piece of the given color.
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }
}

impl Default for PieceCode {
    fn default() -> PieceCode {
        PieceCode::Empty
    }
}

impl TryFrom<usize> for PieceCode {
    type Error = Error;

    fn try_from(val: usize) -> Result<PieceCode> {
        if val < PieceCode::COUNT {
            Ok(unsafe { mem::transmute(val as u8) })
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A file (column) of the chess board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A, B, C, D, E, F, G, H,
}

impl File {
    /// The number of files
    pub const COUNT: usize = 8;
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

impl TryFrom<usize> for File {
    type Error = Error;

    fn try_from(val: usize) -> Result<File> {
        if val < File::COUNT {
            Ok(unsafe { mem::transmute(val as u8) })
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A rank (row) of the chess board. `R1` is white's back rank.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1, R2, R3, R4, R5, R6, R7, R8,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = 8;
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'1' + *self as u8) as char)
    }
}

impl TryFrom<usize> for Rank {
    type Error = Error;

    fn try_from(val: usize) -> Result<Rank> {
        if val < Rank::COUNT {
            Ok(unsafe { mem::transmute(val as u8) })
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A square of the chess board.
///
/// Squares are numbered rank-major starting from black's back rank, so that
/// `a8 = 0`, `h8 = 7`, `a7 = 8` and `h1 = 63`. Every lookup table in this
/// crate is generated under this same numbering; the board array, the
/// tables and the Zobrist keys all agree on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Square {
    A8 = 0o00, B8 = 0o01, C8 = 0o02, D8 = 0o03, E8 = 0o04, F8 = 0o05, G8 = 0o06, H8 = 0o07,
    A7 = 0o10, B7 = 0o11, C7 = 0o12, D7 = 0o13, E7 = 0o14, F7 = 0o15, G7 = 0o16, H7 = 0o17,
    A6 = 0o20, B6 = 0o21, C6 = 0o22, D6 = 0o23, E6 = 0o24, F6 = 0o25, G6 = 0o26, H6 = 0o27,
    A5 = 0o30, B5 = 0o31, C5 = 0o32, D5 = 0o33, E5 = 0o34, F5 = 0o35, G5 = 0o36, H5 = 0o37,
    A4 = 0o40, B4 = 0o41, C4 = 0o42, D4 = 0o43, E4 = 0o44, F4 = 0o45, G4 = 0o46, H4 = 0o47,
    A3 = 0o50, B3 = 0o51, C3 = 0o52, D3 = 0o53, E3 = 0o54, F3 = 0o55, G3 = 0o56, H3 = 0o57,
    A2 = 0o60, B2 = 0o61, C2 = 0o62, D2 = 0o63, E2 = 0o64, F2 = 0o65, G2 = 0o66, H2 = 0o67,
    A1 = 0o70, B1 = 0o71, C1 = 0o72, D1 = 0o73, E1 = 0o74, F1 = 0o75, G1 = 0o76, H1 = 0o77,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = 64;

    /// The square at the intersection of `file` and `rank`.
    ///
    /// # Examples
    /// ```
    /// use mailbox::{File, Rank, Square};
    ///
    /// assert_eq!(Square::from_coord(File::E, Rank::R1), Square::E1);
    /// assert_eq!(Square::from_coord(File::A, Rank::R8), Square::A8);
    /// ```
    pub fn from_coord(file: File, rank: Rank) -> Square {
        let val = (7 - rank as u8) * 8 + file as u8;

        unsafe { mem::transmute(val) }
    }

    /// The file of this square.
    pub fn file(self) -> File {
        unsafe { mem::transmute(self as u8 & 7) }
    }

    /// The rank of this square.
    pub fn rank(self) -> Rank {
        unsafe { mem::transmute(7 - (self as u8 >> 3)) }
    }

    /// An iterator over all squares in index order (`a8` first, `h1` last).
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..Self::COUNT as u8).map(|val| unsafe { mem::transmute(val) })
    }
}

impl Default for Square {
    fn default() -> Square {
        Square::A8
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl TryFrom<usize> for Square {
    type Error = Error;

    fn try_from(val: usize) -> Result<Square> {
        if val < Square::COUNT {
            Ok(unsafe { mem::transmute(val as u8) })
        } else {
            Err(Error::TryFromIntError)
        }
    }
}
