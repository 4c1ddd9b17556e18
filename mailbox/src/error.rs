//! Defines the error types used throughout the crate
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by fallible operations in this crate, and by notation
/// front ends built on top of it.
///
/// Inside this crate only position construction and the integer conversions
/// are fallible. Contract violations at the apply/undo boundary are bugs in
/// the caller and panic instead (see [`Position`](crate::Position)).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot parse string
    ParseError,
    /// Failed to convert an integer to another type
    TryFromIntError,
    /// Well-formed move that is not legal in the position
    IllegalMove,
    /// Missing king or multiple kings of the same color
    InvalidKingCount,
    /// Pawn on the first or last rank
    InvalidPawnRank,
    /// Castling flags aren't valid for this arrangement
    InvalidCastlingFlags,
    /// En-passant file without a capturable pawn
    MissingEnPassantPawn,
    /// En-passant target or origin square is occupied
    EnPassantSquareOccupied,
    /// The side not on move is in check
    KingCapturable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseError => "cannot parse string",
            TryFromIntError => "integer out of range",
            IllegalMove => "illegal move",
            InvalidKingCount => "missing king or multiple kings of the same color",
            InvalidPawnRank => "pawn on the first or last rank",
            InvalidCastlingFlags => "castling flags aren't valid for this arrangement",
            MissingEnPassantPawn => "en-passant file without a capturable pawn",
            EnPassantSquareOccupied => "en-passant target or origin square is occupied",
            KingCapturable => "king is under attack on opponent's move",
        }.fmt(f)
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
