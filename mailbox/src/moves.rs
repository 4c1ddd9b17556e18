//! Contains the structures that represent a move and everything needed to reverse it
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::mem;
use crate::{CastlingRights, File, Piece, PieceCode, Square};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which piece to promote to for a promotion move
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Promotion {
    ToKnight = 1,
    ToBishop = 2,
    ToRook = 3,
    ToQueen = 4,
}

impl Default for Promotion {
    fn default() -> Self {
        Promotion::ToQueen
    }
}

impl From<Promotion> for Piece {
    fn from(prom: Promotion) -> Self {
        unsafe { mem::transmute::<Promotion, Piece>(prom) }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A legal move, recorded with everything needed to reverse it.
///
/// Moves are produced by [`Position::legal_moves`](crate::Position::legal_moves)
/// and are self-describing: besides the origin and destination they carry the
/// moved piece, any captured piece and the square it stood on (which for en
/// passant is not the destination), the promotion if any, the paired rook
/// relocation for castling, and the castling-rights and en-passant values both
/// before and after the move. A move therefore only makes sense for the
/// position it was generated from, and
/// [`Position::undo`](crate::Position::undo) can restore that position without
/// recomputing anything.
///
/// Moves have no textual form here; notation belongs to the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Move {
    pub (crate) piece: PieceCode,
    pub (crate) orig: Square,
    pub (crate) dest: Square,
    pub (crate) capture: Option<(Square, PieceCode)>,
    pub (crate) promotion: Option<Promotion>,
    pub (crate) castling_rook: Option<(Square, Square)>,
    pub (crate) rights_before: CastlingRights,
    pub (crate) rights_after: CastlingRights,
    pub (crate) ep_before: Option<File>,
    pub (crate) ep_after: Option<File>,
}

impl Move {
    /// Returns the piece to be moved.
    pub fn piece(&self) -> PieceCode {
        self.piece
    }

    /// Returns the origin square.
    pub fn origin(&self) -> Square {
        self.orig
    }

    /// Returns the destination square.
    pub fn destination(&self) -> Square {
        self.dest
    }

    /// Returns the piece to be captured, if any.
    pub fn captured(&self) -> Option<PieceCode> {
        self.capture.map(|(_, code)| code)
    }

    /// Returns the square of the piece to be captured, if any.
    ///
    /// This is the destination square except for en-passant captures, where
    /// the captured pawn stands beside the destination.
    pub fn capture_square(&self) -> Option<Square> {
        self.capture.map(|(sq, _)| sq)
    }

    /// Returns the piece to promote to, if the move is a promotion.
    pub fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }

    /// Returns the origin and destination of the paired rook, if the move is
    /// a castling move.
    pub fn castling_rook(&self) -> Option<(Square, Square)> {
        self.castling_rook
    }

    /// Returns the castling rights before the move.
    pub fn castling_rights_before(&self) -> CastlingRights {
        self.rights_before
    }

    /// Returns the castling rights after the move.
    pub fn castling_rights_after(&self) -> CastlingRights {
        self.rights_after
    }

    /// Returns the en-passant file before the move.
    pub fn en_passant_before(&self) -> Option<File> {
        self.ep_before
    }

    /// Returns the en-passant file after the move.
    ///
    /// This is `Some` exactly when the move is a double pawn advance.
    pub fn en_passant_after(&self) -> Option<File> {
        self.ep_after
    }

    /// Returns `true` if the move captures a piece.
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Returns `true` if the move is a castling move.
    pub fn is_castling(&self) -> bool {
        self.castling_rook.is_some()
    }

    /// Returns `true` if the move is an en-passant capture.
    pub fn is_en_passant(&self) -> bool {
        match self.capture {
            Some((sq, _)) => sq != self.dest,
            None => false,
        }
    }
}
