//! Playing games of uniformly random legal moves
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashMap;
use std::fmt;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use mailbox::{Color, Position};
use crate::{coord, fen};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// How a random walk came to an end.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The named side is mated: it is to move, has no moves, and is in check
    Checkmate(Color),
    /// The side to move has no moves but is not in check
    Stalemate,
    /// The same arrangement with the same side to move occurred a third time
    Repetition,
    /// Neither side retains force that could deliver mate
    InsufficientMaterial,
    /// The walk hit its ply limit with the game still going
    PlyLimit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate(Color::White) => "checkmate, white is mated",
            Outcome::Checkmate(Color::Black) => "checkmate, black is mated",
            Outcome::Stalemate => "stalemate",
            Outcome::Repetition => "draw by threefold repetition",
            Outcome::InsufficientMaterial => "draw by insufficient material",
            Outcome::PlyLimit => "ply limit reached",
        }.fmt(f)
    }
}

/// Plays uniformly random legal moves on `pos` until the game ends or
/// `max_plies` moves have been played, and reports how it ended.
///
/// The moves stay applied: the caller can inspect the final arrangement and
/// its whole history through the position itself. Repetition bookkeeping is
/// keyed on the position hash and lives entirely in this function; the
/// walked-from arrangement counts as the first occurrence of itself.
pub fn play<R: Rng>(pos: &mut Position, rng: &mut R, max_plies: u32) -> Outcome {
    let mut visits: HashMap<u64, u32> = HashMap::new();
    visits.insert(pos.zobrist().into(), 1);

    for ply in 0..max_plies {
        let moves = pos.legal_moves();
        let mv = match moves.choose(rng) {
            Some(mv) => *mv,
            None if pos.in_check(pos.turn()) => return Outcome::Checkmate(pos.turn()),
            None => return Outcome::Stalemate,
        };

        pos.apply(&mv);
        debug!("ply {}: {}  {}", ply + 1, coord::format(&mv), fen::format(pos));

        if !pos.sufficient_material() {
            return Outcome::InsufficientMaterial;
        }

        let seen = visits.entry(pos.zobrist().into()).or_insert(0);
        *seen += 1;
        if *seen >= 3 {
            return Outcome::Repetition;
        }
    }

    Outcome::PlyLimit
}
