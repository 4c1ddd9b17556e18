//! Contains the structure and key tables for Zobrist hashing
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use lazy_static::lazy_static;
use log::debug;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use crate::{CastlingRights, Color, File, PieceCode, Square};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A 64-bit hash key generated from a position
///
/// The key is a pure function of the observable position: piece placement,
/// castling rights, en-passant file and side to move. It is updated
/// incrementally as moves are applied, so equal keys identify repeated
/// positions without comparing boards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Zobrist(u64);

impl Zobrist {
    /// Creates a new zobrist key
    pub fn new() -> Zobrist {
        Zobrist(0)
    }

    /// Toggles a piece code on a square. Toggling `PieceCode::Empty` is a
    /// no-op, so callers can toggle a slot's old and new contents without
    /// checking for occupancy.
    pub (crate) fn toggle_piece(&mut self, sq: Square, code: PieceCode) {
        self.0 ^= KEYS.piece[sq as usize][code as usize];
    }

    /// Toggles a castling-rights value
    pub (crate) fn toggle_castling(&mut self, rights: CastlingRights) {
        self.0 ^= KEYS.castling[rights.index()];
    }

    /// Toggles an en-passant file
    pub (crate) fn toggle_en_passant(&mut self, file: Option<File>) {
        self.0 ^= KEYS.en_passant[en_passant_index(file)];
    }

    /// Toggles whose turn it is
    pub (crate) fn toggle_turn(&mut self, color: Color) {
        self.0 ^= KEYS.turn[color as usize];
    }
}

impl fmt::Display for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::UpperHex for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::LowerHex for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Octal for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Binary for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Zobrist> for u64 {
    /// Allows using the key to get a hash table index
    ///
    /// # Example
    /// ```rust
    /// use mailbox::Position;
    ///
    /// let pos = Position::new();
    /// let hash_table_size: usize = 0x10_0000;
    /// let index = u64::from(pos.zobrist()) as usize & (hash_table_size - 1);
    /// ```
    fn from(key: Zobrist) -> Self {
        key.0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Seed for the key generator. Fixed so that keys, and therefore hashes, are
/// reproducible across runs.
const KEY_SEED: u64 = 21221;

/// One slot per en-passant value: none, then each file.
const EN_PASSANT_KEYS: usize = File::COUNT + 1;

fn en_passant_index(file: Option<File>) -> usize {
    match file {
        None => 0,
        Some(file) => 1 + file as usize,
    }
}

struct Keys {
    piece: [[u64; PieceCode::COUNT]; Square::COUNT],
    castling: [u64; CastlingRights::COUNT],
    en_passant: [u64; EN_PASSANT_KEYS],
    turn: [u64; Color::COUNT],
}

lazy_static! {
    static ref KEYS: Keys = Keys::new();
}

impl Keys {
    fn new() -> Keys {
        let mut rng = StdRng::seed_from_u64(KEY_SEED);
        let mut piece = [[0; PieceCode::COUNT]; Square::COUNT];
        let mut castling = [0; CastlingRights::COUNT];
        let mut en_passant = [0; EN_PASSANT_KEYS];
        let mut turn = [0; Color::COUNT];

        for slot in piece.iter_mut() {
            // the key for an empty slot stays zero
            for key in slot.iter_mut().skip(1) {
                *key = rng.gen();
            }
        }
        for key in castling.iter_mut() {
            *key = rng.gen();
        }
        for key in en_passant.iter_mut() {
            *key = rng.gen();
        }
        for key in turn.iter_mut() {
            *key = rng.gen();
        }

        debug!("zobrist keys initialized from seed {}", KEY_SEED);

        Keys { piece, castling, en_passant, turn }
    }
}
