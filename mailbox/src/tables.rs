//! Static per-square lookup tables for move generation and threat detection
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
//
//  Every table is generated under the crate's one square numbering (a8 = 0,
//  rank-major, see `Square`). Rays are ordered outward from the origin;
//  consumers stop a ray at the first occupied square.
//
use std::convert::TryFrom;
use lazy_static::lazy_static;
use log::debug;
use crate::{Black, Color, Piece, Rank, Square, White};
use crate::Piece::*;

/// Direction indexes into the per-square ray table. "North" points toward
/// black's back rank (decreasing square index).
pub const NORTH: usize = 0;
#[allow(missing_docs)]
pub const EAST: usize = 1;
#[allow(missing_docs)]
pub const SOUTH: usize = 2;
#[allow(missing_docs)]
pub const WEST: usize = 3;
#[allow(missing_docs)]
pub const NORTH_EAST: usize = 4;
#[allow(missing_docs)]
pub const SOUTH_EAST: usize = 5;
#[allow(missing_docs)]
pub const SOUTH_WEST: usize = 6;
#[allow(missing_docs)]
pub const NORTH_WEST: usize = 7;

/// The number of ray directions.
pub const DIRECTION_COUNT: usize = 8;

/// (row, column) delta per direction, in the board's index space where row 0
/// is rank 8.
const DELTAS: [(i8, i8); DIRECTION_COUNT] = [
    (-1, 0), (0, 1), (1, 0), (0, -1),
    (-1, 1), (1, 1), (1, -1), (-1, -1),
];

const ORTHOGONAL: [usize; 4] = [NORTH, EAST, SOUTH, WEST];
const DIAGONAL: [usize; 4] = [NORTH_EAST, SOUTH_EAST, SOUTH_WEST, NORTH_WEST];
const ALL_DIRECTIONS: [usize; 8] = [
    NORTH, EAST, SOUTH, WEST, NORTH_EAST, SOUTH_EAST, SOUTH_WEST, NORTH_WEST,
];

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, 2), (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2),
];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A set of piece kinds, used to classify which pieces attack along a
/// direction at a given distance.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PieceSet(u8);

impl PieceSet {
    const fn empty() -> PieceSet {
        PieceSet(0)
    }

    const fn with(self, piece: Piece) -> PieceSet {
        PieceSet(self.0 | 1 << piece as u8)
    }

    /// Returns `true` if `piece` is in the set.
    pub fn contains(self, piece: Piece) -> bool {
        self.0 & 1 << piece as u8 != 0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Fixed per-side pawn parameters. `forward` is the row delta of a pawn
/// advance (rows grow toward white's side).
#[derive(Debug)]
pub struct PawnData {
    /// Row delta of a single advance
    pub forward: i8,
    /// The rank a double advance may start from
    pub home_rank: Rank,
    /// The rank a pawn promotes on
    pub promotion_rank: Rank,
    /// The rank a pawn must stand on to capture en passant
    pub ep_rank: Rank,
}

const PAWN_DATA: [PawnData; Color::COUNT] = [
    PawnData { forward: -1, home_rank: Rank::R2, promotion_rank: Rank::R8, ep_rank: Rank::R5 },
    PawnData { forward: 1, home_rank: Rank::R7, promotion_rank: Rank::R1, ep_rank: Rank::R4 },
];

/// The fixed pawn parameters for `color`.
pub fn pawn(color: Color) -> &'static PawnData {
    &PAWN_DATA[color as usize]
}

////////////////////////////////////////////////////////////////////////////////////////////////////
struct Tables {
    /// Outward square lists per origin and direction
    rays: Vec<[Vec<Square>; DIRECTION_COUNT]>,
    /// Knight destinations per origin
    knight: Vec<Vec<Square>>,
    /// King destinations per origin
    king: Vec<Vec<Square>>,
    /// Squares a pawn of the given color attacks, per origin
    pawn_attacks: [Vec<Vec<Square>>; Color::COUNT],
    /// Which piece kinds of the given color attack along a direction, split
    /// into adjacent (distance 1) and longer-range sets
    attackers: [[[PieceSet; 2]; DIRECTION_COUNT]; Color::COUNT],
    /// Squares strictly between two squares on a shared line (empty when the
    /// squares share no line or are adjacent)
    between: Vec<Vec<Vec<Square>>>,
    /// The ray direction leading from one square to another, if they share a
    /// line
    line: Vec<Vec<Option<usize>>>,
}

lazy_static! {
    static ref TABLES: Tables = Tables::new();
}

impl Tables {
    fn new() -> Tables {
        let mut rays = Vec::with_capacity(Square::COUNT);
        let mut knight = Vec::with_capacity(Square::COUNT);
        let mut king = Vec::with_capacity(Square::COUNT);
        let mut white_pawn = Vec::with_capacity(Square::COUNT);
        let mut black_pawn = Vec::with_capacity(Square::COUNT);
        let mut between = vec![vec![Vec::new(); Square::COUNT]; Square::COUNT];
        let mut line = vec![vec![None; Square::COUNT]; Square::COUNT];

        for orig in Square::iter() {
            let mut square_rays: [Vec<Square>; DIRECTION_COUNT] = Default::default();
            for (dir, &(dr, dc)) in DELTAS.iter().enumerate() {
                let mut sq = orig;
                while let Some(next) = offset(sq, dr, dc) {
                    square_rays[dir].push(next);
                    sq = next;
                }

                for (dist, &dest) in square_rays[dir].iter().enumerate() {
                    line[orig as usize][dest as usize] = Some(dir);
                    between[orig as usize][dest as usize] = square_rays[dir][..dist].to_vec();
                }
            }
            rays.push(square_rays);

            knight.push(destinations(orig, &KNIGHT_DELTAS));
            king.push(destinations(orig, &DELTAS));
            white_pawn.push(destinations(orig, &[(-1, -1), (-1, 1)]));
            black_pawn.push(destinations(orig, &[(1, -1), (1, 1)]));
        }

        let mut attackers = [[[PieceSet::empty(); 2]; DIRECTION_COUNT]; Color::COUNT];
        for &color in &[White, Black] {
            for &dir in &ORTHOGONAL {
                attackers[color as usize][dir][0] =
                    PieceSet::empty().with(Rook).with(Queen).with(King);
                attackers[color as usize][dir][1] = PieceSet::empty().with(Rook).with(Queen);
            }
            for &dir in &DIAGONAL {
                attackers[color as usize][dir][0] =
                    PieceSet::empty().with(Bishop).with(Queen).with(King);
                attackers[color as usize][dir][1] = PieceSet::empty().with(Bishop).with(Queen);
            }
        }
        // A pawn's threat is adjacency-only and points away from its own
        // side: scanning south-ish from a square finds white pawns, north-ish
        // finds black pawns.
        for &dir in &[SOUTH_EAST, SOUTH_WEST] {
            attackers[White as usize][dir][0] = attackers[White as usize][dir][0].with(Pawn);
        }
        for &dir in &[NORTH_EAST, NORTH_WEST] {
            attackers[Black as usize][dir][0] = attackers[Black as usize][dir][0].with(Pawn);
        }

        debug!("static move tables initialized");

        Tables { rays, knight, king, pawn_attacks: [white_pawn, black_pawn], attackers, between, line }
    }
}

fn destinations(orig: Square, deltas: &[(i8, i8)]) -> Vec<Square> {
    deltas.iter().filter_map(|&(dr, dc)| offset(orig, dr, dc)).collect()
}

fn offset(sq: Square, dr: i8, dc: i8) -> Option<Square> {
    let row = (sq as usize / 8) as i8 + dr;
    let col = (sq as usize % 8) as i8 + dc;

    if (0..8).contains(&row) && (0..8).contains(&col) {
        Square::try_from((row * 8 + col) as usize).ok()
    } else {
        None
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The ordered outward squares from `orig` in direction `dir`.
pub fn ray(orig: Square, dir: usize) -> &'static [Square] {
    &TABLES.rays[orig as usize][dir]
}

/// The directions `piece` slides in; empty for non-sliders.
pub fn slider_directions(piece: Piece) -> &'static [usize] {
    match piece {
        Bishop => &DIAGONAL,
        Rook => &ORTHOGONAL,
        Queen => &ALL_DIRECTIONS,
        Pawn | Knight | King => &[],
    }
}

/// The knight destinations from `orig`.
pub fn knight_moves(orig: Square) -> &'static [Square] {
    &TABLES.knight[orig as usize]
}

/// The king destinations from `orig`.
pub fn king_moves(orig: Square) -> &'static [Square] {
    &TABLES.king[orig as usize]
}

/// The squares a pawn of `color` on `orig` attacks.
pub fn pawn_attacks(color: Color, orig: Square) -> &'static [Square] {
    &TABLES.pawn_attacks[color as usize][orig as usize]
}

/// The square directly in front of a pawn of `color` on `orig`, if any.
pub fn pawn_advance(color: Color, orig: Square) -> Option<Square> {
    offset(orig, PAWN_DATA[color as usize].forward, 0)
}

/// The piece kinds of `color` that attack along `dir`, with `adjacent`
/// selecting the distance-1 set (which adds king and, on the matching
/// diagonals, pawn).
pub fn attacker_set(color: Color, dir: usize, adjacent: bool) -> PieceSet {
    TABLES.attackers[color as usize][dir][if adjacent { 0 } else { 1 }]
}

/// The squares strictly between `a` and `b`, outward from `a`; empty when
/// the two squares share no line or are adjacent.
pub fn between(a: Square, b: Square) -> &'static [Square] {
    &TABLES.between[a as usize][b as usize]
}

/// The ray direction leading from `a` to `b`, if the squares share a line.
pub fn line_direction(a: Square, b: Square) -> Option<usize> {
    TABLES.line[a as usize][b as usize]
}
