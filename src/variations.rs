//! Counting and printing the variations from a given position
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use mailbox::Position;
use crate::{coord, fen};

/// Prints the number of variations of the given `depth` for each legal move
/// from `pos`, along with the position each move leads to, and returns the
/// total.
///
/// The position is mutated in place while counting but restored before
/// returning.
pub fn print(pos: &mut Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;

    for mv in pos.legal_moves() {
        pos.apply(&mv);
        let count = count(pos, depth - 1);
        total += count;
        println!("\t{:7}\t{:12}\t{}", coord::format(&mv), count, fen::format(pos));
        pos.undo();
    }

    total
}

/// Counts the number of variations of the given `depth` from `pos`.
///
/// Each move is applied in place and undone once its subtree has been
/// counted, so the position is restored before returning.
pub fn count(pos: &mut Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }
    if depth == 1 {
        return pos.legal_moves().len();
    }

    let mut total = 0;

    for mv in pos.legal_moves() {
        pos.apply(&mv);
        total += count(pos, depth - 1);
        pos.undo();
    }

    total
}

/// Counts like [`count`], but additionally asserts at every node that no
/// move leaves its own side in check and that undoing a move restores the
/// position and its hash exactly.
///
/// Much slower than [`count`]; meant for validating changes to move
/// generation and execution against known variation counts.
pub fn count_checked(pos: &mut Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;
    let before = pos.clone();

    for mv in pos.legal_moves() {
        pos.apply(&mv);
        assert!(
            !pos.in_check(!pos.turn()),
            "{} leaves the mover in check in {}",
            coord::format(&mv),
            fen::format(&before),
        );
        total += count_checked(pos, depth - 1);
        pos.undo();
        assert_eq!(*pos, before, "{} does not undo cleanly", coord::format(&mv));
        assert_eq!(
            pos.zobrist(),
            before.zobrist(),
            "{} does not restore the hash",
            coord::format(&mv),
        );
    }

    total
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen;

    #[test]
    fn depth_zero_is_a_single_variation() {
        assert_eq!(count(&mut Position::new(), 0), 1);
    }

    #[test]
    fn counts_match_the_known_opening_values() {
        let mut pos = Position::new();

        assert_eq!(count(&mut pos, 1), 20);
        assert_eq!(count(&mut pos, 2), 400);
        assert_eq!(count(&mut pos, 3), 8902);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn checked_counts_agree_and_pass_their_assertions() {
        let mut pos = Position::new();
        assert_eq!(count_checked(&mut pos, 3), 8902);

        let mut pos = fen::parse(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("valid fen");
        assert_eq!(count_checked(&mut pos, 2), 2039);
    }
}
