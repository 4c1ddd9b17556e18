//! Threat detection: which pieces attack which squares
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
//
//  A square is attacked if an enemy piece could capture on it. Each of the
//  eight ray directions is scanned outward to the first occupied square,
//  which attacks if its piece kind belongs to the direction's attacker set
//  (at distance one the set widens to include the king and, on the matching
//  diagonals, pawns). Knight jumps are checked from their own list. Pawn
//  forward moves are not attacks.
//
use super::*;

impl Position {
    /// Returns `true` if `sq` is attacked by any piece of color `c`.
    pub fn square_attacked_by(&self, sq: Square, c: Color) -> bool {
        self.attacked_with_vacancies(sq, c, &[])
    }

    /// Returns the squares of all pieces of color `c` that attack `sq`.
    ///
    /// The length classifies check for the side whose king stands on `sq`:
    /// zero, one (capture, block or flee) or two (the king must move).
    pub fn attackers_of(&self, sq: Square, c: Color) -> Vec<Square> {
        let mut attackers = Vec::new();

        for &orig in tables::knight_moves(sq) {
            if self.squares[orig as usize] == PieceCode::new(c, Knight) {
                attackers.push(orig);
            }
        }
        for dir in 0..tables::DIRECTION_COUNT {
            if let Some(orig) = self.ray_attacker(sq, c, dir, &[]) {
                attackers.push(orig);
            }
        }

        attackers
    }

    /// Like [`square_attacked_by`](#method.square_attacked_by), but with the
    /// listed squares treated as if they were empty: they neither block a
    /// ray nor attack.
    ///
    /// King-move legality vacates the king's own origin, so a slider keeps
    /// attacking along the line the king retreats on. En-passant legality
    /// vacates both pawn squares at once.
    pub (super) fn attacked_with_vacancies(&self, sq: Square, c: Color, vacated: &[Square]) -> bool {
        for &orig in tables::knight_moves(sq) {
            if self.squares[orig as usize] == PieceCode::new(c, Knight)
                && !vacated.contains(&orig)
            {
                return true;
            }
        }

        (0..tables::DIRECTION_COUNT).any(|dir| self.ray_attacker(sq, c, dir, vacated).is_some())
    }

    /// Scans outward from `sq` along `dir` and returns the square of the
    /// first piece met, if that piece belongs to `c` and attacks along this
    /// direction at this distance. Squares in `vacated` are skipped as if
    /// empty.
    pub (super) fn ray_attacker(
        &self,
        sq: Square,
        c: Color,
        dir: usize,
        vacated: &[Square],
    ) -> Option<Square> {
        for (dist, &orig) in tables::ray(sq, dir).iter().enumerate() {
            if vacated.contains(&orig) {
                continue;
            }
            let code = self.squares[orig as usize];
            if code.is_empty() {
                continue;
            }
            if code.is_color(c) && tables::attacker_set(c, dir, dist == 0).contains(code.piece()?) {
                return Some(orig);
            }

            // the first occupied square shadows the rest of the ray
            return None;
        }

        None
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use PieceCode::*;
    use Square::*;

    /// Kings sit in opposite corners, out of the way of the pieces under
    /// test.
    fn arrangement(pieces: &[(Square, PieceCode)]) -> Position {
        let mut squares = [Empty; Square::COUNT];

        squares[A1 as usize] = WhiteKing;
        squares[H8 as usize] = BlackKing;
        for &(sq, code) in pieces {
            squares[sq as usize] = code;
        }

        Position::from_parts(squares, White, CastlingRights::NONE, None).unwrap()
    }

    #[test]
    fn rook_attacks_along_open_lines() {
        let pos = arrangement(&[(E4, WhiteRook)]);

        assert!(pos.square_attacked_by(E8, White));
        assert!(pos.square_attacked_by(E1, White));
        assert!(pos.square_attacked_by(A4, White));
        assert!(pos.square_attacked_by(H4, White));
        assert!(!pos.square_attacked_by(D5, White));
        assert!(!pos.square_attacked_by(F5, White));
    }

    #[test]
    fn blockers_shadow_the_far_side_of_a_ray() {
        let pos = arrangement(&[(E4, WhiteRook), (E6, WhitePawn)]);

        assert!(pos.square_attacked_by(E5, White));
        // the rook defends its own pawn
        assert!(pos.square_attacked_by(E6, White));
        // but nothing reaches past it
        assert!(!pos.square_attacked_by(E7, White));
        assert!(!pos.square_attacked_by(E8, White));
    }

    #[test]
    fn bishop_attacks_diagonals_only() {
        let pos = arrangement(&[(E4, WhiteBishop)]);

        assert!(pos.square_attacked_by(A8, White));
        assert!(pos.square_attacked_by(H7, White));
        assert!(pos.square_attacked_by(H1, White));
        assert!(!pos.square_attacked_by(E8, White));
        assert!(!pos.square_attacked_by(A4, White));
    }

    #[test]
    fn queen_attacks_both_line_types() {
        let pos = arrangement(&[(E4, BlackQueen)]);

        assert!(pos.square_attacked_by(E1, Black));
        assert!(pos.square_attacked_by(B4, Black));
        assert!(pos.square_attacked_by(B7, Black));
        assert!(pos.square_attacked_by(G2, Black));
        assert!(!pos.square_attacked_by(F6, Black));
    }

    #[test]
    fn knight_jumps_ignore_blockers() {
        let pos = arrangement(&[
            (D4, WhiteKnight),
            (C3, WhitePawn), (D3, WhitePawn), (E3, WhitePawn),
            (C5, BlackPawn), (D5, BlackPawn), (E5, BlackPawn),
        ]);

        assert!(pos.square_attacked_by(E6, White));
        assert!(pos.square_attacked_by(C6, White));
        assert!(pos.square_attacked_by(F3, White));
        assert!(pos.square_attacked_by(B3, White));
        assert!(!pos.square_attacked_by(D6, White));
    }

    #[test]
    fn pawns_attack_their_forward_diagonals_only() {
        let pos = arrangement(&[(E4, WhitePawn)]);

        assert!(pos.square_attacked_by(D5, White));
        assert!(pos.square_attacked_by(F5, White));
        assert!(!pos.square_attacked_by(E5, White));
        assert!(!pos.square_attacked_by(D3, White));

        let pos = arrangement(&[(E4, BlackPawn)]);

        assert!(pos.square_attacked_by(D3, Black));
        assert!(pos.square_attacked_by(F3, Black));
        assert!(!pos.square_attacked_by(D5, Black));
        assert!(!pos.square_attacked_by(E3, Black));
    }

    #[test]
    fn kings_attack_adjacent_squares_only() {
        let pos = arrangement(&[]);

        assert!(pos.square_attacked_by(A2, White));
        assert!(pos.square_attacked_by(B2, White));
        assert!(pos.square_attacked_by(B1, White));
        assert!(!pos.square_attacked_by(A3, White));
        assert!(pos.square_attacked_by(G7, Black));
        assert!(!pos.square_attacked_by(F6, Black));
    }

    #[test]
    fn attacks_are_per_color() {
        let pos = arrangement(&[(E4, WhiteRook)]);

        assert!(pos.square_attacked_by(E8, White));
        assert!(!pos.square_attacked_by(E8, Black));
    }

    #[test]
    fn attackers_of_lists_every_attacker() {
        let pos = arrangement(&[
            (E1, WhiteQueen), (D2, WhiteKnight), (D3, WhitePawn), (H1, WhiteBishop),
        ]);
        let mut attackers = pos.attackers_of(E4, White);
        attackers.sort();

        assert_eq!(attackers, [D3, D2, E1, H1]);
        assert!(pos.attackers_of(E4, Black).is_empty());
    }

    #[test]
    fn attackers_of_finds_the_adjacent_king() {
        let pos = arrangement(&[]);

        assert_eq!(pos.attackers_of(B2, White), [A1]);
    }

    #[test]
    fn vacating_a_blocker_extends_the_ray() {
        let pos = arrangement(&[(E4, WhiteRook), (E6, WhitePawn)]);

        assert!(!pos.square_attacked_by(E8, White));
        assert!(pos.attacked_with_vacancies(E8, White, &[E6]));
    }

    #[test]
    fn a_vacated_attacker_no_longer_attacks() {
        let pos = arrangement(&[(E4, WhiteRook)]);

        assert!(pos.square_attacked_by(E8, White));
        assert!(!pos.attacked_with_vacancies(E8, White, &[E4]));
    }

    #[test]
    fn vacating_the_king_keeps_the_retreat_ray_covered() {
        let pos = arrangement(&[(E4, WhiteRook), (E6, BlackRook)]);

        // with e6 gone, e4's rook would attack straight through to e8
        assert!(!pos.square_attacked_by(E7, White));
        assert!(pos.attacked_with_vacancies(E7, White, &[E6]));
    }

    #[test]
    fn in_check_reads_the_king_square() {
        let mut squares = [Empty; Square::COUNT];
        squares[E1 as usize] = WhiteKing;
        squares[A8 as usize] = BlackKing;
        squares[E4 as usize] = BlackRook;
        let pos = Position::from_parts(squares, White, CastlingRights::NONE, None).unwrap();

        assert!(pos.in_check(White));
        assert!(!pos.in_check(Black));
    }
}
