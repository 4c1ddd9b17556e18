//! Candidate move generation and the legality filter
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;
use Promotion::*;

impl Position {
    /// Generates all fully-legal moves for the side to move.
    ///
    /// Every returned move may be passed to [`apply`](#method.apply). An
    /// empty list means the game is over: checkmate if the mover is in
    /// check, stalemate otherwise.
    ///
    /// # Examples
    /// ```rust
    /// use mailbox::Position;
    ///
    /// assert_eq!(Position::new().legal_moves().len(), 20);
    /// ```
    pub fn legal_moves(&self) -> Vec<Move> {
        let king = self.king_square(self.turn);
        let attackers = self.attackers_of(king, !self.turn);
        let mut moves = self.candidate_moves();

        match attackers[..] {
            [] => {
                moves.retain(|mv| self.keeps_king_safe(mv, king));
            },
            [attacker] => {
                // resolve the check: capture the attacker where it stands,
                // block the line (slider checks only), or step away
                let blocks = tables::between(king, attacker);

                moves.retain(|mv| {
                    if mv.piece.piece() == Some(King) {
                        self.king_escapes(mv)
                    } else {
                        (mv.capture_square() == Some(attacker) || blocks.contains(&mv.dest))
                            && self.keeps_king_safe(mv, king)
                    }
                });
            },
            _ => {
                moves.retain(|mv| mv.piece.piece() == Some(King) && self.king_escapes(mv));
            },
        }

        moves
    }

    /// Generates the candidate moves for the side to move: correct movement
    /// and capture geometry, castling included, with legality against check
    /// and pins left to the filter in [`legal_moves`](#method.legal_moves).
    fn candidate_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();

        for orig in Square::iter() {
            let code = self.squares[orig as usize];

            if !code.is_color(self.turn) {
                continue;
            }
            match code.piece() {
                Some(Pawn) => self.pawn_moves(orig, &mut moves),
                Some(Knight) => self.leaper_moves(orig, tables::knight_moves(orig), &mut moves),
                Some(King) => self.leaper_moves(orig, tables::king_moves(orig), &mut moves),
                Some(piece) => self.slider_moves(orig, piece, &mut moves),
                None => unreachable!(),
            }
        }
        self.castling_moves(&mut moves);

        moves
    }

    fn leaper_moves(&self, orig: Square, dests: &[Square], moves: &mut Vec<Move>) {
        let code = self.squares[orig as usize];

        for &dest in dests {
            if !self.squares[dest as usize].is_color(self.turn) {
                moves.push(self.basic(code, orig, dest));
            }
        }
    }

    fn slider_moves(&self, orig: Square, piece: Piece, moves: &mut Vec<Move>) {
        let code = self.squares[orig as usize];

        for &dir in tables::slider_directions(piece) {
            for &dest in tables::ray(orig, dir) {
                let target = self.squares[dest as usize];

                if !target.is_color(self.turn) {
                    moves.push(self.basic(code, orig, dest));
                }
                if !target.is_empty() {
                    break;
                }
            }
        }
    }

    fn pawn_moves(&self, orig: Square, moves: &mut Vec<Move>) {
        let code = self.squares[orig as usize];
        let data = tables::pawn(self.turn);

        if let Some(one) = tables::pawn_advance(self.turn, orig) {
            if self.squares[one as usize].is_empty() {
                self.push_pawn_move(self.basic(code, orig, one), moves);

                if orig.rank() == data.home_rank {
                    if let Some(two) = tables::pawn_advance(self.turn, one) {
                        if self.squares[two as usize].is_empty() {
                            moves.push(Move {
                                ep_after: Some(orig.file()),
                                ..self.basic(code, orig, two)
                            });
                        }
                    }
                }
            }
        }

        for &dest in tables::pawn_attacks(self.turn, orig) {
            let target = self.squares[dest as usize];

            if target.is_color(!self.turn) {
                self.push_pawn_move(self.basic(code, orig, dest), moves);
            } else if target.is_empty()
                && self.en_passant_file == Some(dest.file())
                && orig.rank() == data.ep_rank
            {
                // en passant: the captured pawn stands beside the origin,
                // not on the destination
                let victim = Square::from_coord(dest.file(), orig.rank());

                moves.push(Move {
                    capture: Some((victim, self.squares[victim as usize])),
                    ..self.basic(code, orig, dest)
                });
            }
        }
    }

    /// Pushes a pawn move, expanded into its four promotions when it reaches
    /// the far rank.
    fn push_pawn_move(&self, mv: Move, moves: &mut Vec<Move>) {
        if mv.dest.rank() == tables::pawn(self.turn).promotion_rank {
            for &promotion in &[ToQueen, ToRook, ToBishop, ToKnight] {
                moves.push(Move { promotion: Some(promotion), ..mv });
            }
        } else {
            moves.push(mv);
        }
    }

    /// Castling needs the retained right, an empty span between king and
    /// rook, and a king that is neither in check nor passing through or
    /// onto an attacked square. The rook's destination doubles as the
    /// king's transit square on both wings.
    fn castling_moves(&self, moves: &mut Vec<Move>) {
        if !self.castling_rights.contains(CastlingRights::short(self.turn))
            && !self.castling_rights.contains(CastlingRights::long(self.turn))
        {
            return;
        }

        let rank = match self.turn {
            White => Rank::R1,
            Black => Rank::R8,
        };
        let home = |file| Square::from_coord(file, rank);
        let king_home = home(File::E);

        if self.square_attacked_by(king_home, !self.turn) {
            return;
        }

        for &(right, rook_home, king_dest, rook_dest) in &[
            (CastlingRights::short(self.turn), home(File::H), home(File::G), home(File::F)),
            (CastlingRights::long(self.turn), home(File::A), home(File::C), home(File::D)),
        ] {
            if !self.castling_rights.contains(right) {
                continue;
            }
            if tables::between(king_home, rook_home)
                .iter()
                .any(|&sq| !self.squares[sq as usize].is_empty())
            {
                continue;
            }
            if self.square_attacked_by(rook_dest, !self.turn)
                || self.square_attacked_by(king_dest, !self.turn)
            {
                continue;
            }

            moves.push(Move {
                castling_rook: Some((rook_home, rook_dest)),
                ..self.basic(PieceCode::new(self.turn, King), king_home, king_dest)
            });
        }
    }

    /// A move with everything derivable from the board filled in: capture,
    /// prior state, and the castling rights that remain afterward.
    fn basic(&self, code: PieceCode, orig: Square, dest: Square) -> Move {
        let target = self.squares[dest as usize];

        Move {
            piece: code,
            orig,
            dest,
            capture: if target.is_empty() { None } else { Some((dest, target)) },
            promotion: None,
            castling_rook: None,
            rights_before: self.castling_rights,
            rights_after: self.rights_after(code, orig, dest),
            ep_before: self.en_passant_file,
            ep_after: None,
        }
    }

    /// The castling rights that remain once `code` moves from `orig` to
    /// `dest`. A king move forfeits both of its side's rights; any move
    /// from or to a rook home corner forfeits the right tied to that
    /// corner, which covers both moving the rook and capturing it.
    fn rights_after(&self, code: PieceCode, orig: Square, dest: Square) -> CastlingRights {
        let mut rights = self.castling_rights;

        if rights.is_empty() {
            return rights;
        }
        if code.piece() == Some(King) {
            rights = rights.without(CastlingRights::both(self.turn));
        }
        for &sq in &[orig, dest] {
            rights = match sq {
                A1 => rights.without(CastlingRights::WHITE_LONG),
                H1 => rights.without(CastlingRights::WHITE_SHORT),
                A8 => rights.without(CastlingRights::BLACK_LONG),
                H8 => rights.without(CastlingRights::BLACK_SHORT),
                _ => rights,
            };
        }

        rights
    }

    /// True if the move leaves the mover's own king unattacked. King moves
    /// test their destination with the origin vacated; other moves must not
    /// uncover a line to the king.
    fn keeps_king_safe(&self, mv: &Move, king: Square) -> bool {
        if mv.piece.piece() == Some(King) {
            return self.king_escapes(mv);
        }
        if self.uncovers_king(mv, king) {
            return false;
        }
        if mv.is_en_passant() {
            return !self.en_passant_uncovers_king(mv, king);
        }

        true
    }

    /// A king move is legal if its destination is unattacked once the king
    /// has left its origin, so that a checking slider keeps covering the
    /// retreat squares along its line.
    fn king_escapes(&self, mv: &Move) -> bool {
        !self.attacked_with_vacancies(mv.dest, !self.turn, &[mv.orig])
    }

    /// Returns `true` if moving this piece would expose its king along the
    /// line the piece currently blocks. A destination on that same line,
    /// the capture of the pinning slider included, keeps the king covered.
    fn uncovers_king(&self, mv: &Move, king: Square) -> bool {
        let dir = match tables::line_direction(king, mv.orig) {
            Some(dir) => dir,
            None => return false,
        };

        if tables::line_direction(king, mv.dest) == Some(dir) {
            return false;
        }

        self.ray_attacker(king, !self.turn, dir, &[mv.orig]).is_some()
    }

    /// An en-passant capture vacates two squares at once, so a line the
    /// single-line test above cannot see may open through the captured
    /// pawn: a rook or queen behind the pair on a shared rank, or a bishop
    /// or queen behind the victim on a diagonal. Scans the king's line
    /// through the victim with both squares vacated. With king and victim
    /// on the same file the capturer re-blocks the line from its
    /// destination, so that line never opens.
    fn en_passant_uncovers_king(&self, mv: &Move, king: Square) -> bool {
        let victim = match mv.capture_square() {
            Some(sq) => sq,
            None => return false,
        };
        let dir = match tables::line_direction(king, victim) {
            Some(dir) => dir,
            None => return false,
        };

        if tables::line_direction(king, mv.dest) == Some(dir) {
            return false;
        }

        self.ray_attacker(king, !self.turn, dir, &[mv.orig, victim]).is_some()
    }
}
