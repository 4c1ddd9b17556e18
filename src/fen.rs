//! Reading and writing positions in Forsyth-Edwards notation
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use mailbox::{CastlingRights, Color, Error, File, PieceCode, Position, Rank, Result, Square};
use mailbox::Color::*;
use mailbox::Piece::*;

/// Parses a position from a record in Forsyth-Edwards notation.
///
/// The first four fields (piece placement, side to move, castling rights and
/// en-passant square) are required. The move counters are accepted and
/// checked for form, but a position does not retain them. The arrangement
/// itself is validated by [`Position::from_parts`].
///
/// # Examples
/// ```rust
/// use redoubt::fen;
///
/// let pos = fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
/// assert_eq!(pos, mailbox::Position::new());
/// ```
pub fn parse(s: &str) -> Result<Position> {
    let mut fields = s.trim().split_whitespace();

    let squares = parse_board(fields.next().ok_or(Error::ParseError)?)?;
    let turn = parse_turn(fields.next().ok_or(Error::ParseError)?)?;
    let castling_rights = parse_castling(fields.next().ok_or(Error::ParseError)?)?;
    let en_passant_file = parse_en_passant(fields.next().ok_or(Error::ParseError)?, turn)?;

    // the move counters carry no position state, but must still be numeric
    for counter in fields.take(2) {
        counter.parse::<u32>().map_err(|_| Error::ParseError)?;
    }

    Position::from_parts(squares, turn, castling_rights, en_passant_file)
}

/// Formats `pos` as a record in Forsyth-Edwards notation.
///
/// A position does not track move counters, so the last two fields are
/// always `0 1`.
pub fn format(pos: &Position) -> String {
    let mut board = String::new();
    let mut empty = 0;

    for sq in Square::iter() {
        match piece_char(pos.piece_on(sq)) {
            Some(c) => {
                if empty > 0 {
                    board += &empty.to_string();
                    empty = 0;
                }
                board.push(c);
            },
            None => empty += 1,
        }
        if sq.file() == File::H {
            if empty > 0 {
                board += &empty.to_string();
                empty = 0;
            }
            if sq.rank() != Rank::R1 {
                board.push('/');
            }
        }
    }

    let turn = match pos.turn() {
        White => "w",
        Black => "b",
    };

    let mut castling = String::new();
    for &(right, c) in &[
        (CastlingRights::WHITE_SHORT, 'K'),
        (CastlingRights::WHITE_LONG, 'Q'),
        (CastlingRights::BLACK_SHORT, 'k'),
        (CastlingRights::BLACK_LONG, 'q'),
    ] {
        if pos.castling_rights().contains(right) {
            castling.push(c);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = match pos.en_passant_file() {
        Some(file) => Square::from_coord(file, skipped_rank(pos.turn())).to_string(),
        None => "-".to_string(),
    };

    format!("{} {} {} {} 0 1", board, turn, castling, en_passant)
}

fn parse_board(board: &str) -> Result<[PieceCode; Square::COUNT]> {
    let mut squares = [PieceCode::Empty; Square::COUNT];
    let mut rank = 0;
    let mut file = 0;

    // the board field reads square by square from a8, matching the index
    // order of the array
    for c in board.chars() {
        match c {
            '1'..='8' => {
                file += c.to_digit(10).expect("INFALLIBLE") as usize;
                if file > File::COUNT {
                    return Err(Error::ParseError);
                }
            },
            '/' => {
                if file == File::COUNT && rank < Rank::COUNT - 1 {
                    rank += 1;
                    file = 0;
                } else {
                    return Err(Error::ParseError);
                }
            },
            _ => {
                if file >= File::COUNT {
                    return Err(Error::ParseError);
                }
                squares[rank * File::COUNT + file] = piece_code(c)?;
                file += 1;
            },
        }
    }
    if rank < Rank::COUNT - 1 || file < File::COUNT {
        return Err(Error::ParseError);
    }

    Ok(squares)
}

fn parse_turn(s: &str) -> Result<Color> {
    match s {
        "w" => Ok(White),
        "b" => Ok(Black),
        _ => Err(Error::ParseError),
    }
}

fn parse_castling(s: &str) -> Result<CastlingRights> {
    if s == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for c in s.chars() {
        rights = match c {
            'K' => rights.with(CastlingRights::WHITE_SHORT),
            'Q' => rights.with(CastlingRights::WHITE_LONG),
            'k' => rights.with(CastlingRights::BLACK_SHORT),
            'q' => rights.with(CastlingRights::BLACK_LONG),
            _ => return Err(Error::ParseError),
        };
    }

    Ok(rights)
}

fn parse_en_passant(s: &str, turn: Color) -> Result<Option<File>> {
    if s == "-" {
        return Ok(None);
    }

    match parse_square(s) {
        Some(sq) if sq.rank() == skipped_rank(turn) => Ok(Some(sq.file())),
        _ => Err(Error::ParseError),
    }
}

fn parse_square(s: &str) -> Option<Square> {
    use std::convert::TryFrom;

    let mut chars = s.chars();
    let file = match chars.next()? {
        c @ 'a'..='h' => File::try_from(c as usize - 'a' as usize).ok()?,
        _ => return None,
    };
    let rank = match chars.next()? {
        c @ '1'..='8' => Rank::try_from(c as usize - '1' as usize).ok()?,
        _ => return None,
    };

    match chars.next() {
        None => Some(Square::from_coord(file, rank)),
        Some(_) => None,
    }
}

/// The rank a double pawn push skipped over, given whose turn it now is.
fn skipped_rank(turn: Color) -> Rank {
    match turn {
        White => Rank::R6,
        Black => Rank::R3,
    }
}

fn piece_code(c: char) -> Result<PieceCode> {
    let color = if c.is_uppercase() { White } else { Black };
    let piece = match c.to_ascii_lowercase() {
        'p' => Pawn,
        'n' => Knight,
        'b' => Bishop,
        'r' => Rook,
        'q' => Queen,
        'k' => King,
        _ => return Err(Error::ParseError),
    };

    Ok(PieceCode::new(color, piece))
}

fn piece_char(code: PieceCode) -> Option<char> {
    let c = match code.piece()? {
        Pawn => 'p',
        Knight => 'n',
        Bishop => 'b',
        Rook => 'r',
        Queen => 'q',
        King => 'k',
    };

    match code.color() {
        Some(White) => Some(c.to_ascii_uppercase()),
        _ => Some(c),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use Error::*;

    // 1. empty input is rejected
    #[test]
    fn empty_string_returns_error() {
        assert_eq!(parse(""), Err(ParseError));
        assert_eq!(parse(" \t\r\n"), Err(ParseError));
    }

    // 2. 0 and 9 are not valid empty-square counts
    #[test]
    fn invalid_empty_square_count_returns_error() {
        assert_eq!(parse("0K1k5/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/9/8/8/8/8/8/8 w - - 0 1"), Err(ParseError));
    }

    // 3. 1 through 8 are accepted where they fit
    #[test]
    fn valid_empty_square_count_is_ok() {
        parse("K1k5/8/8/8/8/8/8/8 w - - 0 1").expect("valid fen");
    }

    // 4. a rank with more than 8 squares is rejected
    #[test]
    fn rank_too_long_returns_error() {
        assert_eq!(parse("K1k6/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5b/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8B w - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/b8 w - - 0 1"), Err(ParseError));
    }

    // 5. a rank with fewer than 8 squares is rejected
    #[test]
    fn rank_too_short_returns_error() {
        assert_eq!(parse("K1k4/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k3b/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/6B w - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/b6 w - - 0 1"), Err(ParseError));
    }

    // 6. nine ranks are too many
    #[test]
    fn too_many_ranks_returns_error() {
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8/7R w - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseError));
    }

    // 7. seven ranks are too few
    #[test]
    fn too_few_ranks_returns_error() {
        assert_eq!(parse("K1k5/8/8/8/8/8/7Q w - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8 w - - 0 1"), Err(ParseError));
    }

    // 8. the board field lands pieces on the right squares
    #[test]
    fn pieces_land_on_the_right_squares() {
        let pos = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("valid fen");

        assert_eq!(pos, Position::new());

        let pos = parse("K1k5/8/8/7p/8/8/8/8 w - - 0 1").expect("valid fen");
        assert_eq!(pos.piece_on(Square::A8), PieceCode::WhiteKing);
        assert_eq!(pos.piece_on(Square::C8), PieceCode::BlackKing);
        assert_eq!(pos.piece_on(Square::H5), PieceCode::BlackPawn);
        assert_eq!(pos.piece_on(Square::H4), PieceCode::Empty);
    }

    // 9. the turn field requires 'w' or 'b'
    #[test]
    fn turn_set_correctly() {
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8 w - - 0 1").expect("valid fen").turn(), White);
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8 b - - 0 1").expect("valid fen").turn(), Black);
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8 x - - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8"), Err(ParseError));
    }

    // 10. castling flags in any combination, or '-' for none
    #[test]
    fn castling_flags_set_correctly() {
        let none = parse("K1k5/8/8/8/8/8/8/8 w - - 0 1").expect("valid fen");
        assert_eq!(none.castling_rights(), CastlingRights::NONE);

        for &(flags, expected) in &[
            ("Kk", CastlingRights::WHITE_SHORT.with(CastlingRights::BLACK_SHORT)),
            ("Qq", CastlingRights::WHITE_LONG.with(CastlingRights::BLACK_LONG)),
            ("KQ", CastlingRights::both(White)),
            ("kq", CastlingRights::both(Black)),
            ("KQkq", CastlingRights::ALL),
        ] {
            let fen = format!("r3k2r/8/8/8/8/8/8/R3K2R w {} - 0 1", flags);
            assert_eq!(parse(&fen).expect("valid fen").castling_rights(), expected);
        }

        assert_eq!(parse("K1k5/8/8/8/8/8/8/8 w x - 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8 w"), Err(ParseError));
    }

    // 11. the en-passant field takes '-' or the skipped square
    #[test]
    fn en_passant_square_set_correctly() {
        let pos = parse("K1k5/8/8/8/8/8/8/8 w - - 0 1").expect("valid fen");
        assert_eq!(pos.en_passant_file(), None);

        let pos = parse("K1k5/8/8/7p/8/8/8/8 w - h6 0 1").expect("valid fen");
        assert_eq!(pos.en_passant_file(), Some(File::H));

        let pos = parse("K1k5/8/8/8/3P4/8/8/8 b - d3 0 1").expect("valid fen");
        assert_eq!(pos.en_passant_file(), Some(File::D));

        assert_eq!(parse("K1k5/8/8/8/8/8/8/8 w - x 0 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8 w -"), Err(ParseError));
        // the square must lie on the rank the double push skipped
        assert_eq!(parse("K1k5/8/8/7p/8/8/8/8 w - h3 0 1"), Err(ParseError));
    }

    // 12. move counters are optional, but must be numeric when present
    #[test]
    fn move_counters_validated_and_ignored() {
        parse("K1k5/8/8/8/8/8/8/8 w - -").expect("valid fen");
        parse("K1k5/8/8/8/8/8/8/8 w - - 500 9999").expect("valid fen");
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8 w - - x 1"), Err(ParseError));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/8 w - - 0 x"), Err(ParseError));
    }

    // 13. arrangement validation comes from the position itself
    #[test]
    fn invalid_arrangements_are_rejected() {
        assert_eq!(parse("8/8/8/8/8/8/8/8 w - - 0 1"), Err(InvalidKingCount));
        assert_eq!(parse("K1k4P/8/8/8/8/8/8/8 w - - 0 1"), Err(InvalidPawnRank));
        assert_eq!(parse("K1k5/8/8/8/8/8/8/4R3 w K - 0 1"), Err(InvalidCastlingFlags));
        assert_eq!(parse("K1k5/8/8/7p/8/8/8/8 w - a6 0 1"), Err(MissingEnPassantPawn));
    }

    mod format {
        use super::*;

        #[test]
        fn starting_position_formats_to_the_standard_record() {
            assert_eq!(
                format(&Position::new()),
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            );
        }

        #[test]
        fn double_push_shows_the_skipped_square() {
            let mut pos = Position::new();
            let mv = pos
                .legal_moves()
                .into_iter()
                .find(|mv| mv.origin() == Square::E2 && mv.destination() == Square::E4)
                .expect("e2e4 is legal");
            pos.apply(&mv);

            assert_eq!(
                format(&pos),
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1",
            );
        }

        #[test]
        fn round_trips_through_parse() {
            for fen in &[
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
                "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
                "K1k5/8/8/7p/8/8/8/8 w - h6 0 1",
            ] {
                let pos = parse(fen).expect("valid fen");
                assert_eq!(&format(&pos), fen);
                assert_eq!(parse(&format(&pos)).expect("valid fen"), pos);
            }
        }
    }
}
