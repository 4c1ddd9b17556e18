//! Reading and writing moves in pure coordinate notation
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use lazy_static::lazy_static;
use regex::Regex;
use mailbox::{Error, File, Move, Position, Promotion, Rank, Result, Square};

lazy_static! {
    static ref MOVE_RE: Regex =
        Regex::new("^([a-h])([1-8])([a-h])([1-8])([nbrq])?$").expect("INFALLIBLE");
}

/// Formats `mv` in pure coordinate notation: origin square, destination
/// square and, for a promotion, the chosen piece (`e2e4`, `e7e8q`).
///
/// Castling is written as the king's own two squares and en passant as the
/// capturing pawn's, so every formatted move parses back unambiguously.
pub fn format(mv: &Move) -> String {
    let promotion = match mv.promotion() {
        Some(Promotion::ToQueen) => "q",
        Some(Promotion::ToRook) => "r",
        Some(Promotion::ToBishop) => "b",
        Some(Promotion::ToKnight) => "n",
        None => "",
    };

    format!("{}{}{}", mv.origin(), mv.destination(), promotion)
}

/// Parses a move in pure coordinate notation and resolves it against the
/// legal moves of `pos`.
///
/// Returns [`Error::ParseError`] for a malformed string and
/// [`Error::IllegalMove`] for a well-formed move the position does not
/// allow, which includes naming a promotion square without a piece.
///
/// # Examples
/// ```rust
/// use mailbox::Position;
/// use redoubt::coord;
///
/// let pos = Position::new();
/// let mv = coord::parse("g1f3", &pos).unwrap();
/// assert_eq!(coord::format(&mv), "g1f3");
/// ```
pub fn parse(s: &str, pos: &Position) -> Result<Move> {
    let caps = MOVE_RE.captures(s).ok_or(Error::ParseError)?;

    let orig = square(&caps[1], &caps[2])?;
    let dest = square(&caps[3], &caps[4])?;
    let promotion = caps.get(5).map(|m| match m.as_str() {
        "q" => Promotion::ToQueen,
        "r" => Promotion::ToRook,
        "b" => Promotion::ToBishop,
        "n" => Promotion::ToKnight,
        _ => unreachable!(),
    });

    pos.legal_moves()
        .into_iter()
        .find(|mv| mv.origin() == orig && mv.destination() == dest && mv.promotion() == promotion)
        .ok_or(Error::IllegalMove)
}

fn square(file: &str, rank: &str) -> Result<Square> {
    let file = File::try_from((file.as_bytes()[0] - b'a') as usize)?;
    let rank = Rank::try_from((rank.as_bytes()[0] - b'1') as usize)?;

    Ok(Square::from_coord(file, rank))
}
