//! The redoubt chess position tool.
//
//  Copyright 2025 The redoubt developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::path::PathBuf;
use clap::{App, AppSettings, Arg, SubCommand, crate_version};
use simplelog::{WriteLogger, LevelFilter, Config};
use rand::SeedableRng;
use rand::rngs::StdRng;
use redoubt::{coord, fen, variations, walk};

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn main() -> Result<(), Error> {
    let matches =
        App::new("Redoubt")
            .version(crate_version!())
            .author("The redoubt developers")
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("redoubt.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(STARTPOS)
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("moves")
                .about("Lists the legal moves of a given position in coordinate notation.\n\
                        Defaults to the standard starting position.")
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(STARTPOS)
                    .hide_default_value(true)
                    .help("Position to list in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("walk")
                .about("Plays uniformly random legal moves from a given position until \
                        the game ends\nor a ply limit is reached. Defaults to the standard \
                        starting position.")
                .arg(Arg::with_name("seed")
                    .long("seed")
                    .short("s")
                    .value_name("SEED")
                    .takes_value(true)
                    .help("Seeds the move selection for a reproducible walk"))
                .arg(Arg::with_name("plies")
                    .long("plies")
                    .short("p")
                    .value_name("PLIES")
                    .takes_value(true)
                    .default_value("400")
                    .help("Maximum number of plies to play"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(STARTPOS)
                    .hide_default_value(true)
                    .help("Position to walk from in Forsyth-Edwards Notation (FEN)")))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    match matches.subcommand() {
        ("counts", Some(matches)) => {
            let depth = matches
                .value_of("depth")
                .expect("INFALLIBLE")
                .parse()
                .map_err(|_| {Error("depth must be numeric".to_owned())})?;

            println!();
            for fen_str in matches.values_of("fen").expect("INFALLIBLE") {
                let mut pos = fen::parse(fen_str)
                    .map_err(|err| {Error(format!("{}: {}", fen_str, err))})?;
                println!("{}", fen_str);
                let count = variations::print(&mut pos, depth);
                println!("Depth {} total:\t{:12}\n", depth, count);
            }
        },
        ("moves", Some(matches)) => {
            let fen_str = matches.value_of("fen").expect("INFALLIBLE");
            let pos = fen::parse(fen_str)
                .map_err(|err| {Error(format!("{}: {}", fen_str, err))})?;

            let moves = pos.legal_moves();
            if moves.is_empty() {
                if pos.in_check(pos.turn()) {
                    println!("none (checkmate)");
                } else {
                    println!("none (stalemate)");
                }
            }
            for mv in &moves {
                println!("{}", coord::format(mv));
            }
        },
        ("walk", Some(matches)) => {
            let plies = matches
                .value_of("plies")
                .expect("INFALLIBLE")
                .parse()
                .map_err(|_| {Error("plies must be numeric".to_owned())})?;
            let mut rng = match matches.value_of("seed") {
                Some(seed) => {
                    let seed = seed.parse()
                        .map_err(|_| {Error("seed must be numeric".to_owned())})?;
                    StdRng::seed_from_u64(seed)
                },
                None => StdRng::from_entropy(),
            };
            let fen_str = matches.value_of("fen").expect("INFALLIBLE");
            let mut pos = fen::parse(fen_str)
                .map_err(|err| {Error(format!("{}: {}", fen_str, err))})?;

            let outcome = walk::play(&mut pos, &mut rng, plies);
            println!("{} after {} plies", outcome, pos.applied_moves());
            println!("{}", fen::format(&pos));
        },
        _ => unreachable!(),
    }

    Ok(())
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }
