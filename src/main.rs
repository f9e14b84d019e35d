//! Lucky Draw entry point
//!
//! Loads the named session from the data directory, runs one command and
//! saves the session again when the command changed it.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use luckydraw::records::read_rows;
use luckydraw::{Config, DrawError, Participant, Result};

const USAGE: &str = "usage: luckydraw <session> <command> [args]

commands:
  import-prizes <csv>          replace prizes (no,name,amount,desc)
  import-participants <csv>    replace participants (id,name)
  prizes                       list prizes
  participants                 list participants
  available                    list participants who have not won
  draw <no>                    draw winners for a prize
  revoke <no> <id>...          revoke winners of a prize
  redraw <no> <amount>         draw extra winners for a prize
  winners [<no>]               list winners
  clear <no>                   empty a prize's winners
  clear-all                    forget every draw";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (name, command, rest) = match args.as_slice() {
        [name, command, rest @ ..] => (name.as_str(), command.as_str(), rest),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let config = Config::from_env();
    match run(&config, name, command, rest) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the command or its arguments are not recognised
fn run(config: &Config, name: &str, command: &str, args: &[String]) -> Result<bool> {
    let store = config.store();
    let session = config.session(name);
    if store.exists(name) {
        store.load_session(&session)?;
    } else {
        log::info!("Starting new session {name:?}");
    }

    let changed = match (command, args) {
        ("import-prizes", [path]) => {
            session.load_prizes(read_rows(BufReader::new(File::open(path)?))?)?;
            true
        }
        ("import-participants", [path]) => {
            session.load_participants(read_rows(BufReader::new(File::open(path)?))?)?;
            true
        }
        ("prizes", []) => {
            for prize in session.prizes(config.descending_prizes) {
                println!("{}\t{}\t{}\t{}", prize.no, prize.name, prize.amount, prize.desc);
            }
            false
        }
        ("participants", []) => {
            print_participants(&session.participants());
            false
        }
        ("available", []) => {
            print_participants(&session.available_participants());
            false
        }
        ("draw", [no]) => {
            print_participants(&session.draw(parse_arg("no", no)?)?);
            true
        }
        ("revoke", [no, ids @ ..]) if !ids.is_empty() => {
            session.revoke(parse_arg("no", no)?, ids)?;
            true
        }
        ("redraw", [no, amount]) => {
            let no = parse_arg("no", no)?;
            print_participants(&session.redraw(no, parse_arg("amount", amount)?)?);
            true
        }
        ("winners", []) => {
            for (no, winners) in session.all_winners() {
                println!("# prize {no}");
                print_participants(&winners);
            }
            false
        }
        ("winners", [no]) => {
            print_participants(&session.winners(parse_arg("no", no)?));
            false
        }
        ("clear", [no]) => {
            session.clear_winners(parse_arg("no", no)?);
            true
        }
        ("clear-all", []) => {
            session.clear_all_winners();
            true
        }
        _ => return Ok(false),
    };

    if changed {
        store.save_session(&session)?;
    }
    Ok(true)
}

fn parse_arg(field: &'static str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|source| DrawError::InvalidNumber {
            field,
            value: raw.to_string(),
            source,
        })
}

fn print_participants(list: &[Participant]) {
    for p in list {
        println!("{}\t{}", p.id, p.name);
    }
}
