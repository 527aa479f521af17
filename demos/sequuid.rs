//! Simple command that prints one or '-n count' sequential UUID strings

use std::{env, io, io::Write, process::ExitCode};

use sequential_uuids::{sequence_uuid, time_uuid, Sequence};

struct Options {
    count: usize,
    clock: bool,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-t]",
                    program.as_deref().unwrap_or("sequuid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let seq = Sequence::new();
    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..opts.count {
        let generated = if opts.clock {
            time_uuid()
        } else {
            sequence_uuid(&seq)
        };
        match generated {
            Ok(e) => writeln!(buf, "{}", uuid::Uuid::from(e))?,
            Err(err) => {
                buf.flush()?;
                eprintln!("Error: {}", err);
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut count = None;
    let mut clock = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-t" => clock = true,
            "-n" => {
                if count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                count.replace(c);
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(Options {
        count: count.unwrap_or(1),
        clock,
    })
}
