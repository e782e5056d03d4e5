use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;

use chordwise::pitch::{note_name, parse_note};
use chordwise::{Answer, Level, Session, SessionState};
use chrono::Utc;

const USAGE: &str = "Usage: chord-drill [--seed N] [--build] <level-name | level.yaml>
       chord-drill --list";

#[derive(Clone, Copy)]
enum Mode {
    /// Notes are shown, the chord name is typed.
    Identify,
    /// The chord name is shown, the notes are typed.
    Build,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        process::exit(1);
    }

    let mut seed: Option<u64> = None;
    let mut mode = Mode::Identify;
    let mut level_arg: Option<&String> = None;

    // Parse flags
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--list" => {
                list_levels();
                return;
            }
            "--build" => mode = Mode::Build,
            "--seed" => {
                i += 1;
                seed = match args.get(i).map(|s| s.parse()) {
                    Some(Ok(s)) => Some(s),
                    _ => {
                        eprintln!("--seed needs a number");
                        process::exit(1);
                    }
                };
            }
            _ => level_arg = Some(&args[i]),
        }
        i += 1;
    }

    let level_arg = match level_arg {
        Some(l) => l,
        None => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let level = match load_level(level_arg) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error loading level '{}': {}", level_arg, e);
            process::exit(1);
        }
    };

    let seed = seed.unwrap_or_else(|| Utc::now().timestamp_micros() as u64);
    if let Err(e) = run(level, seed, mode) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn list_levels() {
    match Level::presets() {
        Ok(levels) => {
            for level in levels {
                println!("{:<18} {}", level.name, level.title);
            }
        }
        Err(e) => {
            eprintln!("Error loading built-in levels: {}", e);
            process::exit(1);
        }
    }
}

fn load_level(arg: &str) -> Result<Level, Box<dyn std::error::Error>> {
    if arg.ends_with(".yaml") || arg.ends_with(".yml") {
        let content = fs::read_to_string(arg)?;
        Ok(Level::from_yaml(&content)?)
    } else {
        Ok(Level::preset(arg)?)
    }
}

fn run(level: Level, seed: u64, mode: Mode) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} ({} problems)", level.title, level.total_problems);
    let mut session = Session::with_seed(level, seed)?;
    session.start(Utc::now())?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let problem = match session.state() {
            SessionState::AwaitingAnswer { problem } => problem.clone(),
            SessionState::Completed { stats } => {
                println!();
                println!(
                    "{}: {:.0}% correct, {:.1}s average, best streak {}",
                    if stats.passed { "PASSED" } else { "FAILED" },
                    stats.accuracy,
                    stats.avg_time,
                    stats.best_streak
                );
                println!("{}", stats.to_json()?);
                return Ok(());
            }
            other => return Err(format!("unexpected session phase: {}", other.phase()).into()),
        };

        let total = session.score().total + 1;
        match mode {
            Mode::Identify => {
                let notes: Vec<String> = problem.notes.iter().map(|&n| note_name(n)).collect();
                print!("[{}] Name this chord: {} > ", total, notes.join(" "));
            }
            Mode::Build => print!("[{}] Play {} (e.g. C4 E4 G4) > ", total, problem.canonical_name),
        }
        io::stdout().flush()?;

        let asked = Instant::now();
        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        let answer = match mode {
            Mode::Identify => Answer::Text(line),
            Mode::Build => {
                match line
                    .split_whitespace()
                    .map(parse_note)
                    .collect::<Result<Vec<u8>, _>>()
                {
                    Ok(notes) => Answer::Notes(notes),
                    Err(e) => {
                        println!("  {}", e);
                        Answer::Notes(Vec::new())
                    }
                }
            }
        };

        let result = session.submit(&answer, asked.elapsed())?;
        if result.is_correct {
            println!("  Correct! ({})", problem.description);
        } else {
            let expected: Vec<String> = result.expected_notes.iter().map(|&n| note_name(n)).collect();
            println!(
                "  Not quite: {} = {} ({})",
                result.expected_name,
                expected.join(" "),
                problem.description
            );
        }

        session.advance(Utc::now())?;
    }
}
