//! # Crawl Main Entry Point
//!
//! Loads a map file, then runs a line-based command loop over stdin/stdout.

use clap::error::ErrorKind;
use clap::Parser;
use crawl::{
    load_map, CrawlResult, GameEvent, GameState, InputHandler, PlayerInput, TextCartographer,
    HELP_LINES,
};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments for the crawl.
#[derive(Parser, Debug)]
#[command(name = "crawl")]
#[command(about = "A small dungeon crawl over a map file")]
#[command(version)]
struct Args {
    /// Map file to load
    mapfile: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the bounds map of the dungeon as JSON and exit
    #[arg(long)]
    map_json: bool,

    /// Don't redraw the map after each action
    #[arg(long)]
    no_map: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            eprintln!("Usage: crawl <mapfile>");
            return ExitCode::from(1);
        }
    };

    initialize_logging(&args.log_level);
    info!("Starting crawl v{}", crawl::VERSION);

    let state = match load_map(&args.mapfile).and_then(GameState::new) {
        Ok(state) => state,
        Err(e) => {
            error!("Loading {} failed: {}", args.mapfile.display(), e);
            eprintln!("Unable to load file");
            return ExitCode::from(2);
        }
    };

    let result = if args.map_json {
        state.map().to_json().map(|json| println!("{}", json))
    } else {
        let stdin = io::stdin();
        run_game(state, stdin.lock(), io::stdout().lock(), !args.no_map)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes env_logger; `RUST_LOG` takes precedence over `--log-level`.
fn initialize_logging(log_level: &str) {
    let env = env_logger::Env::default().default_filter_or(log_level);
    env_logger::Builder::from_env(env)
        .format_target(false)
        .init();
}

/// Main command loop.
fn run_game<R: BufRead, W: Write>(
    mut state: GameState,
    input: R,
    mut out: W,
    show_map: bool,
) -> CrawlResult<()> {
    let handler = InputHandler::new();
    let cartographer = TextCartographer::default();
    let mut lines = input.lines();

    writeln!(out, "{}", state.welcome())?;
    if show_map {
        draw_map(&mut out, &cartographer, &state)?;
    }

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let Some(command) = PlayerInput::parse(&line?) else {
            continue;
        };

        match command {
            PlayerInput::Quit => break,
            PlayerInput::Help => {
                for help in HELP_LINES {
                    writeln!(out, "{}", help)?;
                }
            }
            PlayerInput::Map => draw_map(&mut out, &cartographer, &state)?,
            PlayerInput::Unknown(text) => {
                writeln!(out, "Unknown command '{}'; type help for a list", text)?;
            }
            command => {
                let action = handler.input_to_action(command, |question| {
                    write!(out, "{} ", question).ok()?;
                    out.flush().ok()?;
                    lines.next()?.ok()
                });
                let Some(action) = action else {
                    continue;
                };

                let events = action.execute(&mut state);
                print_events(&mut out, &events)?;
                if show_map && events.iter().any(GameEvent::changes_world) {
                    draw_map(&mut out, &cartographer, &state)?;
                }
                if state.is_game_over() {
                    info!("Player died; ending session");
                    break;
                }
            }
        }
    }

    info!("Game loop ended");
    Ok(())
}

fn print_events<W: Write>(out: &mut W, events: &[GameEvent]) -> io::Result<()> {
    for text in crawl::messages(events) {
        writeln!(out, "{}", text)?;
    }
    Ok(())
}

fn draw_map<W: Write>(out: &mut W, cartographer: &TextCartographer, state: &GameState) -> io::Result<()> {
    for line in cartographer.render_state(state) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
