//! Interactive session over stdin.
//!
//! Input lines and display frames share one current-thread runtime, so the
//! wheel is only ever touched from a single task. Frames run only while a
//! spin is in progress.

use std::path::Path;

use clap::Args;
use spinwheel_core::{Mode, SpinState, Wheel};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};

use crate::common::{frame_interval, load_config, CliResult, ModeArg};
use crate::view::{describe, EventPrinter, FrameView, ResultChime};

const HELP: &str = "\
commands:
  spin            start the wheel, or stop it if it is spinning
  stop            stop the wheel
  mode <name>     switch to the reward or penalty list
  add <text>      add an item to the active list
  rm <n>          remove item n from the active list (asks first)
  list [mode]     show a list
  status          show the wheel state
  help            show this help
  quit            leave";

#[derive(Args)]
pub struct PlayArgs {
    /// List to start with
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Seed for the extra-spin draw
    #[arg(long)]
    seed: Option<u64>,
    /// Display frame rate
    #[arg(long, default_value = "60")]
    fps: u32,
    /// Do not ring the terminal bell
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Spin,
    Stop,
    Mode(Mode),
    Add(String),
    Remove(usize),
    List(Option<Mode>),
    Status,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "spin" => Command::Spin,
        "stop" => Command::Stop,
        "mode" => Command::Mode(rest.parse()?),
        "add" => Command::Add(rest.to_string()),
        "rm" | "remove" | "delete" => {
            let n: usize = rest
                .parse()
                .map_err(|_| format!("expected an item number, got '{rest}'"))?;
            if n == 0 {
                return Err("item numbers start at 1".to_string());
            }
            Command::Remove(n - 1)
        }
        "list" | "ls" if rest.is_empty() => Command::List(None),
        "list" | "ls" => Command::List(Some(rest.parse()?)),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    wheel: Wheel,
    /// Removal waiting for a yes/no answer.
    pending_removal: Option<(Mode, usize)>,
}

impl Session {
    fn handle_line(&mut self, line: &str) -> Flow {
        if let Some((mode, index)) = self.pending_removal.take() {
            if matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                notice(self.wheel.remove_item(mode, index).map(|_| ()));
            } else {
                println!("Kept.");
            }
            return Flow::Continue;
        }

        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(e) => {
                eprintln!("notice: {e}");
                return Flow::Continue;
            }
        };

        match command {
            Command::Spin => {
                let spinning =
                    matches!(self.wheel.engine().state(), SpinState::Spinning { .. });
                let result = if spinning {
                    self.wheel.request_stop()
                } else {
                    self.wheel.start()
                };
                notice(result.map(|_| ()));
            }
            Command::Stop => {
                let result = self.wheel.request_stop();
                notice(result.map(|_| ()));
            }
            Command::Mode(mode) => {
                let result = self.wheel.set_active_mode(mode);
                notice(result.map(|_| ()));
            }
            Command::Add(text) => {
                let mode = self.wheel.active_mode();
                let result = self.wheel.add_item(mode, &text);
                notice(result.map(|_| ()));
            }
            Command::Remove(index) => self.ask_removal(index),
            Command::List(mode) => {
                let mode = mode.unwrap_or_else(|| self.wheel.active_mode());
                println!("{} items:", mode.title());
                for (i, item) in self.wheel.items(mode).iter().enumerate() {
                    println!("  {}. {item}", i + 1);
                }
            }
            Command::Status => println!("{}", describe(&self.wheel.snapshot())),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn ask_removal(&mut self, index: usize) {
        let mode = self.wheel.active_mode();
        let items = self.wheel.items(mode);
        // Anything the store would refuse is reported without asking.
        if self.wheel.store().is_locked() || index >= items.len() || items.len() == 1 {
            let result = self.wheel.remove_item(mode, index);
            notice(result.map(|_| ()));
            return;
        }
        println!("Remove '{}'? [y/N]", items[index]);
        self.pending_removal = Some((mode, index));
    }
}

/// Rejected commands are reported and the session carries on.
fn notice<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(e) = result {
        eprintln!("notice: {e}");
    }
}

pub fn run(args: PlayArgs, config_path: Option<&Path>) -> CliResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(play(args, config_path))
}

async fn play(args: PlayArgs, config_path: Option<&Path>) -> CliResult {
    let mut config = load_config(config_path)?;
    if let Some(seed) = args.seed {
        config.spin.seed = Some(seed);
    }
    let mut wheel = Wheel::from_config(&config)?;
    if let Some(mode) = args.mode {
        wheel.set_active_mode(mode.into())?;
    }
    wheel.subscribe(EventPrinter::new(false));
    wheel.subscribe(ResultChime::new(!args.quiet));

    println!("{}", describe(&wheel.snapshot()));
    println!("Type 'help' for commands.");

    let mut session = Session {
        wheel,
        pending_removal: None,
    };
    let mut view = FrameView::new(!args.quiet);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut frames = interval(frame_interval(args.fps));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut input_open = true;

    loop {
        if !input_open {
            // Input is gone: let a spin in flight finish, then leave.
            let state = session.wheel.engine().state();
            if !state.is_in_progress() {
                break;
            }
            if matches!(state, SpinState::Spinning { .. }) {
                session.wheel.request_stop()?;
            }
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => {
                        if session.handle_line(&line) == Flow::Quit {
                            break;
                        }
                    }
                    None => input_open = false,
                }
            }
            _ = frames.tick(), if session.wheel.engine().is_in_progress() => {
                session.wheel.tick();
                view.frame(&session.wheel);
            }
            else => break,
        }
    }
    view.finish();
    Ok(())
}
