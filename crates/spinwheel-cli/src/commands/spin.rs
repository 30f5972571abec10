use std::path::Path;

use clap::Args;
use spinwheel_core::{Event, Wheel};
use tokio::time::{interval, MissedTickBehavior};

use crate::common::{frame_interval, load_config, CliResult, ModeArg};
use crate::view::{EventPrinter, FrameView, ResultChime};

#[derive(Args)]
pub struct SpinArgs {
    /// Which list to spin
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Seed for the extra-spin draw (repeatable results)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames of free spin before stopping
    #[arg(long, default_value = "90")]
    ticks: u32,
    /// Display frame rate
    #[arg(long, default_value = "60")]
    fps: u32,
    /// Override the configured deceleration time
    #[arg(long)]
    deceleration_ms: Option<u64>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
    /// Do not ring the terminal bell
    #[arg(long)]
    quiet: bool,
}

pub fn run(args: SpinArgs, config_path: Option<&Path>) -> CliResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(spin_once(args, config_path))
}

async fn spin_once(args: SpinArgs, config_path: Option<&Path>) -> CliResult {
    let mut config = load_config(config_path)?;
    if let Some(seed) = args.seed {
        config.spin.seed = Some(seed);
    }
    if let Some(ms) = args.deceleration_ms {
        config.spin.deceleration_ms = ms;
    }

    let mut wheel = Wheel::from_config(&config)?;
    if let Some(mode) = args.mode {
        wheel.set_active_mode(mode.into())?;
    }
    wheel.subscribe(EventPrinter::new(args.json));
    wheel.subscribe(ResultChime::new(!args.quiet && !args.json));
    let mut view = FrameView::new(!args.quiet && !args.json);

    let mut frames = interval(frame_interval(args.fps));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    wheel.start()?;
    for _ in 0..args.ticks {
        frames.tick().await;
        wheel.tick();
        view.frame(&wheel);
    }

    wheel.request_stop()?;
    loop {
        frames.tick().await;
        let resolved = wheel.tick();
        view.frame(&wheel);
        if let Some(Event::SpinResolved { .. }) = resolved {
            break;
        }
    }
    view.finish();
    Ok(())
}
