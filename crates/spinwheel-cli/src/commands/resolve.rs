use std::num::NonZeroUsize;

use clap::Args;
use spinwheel_core::{resolve, segment_angle, segment_start};

use crate::common::CliResult;

#[derive(Args)]
pub struct ResolveArgs {
    /// Clockwise wheel rotation in degrees (any value; whole turns are ignored)
    #[arg(allow_hyphen_values = true)]
    angle: f64,
    /// Number of segments on the wheel
    count: NonZeroUsize,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ResolveArgs) -> CliResult {
    let index = resolve(args.angle, args.count);
    if args.json {
        let out = serde_json::json!({
            "angle": args.angle,
            "segment_count": args.count.get(),
            "segment_angle": segment_angle(args.count),
            "index": index,
            "segment_start": segment_start(index, args.count),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{index}");
    }
    Ok(())
}
