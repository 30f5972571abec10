//! Terminal presentation and feedback.
//!
//! Event output goes to stdout, one line per event. The live wheel
//! (angle and the item under the pointer) is redrawn in place on stderr, and
//! only when stderr is a terminal. Sound is the terminal bell.

use std::io::{IsTerminal, Write};
use std::time::{Duration, Instant};

use spinwheel_core::{Event, EventListener, Wheel};
use tracing::warn;

const BELL: &str = "\x07";
const CLEAR_LINE: &str = "\r\x1b[2K";
/// Segment-crossing cues closer together than this are dropped.
const CUE_SPACING: Duration = Duration::from_millis(80);

/// Prints every wheel event, as text or as JSON lines.
pub struct EventPrinter {
    json: bool,
}

impl EventPrinter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl EventListener for EventPrinter {
    fn on_event(&mut self, event: &Event) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "could not serialize event"),
            }
            return;
        }
        println!("{}", describe(event));
    }
}

pub fn describe(event: &Event) -> String {
    match event {
        Event::SpinStarted {
            mode,
            segment_count,
            ..
        } => format!("Spinning the {mode} wheel ({segment_count} segments)..."),
        Event::SpinStopping { .. } => "Selecting...".to_string(),
        Event::SpinResolved { mode, item, .. } => format!("{}: {item}", mode.title()),
        Event::ItemAdded {
            mode, index, item, ..
        } => format!("Added '{item}' to {mode} as #{}", index + 1),
        Event::ItemRemoved {
            mode, index, item, ..
        } => format!("Removed #{} '{item}' from {mode}", index + 1),
        Event::ModeChanged { mode, .. } => format!("{}. Spin the wheel!", mode.title()),
        Event::StateSnapshot {
            state,
            mode,
            items,
            rotation,
            ..
        } => {
            let mut out = format!(
                "{} | {} | rotation {rotation:.1}°",
                mode.title(),
                state.name()
            );
            for (i, item) in items.iter().enumerate() {
                out.push_str(&format!("\n  {}. {item}", i + 1));
            }
            out
        }
    }
}

/// Rings the bell when a spin resolves.
pub struct ResultChime {
    sound: bool,
}

impl ResultChime {
    pub fn new(sound: bool) -> Self {
        Self { sound }
    }
}

impl EventListener for ResultChime {
    fn on_event(&mut self, event: &Event) {
        if self.sound && matches!(event, Event::SpinResolved { .. }) {
            eprint!("{BELL}");
            let _ = std::io::stderr().flush();
        }
    }
}

/// Per-frame wheel readout plus a tick cue whenever a new segment passes
/// under the pointer.
pub struct FrameView {
    draw: bool,
    sound: bool,
    last_segment: Option<usize>,
    last_cue: Option<Instant>,
}

impl FrameView {
    pub fn new(sound: bool) -> Self {
        Self {
            draw: std::io::stderr().is_terminal(),
            sound,
            last_segment: None,
            last_cue: None,
        }
    }

    pub fn frame(&mut self, wheel: &Wheel) {
        if !wheel.engine().is_in_progress() {
            self.finish();
            return;
        }
        let segment = wheel.segment_under_pointer();
        let crossed = self.last_segment.is_some_and(|last| last != segment);
        self.last_segment = Some(segment);

        let mut stderr = std::io::stderr();
        if self.draw {
            let label = wheel
                .store()
                .active_items()
                .get(segment)
                .map(|item| item.as_str())
                .unwrap_or_default();
            let _ = write!(
                stderr,
                "{CLEAR_LINE}{:6.1}°  ▸ {label}",
                wheel.engine().display_rotation()
            );
        }
        if crossed && self.sound && self.cue_due() {
            let _ = write!(stderr, "{BELL}");
        }
        let _ = stderr.flush();
    }

    /// Clear the readout line.
    pub fn finish(&mut self) {
        if self.last_segment.take().is_some() && self.draw {
            eprint!("{CLEAR_LINE}");
            let _ = std::io::stderr().flush();
        }
    }

    fn cue_due(&mut self) -> bool {
        let now = Instant::now();
        match self.last_cue {
            Some(last) if now.duration_since(last) < CUE_SPACING => false,
            _ => {
                self.last_cue = Some(now);
                true
            }
        }
    }
}
