//! Headless frame-loop driver for the pendulum simulation.
//!
//! Stands in for the windowed renderer: wires a monotonic clock and a
//! scripted event source to the simulation, paces frames at roughly
//! 60 Hz, and prints the published readout instead of drawing it.

use std::{env, error::Error, fs, process::ExitCode, thread, time::Duration};

use tracing::{error, info};
use uom::si::length::meter;

use pendulum_core::{EventSource, InputEvent, MonotonicClock, SimulationConfig};

const MAX_FRAMES: usize = 600;
const FRAME_PACING: Duration = Duration::from_millis(16);
const PRINT_EVERY: usize = 30;

/// Frame-indexed event playback standing in for interactive input.
struct Script {
    cues: Vec<(usize, InputEvent)>,
    frame: usize,
}

impl Script {
    fn demo() -> Self {
        Self {
            cues: vec![
                (120, InputEvent::IncrementDamping),
                (121, InputEvent::IncrementDamping),
                (240, InputEvent::DecrementAngle),
                (241, InputEvent::DecrementAngle),
                (242, InputEvent::DecrementAngle),
                (300, InputEvent::Reset),
                (420, InputEvent::DecrementDamping),
                (421, InputEvent::DecrementDamping),
                (422, InputEvent::DecrementDamping),
                (599, InputEvent::Quit),
            ],
            frame: 0,
        }
    }
}

impl EventSource for Script {
    fn poll(&mut self) -> Vec<InputEvent> {
        let current = self.frame;
        self.frame += 1;
        self.cues
            .iter()
            .filter(|(at, _)| *at == current)
            .map(|(_, event)| *event)
            .collect()
    }
}

fn load_config() -> Result<SimulationConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "loading simulation config");
            let text = fs::read_to_string(&path)?;
            Ok(SimulationConfig::from_toml_str(&text)?)
        }
        None => Ok(SimulationConfig::default()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let mut simulation = match config.build() {
        Ok(simulation) => simulation,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut clock = MonotonicClock::new();
    let mut script = Script::demo();

    for frame_index in 0..MAX_FRAMES {
        let events = script.poll();
        if events.contains(&InputEvent::Quit) {
            info!(frame_index, "quit requested");
            break;
        }

        let frame = simulation.advance_frame(&mut clock, events);

        if frame_index % PRINT_EVERY == 0 {
            println!(
                "bob ({:7.2}, {:7.2})  angle {:6.1} deg  speed {:6.1} deg/s  scale {:.3}  damping {:.3}",
                frame.bob.x.get::<meter>(),
                frame.bob.y.get::<meter>(),
                frame.readout.staged_angle_degrees,
                frame.readout.staged_speed_degrees,
                frame.readout.time_scale,
                frame.readout.damping_per_second,
            );
        }

        thread::sleep(FRAME_PACING);
    }

    ExitCode::SUCCESS
}
