/// Fixed timestep clock
///
/// Turns variable frame times into a whole number of fixed-size simulation
/// steps so tile slides and animations advance identically on every machine.
use std::time::{Duration, Instant};

/// Target update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of steps per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Game loop timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Time not yet consumed by fixed steps
    accumulator: Duration,
    last_frame_time: Instant,
    paused: bool,
    frame_count: u64,
    step_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Begin a new frame using the wall clock, returns the number of fixed steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of elapsed time, returns the number of fixed steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        // Drop whatever a long stall left behind rather than catching up later
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!("Frame took too long, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.step_count += u64::from(steps);
        steps
    }

    /// Seconds covered by one fixed step
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total number of fixed steps handed out
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
