// Sprite frame animation
//
// Cycles through a sequence of sprite-sheet frame indices as time passes.

/// Default seconds each frame stays on screen
pub const DEFAULT_FRAME_DURATION: f32 = 0.15;

/// Plays a sequence of frame indices
#[derive(Debug, Clone)]
pub struct Animation {
    /// Frame indices into the sprite sheet, never empty
    frames: Vec<usize>,
    /// Position within `frames`
    index: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Duration of each frame in seconds
    frame_duration: f32,
    looping: bool,
}

impl Animation {
    /// Create an animation. An empty frame list falls back to frame 0.
    pub fn new(frames: Vec<usize>, looping: bool, frame_duration: f32) -> Self {
        let frames = if frames.is_empty() {
            log::warn!("Animation created without frames, using frame 0");
            vec![0]
        } else {
            frames
        };

        Self {
            frames,
            index: 0,
            frame_timer: 0.0,
            frame_duration: frame_duration.max(f32::EPSILON),
            looping,
        }
    }

    /// Replace the frame sequence, keeping the position when it still fits
    pub fn set_frames(&mut self, frames: &[usize]) {
        if frames.is_empty() {
            log::warn!("Ignoring empty frame set, keeping {:?}", self.frames);
            return;
        }
        self.frames = frames.to_vec();
        self.index = self.index.min(self.frames.len() - 1);
    }

    /// Advance the animation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.frame_timer += dt.max(0.0);

        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            self.index += 1;

            if self.index >= self.frames.len() {
                if self.looping {
                    self.index = 0;
                } else {
                    // Hold the last frame
                    self.index = self.frames.len() - 1;
                    self.frame_timer = 0.0;
                    break;
                }
            }
        }
    }

    /// Current sprite-sheet frame index
    pub fn frame(&self) -> usize {
        self.frames.get(self.index).copied().unwrap_or_default()
    }

    /// True once a one-shot animation sits on its last frame
    pub fn is_finished(&self) -> bool {
        !self.looping && self.index + 1 >= self.frames.len()
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }
}
