use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

const SAMPLE_RATE: u32 = 44100;
const LOW_HZ: f32 = 880.0;
const HIGH_HZ: f32 = 1174.66;
const TOTAL_SAMPLES: usize = (SAMPLE_RATE as usize * 2) / 5; // 400ms

/// Synthesized boundary chime used when no cue file is installed.
/// Two short rising tones with a linear fade-out to avoid a click.
pub struct Chime {
    num_sample: usize,
}

impl Chime {
    pub fn new() -> Self {
        Self { num_sample: 0 }
    }
}

impl Iterator for Chime {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= TOTAL_SAMPLES {
            return None;
        }

        let t = self.num_sample as f32 / SAMPLE_RATE as f32;
        let freq = if self.num_sample < TOTAL_SAMPLES / 2 {
            LOW_HZ
        } else {
            HIGH_HZ
        };
        let fade = 1.0 - self.num_sample as f32 / TOTAL_SAMPLES as f32;
        self.num_sample += 1;

        Some((2.0 * PI * freq * t).sin() * fade * 0.3) // Lower amplitude to prevent clipping
    }
}

impl Source for Chime {
    fn current_frame_len(&self) -> Option<usize> {
        Some(TOTAL_SAMPLES.saturating_sub(self.num_sample))
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_millis(400))
    }
}
