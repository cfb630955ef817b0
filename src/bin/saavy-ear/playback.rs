//! Sine-tone playback of question sequences

use std::collections::VecDeque;
use std::f32::consts::TAU;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use saavy_ear::Element;

/// MIDI note that element 0 sounds as (middle C)
const ROOT_NOTE: i32 = 60;
const NOTE_SECONDS: f32 = 0.55;
const GAP_SECONDS: f32 = 0.1;
/// Attack/release ramp, keeps note edges from clicking
const RAMP_SECONDS: f32 = 0.01;
const LEVEL: f32 = 0.2;

fn note_to_freq(note: i32) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// One queued tone; `freq == None` is silence
struct Tone {
    freq: Option<f32>,
    remaining: usize,
    length: usize,
}

struct ToneQueue {
    tones: VecDeque<Tone>,
    phase: f32,
}

impl ToneQueue {
    fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let Some(tone) = self.tones.front_mut() else {
            return 0.0;
        };

        let sample = match tone.freq {
            Some(freq) => {
                let elapsed = (tone.length - tone.remaining) as f32 / sample_rate;
                let left = tone.remaining as f32 / sample_rate;
                let envelope = (elapsed / RAMP_SECONDS).min(left / RAMP_SECONDS).min(1.0);
                self.phase = (self.phase + TAU * freq / sample_rate) % TAU;
                self.phase.sin() * envelope * LEVEL
            }
            None => 0.0,
        };

        tone.remaining = tone.remaining.saturating_sub(1);
        if tone.remaining == 0 {
            self.tones.pop_front();
            self.phase = 0.0;
        }
        sample
    }
}

/// Default output device playing queued tones
pub struct Player {
    queue: Arc<Mutex<ToneQueue>>,
    sample_rate: f32,
    _stream: cpal::Stream,
}

impl Player {
    pub fn new() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let queue = Arc::new(Mutex::new(ToneQueue {
            tones: VecDeque::new(),
            phase: 0.0,
        }));
        let shared = queue.clone();

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let Ok(mut queue) = shared.lock() else {
                    data.fill(0.0);
                    return;
                };
                for frame in data.chunks_mut(channels) {
                    let s = queue.next_sample(sample_rate);
                    frame.fill(s);
                }
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;
        stream.play()?;

        Ok(Self {
            queue,
            sample_rate,
            _stream: stream,
        })
    }

    /// Queue `elements` as consecutive notes, replacing anything still playing.
    /// Returns how long the sequence takes.
    pub fn play(&self, elements: &[Element]) -> Duration {
        let note = (NOTE_SECONDS * self.sample_rate) as usize;
        let gap = (GAP_SECONDS * self.sample_rate) as usize;

        if let Ok(mut queue) = self.queue.lock() {
            queue.tones.clear();
            queue.phase = 0.0;
            for &element in elements {
                queue.tones.push_back(Tone {
                    freq: Some(note_to_freq(ROOT_NOTE + element)),
                    remaining: note,
                    length: note,
                });
                queue.tones.push_back(Tone {
                    freq: None,
                    remaining: gap,
                    length: gap,
                });
            }
        }

        Duration::from_secs_f32(elements.len() as f32 * (NOTE_SECONDS + GAP_SECONDS))
    }
}
