//! Typewriter hint text for the empty composer.
//!
//! [`PlaceholderCycler`] types each prompt out one character at a time,
//! holds the full prompt, then moves on to the next one. After the prompt
//! list has been cycled `settle_after_cycles` times it types the first
//! prompt once more and stops for good.
//!
//! The cycler never sleeps. A driver asks for [`PlaceholderCycler::next_delay`],
//! waits that long, and calls [`PlaceholderCycler::step`]. [`AnimatedPlaceholder`]
//! is that driver for callers who poll with an [`Instant`]; it keeps at most
//! one pending tick in a [`PlaceholderTimer`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prompts shown when nothing else is configured.
pub const DEFAULT_PROMPTS: [&str; 6] = [
    "Create a chat message",
    "Send an LTK or rstyle link",
    "Share a day in the life",
    "Share a quote",
    "Share a book or movie rec",
    "Share funny moments",
];

/// Fixed hint shown instead of the animation while media is staged.
pub const CAPTION_PROMPT: &str = "Add a caption to your uploaded media";

/// Errors that can occur when building a cycler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("placeholder needs at least one prompt")]
    NoPrompts,
}

/// Placeholder animation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    /// Prompts to cycle through, in order.
    #[serde(default = "default_prompts")]
    pub prompts: Vec<String>,

    /// Delay between typed characters.
    #[serde(default = "default_type_interval_ms")]
    pub type_interval_ms: u64,

    /// Delay after a prompt is fully typed.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,

    /// Full passes through the prompt list before settling.
    #[serde(default = "default_settle_after_cycles")]
    pub settle_after_cycles: u32,
}

fn default_prompts() -> Vec<String> {
    DEFAULT_PROMPTS.iter().map(ToString::to_string).collect()
}

fn default_type_interval_ms() -> u64 {
    50
}

fn default_hold_ms() -> u64 {
    1200
}

fn default_settle_after_cycles() -> u32 {
    2
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            prompts: default_prompts(),
            type_interval_ms: default_type_interval_ms(),
            hold_ms: default_hold_ms(),
            settle_after_cycles: default_settle_after_cycles(),
        }
    }
}

/// Where the cycler is in its animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderPhase {
    /// Revealing the prompt one character per tick.
    Typing { prompt_index: usize, typed_len: usize },
    /// Prompt fully typed, waiting before the next one.
    Holding { prompt_index: usize },
    /// Terminal; the first prompt is shown in full forever.
    Settled,
}

/// Typewriter state machine over a fixed prompt list.
#[derive(Debug, Clone)]
pub struct PlaceholderCycler {
    prompts: Vec<String>,
    prompt_index: usize,
    typed_len: usize,
    cycle_count: u32,
    type_interval: Duration,
    hold: Duration,
    settle_after: u32,
}

impl PlaceholderCycler {
    pub fn new(config: &PlaceholderConfig) -> Result<Self, PlaceholderError> {
        if config.prompts.is_empty() {
            return Err(PlaceholderError::NoPrompts);
        }
        Ok(Self {
            prompts: config.prompts.clone(),
            prompt_index: 0,
            typed_len: 0,
            cycle_count: 0,
            type_interval: Duration::from_millis(config.type_interval_ms),
            hold: Duration::from_millis(config.hold_ms),
            settle_after: config.settle_after_cycles,
        })
    }

    /// Cycler over `prompts` with the default timings.
    pub fn with_prompts<I, S>(prompts: I) -> Result<Self, PlaceholderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(&PlaceholderConfig {
            prompts: prompts.into_iter().map(Into::into).collect(),
            ..PlaceholderConfig::default()
        })
    }

    pub fn prompt_index(&self) -> usize {
        self.prompt_index
    }

    pub fn typed_len(&self) -> usize {
        self.typed_len
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    fn prompt_len(&self, index: usize) -> usize {
        self.prompts[index].chars().count()
    }

    fn cycling_done(&self) -> bool {
        self.cycle_count >= self.settle_after
    }

    pub fn phase(&self) -> PlaceholderPhase {
        let typing = PlaceholderPhase::Typing {
            prompt_index: self.prompt_index,
            typed_len: self.typed_len,
        };

        if self.cycling_done() {
            if self.prompt_index != 0 || self.typed_len < self.prompt_len(0) {
                typing
            } else {
                PlaceholderPhase::Settled
            }
        } else if self.typed_len < self.prompt_len(self.prompt_index) {
            typing
        } else {
            PlaceholderPhase::Holding {
                prompt_index: self.prompt_index,
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        self.phase() == PlaceholderPhase::Settled
    }

    /// Delay before the next [`step`](Self::step), or `None` once settled.
    pub fn next_delay(&self) -> Option<Duration> {
        match self.phase() {
            PlaceholderPhase::Typing { .. } => Some(self.type_interval),
            PlaceholderPhase::Holding { .. } => Some(self.hold),
            PlaceholderPhase::Settled => None,
        }
    }

    /// Apply one transition. Returns `false` once settled.
    pub fn step(&mut self) -> bool {
        match self.phase() {
            PlaceholderPhase::Settled => false,
            PlaceholderPhase::Typing { .. } => {
                if self.cycling_done() && self.prompt_index != 0 {
                    self.prompt_index = 0;
                    self.typed_len = 0;
                } else {
                    self.typed_len += 1;
                }
                true
            }
            PlaceholderPhase::Holding { .. } => {
                self.typed_len = 0;
                self.prompt_index = (self.prompt_index + 1) % self.prompts.len();
                if self.prompt_index == 0 {
                    self.cycle_count += 1;
                }
                true
            }
        }
    }

    /// Text to show right now: the typed prefix of the current prompt.
    pub fn display(&self) -> &str {
        let prompt = &self.prompts[self.prompt_index];
        match prompt.char_indices().nth(self.typed_len) {
            Some((end, _)) => &prompt[..end],
            None => prompt,
        }
    }
}

/// Single-slot deadline. Scheduling replaces whatever was pending.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderTimer {
    deadline: Option<Instant>,
}

impl PlaceholderTimer {
    pub fn schedule(&mut self, at: Instant) {
        self.deadline = Some(at);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Clear and return the deadline if it has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<Instant> {
        match self.deadline {
            Some(at) if at <= now => self.deadline.take(),
            _ => None,
        }
    }
}

/// Upper bound on steps applied by one [`AnimatedPlaceholder::poll`].
const MAX_CATCH_UP_STEPS: usize = 64;

/// A cycler plus its timer, advanced by polling with the current instant.
#[derive(Debug, Clone)]
pub struct AnimatedPlaceholder {
    cycler: PlaceholderCycler,
    timer: PlaceholderTimer,
}

impl AnimatedPlaceholder {
    pub fn new(cycler: PlaceholderCycler) -> Self {
        Self {
            cycler,
            timer: PlaceholderTimer::default(),
        }
    }

    /// Schedule the first tick relative to `now`.
    pub fn start(&mut self, now: Instant) {
        match self.cycler.next_delay() {
            Some(delay) => self.timer.schedule(now + delay),
            None => self.timer.cancel(),
        }
    }

    /// Run every tick that has come due by `now`. Returns whether the
    /// displayed text changed.
    ///
    /// Each next tick is scheduled from the previous deadline, so a slow
    /// caller catches up instead of slowing the animation down.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for _ in 0..MAX_CATCH_UP_STEPS {
            let Some(fired_at) = self.timer.take_due(now) else {
                break;
            };
            changed |= self.cycler.step();
            if let Some(delay) = self.cycler.next_delay() {
                self.timer.schedule(fired_at + delay);
            }
        }
        changed
    }

    pub fn cycler(&self) -> &PlaceholderCycler {
        &self.cycler
    }

    pub fn timer(&self) -> &PlaceholderTimer {
        &self.timer
    }

    pub fn display(&self) -> &str {
        self.cycler.display()
    }
}
