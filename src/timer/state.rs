use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label stored for intervals added without a description.
pub const DEFAULT_LABEL: &str = "No description";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Finished,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub duration_secs: u32,
    pub label: String,
}

impl Interval {
    /// Build an interval from raw widget text. Returns `None` when the
    /// duration is not a positive whole number of seconds. A blank label
    /// falls back to the placeholder.
    pub fn from_input(duration_text: &str, label_text: &str) -> Option<Self> {
        let duration_secs = duration_text.trim().parse::<u32>().ok()?;
        if duration_secs == 0 {
            return None;
        }
        let label = label_text.trim();
        let label = if label.is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            label.to_string()
        };
        Some(Self {
            duration_secs,
            label,
        })
    }
}

/// Side effects requested by a transition. The controller executes these;
/// the state machine itself never touches audio or speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Speak the given interval label.
    Announce(String),
    /// Play the boundary cue.
    PlayCue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub intervals: Vec<Interval>,
    pub current_index: usize,
    pub remaining_secs: u32,
    pub status: TimerStatus,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
            current_index: 0,
            remaining_secs: 0,
            status: TimerStatus::Idle,
            started_at: None,
        }
    }
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue another interval. Valid only before a run or between runs;
    /// returns false (queue unchanged) while a run is active.
    pub fn add(&mut self, interval: Interval) -> bool {
        match self.status {
            TimerStatus::Idle | TimerStatus::Finished => {
                self.intervals.push(interval);
                true
            }
            TimerStatus::Running | TimerStatus::Paused => false,
        }
    }

    /// Begin or resume the countdown.
    ///
    /// From `Idle` or `Finished` this (re)starts the sequence at the first
    /// interval; from `Paused` it resumes with `remaining_secs` untouched.
    /// The current label is announced in every case.
    pub fn start(&mut self, now: DateTime<Utc>) -> Vec<Effect> {
        match self.status {
            TimerStatus::Idle | TimerStatus::Finished => {
                if self.intervals.is_empty() {
                    return Vec::new();
                }
                self.current_index = 0;
                self.remaining_secs = self.intervals[0].duration_secs;
                self.status = TimerStatus::Running;
                self.started_at = Some(now);
                vec![Effect::Announce(self.intervals[0].label.clone())]
            }
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                match self.current_interval() {
                    Some(interval) => vec![Effect::Announce(interval.label.clone())],
                    None => Vec::new(),
                }
            }
            TimerStatus::Running => Vec::new(),
        }
    }

    /// One second elapsed. Decrements the countdown by exactly one; on
    /// reaching zero the boundary cue fires and the index advances, loading
    /// and announcing the next interval or finishing the run.
    pub fn tick(&mut self) -> Vec<Effect> {
        if self.status != TimerStatus::Running {
            return Vec::new();
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Vec::new();
        }

        let mut effects = vec![Effect::PlayCue];
        self.current_index += 1;
        match self.intervals.get(self.current_index) {
            Some(next) => {
                self.remaining_secs = next.duration_secs;
                effects.push(Effect::Announce(next.label.clone()));
            }
            None => {
                self.status = TimerStatus::Finished;
            }
        }
        effects
    }

    /// Freeze the countdown mid-interval; `start` resumes it.
    pub fn stop(&mut self) {
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
        }
    }

    /// Terminate the run early. Index and countdown reset unconditionally,
    /// from any state.
    pub fn finish(&mut self) {
        self.status = TimerStatus::Finished;
        self.current_index = 0;
        self.remaining_secs = 0;
        self.started_at = None;
    }

    pub fn current_interval(&self) -> Option<&Interval> {
        self.intervals.get(self.current_index)
    }

    /// Countdown text for the UI: zero-padded `MM:SS`, or the terminal
    /// message once finished.
    pub fn display(&self) -> String {
        match self.status {
            TimerStatus::Finished => "Done".to_string(),
            _ => format!(
                "{:02}:{:02}",
                self.remaining_secs / 60,
                self.remaining_secs % 60
            ),
        }
    }
}
