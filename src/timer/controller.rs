use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use serde::Serialize;
use tokio::{sync::Mutex, task::JoinHandle, time};

use crate::{audio::CuePlayerHandle, settings::SettingsStore, speech::SpeechEngineHandle};

use super::{Effect, Interval, TimerState, TimerStatus};

use tauri::{AppHandle, Emitter};

#[derive(Debug, Serialize, Clone)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub display: String,
}

#[derive(Serialize, Clone)]
struct TimerStateChangedEvent {
    state: TimerState,
    display: String,
}

#[derive(Serialize, Clone)]
struct RunFinishedEvent {
    finished_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    app_handle: AppHandle,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    tick_interval: Duration,
    cue: CuePlayerHandle,
    speech: SpeechEngineHandle,
    settings: Arc<SettingsStore>,
}

impl TimerController {
    pub fn new(
        app_handle: AppHandle,
        cue: CuePlayerHandle,
        speech: SpeechEngineHandle,
        settings: Arc<SettingsStore>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(TimerState::new())),
            app_handle,
            ticker: Arc::new(Mutex::new(None)),
            tick_interval: Duration::from_secs(1),
            cue,
            speech,
            settings,
        }
    }

    pub async fn get_snapshot(&self) -> TimerSnapshot {
        let guard = self.state.lock().await;
        snapshot_of(&guard)
    }

    /// Parse and queue an interval. Invalid duration text is silently
    /// ignored; the queue is returned unchanged.
    pub async fn add_interval(&self, duration_text: &str, label_text: &str) -> TimerSnapshot {
        let Some(interval) = Interval::from_input(duration_text, label_text) else {
            debug!("Ignoring interval with invalid duration {:?}", duration_text);
            return self.get_snapshot().await;
        };

        let snapshot = {
            let mut guard = self.state.lock().await;
            if guard.add(interval.clone()) {
                info!(
                    "Queued interval '{}' ({}s)",
                    interval.label, interval.duration_secs
                );
            } else {
                debug!("Ignoring interval added mid-run");
            }
            snapshot_of(&guard)
        };

        emit_timer_state(&self.app_handle, snapshot.clone());
        snapshot
    }

    pub async fn start(&self) -> Result<TimerSnapshot> {
        let (effects, snapshot) = {
            let mut guard = self.state.lock().await;
            if guard.status == TimerStatus::Running {
                return Err(anyhow!("timer already running"));
            }
            if guard.intervals.is_empty() {
                return Err(anyhow!("no intervals queued"));
            }
            let effects = guard.start(Utc::now());
            (effects, snapshot_of(&guard))
        };

        self.spawn_ticker().await;
        self.dispatch_effects(effects);
        emit_timer_state(&self.app_handle, snapshot.clone());
        info!("Run started at interval {}", snapshot.state.current_index);
        Ok(snapshot)
    }

    /// Pause the countdown. No-op when nothing is running.
    pub async fn stop(&self) -> Result<TimerSnapshot> {
        let snapshot = {
            let mut guard = self.state.lock().await;
            guard.stop();
            snapshot_of(&guard)
        };

        self.cancel_ticker().await;
        emit_timer_state(&self.app_handle, snapshot.clone());
        Ok(snapshot)
    }

    /// Terminate the run early, from any state.
    pub async fn finish(&self) -> Result<TimerSnapshot> {
        let snapshot = {
            let mut guard = self.state.lock().await;
            guard.finish();
            snapshot_of(&guard)
        };

        self.cancel_ticker().await;
        emit_timer_state(&self.app_handle, snapshot.clone());
        self.emit_run_finished();
        info!("Run finished early");
        Ok(snapshot)
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let app_handle = self.app_handle.clone();
        let tick_interval = self.tick_interval;
        let cue = self.cue.clone();
        let speech = self.speech.clone();
        let settings = self.settings.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            // The first tick completes immediately; the countdown starts one
            // full period later.
            interval.tick().await;
            loop {
                interval.tick().await;

                let (effects, snapshot) = {
                    let mut guard = state.lock().await;
                    if guard.status != TimerStatus::Running {
                        break;
                    }
                    let effects = guard.tick();
                    (effects, snapshot_of(&guard))
                };

                dispatch(&cue, &speech, &settings, effects);

                let finished = snapshot.state.status == TimerStatus::Finished;
                emit_timer_state(&app_handle, snapshot);

                if finished {
                    let _ = app_handle.emit(
                        "run-finished",
                        RunFinishedEvent {
                            finished_at: Utc::now(),
                        },
                    );
                    info!("Interval sequence complete");
                    break;
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }

    fn dispatch_effects(&self, effects: Vec<Effect>) {
        dispatch(&self.cue, &self.speech, &self.settings, effects);
    }

    fn emit_run_finished(&self) {
        let _ = self.app_handle.emit(
            "run-finished",
            RunFinishedEvent {
                finished_at: Utc::now(),
            },
        );
    }
}

/// Execute side-effect requests. Audio and speech are best-effort: failures
/// are logged and never reach the state machine.
fn dispatch(
    cue: &CuePlayerHandle,
    speech: &SpeechEngineHandle,
    settings: &SettingsStore,
    effects: Vec<Effect>,
) {
    let sound = settings.sound();
    for effect in effects {
        match effect {
            Effect::Announce(text) => {
                if sound.speech_enabled {
                    if let Err(err) = speech.speak(text) {
                        error!("Failed to queue announcement: {err}");
                    }
                }
            }
            Effect::PlayCue => {
                if sound.cue_enabled {
                    if let Err(err) = cue.play(sound.volume) {
                        error!("Failed to play cue: {err}");
                    }
                }
            }
        }
    }
}

fn snapshot_of(state: &TimerState) -> TimerSnapshot {
    TimerSnapshot {
        display: state.display(),
        state: state.clone(),
    }
}

fn emit_timer_state(app_handle: &AppHandle, snapshot: TimerSnapshot) {
    let payload = TimerStateChangedEvent {
        display: snapshot.display,
        state: snapshot.state,
    };

    let _ = app_handle.emit("timer-state-changed", payload);
}
