//! Speech synthesis for interval announcements
//!
//! Utterances are fire-and-forget; the channel serializes them. TTS is
//! unavailable on Linux without speech-dispatcher, so `espeak` is used there.

use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

enum SpeechCommand {
    Speak(String),
}

/// Handle to the dedicated speech-synthesis thread. Spawned lazily on the
/// first utterance.
#[derive(Clone)]
pub struct SpeechEngineHandle {
    tx: Arc<Mutex<Option<Sender<SpeechCommand>>>>,
}

impl SpeechEngineHandle {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<SpeechCommand>, String> {
        if let Some(tx) = self.tx.lock().map_err(|e| e.to_string())?.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<SpeechCommand>();

        thread::Builder::new()
            .name("speech-engine".to_string())
            .spawn(move || {
                #[cfg(not(target_os = "linux"))]
                let mut engine = match tts::Tts::default() {
                    Ok(mut engine) => {
                        let _ = engine.set_rate(engine.normal_rate());
                        Some(engine)
                    }
                    Err(err) => {
                        log::warn!("Speech synthesis unavailable: {err}");
                        None
                    }
                };

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        SpeechCommand::Speak(text) => {
                            #[cfg(not(target_os = "linux"))]
                            if let Some(ref mut tts) = engine {
                                let _ = tts.speak(&text, false);
                            }

                            #[cfg(target_os = "linux")]
                            {
                                use std::process::Command;
                                let _ = Command::new("espeak").arg(&text).output();
                            }
                        }
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *self.tx.lock().map_err(|e| e.to_string())? = Some(tx);
        Ok(tx_clone)
    }

    /// Queue an utterance. Fire-and-forget.
    pub fn speak(&self, text: String) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(SpeechCommand::Speak(text))
            .map_err(|e| e.to_string())
    }
}
