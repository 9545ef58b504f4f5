pub mod chime;

use chime::Chime;

use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

enum CueCommand {
    Play { volume: f32 },
}

/// Handle to the dedicated cue-playback thread.
///
/// A user-supplied `cue.mp3` in the app data dir takes priority; without one
/// the synthesized chime plays instead.
#[derive(Clone)]
pub struct CuePlayerHandle {
    tx: Arc<Mutex<Option<Sender<CueCommand>>>>,
    cue_path: Arc<PathBuf>,
}

impl CuePlayerHandle {
    pub fn new(cue_path: PathBuf) -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            cue_path: Arc::new(cue_path),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<CueCommand>, String> {
        if let Some(tx) = self.tx.lock().map_err(|e| e.to_string())?.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<CueCommand>();
        let cue_path = Arc::clone(&self.cue_path);

        // Spawn dedicated audio thread holding non-Send audio objects
        thread::Builder::new()
            .name("audio-cue".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        CueCommand::Play { volume } => {
                            if let Err(err) = ensure_sink(&mut _stream, &mut sink) {
                                log::error!("{err}");
                                continue;
                            }
                            if let Some(ref s) = sink {
                                s.set_volume(volume.clamp(0.0, 1.0));
                                match open_cue_file(&cue_path) {
                                    Some(source) => s.append(source),
                                    None => s.append(Chime::new()),
                                }
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

    /// Queue one playback of the cue. Fire-and-forget.
    pub fn play(&self, volume: f32) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(CueCommand::Play { volume })
            .map_err(|e| e.to_string())
    }
}

fn open_cue_file(path: &Path) -> Option<Decoder<BufReader<File>>> {
    if !path.exists() {
        return None;
    }
    let file = File::open(path).ok()?;
    Decoder::new(BufReader::new(file)).ok()
}
