mod audio;
mod settings;
mod speech;
mod timer;

use std::sync::Arc;

use audio::CuePlayerHandle;
use settings::{SettingsStore, SoundSettings};
use speech::SpeechEngineHandle;
use tauri::{Emitter, Manager, State};
use timer::{
    commands::{add_interval, finish_timer, get_timer_state, start_timer, stop_timer},
    TimerController,
};

pub(crate) struct AppState {
    pub(crate) timer: TimerController,
    cue: CuePlayerHandle,
    settings: Arc<SettingsStore>,
}

#[tauri::command]
fn get_sound_settings(state: State<AppState>) -> Result<SoundSettings, String> {
    Ok(state.settings.sound())
}

#[tauri::command]
fn set_sound_settings(
    settings: SoundSettings,
    state: State<AppState>,
    app_handle: tauri::AppHandle,
) -> Result<(), String> {
    state
        .settings
        .update_sound(settings.clone())
        .map_err(|e| e.to_string())?;

    app_handle
        .emit("sound-settings-updated", &settings)
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[tauri::command]
fn preview_cue(state: State<AppState>) -> Result<(), String> {
    let volume = state.settings.sound().volume;
    state.cue.play(volume)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Rondo starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_path = app_data_dir.join("settings.json");
                let settings_store = Arc::new(SettingsStore::new(settings_path)?);

                // A user-provided cue.mp3 overrides the synthesized chime.
                let cue = CuePlayerHandle::new(app_data_dir.join("cue.mp3"));
                let speech = SpeechEngineHandle::new();

                let timer_controller = TimerController::new(
                    app.handle().clone(),
                    cue.clone(),
                    speech,
                    settings_store.clone(),
                );

                app.manage(AppState {
                    timer: timer_controller,
                    cue,
                    settings: settings_store,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_timer_state,
            add_interval,
            start_timer,
            stop_timer,
            finish_timer,
            get_sound_settings,
            set_sound_settings,
            preview_cue,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
