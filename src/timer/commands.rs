use tauri::State;

use crate::AppState;

use super::{TimerController, TimerSnapshot};

fn controller_from_state(state: &State<'_, AppState>) -> TimerController {
    state.timer.clone()
}

#[tauri::command]
pub async fn get_timer_state(state: State<'_, AppState>) -> Result<TimerSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_snapshot().await)
}

#[tauri::command]
pub async fn add_interval(
    state: State<'_, AppState>,
    duration: String,
    label: String,
) -> Result<TimerSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.add_interval(&duration, &label).await)
}

#[tauri::command]
pub async fn start_timer(state: State<'_, AppState>) -> Result<TimerSnapshot, String> {
    let controller = controller_from_state(&state);
    controller.start().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn stop_timer(state: State<'_, AppState>) -> Result<TimerSnapshot, String> {
    let controller = controller_from_state(&state);
    controller.stop().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn finish_timer(state: State<'_, AppState>) -> Result<TimerSnapshot, String> {
    let controller = controller_from_state(&state);
    controller.finish().await.map_err(|e| e.to_string())
}
