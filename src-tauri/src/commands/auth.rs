use tauri::State;

use crate::models::{Session, SessionInfo};
use crate::policy;
use crate::state::AppState;

pub(crate) fn session_info(session: &Session) -> SessionInfo {
    SessionInfo {
        user_id: session.user_id,
        role: session.role,
        menu: policy::menu(session.role),
        tables: policy::selector_tables(session.role),
    }
}

/// Verify credentials and open the one session. Unknown user and wrong
/// password are deliberately indistinguishable to the caller.
#[tauri::command]
pub async fn sign_in(
    username: String,
    password: String,
    state: State<'_, AppState>,
) -> Result<SessionInfo, String> {
    let gateway = state.gateway().map_err(|e| e.to_string())?;

    let session = gateway
        .authenticate(&username, &password)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Invalid username or password.".to_string())?;

    state.sign_in(session);
    Ok(session_info(&session))
}

/// Drop the session and everything rendered under it.
#[tauri::command]
pub async fn sign_out(state: State<'_, AppState>) -> Result<(), String> {
    state.sign_out();
    Ok(())
}

/// The active session, if any, for the frontend to restore after a reload.
#[tauri::command]
pub async fn current_session(state: State<'_, AppState>) -> Result<Option<SessionInfo>, String> {
    Ok(state.current_session().as_ref().map(session_info))
}
