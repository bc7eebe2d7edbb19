use tauri::State;

use crate::models::{Role, TableGrid};
use crate::policy::{self, AdminTable, PolicyError, ViewKind};
use crate::state::AppState;

/// Run `kind` for the current session, record it as the rendered view and
/// return the grid. Read failures propagate verbatim for the warning
/// dialog; the previously recorded view stays untouched in that case.
pub(crate) async fn render_view(state: &AppState, kind: ViewKind) -> Result<TableGrid, String> {
    let session = state.current_session().ok_or("Not signed in.")?;
    let gateway = state.gateway().map_err(|e| e.to_string())?;

    let action = kind.read_action(&session);
    let grid = gateway
        .fetch(&action.sql, &action.params, action.key_column)
        .await
        .map_err(|e| e.to_string())?;

    state.set_view(kind, grid.clone());
    Ok(grid)
}

/// Admin's generic view over one whitelisted table.
#[tauri::command]
pub async fn view_table(table: String, state: State<'_, AppState>) -> Result<TableGrid, String> {
    let session = state.current_session().ok_or("Not signed in.")?;
    if session.role != Role::Admin {
        return Err(PolicyError::NotPermitted.to_string());
    }

    let table = AdminTable::parse(&table).ok_or_else(|| format!("Unknown table: {}", table))?;
    render_view(state.inner(), ViewKind::AdminTable(table)).await
}

/// Re-run the current role's read action. Admin has nothing to show until
/// the first table pick.
#[tauri::command]
pub async fn refresh_grid(state: State<'_, AppState>) -> Result<Option<TableGrid>, String> {
    let session = state.current_session().ok_or("Not signed in.")?;

    let kind = state
        .current_view_kind()
        .or_else(|| policy::landing_view(session.role));

    match kind {
        Some(kind) => render_view(state.inner(), kind).await.map(Some),
        None => Ok(None),
    }
}
