use tauri::State;

use crate::models::MutationOutcome;
use crate::policy::{self, AdminTable, SqlParam, ViewKind};
use crate::state::AppState;

use super::grid::render_view;

/// Admin: delete the selected Users row. The database cascades the delete
/// into the professor/student profile tables. On success the Users view
/// is re-run so the grid never shows the deleted row.
#[tauri::command]
pub async fn delete_user(
    row: Option<u32>,
    state: State<'_, AppState>,
) -> Result<MutationOutcome, String> {
    let session = state.current_session().ok_or("Not signed in.")?;

    let selected = row.and_then(|r| state.selected_key(r as usize));
    let user_id = policy::validate_delete_user(&session, state.current_view_kind(), selected)
        .map_err(|e| e.to_string())?;

    let gateway = state.gateway().map_err(|e| e.to_string())?;
    let applied = gateway
        .execute(policy::DELETE_USER_SQL, &[SqlParam::Int(user_id)])
        .await;

    let grid = if applied {
        Some(render_view(state.inner(), ViewKind::AdminTable(AdminTable::Users)).await?)
    } else {
        None
    };

    Ok(MutationOutcome { applied, grid })
}

/// Professor: write the grade text into the selected enrollment, then
/// re-run the roster so the grid reflects the stored value.
#[tauri::command]
pub async fn update_grade(
    row: Option<u32>,
    grade: String,
    state: State<'_, AppState>,
) -> Result<MutationOutcome, String> {
    let session = state.current_session().ok_or("Not signed in.")?;

    let selected = row.and_then(|r| state.selected_key(r as usize));
    let (enrollment_id, grade) =
        policy::validate_update_grade(&session, selected, grade).map_err(|e| e.to_string())?;

    let gateway = state.gateway().map_err(|e| e.to_string())?;
    let applied = gateway
        .execute(
            policy::UPDATE_GRADE_SQL,
            &[SqlParam::Text(grade), SqlParam::Int(enrollment_id)],
        )
        .await;

    let grid = if applied {
        Some(render_view(state.inner(), ViewKind::ProfessorRoster).await?)
    } else {
        None
    };

    Ok(MutationOutcome { applied, grid })
}
