use std::sync::Mutex;

use crate::db::postgres::{StoreError, StoreGateway};
use crate::models::{Session, TableGrid};
use crate::policy::ViewKind;

/// The last rendered view: what produced it and exactly what was shown.
/// Row indices coming back from the grid resolve against this and
/// nothing else.
pub struct ViewState {
    pub kind: ViewKind,
    pub grid: TableGrid,
}

/// Application state managed by Tauri
pub struct AppState {
    /// The one store gateway, or `None` when the startup connection failed
    gateway: Option<StoreGateway>,

    /// At most one authenticated session exists at a time
    session: Mutex<Option<Session>>,

    /// Last rendered result set, if any
    view: Mutex<Option<ViewState>>,
}

impl AppState {
    pub fn new(gateway: Option<StoreGateway>) -> Self {
        Self {
            gateway,
            session: Mutex::new(None),
            view: Mutex::new(None),
        }
    }

    /// The gateway, or the unavailable error every call surfaces once the
    /// startup connection has failed.
    pub fn gateway(&self) -> Result<&StoreGateway, StoreError> {
        self.gateway.as_ref().ok_or(StoreError::Unavailable)
    }

    /// Install a session, replacing any existing one. A previously
    /// rendered view belongs to the old session and is dropped.
    pub fn sign_in(&self, session: Session) {
        *self.view.lock().unwrap() = None;
        *self.session.lock().unwrap() = Some(session);
    }

    /// Drop the session and everything rendered under it.
    pub fn sign_out(&self) {
        *self.view.lock().unwrap() = None;
        *self.session.lock().unwrap() = None;
    }

    pub fn current_session(&self) -> Option<Session> {
        *self.session.lock().unwrap()
    }

    /// Record the view that was just rendered.
    pub fn set_view(&self, kind: ViewKind, grid: TableGrid) {
        *self.view.lock().unwrap() = Some(ViewState { kind, grid });
    }

    pub fn current_view_kind(&self) -> Option<ViewKind> {
        self.view.lock().unwrap().as_ref().map(|view| view.kind)
    }

    /// Resolve a selected row index against the last rendered grid.
    pub fn selected_key(&self, row: usize) -> Option<i64> {
        self.view
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|view| view.grid.key_at(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridRow, Role};
    use crate::policy::AdminTable;

    fn grid_with_keys(keys: &[Option<i64>]) -> TableGrid {
        TableGrid {
            columns: vec!["user_id".to_string(), "username".to_string()],
            rows: keys
                .iter()
                .map(|key| GridRow {
                    key: *key,
                    cells: vec![String::new(), String::new()],
                })
                .collect(),
        }
    }

    #[test]
    fn a_new_sign_in_replaces_the_previous_session() {
        let state = AppState::new(None);
        state.sign_in(Session { user_id: 1, role: Role::Admin });
        state.sign_in(Session { user_id: 2, role: Role::Student });

        assert_eq!(
            state.current_session(),
            Some(Session { user_id: 2, role: Role::Student })
        );
    }

    #[test]
    fn sign_in_discards_the_previous_view() {
        let state = AppState::new(None);
        state.sign_in(Session { user_id: 1, role: Role::Admin });
        state.set_view(
            ViewKind::AdminTable(AdminTable::Users),
            grid_with_keys(&[Some(4)]),
        );

        state.sign_in(Session { user_id: 7, role: Role::Professor });

        assert_eq!(state.current_view_kind(), None);
        assert_eq!(state.selected_key(0), None);
    }

    #[test]
    fn sign_out_clears_session_and_view() {
        let state = AppState::new(None);
        state.sign_in(Session { user_id: 1, role: Role::Admin });
        state.set_view(
            ViewKind::AdminTable(AdminTable::Users),
            grid_with_keys(&[Some(4)]),
        );

        state.sign_out();

        assert_eq!(state.current_session(), None);
        assert_eq!(state.current_view_kind(), None);
        assert_eq!(state.selected_key(0), None);
    }

    #[test]
    fn selection_resolves_to_the_rendered_row_key() {
        let state = AppState::new(None);
        state.set_view(
            ViewKind::AdminTable(AdminTable::Users),
            grid_with_keys(&[Some(4), None, Some(9)]),
        );

        assert_eq!(state.selected_key(0), Some(4));
        assert_eq!(state.selected_key(1), None);
        assert_eq!(state.selected_key(2), Some(9));
        assert_eq!(state.selected_key(3), None);
    }

    #[test]
    fn gateway_is_unavailable_after_a_failed_startup() {
        let state = AppState::new(None);
        assert!(matches!(state.gateway(), Err(StoreError::Unavailable)));
    }
}
