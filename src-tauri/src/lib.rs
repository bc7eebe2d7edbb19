use tauri::menu::{Menu, MenuItem, Submenu};
use tauri::{Emitter, Manager};

mod commands;
mod db;
mod models;
mod policy;
mod state;

use db::postgres::{self, StoreGateway};
use models::StoreConfig;
use state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::new().build())
        .menu(|app| {
            let app_menu = Submenu::with_items(
                app,
                "Registrar",
                true,
                &[
                    &MenuItem::with_id(app, "about", "About Registrar", true, None::<&str>)?,
                    &tauri::menu::PredefinedMenuItem::separator(app)?,
                    &tauri::menu::PredefinedMenuItem::quit(app, None)?,
                ],
            )?;

            let edit_menu = Submenu::with_items(
                app,
                "Edit",
                true,
                &[
                    &tauri::menu::PredefinedMenuItem::cut(app, None)?,
                    &tauri::menu::PredefinedMenuItem::copy(app, None)?,
                    &tauri::menu::PredefinedMenuItem::paste(app, None)?,
                    &tauri::menu::PredefinedMenuItem::select_all(app, None)?,
                ],
            )?;

            Menu::with_items(app, &[&app_menu, &edit_menu])
        })
        .on_menu_event(|app, event| {
            if event.id().as_ref() == "about" {
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.emit("menu-about", ());
                }
            }
        })
        .setup(|app| {
            // Setup logging in debug mode
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // One store connection for the process lifetime. When it cannot
            // be opened the app still launches into the login screen; every
            // command then reports the store as unavailable.
            let config = StoreConfig::default();
            let gateway = match tauri::async_runtime::block_on(StoreGateway::connect(&config)) {
                Ok(gateway) => Some(gateway),
                Err(e) => {
                    log::error!(
                        "Database connection failed: {}",
                        postgres::sanitize_error(&e.to_string())
                    );
                    None
                }
            };

            app.manage(AppState::new(gateway));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Session commands
            commands::sign_in,
            commands::sign_out,
            commands::current_session,
            // Grid commands
            commands::view_table,
            commands::refresh_grid,
            // Mutation commands
            commands::delete_user,
            commands::update_grade,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
