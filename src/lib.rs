pub mod app;
mod commands;
pub mod domain;
pub mod error;
pub mod infra;
pub mod notifier;

use infra::init_db;
use std::path::PathBuf;
use tauri::Manager;

fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("com.unilecture.notifier")
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let data_dir = app
                .handle()
                .path()
                .app_data_dir()
                .unwrap_or_else(|_| app_data_dir());
            let db_path = data_dir.join("app.db");
            log::info!("DB path: {:?}", db_path);

            let pool = init_db(&db_path).map_err(|e| {
                log::error!("DB init failed: {}", e);
                e
            })?;
            app.manage(pool);

            notifier::spawn(app.handle().clone());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::lecture::cmd_lecture_create,
            commands::lecture::cmd_lecture_list,
            commands::lecture::cmd_lecture_update,
            commands::lecture::cmd_lecture_delete,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
