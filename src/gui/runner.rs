//! GUI runner - launches the holiday grid window

use anyhow::Result;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use tracing::info;

use super::app::HolidayGridApp;
use super::notice::NoticeQueue;
use crate::config::Config;
use crate::domain::HolidayTable;
use crate::submit::{BatchSubmitter, Notice, Notifier};

/// Run the grid window until it is closed.
///
/// Must be called from inside a tokio runtime; submissions are spawned on it.
pub fn run_gui(table: HolidayTable, source: Option<PathBuf>, config: Config) -> Result<()> {
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| anyhow::anyhow!("GUI needs a tokio runtime: {}", e))?;

    let (notice_tx, notice_rx) = mpsc::channel::<Notice>();
    let notifier: Arc<dyn Notifier> = Arc::new(notice_tx);
    let submitter = BatchSubmitter::from_config(&config, notifier);

    info!(
        "[holiday-grid:gui] {} user(s), {}-{:02}, endpoint {}",
        table.rows().len(),
        table.year(),
        table.month(),
        config.endpoint.url()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.gui.window_width, config.gui.window_height])
            .with_min_inner_size([640.0, 320.0])
            .with_decorations(true)
            .with_resizable(true),
        centered: true,
        ..Default::default()
    };

    let app = HolidayGridApp::new(
        table,
        source,
        config,
        submitter,
        NoticeQueue::new(notice_rx),
        runtime,
    );

    eframe::run_native("holiday-grid", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    Ok(())
}
