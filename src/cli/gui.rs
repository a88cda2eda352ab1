//! GUI command implementation

use anyhow::Result;
use std::path::Path;

use holiday_grid::HolidayTable;
use holiday_grid::config::Config;

/// Load the snapshot and open the grid window
pub fn gui_command(table_path: &Path, config: Config) -> Result<()> {
    let table = HolidayTable::from_file(table_path)?;
    holiday_grid::gui::run_gui(table, Some(table_path.to_path_buf()), config)
}
