//! Check command implementation

use anyhow::Result;
use std::path::Path;

use holiday_grid::HolidayTable;

/// Validate a table snapshot and print what each user would submit
pub fn check_command(table_path: &Path) -> Result<()> {
    let table = HolidayTable::from_file(table_path)?;

    println!(
        "{}: {}-{:02}, {} user(s)\n",
        table_path.display(),
        table.year(),
        table.month(),
        table.rows().len()
    );

    for row in table.rows() {
        let map = table.holiday_map(row.id);
        println!(
            "  #{} {} - {} classified, {} selected, balance {:+}",
            row.id,
            row.name,
            map.len(),
            row.selected_count(),
            row.balance_delta()
        );
    }

    Ok(())
}
