use tracing::debug;

use crate::domain::{DayType, HolidayTable, Marker};

/// Commit a day type to every selected cell.
///
/// The selection overlay is replaced, so classified cells leave the
/// selection. Returns how many cells changed.
pub fn apply_class(table: &mut HolidayTable, day_type: DayType) -> usize {
    let mut changed = 0;
    for cell in table.cells_mut() {
        if cell.marker.is_selected() {
            cell.marker = Marker::Day(day_type);
            changed += 1;
        }
    }
    if changed > 0 {
        debug!("[holiday-grid:apply] {} cell(s) set to {}", changed, day_type);
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayCell, UserId, UserRow};

    fn table_with(markers: &[Marker]) -> HolidayTable {
        let mut table = HolidayTable::new(2024, 3).unwrap();
        table
            .push_row(UserRow {
                id: UserId(7),
                name: "Ada".into(),
                cells: markers
                    .iter()
                    .enumerate()
                    .map(|(i, m)| DayCell::new(i as u32 + 1, *m))
                    .collect(),
            })
            .unwrap();
        table
    }

    #[test]
    fn test_apply_without_selection_is_noop() {
        let mut table = table_with(&[Marker::Day(DayType::WorkDay), Marker::NEUTRAL]);
        let before = table.clone();
        assert_eq!(apply_class(&mut table, DayType::Holiday), 0);
        assert_eq!(table, before);
    }

    #[test]
    fn test_apply_classifies_exactly_the_selection() {
        let mut table = table_with(&[
            Marker::Selected { placeholder: None },
            Marker::Day(DayType::WorkDay),
            Marker::Selected {
                placeholder: Some(DayType::Empty),
            },
        ]);

        assert_eq!(apply_class(&mut table, DayType::Sickness), 2);
        assert_eq!(table.selected_count(), 0);

        let row = table.row(UserId(7)).unwrap();
        assert_eq!(row.cells[0].marker, Marker::Day(DayType::Sickness));
        assert_eq!(row.cells[1].marker, Marker::Day(DayType::WorkDay));
        assert_eq!(row.cells[2].marker, Marker::Day(DayType::Sickness));
    }
}
