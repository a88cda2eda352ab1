//! Core domain types for the holiday grid

mod day_type;
mod marker;
mod table;

pub use day_type::DayType;
pub use marker::{Marker, MarkerError, SELECTED_CLASS};
pub use table::{
    days_in_month, CellRef, CellSnapshot, DayCell, HolidayMap, HolidayTable, TableError,
    TableSnapshot, UserId, UserRow, UserSnapshot,
};
