//! Holiday table model
//!
//! The table is a snapshot of the server-rendered holiday page: one row per
//! employee, one cell per day of the month. Snapshots arrive as JSON with the
//! raw CSS class attribute of every cell, which is validated into a [`Marker`]
//! when the table is built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::{DayType, Marker, MarkerError};

/// Identifier of an employee row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(UserId)
    }
}

/// Position of a cell inside a [`HolidayTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

/// Errors raised while building a table from a snapshot
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("month {0} is out of range")]
    InvalidMonth(u32),

    #[error("user {user}: day {day} is not in {year}-{month:02}")]
    DayOutOfRange {
        user: UserId,
        day: u32,
        year: i32,
        month: u32,
    },

    #[error("user {user}: day {day} appears twice")]
    DuplicateDay { user: UserId, day: u32 },

    #[error("user {0} appears twice")]
    DuplicateUser(UserId),

    #[error("user {user}, day {day}: {source}")]
    InvalidMarker {
        user: UserId,
        day: u32,
        #[source]
        source: MarkerError,
    },
}

/// A single day cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub marker: Marker,
}

impl DayCell {
    pub fn new(day: u32, marker: Marker) -> Self {
        Self { day, marker }
    }
}

/// All cells of one employee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub cells: Vec<DayCell>,
}

impl UserRow {
    /// Number of cells currently carrying the selection overlay
    pub fn selected_count(&self) -> usize {
        self.cells.iter().filter(|c| c.marker.is_selected()).count()
    }

    /// Net holiday balance change of the classified cells in this row
    pub fn balance_delta(&self) -> i32 {
        self.cells
            .iter()
            .filter_map(|c| c.marker.day_type())
            .map(|t| t.balance_delta())
            .sum()
    }
}

/// Day-of-month to day-type mapping sent to the save endpoint.
///
/// Serializes as a JSON object keyed by the day number as a string,
/// e.g. `{"15":"HOLIS"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayMap(BTreeMap<u32, DayType>);

impl HolidayMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: u32, day_type: DayType) {
        self.0.insert(day, day_type);
    }

    pub fn get(&self, day: u32) -> Option<DayType> {
        self.0.get(&day).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> String {
        // Keys are integers and values unit variants; serialization can't fail
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

/// The holiday grid for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayTable {
    year: i32,
    month: u32,
    rows: Vec<UserRow>,
}

impl HolidayTable {
    /// Create an empty table for the given month
    pub fn new(year: i32, month: u32) -> Result<Self, TableError> {
        if !(1..=12).contains(&month) {
            return Err(TableError::InvalidMonth(month));
        }
        Ok(Self {
            year,
            month,
            rows: Vec::new(),
        })
    }

    /// Add an employee row, validating every cell
    pub fn push_row(&mut self, row: UserRow) -> Result<(), TableError> {
        if self.rows.iter().any(|r| r.id == row.id) {
            return Err(TableError::DuplicateUser(row.id));
        }
        let days = self.days_in_month();
        let mut seen = Vec::with_capacity(row.cells.len());
        for cell in &row.cells {
            if cell.day == 0 || cell.day > days {
                return Err(TableError::DayOutOfRange {
                    user: row.id,
                    day: cell.day,
                    year: self.year,
                    month: self.month,
                });
            }
            if seen.contains(&cell.day) {
                return Err(TableError::DuplicateDay {
                    user: row.id,
                    day: cell.day,
                });
            }
            seen.push(cell.day);
        }
        self.rows.push(row);
        Ok(())
    }

    /// Build a table from its JSON snapshot
    pub fn from_snapshot(snapshot: TableSnapshot) -> Result<Self, TableError> {
        let mut table = Self::new(snapshot.year, snapshot.month)?;
        for user in snapshot.users {
            let mut cells = Vec::with_capacity(user.cells.len());
            for raw in user.cells {
                let marker =
                    Marker::parse_classes(&raw.class).map_err(|source| TableError::InvalidMarker {
                        user: user.id,
                        day: raw.day,
                        source,
                    })?;
                cells.push(DayCell::new(raw.day, marker));
            }
            table.push_row(UserRow {
                id: user.id,
                name: user.name,
                cells,
            })?;
        }
        Ok(table)
    }

    /// Parse a JSON snapshot string
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: TableSnapshot =
            serde_json::from_str(json).context("Failed to parse table snapshot")?;
        Ok(Self::from_snapshot(snapshot)?)
    }

    /// Load a JSON snapshot from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read table snapshot: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid table snapshot: {}", path.display()))
    }

    /// Snapshot of the current state, suitable for writing back to disk
    pub fn to_snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            year: self.year,
            month: self.month,
            users: self
                .rows
                .iter()
                .map(|row| UserSnapshot {
                    id: row.id,
                    name: row.name.clone(),
                    cells: row
                        .cells
                        .iter()
                        .map(|c| CellSnapshot {
                            day: c.day,
                            class: c.marker.class_attr(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn rows(&self) -> &[UserRow] {
        &self.rows
    }

    pub fn row(&self, user_id: UserId) -> Option<&UserRow> {
        self.rows.iter().find(|r| r.id == user_id)
    }

    pub fn user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.rows.iter().map(|r| r.id)
    }

    pub fn cell(&self, at: CellRef) -> Option<&DayCell> {
        self.rows.get(at.row)?.cells.get(at.col)
    }

    pub fn cell_mut(&mut self, at: CellRef) -> Option<&mut DayCell> {
        self.rows.get_mut(at.row)?.cells.get_mut(at.col)
    }

    /// Iterate every cell mutably, across all rows
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut DayCell> {
        self.rows.iter_mut().flat_map(|r| r.cells.iter_mut())
    }

    pub fn selected_count(&self) -> usize {
        self.rows.iter().map(|r| r.selected_count()).sum()
    }

    /// Collect the committed day types of one user.
    ///
    /// Cells still carrying the selection overlay are left out: they have not
    /// been classified and are treated as "no change". Unknown users yield an
    /// empty map.
    pub fn holiday_map(&self, user_id: UserId) -> HolidayMap {
        let mut map = HolidayMap::new();
        if let Some(row) = self.row(user_id) {
            for cell in &row.cells {
                if let Some(day_type) = cell.marker.day_type() {
                    map.insert(cell.day, day_type);
                }
            }
        }
        map
    }
}

/// Number of days in the given month, falling back to 31 for invalid input
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = chrono::NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        chrono::NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        chrono::NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 31,
    }
}

/// Serialized form of a [`HolidayTable`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub users: Vec<UserSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cells: Vec<CellSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub day: u32,
    /// Raw CSS class attribute, e.g. `"HOLIS"` or `"selected empty"`
    #[serde(default)]
    pub class: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_2024() -> HolidayTable {
        HolidayTable::from_json(
            r#"{
                "year": 2024,
                "month": 3,
                "users": [
                    {"id": 7, "name": "Ada", "cells": [
                        {"day": 14, "class": "WKDAY"},
                        {"day": 15, "class": "HOLIS"},
                        {"day": 16, "class": "selected"}
                    ]},
                    {"id": 9, "name": "Grace", "cells": [
                        {"day": 15, "class": "selected empty"}
                    ]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_holiday_map_skips_selected_cells() {
        let table = march_2024();
        let map = table.holiday_map(UserId(7));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(15), Some(DayType::Holiday));
        assert_eq!(map.get(16), None);
        assert_eq!(map.to_json(), r#"{"14":"WKDAY","15":"HOLIS"}"#);
    }

    #[test]
    fn test_holiday_map_for_fully_selected_row_is_empty() {
        let table = march_2024();
        assert!(table.holiday_map(UserId(9)).is_empty());
        assert!(table.holiday_map(UserId(404)).is_empty());
    }

    #[test]
    fn test_snapshot_rejects_unknown_class() {
        let err = HolidayTable::from_json(
            r#"{"year": 2024, "month": 3, "users": [
                {"id": 1, "cells": [{"day": 2, "class": "BOGUS"}]}
            ]}"#,
        )
        .unwrap_err();
        let table_err = err.downcast_ref::<TableError>().unwrap();
        assert!(matches!(
            table_err,
            TableError::InvalidMarker { day: 2, source: MarkerError::UnknownClass(_), .. }
        ));
    }

    #[test]
    fn test_snapshot_rejects_day_outside_month() {
        let err = HolidayTable::from_json(
            r#"{"year": 2023, "month": 2, "users": [
                {"id": 1, "cells": [{"day": 29, "class": "HOLIS"}]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::DayOutOfRange { day: 29, .. })
        ));
    }

    #[test]
    fn test_invalid_month_and_duplicates() {
        assert!(matches!(
            HolidayTable::new(2024, 13),
            Err(TableError::InvalidMonth(13))
        ));

        let mut table = HolidayTable::new(2024, 3).unwrap();
        let row = UserRow {
            id: UserId(1),
            name: "A".into(),
            cells: vec![DayCell::new(1, Marker::NEUTRAL), DayCell::new(1, Marker::NEUTRAL)],
        };
        assert!(matches!(
            table.push_row(row),
            Err(TableError::DuplicateDay { day: 1, .. })
        ));

        let row = UserRow {
            id: UserId(1),
            name: "A".into(),
            cells: vec![],
        };
        table.push_row(row.clone()).unwrap();
        assert!(matches!(
            table.push_row(row),
            Err(TableError::DuplicateUser(UserId(1)))
        ));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_balance_delta_ignores_selected() {
        let table = march_2024();
        assert_eq!(table.row(UserId(7)).unwrap().balance_delta(), -1);
        assert_eq!(table.selected_count(), 2);
    }

    #[test]
    fn test_snapshot_round_trip_preserves_markers() {
        let table = march_2024();
        let again = HolidayTable::from_snapshot(table.to_snapshot()).unwrap();
        assert_eq!(again, table);
    }
}
