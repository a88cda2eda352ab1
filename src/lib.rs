//! holiday-grid - interactive holiday planning grid
//!
//! Employees are rows, days of the month are cells. Cells are selected by
//! pressing or dragging across them, classified with a day type, and each
//! employee's classified days are posted to the timetracker's ajax endpoint
//! as a `mass_holidays` form.
//!
//! ## Layers
//!
//! 1. **Domain**: [`DayType`] vocabulary, per-cell [`Marker`], the month
//!    [`HolidayTable`] and the [`HolidayMap`] that gets submitted.
//! 2. **Grid**: the [`grid::SelectionController`] state machine and
//!    [`grid::apply_class`].
//! 3. **Submit**: [`submit::BatchSubmitter`] posting per user or for all
//!    users and reporting through a [`submit::Notifier`].
//! 4. **Front ends**: the egui window in [`gui`] and the binary's CLI; the
//!    [`endpoint`] stub stands in for the server locally.

pub mod config;
pub mod domain;
pub mod endpoint;
pub mod grid;
pub mod gui;
pub mod submit;

pub use domain::*;
