//! Native window for the holiday grid
//!
//! Renders the month table, routes pointer input to the selection controller,
//! offers one button per day type to classify the selection, and submits
//! per user or for everyone. Results come back as modal notices.

mod app;
mod grid_view;
mod notice;
mod runner;
pub mod theme;

pub use app::HolidayGridApp;
pub use grid_view::RowStatus;
pub use notice::NoticeQueue;
pub use runner::run_gui;
