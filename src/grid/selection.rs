//! Pointer-driven selection of day cells
//!
//! Mirrors a press-and-drag interaction: a global "pointer is down" flag is
//! toggled by press/release anywhere on the page, and cells react to being
//! entered while the flag is set (drag-select) or to being pressed directly
//! (click-select).

use tracing::trace;

use crate::domain::{DayCell, DayType, Marker};

/// Host surface that can hold a native text selection
pub trait TextSelection {
    /// Drop any text highlighted while dragging across the grid
    fn clear_text_selection(&mut self);
}

/// What the host should do with the pointer event after a cell handled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    /// Let the host run its default handling
    Continue,
    /// Handled; suppress default action and propagation
    Suppress,
}

/// Selection state of one grid session
#[derive(Debug, Default)]
pub struct SelectionController {
    pointer_down: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Primary button pressed anywhere on the page
    pub fn pointer_pressed(&mut self) {
        self.pointer_down = true;
    }

    /// Primary button released anywhere on the page
    pub fn pointer_released(&mut self, surface: &mut dyn TextSelection) {
        self.pointer_down = false;
        surface.clear_text_selection();
    }

    /// Pointer entered a cell. Only acts while the button is held.
    pub fn pointer_over(&self, cell: &mut DayCell) -> EventFlow {
        if !self.pointer_down {
            return EventFlow::Continue;
        }

        cell.marker = if cell.marker.is_selected() {
            Marker::NEUTRAL
        } else {
            Marker::Selected {
                placeholder: Some(DayType::Empty),
            }
        };
        trace!("[holiday-grid:select] drag day {} -> {}", cell.day, cell.marker);
        EventFlow::Suppress
    }

    /// Button pressed directly on a cell
    pub fn pointer_press(&self, cell: &mut DayCell) {
        cell.marker = if cell.marker.is_selected() {
            Marker::NEUTRAL
        } else {
            Marker::Selected { placeholder: None }
        };
        trace!("[holiday-grid:select] click day {} -> {}", cell.day, cell.marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Surface {
        cleared: usize,
    }

    impl TextSelection for Surface {
        fn clear_text_selection(&mut self) {
            self.cleared += 1;
        }
    }

    fn holiday_cell() -> DayCell {
        DayCell::new(15, Marker::Day(DayType::Holiday))
    }

    #[test]
    fn test_pointer_flag_follows_press_and_release() {
        let mut controller = SelectionController::new();
        let mut surface = Surface::default();
        assert!(!controller.is_pointer_down());

        controller.pointer_pressed();
        assert!(controller.is_pointer_down());

        controller.pointer_released(&mut surface);
        assert!(!controller.is_pointer_down());
        assert_eq!(surface.cleared, 1);
    }

    #[test]
    fn test_hover_without_button_is_ignored() {
        let controller = SelectionController::new();
        let mut cell = holiday_cell();
        assert_eq!(controller.pointer_over(&mut cell), EventFlow::Continue);
        assert_eq!(cell.marker, Marker::Day(DayType::Holiday));
    }

    #[test]
    fn test_drag_selects_with_placeholder() {
        let mut controller = SelectionController::new();
        controller.pointer_pressed();
        let mut cell = holiday_cell();

        assert_eq!(controller.pointer_over(&mut cell), EventFlow::Suppress);
        assert_eq!(
            cell.marker,
            Marker::Selected {
                placeholder: Some(DayType::Empty)
            }
        );
    }

    #[test]
    fn test_drag_twice_returns_to_neutral() {
        let mut controller = SelectionController::new();
        controller.pointer_pressed();
        let mut cell = DayCell::new(3, Marker::NEUTRAL);

        controller.pointer_over(&mut cell);
        controller.pointer_over(&mut cell);
        assert_eq!(cell.marker, Marker::NEUTRAL);

        let mut selected = DayCell::new(
            4,
            Marker::Selected {
                placeholder: Some(DayType::Empty),
            },
        );
        let before = selected.marker;
        controller.pointer_over(&mut selected);
        controller.pointer_over(&mut selected);
        assert_eq!(selected.marker, before);
    }

    #[test]
    fn test_click_toggles_without_placeholder() {
        let controller = SelectionController::new();
        let mut cell = holiday_cell();

        controller.pointer_press(&mut cell);
        assert_eq!(cell.marker, Marker::Selected { placeholder: None });

        controller.pointer_press(&mut cell);
        assert_eq!(cell.marker, Marker::NEUTRAL);
    }

    #[test]
    fn test_cell_never_holds_two_markers() {
        let mut controller = SelectionController::new();
        controller.pointer_pressed();
        let mut cell = holiday_cell();
        for _ in 0..5 {
            controller.pointer_over(&mut cell);
            controller.pointer_press(&mut cell);
            let attr = cell.marker.class_attr();
            let day_types = attr
                .split_whitespace()
                .filter(|c| *c != crate::domain::SELECTED_CLASS)
                .count();
            assert!(day_types <= 1, "{attr}");
        }
    }
}
