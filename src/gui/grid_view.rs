//! Grid rendering and pointer routing
//!
//! Cells are painted rectangles rather than widgets: pointer handling is done
//! once per frame against the recorded cell rectangles, which is how a drag
//! can enter cells without any of them capturing the pointer.

use std::collections::HashMap;

use eframe::egui::{self, Align2, FontId, Pos2, Rect, RichText, Sense, Stroke, Vec2};

use super::theme::{
    ACCENT_CYAN, ACCENT_GREEN, ACCENT_RED, BG_HIGHLIGHT, TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY,
    marker_fill,
};
use crate::config::GuiSettings;
use crate::domain::{CellRef, HolidayTable, UserId};
use crate::grid::{SelectionController, TextSelection};

const ROW_HEIGHT: f32 = 22.0;

/// Last submission state shown next to a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Sending,
    Saved,
    Failed(String),
}

/// Screen rectangles of the cells visible this frame.
///
/// Only the part of a cell inside the scroll viewport is hit-testable;
/// positions outside the viewport never map to a cell.
pub struct CellHits {
    viewport: Rect,
    cells: Vec<(Rect, CellRef)>,
}

impl Default for CellHits {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl CellHits {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            cells: Vec::new(),
        }
    }

    fn record(&mut self, rect: Rect, at: CellRef) {
        let visible = rect.intersect(self.viewport);
        if visible.is_positive() {
            self.cells.push((visible, at));
        }
    }

    fn at(&self, pos: Pos2) -> Option<CellRef> {
        if !self.viewport.contains(pos) {
            return None;
        }
        self.cells
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, at)| *at)
    }
}

/// Which cell the pointer was last seen over.
///
/// Entering a new cell is what counts as "pointer over"; the remembered cell
/// is the drag state the host drops on release.
#[derive(Debug, Default)]
pub struct PointerTracker {
    hovered: Option<CellRef>,
}

impl TextSelection for PointerTracker {
    fn clear_text_selection(&mut self) {
        self.hovered = None;
    }
}

/// Feed this frame's pointer input to the selection controller
pub fn route_pointer(
    ctx: &egui::Context,
    hits: &CellHits,
    table: &mut HolidayTable,
    controller: &mut SelectionController,
    tracker: &mut PointerTracker,
) {
    let (pressed, released, pos) = ctx.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
        )
    });
    let hit = pos.and_then(|p| hits.at(p));

    if pressed {
        if let Some(cell) = hit.and_then(|at| table.cell_mut(at)) {
            controller.pointer_press(cell);
        }
        controller.pointer_pressed();
        tracker.hovered = hit;
    }

    if hit != tracker.hovered {
        if let Some(cell) = hit.and_then(|at| table.cell_mut(at)) {
            controller.pointer_over(cell);
        }
        tracker.hovered = hit;
    }

    if released {
        controller.pointer_released(tracker);
    }
}

/// Paint the table; returns the cell rectangles and the user whose Submit was clicked
pub fn render_grid(
    ui: &mut egui::Ui,
    table: &HolidayTable,
    settings: &GuiSettings,
    statuses: &HashMap<UserId, RowStatus>,
) -> (CellHits, Option<UserId>) {
    let mut hits = CellHits::new(ui.clip_rect());
    let mut submit = None;
    let cell_size = Vec2::new(settings.cell_width, ROW_HEIGHT);
    let days = table.days_in_month();

    ui.spacing_mut().item_spacing = Vec2::new(2.0, 2.0);

    // Header: day numbers
    ui.horizontal(|ui| {
        ui.add_sized(
            [settings.name_width, ROW_HEIGHT],
            egui::Label::new(RichText::new("Employee").strong().color(TEXT_DIM)),
        );
        for day in 1..=days {
            let (rect, _) = ui.allocate_exact_size(cell_size, Sense::hover());
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                day.to_string(),
                FontId::monospace(11.0),
                TEXT_MUTED,
            );
        }
    });

    for (row_idx, row) in table.rows().iter().enumerate() {
        ui.horizontal(|ui| {
            ui.add_sized(
                [settings.name_width, ROW_HEIGHT],
                egui::Label::new(RichText::new(&row.name).color(TEXT_PRIMARY)).truncate(),
            );

            for day in 1..=days {
                let (rect, _) = ui.allocate_exact_size(cell_size, Sense::hover());
                let Some(col) = row.cells.iter().position(|c| c.day == day) else {
                    // Not editable for this user (e.g. weekend)
                    ui.painter().rect_filled(rect, 2.0, BG_HIGHLIGHT);
                    continue;
                };
                let cell = &row.cells[col];
                let painter = ui.painter();
                painter.rect_filled(rect, 2.0, marker_fill(&cell.marker));
                if cell.marker.is_selected() {
                    painter.rect_stroke(rect, 2.0, Stroke::new(1.5, ACCENT_CYAN), egui::StrokeKind::Inside);
                }
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    day.to_string(),
                    FontId::monospace(11.0),
                    egui::Color32::BLACK,
                );
                hits.record(rect, CellRef { row: row_idx, col });
            }

            ui.add_space(8.0);
            if ui
                .button("Submit")
                .on_hover_text(format!("Save holidays for {}", row.name))
                .clicked()
            {
                submit = Some(row.id);
            }

            let delta = row.balance_delta();
            ui.label(
                RichText::new(format!("{:+}", delta))
                    .monospace()
                    .color(if delta < 0 { ACCENT_RED } else { TEXT_DIM }),
            )
            .on_hover_text("Holiday balance change from this month's classification");

            match statuses.get(&row.id) {
                Some(RowStatus::Sending) => {
                    ui.spinner();
                }
                Some(RowStatus::Saved) => {
                    ui.label(RichText::new("saved").small().color(ACCENT_GREEN));
                }
                Some(RowStatus::Failed(reason)) => {
                    ui.label(RichText::new("failed").small().color(ACCENT_RED))
                        .on_hover_text(reason);
                }
                None => {}
            }
        });
    }

    (hits, submit)
}
