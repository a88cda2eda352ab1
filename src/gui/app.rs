//! Main application state and frame loop

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use eframe::egui::containers::scroll_area::ScrollSource;
use eframe::egui::{self, RichText};
use tracing::info;

use super::grid_view::{self, PointerTracker, RowStatus};
use super::notice::NoticeQueue;
use super::theme::{
    ACCENT_GREEN, ACCENT_YELLOW, BG_SECONDARY, TEXT_DIM, TEXT_MUTED, apply_theme,
    day_type_color,
};
use crate::config::Config;
use crate::domain::{DayType, HolidayTable, UserId};
use crate::grid::{SelectionController, apply_class};
use crate::submit::{BatchSubmitter, SubmitAllReport, SubmitMode, SubmitOutcome};

/// Dragging selects cells, so the grid only scrolls by bar or wheel
const GRID_SCROLL_SOURCE: ScrollSource = ScrollSource {
    scroll_bar: true,
    drag: false,
    mouse_wheel: true,
};

/// Results flowing back from submission tasks
enum Completion {
    User(UserId, SubmitOutcome),
    All(SubmitAllReport),
}

pub struct HolidayGridApp {
    table: HolidayTable,
    source: Option<PathBuf>,
    config: Config,
    controller: SelectionController,
    tracker: PointerTracker,
    submitter: BatchSubmitter,
    runtime: tokio::runtime::Handle,
    notices: NoticeQueue,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    in_flight: Arc<AtomicUsize>,
    statuses: HashMap<UserId, RowStatus>,
}

impl HolidayGridApp {
    pub fn new(
        table: HolidayTable,
        source: Option<PathBuf>,
        config: Config,
        submitter: BatchSubmitter,
        notices: NoticeQueue,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Self {
            table,
            source,
            config,
            controller: SelectionController::new(),
            tracker: PointerTracker::default(),
            submitter,
            runtime,
            notices,
            completion_tx,
            completion_rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
            statuses: HashMap::new(),
        }
    }

    fn title(&self) -> String {
        let month = u8::try_from(self.table.month())
            .ok()
            .and_then(|m| chrono::Month::try_from(m).ok())
            .map(|m| m.name().to_string())
            .unwrap_or_else(|| self.table.month().to_string());
        format!("Holiday planning: {} {}", month, self.table.year())
    }

    fn submit_user(&mut self, user_id: UserId) {
        info!("[holiday-grid:gui] Submitting user {}", user_id);
        let submission = self
            .submitter
            .submit_holidays(&self.table, user_id, SubmitMode::Single);
        self.statuses.insert(user_id, RowStatus::Sending);

        let tx = self.completion_tx.clone();
        let in_flight = Arc::clone(&self.in_flight);
        in_flight.fetch_add(1, Ordering::SeqCst);
        self.runtime.spawn(async move {
            let outcome = submission.await;
            let _ = tx.send(Completion::User(user_id, outcome));
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    fn submit_all(&mut self) {
        info!("[holiday-grid:gui] Submitting all users");
        let submission = self.submitter.submit_all(&self.table);
        for user_id in self.table.user_ids() {
            self.statuses.insert(user_id, RowStatus::Sending);
        }

        let tx = self.completion_tx.clone();
        let in_flight = Arc::clone(&self.in_flight);
        in_flight.fetch_add(1, Ordering::SeqCst);
        self.runtime.spawn(async move {
            let report = submission.await;
            let _ = tx.send(Completion::All(report));
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    fn record(&mut self, user_id: UserId, outcome: SubmitOutcome) {
        let status = match outcome {
            SubmitOutcome::Accepted => RowStatus::Saved,
            other => RowStatus::Failed(other.to_string()),
        };
        self.statuses.insert(user_id, status);
    }

    fn poll_completions(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            match completion {
                Completion::User(user_id, outcome) => self.record(user_id, outcome),
                Completion::All(report) => {
                    for user in report.outcomes {
                        self.record(user.user_id, user.outcome);
                    }
                }
            }
        }
    }

    fn render_toolbar(&mut self, ctx: &egui::Context, blocked: bool) {
        let title = self.title();
        egui::TopBottomPanel::top("toolbar")
            .frame(egui::Frame::NONE.fill(BG_SECONDARY).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| self.toolbar_contents(ui, title));
            });
    }

    fn toolbar_contents(&mut self, ui: &mut egui::Ui, title: String) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(title).size(18.0).strong().color(ACCENT_YELLOW));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(RichText::new("Submit all").strong())
                    .clicked()
                {
                    self.submit_all();
                }
                let selected = self.table.selected_count();
                ui.label(
                    RichText::new(format!("{} selected", selected))
                        .color(if selected > 0 { ACCENT_GREEN } else { TEXT_MUTED }),
                );
            });
        });

        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            for day_type in DayType::ALL {
                let button = egui::Button::new(
                    RichText::new(day_type.code())
                        .monospace()
                        .color(egui::Color32::BLACK),
                )
                .fill(day_type_color(day_type));
                if ui.add(button).on_hover_text(day_type.label()).clicked() {
                    apply_class(&mut self.table, day_type);
                }
            }
        });
    }

    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::NONE.fill(BG_SECONDARY).inner_margin(4.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let in_flight = self.in_flight.load(Ordering::SeqCst);
                    let text = if in_flight > 0 {
                        format!("{} submission(s) in flight", in_flight)
                    } else {
                        "idle".to_string()
                    };
                    ui.label(RichText::new(text).small().monospace().color(TEXT_DIM));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(concat!("holiday-grid v", env!("CARGO_PKG_VERSION")))
                                .small()
                                .color(TEXT_MUTED),
                        );
                        ui.add_space(16.0);
                        ui.label(
                            RichText::new(self.config.endpoint.url())
                                .small()
                                .monospace()
                                .color(TEXT_MUTED),
                        );
                        if let Some(source) = &self.source {
                            ui.add_space(16.0);
                            ui.label(
                                RichText::new(source.display().to_string())
                                    .small()
                                    .color(TEXT_MUTED),
                            );
                        }
                    });
                });
            });
    }
}

impl eframe::App for HolidayGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        apply_theme(ctx);

        self.notices.poll();
        self.poll_completions();

        let blocked = self.notices.is_blocking();
        self.render_toolbar(ctx, blocked);
        self.render_status_bar(ctx);

        let mut submit = None;
        let hits = egui::CentralPanel::default()
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    egui::ScrollArea::both()
                        .scroll_source(GRID_SCROLL_SOURCE)
                        .show(ui, |ui| {
                            let (hits, clicked) = grid_view::render_grid(
                                ui,
                                &self.table,
                                &self.config.gui,
                                &self.statuses,
                            );
                            submit = clicked;
                            hits
                        })
                        .inner
                })
                .inner
            })
            .inner;

        // Press/release still reach the controller while a notice is open
        let hits = if blocked { grid_view::CellHits::default() } else { hits };
        grid_view::route_pointer(
            ctx,
            &hits,
            &mut self.table,
            &mut self.controller,
            &mut self.tracker,
        );

        if let Some(user_id) = submit {
            self.submit_user(user_id);
        }

        self.notices.render(ctx);

        if self.in_flight.load(Ordering::SeqCst) > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_does_not_scroll_on_drag() {
        assert!(!GRID_SCROLL_SOURCE.drag);
        assert!(GRID_SCROLL_SOURCE.scroll_bar);
        assert!(GRID_SCROLL_SOURCE.mouse_wheel);
    }
}
