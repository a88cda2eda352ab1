//! Modal notices
//!
//! Submissions report through a channel-backed notifier; the app queues
//! what arrives and shows one notice at a time in a window that must be
//! dismissed before the grid reacts to the pointer again.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use eframe::egui::{self, RichText, Vec2};

use super::theme::{ACCENT_GREEN, ACCENT_RED, BG_SECONDARY, TEXT_PRIMARY};
use crate::submit::{Notice, NoticeKind};

/// Pending notices, oldest first
pub struct NoticeQueue {
    rx: Receiver<Notice>,
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn new(rx: Receiver<Notice>) -> Self {
        Self {
            rx,
            pending: VecDeque::new(),
        }
    }

    /// Pull everything the notifier has sent since the last frame
    pub fn poll(&mut self) {
        while let Ok(notice) = self.rx.try_recv() {
            self.pending.push_back(notice);
        }
    }

    /// A notice is on screen and blocks the grid
    pub fn is_blocking(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Show the oldest notice; pops it once dismissed
    pub fn render(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.pending.front() else {
            return;
        };

        let (title, accent) = match notice.kind {
            NoticeKind::Info => ("Holidays", ACCENT_GREEN),
            NoticeKind::Error => ("Error", ACCENT_RED),
        };

        let mut dismissed = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_size(Vec2::new(360.0, 120.0))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(BG_SECONDARY)
                    .stroke(egui::Stroke::new(2.0, accent)),
            )
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new(&notice.message).size(15.0).color(TEXT_PRIMARY));
                ui.add_space(12.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(RichText::new("OK").strong()).clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.pending.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn enter_pressed() -> egui::RawInput {
        egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::Enter,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_queue_blocks_until_every_notice_is_dismissed() {
        let (tx, rx) = mpsc::channel();
        let mut queue = NoticeQueue::new(rx);
        assert!(!queue.is_blocking());

        tx.send(Notice::error("quota exceeded")).unwrap();
        tx.send(Notice::info("Holidays updated successfully")).unwrap();
        queue.poll();
        assert!(queue.is_blocking());

        let ctx = egui::Context::default();
        let _ = ctx.run(enter_pressed(), |ctx| queue.render(ctx));
        assert!(queue.is_blocking());
        assert_eq!(queue.pending.front().map(|n| n.kind), Some(NoticeKind::Info));

        let _ = ctx.run(enter_pressed(), |ctx| queue.render(ctx));
        assert!(!queue.is_blocking());
    }
}
