//! GUI Theme: dark grid with amber text
//!
//! Color constants for the holiday grid window.

use eframe::egui::{self, Color32, Stroke};

use crate::domain::{DayType, Marker};

// ═══════════════════════════════════════════════════════════════════════════
// BACKGROUNDS
// ═══════════════════════════════════════════════════════════════════════════

/// Background: Deep charcoal with subtle blue tint
pub const BG_PRIMARY: Color32 = Color32::from_rgb(18, 20, 24);
/// Secondary background for panels
pub const BG_SECONDARY: Color32 = Color32::from_rgb(24, 28, 34);
/// Accent highlight background
pub const BG_HIGHLIGHT: Color32 = Color32::from_rgb(32, 40, 52);

// ═══════════════════════════════════════════════════════════════════════════
// TEXT COLORS
// ═══════════════════════════════════════════════════════════════════════════

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 176, 0);
pub const TEXT_DIM: Color32 = Color32::from_rgb(180, 130, 50);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 85, 60);

// ═══════════════════════════════════════════════════════════════════════════
// ACCENT COLORS
// ═══════════════════════════════════════════════════════════════════════════

pub const ACCENT_CYAN: Color32 = Color32::from_rgb(0, 255, 200);
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(80, 255, 120);
pub const ACCENT_RED: Color32 = Color32::from_rgb(255, 80, 80);
pub const ACCENT_YELLOW: Color32 = Color32::from_rgb(255, 200, 50);

/// Fill for cells carrying the selection overlay
pub const SELECTED_FILL: Color32 = Color32::from_rgb(255, 236, 140);

pub fn day_type_color(day_type: DayType) -> Color32 {
    let [r, g, b] = day_type.rgb();
    Color32::from_rgb(r, g, b)
}

pub fn marker_fill(marker: &Marker) -> Color32 {
    match marker {
        Marker::Day(day_type) => day_type_color(*day_type),
        Marker::Selected { .. } => SELECTED_FILL,
    }
}

/// Apply the dark theme to the egui context.
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals.dark_mode = true;
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_PRIMARY;
    style.visuals.extreme_bg_color = BG_SECONDARY;
    style.visuals.widgets.noninteractive.bg_fill = BG_SECONDARY;
    style.visuals.widgets.inactive.bg_fill = BG_SECONDARY;
    style.visuals.widgets.hovered.bg_fill = BG_HIGHLIGHT;
    style.visuals.widgets.active.bg_fill = BG_HIGHLIGHT;
    style.visuals.selection.bg_fill = BG_HIGHLIGHT;
    style.visuals.selection.stroke = Stroke::new(1.0, TEXT_PRIMARY);
    // Day numbers are painted, not laid out as text, so drags never pick up text
    style.interaction.selectable_labels = false;
    ctx.set_style(style);
}
