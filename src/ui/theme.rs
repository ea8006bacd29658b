use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_CARD_HEADER: Color32 = Color32::from_rgb(36, 38, 50);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const BRAND: Color32 = Color32::from_rgb(240, 120, 60);
pub const DESTRUCTIVE: Color32 = Color32::from_rgb(229, 83, 75);

pub const SUCCESS_BG: Color32 = Color32::from_rgb(26, 58, 38);
pub const SUCCESS_FG: Color32 = Color32::from_rgb(120, 220, 150);
pub const SUCCESS_BUTTON: Color32 = Color32::from_rgb(46, 140, 74);
pub const ERROR_BG: Color32 = Color32::from_rgb(70, 28, 30);
pub const ERROR_FG: Color32 = Color32::from_rgb(250, 150, 145);
pub const FEEDBACK_BG: Color32 = Color32::from_rgb(28, 40, 66);
pub const FEEDBACK_FG: Color32 = Color32::from_rgb(160, 195, 250);

pub const BADGE_SOLID: Color32 = ACCENT;
pub const BADGE_MUTED: Color32 = Color32::from_rgb(62, 64, 78);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const CARD_ROUNDING: f32 = 8.0;
pub const DIALOG_WIDTH: f32 = 520.0;
pub const STATUS_BAR_HEIGHT: f32 = 22.0;
pub const CONTENT_MAX_WIDTH: f32 = 960.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_label() -> FontId {
    FontId::proportional(10.5)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_DARK;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD; // TextEdit bg

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = Color32::from_rgba_premultiplied(80, 140, 220, 45);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(CARD_ROUNDING);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}

/// Small pill label, e.g. "OPEN" or "Submitted".
pub fn badge(ui: &mut egui::Ui, text: &str, solid: bool) {
    let (fill, fg) = if solid {
        (BADGE_SOLID, Color32::WHITE)
    } else {
        (BADGE_MUTED, TEXT_PRIMARY)
    };
    egui::Frame::default()
        .fill(fill)
        .rounding(Rounding::same(9.0))
        .inner_margin(egui::Margin::symmetric(8.0, 1.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(10.5).color(fg).strong());
        });
}
