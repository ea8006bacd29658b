use egui::{RichText, Ui};
use egui_phosphor::regular as icons;

use crate::service::{Notification, NotificationKind};
use crate::ui::theme;

/// Render the success/error banner. Returns true when the user dismissed it.
pub fn show_notification(notification: &Notification, ui: &mut Ui) -> bool {
    let (bg, fg, icon) = match notification.kind {
        NotificationKind::Success => (theme::SUCCESS_BG, theme::SUCCESS_FG, icons::CHECK_CIRCLE),
        NotificationKind::Error => (theme::ERROR_BG, theme::ERROR_FG, icons::WARNING_CIRCLE),
    };
    let mut dismissed = false;

    egui::Frame::default()
        .fill(bg)
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{icon}  {}", notification.message)).color(fg));
                if notification.kind == NotificationKind::Error {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let close = egui::Button::new(RichText::new(icons::X).color(fg)).frame(false);
                        if ui.add(close).on_hover_text("Dismiss").clicked() {
                            dismissed = true;
                        }
                    });
                }
            });
        });
    ui.add_space(10.0);

    dismissed
}
