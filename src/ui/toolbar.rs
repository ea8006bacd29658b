use crate::app::SubmissionsApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top menu bar.
pub fn show_toolbar(app: &mut SubmissionsApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.label(RichText::new("UTM").strong().color(theme::BRAND).size(15.0));
        ui.label(RichText::new("Gradient").strong().size(15.0));
        ui.add_space(12.0);

        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open Stored Files Folder").clicked() {
                let dir = app.paths.store_root.clone();
                app.open_folder(dir);
                ui.close_menu();
            }
            if ui.button("  Open Downloads Folder").clicked() {
                let dir = app.paths.downloads.clone();
                app.open_folder(dir);
                ui.close_menu();
            }
            if ui.button("  Open Settings Folder").clicked() {
                let dir = app.paths.settings.parent().map(|d| d.to_path_buf());
                if let Some(dir) = dir {
                    app.open_folder(dir);
                }
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned student badge
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new("ST").strong().size(11.0));
            let bell = egui::Button::new(RichText::new(icons::BELL).size(14.0)).frame(false);
            let unread = app.tracker.notification().is_some();
            let hover = if unread { "1 new notification" } else { "No new notifications" };
            ui.add(bell).on_hover_text(hover);
        });
    });
}
