use crate::app::{DialogMode, SubmissionsApp};
use crate::ui::{submission_list, theme};
use egui::{Color32, Context, RichText, Window};
use egui_phosphor::regular as icons;

/// Render the "Submit Work" / "Edit Submission" dialog.
pub fn show_submission_dialog(app: &mut SubmissionsApp, ctx: &Context) {
    let Some(dialog) = app.dialog.as_ref() else {
        return;
    };
    let week = dialog.week;
    let mode = dialog.mode;
    let Some(task) = app.tracker.task(week).cloned() else {
        app.dialog = None;
        return;
    };
    let busy = app.tracker.is_busy(week);
    let formats = app.tracker.config().accepted_formats();

    let (title, file_label, comment_label, confirm, confirm_busy) = match mode {
        DialogMode::Submit => (
            "Submit Work",
            "Upload File",
            "Submission Comments (Optional)",
            "Submit Work",
            "Submitting...",
        ),
        DialogMode::Edit => (
            "Edit Submission",
            "Replace File",
            "Your Comments (Optional)",
            "Update Submission",
            "Updating...",
        ),
    };

    let mut should_close = false;
    let mut pick_file = false;
    let mut confirmed = false;

    Window::new(RichText::new(format!("{title} - Week {week}")).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(&task.title).color(theme::TEXT_SECONDARY));
            ui.add_space(6.0);
            submission_list::show_details_grid(&task, &formats, ui);
            ui.add_space(8.0);

            let Some(dialog) = app.dialog.as_mut() else {
                return;
            };

            // ── File ───────────────────────────────────────────────────
            ui.label(RichText::new(file_label).strong());
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!busy, egui::Button::new(format!("{}  Choose File...", icons::FOLDER_OPEN)))
                    .clicked()
                {
                    pick_file = true;
                }
                match (&dialog.file, &task.submitted_file) {
                    (Some(file), _) => {
                        let name = file.name().unwrap_or_default();
                        ui.label(RichText::new(format!("Selected: {name}")).color(theme::TEXT_SECONDARY));
                    }
                    (None, Some(current)) if mode == DialogMode::Edit => {
                        ui.label(RichText::new(format!("Current: {current}")).color(theme::TEXT_SECONDARY));
                    }
                    _ => {
                        ui.label(RichText::new("No file chosen").color(theme::TEXT_DIM));
                    }
                }
            });
            ui.add_space(6.0);

            // ── Comments ───────────────────────────────────────────────
            ui.label(RichText::new(comment_label).strong());
            let hint = match mode {
                DialogMode::Submit => "Add any comments about your submission...",
                DialogMode::Edit => "Update your comments...",
            };
            ui.add_enabled(
                !busy,
                egui::TextEdit::multiline(&mut dialog.comment)
                    .hint_text(hint)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );

            if let Some(err) = &dialog.error {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("{}  {err}", icons::WARNING_CIRCLE)).color(theme::ERROR_FG),
                );
            }

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let ready = !busy && (mode == DialogMode::Edit || dialog.file.is_some());
                let label = if busy { confirm_busy } else { confirm };
                let confirm_btn = egui::Button::new(RichText::new(label).color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_enabled(ready, confirm_btn).clicked() {
                    confirmed = true;
                }
                if busy {
                    ui.spinner();
                }
                if ui.add_sized([80.0, 26.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if pick_file {
        app.pick_file();
    }
    if confirmed {
        app.confirm_dialog();
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.dialog = None;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut SubmissionsApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Student Submissions").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Weekly project submissions and supervisor documents,");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
