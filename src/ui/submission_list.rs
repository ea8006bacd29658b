use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::model::{SubmissionStatus, SubmissionTask};
use crate::service::SubmissionTracker;
use crate::ui::theme;

/// Actions that the submissions list can request.
pub enum SubmissionListAction {
    None,
    Submit(u32),
    Edit(u32),
    Download { file_name: String, week: u32 },
}

/// Render one card per week, in week order.
pub fn show_submission_list(tracker: &SubmissionTracker, ui: &mut Ui) -> SubmissionListAction {
    let mut action = SubmissionListAction::None;
    let formats = tracker.config().accepted_formats();

    ui.label(RichText::new("Weekly Progress Submissions").strong().size(20.0));
    ui.add_space(6.0);

    for task in tracker.tasks() {
        let busy = tracker.is_busy(task.week);
        let card = egui::Frame::default()
            .fill(theme::BG_PANEL)
            .rounding(egui::Rounding::same(theme::CARD_ROUNDING))
            .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE));

        card.show(ui, |ui| {
            ui.set_width(ui.available_width());
            if let Some(a) = show_card_header(task, busy, ui) {
                action = a;
            }
            egui::Frame::default()
                .inner_margin(egui::Margin::symmetric(14.0, 10.0))
                .show(ui, |ui| {
                    for line in task.description_lines() {
                        ui.label(
                            RichText::new(format!("• {line}"))
                                .size(12.0)
                                .color(theme::TEXT_SECONDARY),
                        );
                    }
                    ui.add_space(6.0);
                    show_details_grid(task, &formats, ui);

                    match task.status {
                        SubmissionStatus::Submitted => {
                            if let Some(a) = show_submission_status(task, ui) {
                                action = a;
                            }
                        }
                        SubmissionStatus::Pending => {
                            ui.add_space(6.0);
                            ui.label(
                                RichText::new(format!(
                                    "{}  No submission yet. Please upload your work before the due date: {}",
                                    icons::WARNING_CIRCLE,
                                    task.due_date.format("%Y-%m-%d")
                                ))
                                .size(12.0)
                                .color(theme::TEXT_SECONDARY),
                            );
                        }
                    }
                });
        });
        ui.add_space(10.0);
    }

    action
}

fn show_card_header(task: &SubmissionTask, busy: bool, ui: &mut Ui) -> Option<SubmissionListAction> {
    let mut action = None;
    egui::Frame::default()
        .fill(theme::BG_CARD_HEADER)
        .rounding(egui::Rounding {
            nw: theme::CARD_ROUNDING,
            ne: theme::CARD_ROUNDING,
            sw: 0.0,
            se: 0.0,
        })
        .inner_margin(egui::Margin::symmetric(14.0, 10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("Week {}", task.week)).strong().size(16.0));
                        theme::badge(ui, task.task_status.label(), task.task_status.is_open());
                        theme::badge(ui, task.status.label(), task.is_submitted());
                    });
                    ui.label(RichText::new(&task.title).size(13.0));
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if busy {
                        ui.spinner();
                        return;
                    }
                    if task.is_submitted() {
                        let btn = egui::Button::new(format!("{}  Edit Submission", icons::PENCIL_SIMPLE));
                        if ui.add(btn).clicked() {
                            action = Some(SubmissionListAction::Edit(task.week));
                        }
                    } else {
                        let btn = egui::Button::new(
                            RichText::new(format!("{}  Add Submission", icons::UPLOAD_SIMPLE))
                                .color(Color32::WHITE),
                        )
                        .fill(theme::SUCCESS_BUTTON);
                        if ui.add(btn).clicked() {
                            action = Some(SubmissionListAction::Submit(task.week));
                        }
                    }
                });
            });
        });
    action
}

/// Release date, due date, window, and accepted formats in a four-column grid.
pub fn show_details_grid(task: &SubmissionTask, formats: &str, ui: &mut Ui) {
    egui::Grid::new(("details", task.week))
        .num_columns(4)
        .spacing([28.0, 2.0])
        .show(ui, |ui| {
            for head in ["Upload Date", "Due Date", "Task Status", "File Format"] {
                ui.label(RichText::new(head).font(theme::font_label()).color(theme::TEXT_DIM));
            }
            ui.end_row();
            ui.label(RichText::new(task.upload_date.format("%Y-%m-%d").to_string()).strong());
            ui.label(
                RichText::new(task.due_date.format("%Y-%m-%d").to_string())
                    .strong()
                    .color(theme::DESTRUCTIVE),
            );
            ui.label(RichText::new(task.task_status.label()).strong());
            ui.label(RichText::new(formats).strong());
            ui.end_row();
        });
}

fn show_submission_status(task: &SubmissionTask, ui: &mut Ui) -> Option<SubmissionListAction> {
    let mut action = None;
    ui.add_space(6.0);
    ui.separator();
    ui.label(RichText::new("Submission Status").strong());

    ui.horizontal(|ui| {
        ui.label(RichText::new("File Submission:").color(theme::TEXT_SECONDARY));
        if let Some(file) = &task.submitted_file {
            let link = egui::Button::new(
                RichText::new(format!("{}  {} (Download)", icons::FILE_TEXT, file))
                    .color(theme::DESTRUCTIVE),
            )
            .frame(false);
            if ui.add(link).on_hover_text("Save a copy and open it").clicked() {
                action = Some(SubmissionListAction::Download {
                    file_name: file.clone(),
                    week: task.week,
                });
            }
        }
    });
    if let Some(at) = task.submitted_at {
        ui.label(
            RichText::new(format!("Uploaded {}", at.format("%Y-%m-%d %H:%M UTC")))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    }

    if let Some(comments) = &task.comments {
        ui.add_space(4.0);
        egui::Frame::default()
            .fill(theme::FEEDBACK_BG)
            .rounding(egui::Rounding::same(6.0))
            .inner_margin(egui::Margin::same(10.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(format!("{}  Supervisor Feedback", icons::CHAT_CIRCLE_TEXT))
                        .strong()
                        .color(theme::FEEDBACK_FG),
                );
                ui.label(RichText::new(comments).color(theme::FEEDBACK_FG));
            });
    }
    action
}
