use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular as icons;

use crate::model::SupervisorDocument;
use crate::ui::theme;

/// Render the supervisor documents card. Returns the file name to download, if any.
pub fn show_documents_panel(documents: &[SupervisorDocument], ui: &mut Ui) -> Option<String> {
    let mut requested = None;

    egui::Frame::default()
        .fill(theme::BG_PANEL)
        .rounding(egui::Rounding::same(theme::CARD_ROUNDING))
        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
        .inner_margin(egui::Margin::same(14.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Supervisor Documents").strong().size(16.0));
            ui.label(
                RichText::new("Documents and resources shared by your supervisor")
                    .size(12.0)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);

            if documents.is_empty() {
                ui.label(RichText::new("Nothing shared yet.").color(theme::TEXT_DIM));
                return;
            }

            TableBuilder::new(ui)
                .striped(true)
                .resizable(false)
                .vscroll(false)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::exact(28.0))
                .column(Column::remainder())
                .column(Column::auto())
                .column(Column::auto())
                .body(|mut body| {
                    for doc in documents {
                        body.row(36.0, |mut row| {
                            row.col(|ui| {
                                ui.label(
                                    RichText::new(icons::FILE_TEXT)
                                        .size(18.0)
                                        .color(theme::DESTRUCTIVE),
                                );
                            });
                            row.col(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(RichText::new(&doc.title).strong().size(12.5));
                                    ui.label(
                                        RichText::new(format!(
                                            "Uploaded: {}",
                                            doc.uploaded_date.format("%Y-%m-%d")
                                        ))
                                        .size(10.5)
                                        .color(theme::TEXT_DIM),
                                    );
                                });
                            });
                            row.col(|ui| {
                                theme::badge(ui, doc.doc_type.label(), false);
                            });
                            row.col(|ui| {
                                let label = format!("View {}", doc.doc_type.label());
                                if ui.button(label).clicked() {
                                    requested = Some(doc.file_name());
                                }
                            });
                        });
                    }
                });
        });

    requested
}
