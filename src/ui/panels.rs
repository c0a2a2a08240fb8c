use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::pipeline::INSIGHT;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – statistics tables
// ---------------------------------------------------------------------------

/// Render the summary and grouped-means tables.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Basic Statistics");
            ui.separator();
            summary_table(ui, state);

            ui.add_space(12.0);
            ui.heading(format!(
                "Average measurements by {}",
                state.grouped.category_name
            ));
            ui.separator();
            grouped_table(ui, state);

            ui.add_space(12.0);
            ui.strong("Pattern Insight");
            ui.label(INSIGHT);
        });
}

fn summary_table(ui: &mut Ui, state: &AppState) {
    let fields = &state.summary.fields;
    let Some(first) = fields.first() else {
        ui.label("No numeric columns.");
        return;
    };
    let labels: Vec<&str> = first.rows().iter().map(|(l, _)| *l).collect();

    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto(), fields.len() + 1)
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.label("");
                });
                for f in fields {
                    header.col(|ui: &mut Ui| {
                        ui.strong(&f.name);
                    });
                }
            })
            .body(|mut body| {
                for (row_idx, label) in labels.iter().enumerate() {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.strong(*label);
                        });
                        for f in fields {
                            let value = f.rows()[row_idx].1;
                            row.col(|ui: &mut Ui| {
                                ui.label(format_stat(value));
                            });
                        }
                    });
                }
            });
    });
}

fn grouped_table(ui: &mut Ui, state: &AppState) {
    let grouped = &state.grouped;
    ui.push_id("grouped_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto(), grouped.field_names.len() + 1)
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong(&grouped.category_name);
                });
                for name in &grouped.field_names {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for (category, group) in &grouped.groups {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            let color = state.colors.color_for(category);
                            ui.label(RichText::new(category).color(color).strong());
                        });
                        for mean in &group.means {
                            row.col(|ui: &mut Ui| {
                                ui.label(format_stat(*mean));
                            });
                        }
                    });
                }
            });
    });
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.3}")
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title row with a per-category record count.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Iris Explorer");
        ui.separator();
        let total: usize = state.grouped.groups.values().map(|g| g.count).sum();
        ui.label(format!("{total} records"));
        for (label, color) in state.colors.legend_entries() {
            ui.separator();
            let count = state.grouped.groups.get(&label).map_or(0, |g| g.count);
            ui.label(RichText::new(format!("{label}: {count}")).color(color));
        }
    });
    ui.add_space(2.0);
    egui::warn_if_debug_build(ui);
}
