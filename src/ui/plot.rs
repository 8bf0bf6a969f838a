use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{ACCENT, ColorMap};
use crate::data::aggregate::{SalaryBucket, SkillShare};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Skills page
// ---------------------------------------------------------------------------

/// Horizontal bar chart of skill mentions plus the underlying table.
pub fn skills_page(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.skills_view else {
        no_dataset(ui);
        return;
    };
    let shares = match view {
        Ok(shares) if !shares.is_empty() => shares,
        _ => {
            no_data(ui, "No data available for the selected filters.");
            return;
        }
    };

    ui.heading(state.skills_criteria.skills_heading());

    // Index i is drawn at y = i, so the most frequent skill ends up on top.
    let bars: Vec<Bar> = shares
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Bar::new(i as f64, s.count as f64)
                .name(format!("{} ({:.1}%)", s.skill, s.percentage))
                .fill(ACCENT)
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = shares.iter().map(|s| s.skill.clone()).collect();

    Plot::new("skills_plot")
        .height(ui.available_height() * 0.65)
        .x_axis_label("Skill Count")
        .y_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
        .y_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Skill Count").horizontal());
        });

    ui.add_space(6.0);
    skills_table(ui, shares);
}

fn skills_table(ui: &mut Ui, shares: &[SkillShare]) {
    TableBuilder::new(ui)
        .id_salt("skills_table")
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(60.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Skill");
            });
            header.col(|ui| {
                ui.strong("Count");
            });
            header.col(|ui| {
                ui.strong("Share");
            });
        })
        .body(|mut body| {
            // Most frequent first in the table.
            for s in shares.iter().rev() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(&s.skill);
                    });
                    row.col(|ui| {
                        ui.label(s.count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}%", s.percentage));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Salary page
// ---------------------------------------------------------------------------

/// Vertical bar chart of average salary per experience bucket.
pub fn salary_page(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.salary_view else {
        no_dataset(ui);
        return;
    };
    let buckets = match view {
        Ok(buckets) if !buckets.is_empty() => buckets,
        _ => {
            no_data(ui, "No data available for the selected job title.");
            return;
        }
    };

    if let Some(heading) = state.salary_heading() {
        ui.heading(heading);
    }

    let bars = salary_bars(buckets, &state.color_map);

    Plot::new("salary_plot")
        .height(ui.available_height() * 0.65)
        .x_axis_label("Experience (years)")
        .y_axis_label("Average Salary (₹)")
        .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_axis_formatter(|mark: GridMark, _range| short_amount(mark.value))
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Average Salary"));
        });

    ui.add_space(6.0);
    salary_table(ui, buckets);
}

fn salary_bars(buckets: &[SalaryBucket], colors: &ColorMap) -> Vec<Bar> {
    buckets
        .iter()
        .map(|b| {
            Bar::new(b.experience as f64, b.average_salary)
                .name(format!("{} yrs: {} ₹", b.experience, short_amount(b.average_salary)))
                .fill(colors.color_for(b.experience))
                .width(0.7)
        })
        .collect()
}

fn salary_table(ui: &mut Ui, buckets: &[SalaryBucket]) {
    TableBuilder::new(ui)
        .id_salt("salary_table")
        .striped(true)
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Experience");
            });
            header.col(|ui| {
                ui.strong("Average Salary (₹)");
            });
            header.col(|ui| {
                ui.strong("Postings");
            });
        })
        .body(|mut body| {
            for b in buckets {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{} yrs", b.experience));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}", b.average_salary));
                    });
                    row.col(|ui| {
                        ui.label(b.postings.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn no_dataset(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a file to view job postings  (File → Open…)");
    });
}

fn no_data(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(egui::Color32::from_rgb(0xE6, 0xA2, 0x3C)));
}

/// Axis label for a categorical axis: only whole positions get a name.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Compact amount with an SI suffix (`1.2M`, `450k`).
fn short_amount(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "k")
    } else {
        (value, "")
    };
    let digits = if scaled.abs() >= 10.0 || scaled == 0.0 { 0 } else { 1 };
    format!("{scaled:.digits$}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_whole_marks() {
        let labels = vec!["SQL".to_string(), "Python".to_string()];
        assert_eq!(category_label(&labels, 0.0), "SQL");
        assert_eq!(category_label(&labels, 1.0), "Python");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 7.0), "");
    }

    #[test]
    fn short_amounts_use_si_suffixes() {
        assert_eq!(short_amount(500_000.0), "500k");
        assert_eq!(short_amount(1_200_000.0), "1.2M");
        assert_eq!(short_amount(12_000_000.0), "12M");
        assert_eq!(short_amount(0.0), "0");
    }
}
