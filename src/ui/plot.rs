use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Rect, RichText, Sense, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points};

use crate::color::{self, ColorMap, ACCENT};
use crate::data::model::{
    Record, Table, COL_CHARACTER, COL_DEBUT, COL_HIGHEST_RANK, COL_LOWEST_RANK, COL_RANK,
    COL_TOTAL_TIMES_RANKED, COL_YEAR,
};
use crate::pages::{BarData, HeatmapData, HistogramData, LineData, ScatterData};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Label for a categorical axis tick; blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Whole years only.
fn year_label(value: f64) -> String {
    if value.fract().abs() < 1e-6 {
        format!("{}", value as i64)
    } else {
        String::new()
    }
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.add_space(8.0);
    ui.strong(title);
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Categorical bar chart; the highlighted bar uses the accent colour.
pub fn bar_chart(ui: &mut Ui, data: &BarData) {
    chart_title(ui, &data.spec.title);

    let bars: Vec<Bar> = data
        .values
        .iter()
        .zip(&data.labels)
        .enumerate()
        .map(|(i, (value, label))| {
            let fill = if data.highlight == Some(i) {
                ACCENT
            } else {
                color::pastel(0)
            };
            Bar::new(i as f64, *value).name(label).fill(fill).width(0.7)
        })
        .collect();

    let labels = data.labels.clone();
    Plot::new((data.spec.kind, &data.spec.title))
        .height(CHART_HEIGHT)
        .x_axis_label(data.spec.x_field)
        .y_axis_label(data.spec.y_field)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// One line per series, coloured per series name.
pub fn line_chart(ui: &mut Ui, data: &LineData) {
    chart_title(ui, &data.spec.title);

    let colors = ColorMap::new(data.series.iter().map(|s| s.name.as_str()));
    Plot::new((data.spec.kind, &data.spec.title))
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(data.spec.x_field)
        .y_axis_label(data.spec.y_field)
        .x_axis_formatter(|mark, _range| year_label(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for series in &data.series {
                let c = colors.color_for(&series.name);
                plot_ui.line(
                    Line::new(series.points.clone())
                        .name(&series.name)
                        .color(c)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(series.points.clone())
                        .name(&series.name)
                        .color(c)
                        .radius(3.5),
                );
            }
        });
}

pub fn histogram(ui: &mut Ui, data: &HistogramData) {
    chart_title(ui, &data.spec.title);

    let bars: Vec<Bar> = data
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width() * 0.95)
                .name(format!("{:.0}–{:.0}", bin.start, bin.end))
                .fill(color::pastel(2))
        })
        .collect();

    Plot::new((data.spec.kind, &data.spec.title))
        .height(CHART_HEIGHT)
        .x_axis_label(data.spec.x_field)
        .y_axis_label(data.spec.y_field)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Scatter plot, one colour per group key on the continuous scale.
pub fn scatter(ui: &mut Ui, data: &ScatterData) {
    chart_title(ui, &data.spec.title);

    let lo = data.groups.first().map_or(0.0, |g| f64::from(g.key));
    let hi = data.groups.last().map_or(0.0, |g| f64::from(g.key));
    let field = data.spec.color_field.unwrap_or("group");

    Plot::new((data.spec.kind, &data.spec.title))
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(data.spec.x_field)
        .y_axis_label(data.spec.y_field)
        .x_axis_formatter(|mark, _range| year_label(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for group in &data.groups {
                plot_ui.points(
                    Points::new(group.points.clone())
                        .name(format!("{field} {}", group.key))
                        .color(color::scale(f64::from(group.key), lo, hi))
                        .radius(4.5),
                );
            }
        });
}

/// Character × year grid painted cell by cell; gaps stay blank.
pub fn heatmap(ui: &mut Ui, data: &HeatmapData) {
    chart_title(ui, &data.spec.title);

    let pivot = &data.pivot;
    let range = if pivot.is_empty() { None } else { pivot.value_range() };
    let Some((lo, hi)) = range else {
        ui.label("Nothing to plot.");
        return;
    };

    let label_w = 140.0;
    let header_h = 22.0;
    let cell_h = 18.0;
    let width = ui.available_width().max(label_w + 100.0);
    let cell_w = ((width - label_w) / pivot.years.len() as f32).max(8.0);
    let height = header_h + cell_h * pivot.characters.len() as f32;

    let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(11.0);

    // Year labels, thinned so they do not overlap.
    let every = ((36.0 / cell_w).ceil() as usize).max(1);
    for (ci, year) in pivot.years.iter().enumerate().step_by(every) {
        painter.text(
            pos2(origin.x + label_w + (ci as f32 + 0.5) * cell_w, origin.y + header_h / 2.0),
            Align2::CENTER_CENTER,
            year.to_string(),
            font.clone(),
            text_color,
        );
    }

    for (ri, name) in pivot.characters.iter().enumerate() {
        let y = origin.y + header_h + ri as f32 * cell_h;
        painter.text(
            pos2(origin.x + label_w - 6.0, y + cell_h / 2.0),
            Align2::RIGHT_CENTER,
            name,
            font.clone(),
            text_color,
        );
        for (ci, cell) in pivot.cells[ri].iter().enumerate() {
            if let Some(rank) = cell {
                let rect = Rect::from_min_size(
                    pos2(origin.x + label_w + ci as f32 * cell_w, y),
                    vec2(cell_w - 1.0, cell_h - 1.0),
                );
                painter.rect_filled(rect, 0.0, color::scale(*rank, lo, hi));
            }
        }
    }

    if let Some(pos) = response.hover_pos() {
        let col = ((pos.x - origin.x - label_w) / cell_w).floor();
        let row = ((pos.y - origin.y - header_h) / cell_h).floor();
        if col >= 0.0 && row >= 0.0 {
            let (col, row) = (col as usize, row as usize);
            if let (Some(year), Some(name)) = (pivot.years.get(col), pivot.characters.get(row)) {
                let text = match pivot.get(name, *year) {
                    Some(rank) => format!("{name}, {year}: rank {rank:.1}"),
                    None => format!("{name}, {year}: not ranked"),
                };
                response.on_hover_text(text);
            }
        }
    }

    gradient_legend(ui, data.spec.color_field.unwrap_or(COL_RANK), lo, hi);
}

fn gradient_legend(ui: &mut Ui, field: &str, lo: f64, hi: f64) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(format!("{field}: {lo:.0}")).small());
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            ui.label(RichText::new("■").color(color::gradient(t)));
        }
        ui.label(RichText::new(format!("{hi:.0}")).small());
    });
}

// ---------------------------------------------------------------------------
// Tables and metrics
// ---------------------------------------------------------------------------

fn field_text(record: &Record, column: &str) -> String {
    match column {
        COL_CHARACTER => record.character.clone(),
        COL_YEAR => record.year.to_string(),
        COL_RANK => record.rank.to_string(),
        COL_HIGHEST_RANK => record.highest_rank.to_string(),
        COL_LOWEST_RANK => record.lowest_rank.to_string(),
        COL_TOTAL_TIMES_RANKED => record.total_times_ranked.to_string(),
        COL_DEBUT => record.debut.to_string(),
        _ => String::new(),
    }
}

/// Plain data table over the given columns.
pub fn record_table(ui: &mut Ui, id: &str, table: &Table, columns: &[&str]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(70.0), columns.len())
            .header(20.0, |mut header| {
                for name in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|mut body| {
                for record in table {
                    body.row(18.0, |mut row| {
                        for name in columns {
                            row.col(|ui: &mut Ui| {
                                ui.label(field_text(record, name));
                            });
                        }
                    });
                }
            });
    });
}

/// Ranked name / count list.
pub fn frequency_table(ui: &mut Ui, id: &str, rows: &[(String, usize)]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(90.0), 2)
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong(COL_CHARACTER);
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("count");
                });
            })
            .body(|mut body| {
                for (name, count) in rows {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(name);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(count.to_string());
                        });
                    });
                }
            });
    });
}

/// A labelled headline number.
pub fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small());
            ui.heading(value);
        });
    });
}

/// Yellow notice for empty selections.
pub fn notice(ui: &mut Ui, text: &str) {
    ui.colored_label(Color32::from_rgb(0xB8, 0x86, 0x0B), format!("⚠ {text}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;

    #[test]
    fn category_labels_only_on_integers() {
        let labels = vec!["Kuromi".to_string(), "Pochacco".to_string()];
        assert_eq!(category_label(&labels, 1.0), "Pochacco");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 7.0), "");
    }

    #[test]
    fn year_labels_skip_fractions() {
        assert_eq!(year_label(2001.0), "2001");
        assert_eq!(year_label(2001.5), "");
    }

    #[test]
    fn field_text_covers_every_column() {
        let r = record("Kuromi", 2005, 3, 2, 8, 11);
        assert_eq!(field_text(&r, COL_CHARACTER), "Kuromi");
        assert_eq!(field_text(&r, COL_YEAR), "2005");
        assert_eq!(field_text(&r, COL_RANK), "3");
        assert_eq!(field_text(&r, COL_HIGHEST_RANK), "2");
        assert_eq!(field_text(&r, COL_LOWEST_RANK), "8");
        assert_eq!(field_text(&r, COL_TOTAL_TIMES_RANKED), "11");
        assert_eq!(field_text(&r, COL_DEBUT), "1974");
    }
}
