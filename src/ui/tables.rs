use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{
    Product, COUNTRY_COLUMN, NUM_RATINGS_COLUMN, PRICE_COLUMN, STAR_RATING_COLUMN, TITLE_COLUMN,
};
use crate::view::ranking::RankedProduct;

const ROW_HEIGHT: f32 = 20.0;
const HEADER_HEIGHT: f32 = 22.0;

/// Shown in place of absent values.
pub const MISSING: &str = "—";

/// Format an optional number for display; absent values render as [`MISSING`].
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
        Some(v) => format!("{v:.2}"),
        None => MISSING.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Dataset overview
// ---------------------------------------------------------------------------

/// The first rows of the filtered view with every loaded column.
pub fn overview_table(ui: &mut Ui, rows: &[Product]) {
    if rows.is_empty() {
        ui.label("No rows match the current filter.");
        return;
    }

    ui.push_id("overview_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::remainder().at_least(200.0).clip(true))
            .columns(Column::auto().at_least(70.0), 4)
            .header(HEADER_HEIGHT, |mut header| {
                for name in [
                    TITLE_COLUMN,
                    COUNTRY_COLUMN,
                    PRICE_COLUMN,
                    STAR_RATING_COLUMN,
                    NUM_RATINGS_COLUMN,
                ] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for product in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(&product.title);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(&product.country);
                        });
                        for value in [product.price, product.star_rating, product.num_ratings] {
                            row.col(|ui: &mut Ui| {
                                ui.label(format_value(value));
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Most rated products
// ---------------------------------------------------------------------------

/// Title and rating count of the top-ranked listings.
pub fn top_products_table(ui: &mut Ui, rows: &[RankedProduct]) {
    if rows.is_empty() {
        ui.label("No rows match the current filter.");
        return;
    }

    ui.push_id("top_products_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(30.0))
            .column(Column::remainder().at_least(200.0).clip(true))
            .column(Column::auto().at_least(90.0))
            .header(HEADER_HEIGHT, |mut header| {
                for name in ["#", TITLE_COLUMN, NUM_RATINGS_COLUMN] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for (rank, product) in rows.iter().enumerate() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label((rank + 1).to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(&product.title);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format_value(product.num_ratings));
                        });
                    });
                }
            });
    });
}
