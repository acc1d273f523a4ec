use eframe::egui::{self, Color32, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{heatmap, panels, plot, tables};

const PRICE_COLOR: Color32 = Color32::from_rgb(76, 114, 176);
const RATING_COLOR: Color32 = Color32::from_rgb(221, 132, 82);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: country filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the five projections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view listings  (File → Open…)");
        });
        return;
    };
    let top_n = state.view_settings().top_n;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Product Dashboard");
            ui.add_space(8.0);

            ui.strong("Dataset Overview");
            tables::overview_table(ui, &view.overview);
            ui.separator();

            ui.strong("Distribution of Product Prices");
            plot::histogram_plot(
                ui,
                "price_histogram",
                &view.price_histogram,
                "Product Price",
                PRICE_COLOR,
            );
            ui.separator();

            ui.strong("Distribution of Star Ratings");
            plot::histogram_plot(
                ui,
                "rating_histogram",
                &view.rating_histogram,
                "Star Rating",
                RATING_COLOR,
            );
            ui.separator();

            ui.strong(format!("Top {top_n} Most Rated Products"));
            tables::top_products_table(ui, &view.top_products);
            ui.separator();

            ui.strong("Correlation between Price, Rating, and Num of Ratings");
            heatmap::correlation_heatmap(ui, &view.correlation);
        });
}
