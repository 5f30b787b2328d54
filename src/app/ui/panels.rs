use eframe::egui::{self, Align, Context, Layout};
use netgraph_view::config::{ConfigError, ViewConfig};
use netgraph_view::network::{GraphModel, ViewportController};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) const INITIAL_RELATED_ROWS: usize = 24;
    pub(in crate::app) const RELATED_PAGE_ROWS: usize = 24;
    pub(in crate::app) const RELATED_PREFETCH_MARGIN: usize = 4;

    pub(in crate::app) fn new(
        model: GraphModel,
        config: ViewConfig,
        source_label: String,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: ViewportController::new(model, config)?,
            source_label,
            needs_initial_fit: true,
            match_list_cache: None,
            related_rows_visible: Self::INITIAL_RELATED_ROWS,
        })
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("netgraph-view");
                    ui.separator();
                    let model = self.controller.model();
                    ui.label(format!("you: {}", model.self_node().display_name));
                    ui.label(format!("source: {}", self.source_label));
                    ui.label(format!("people: {}", model.node_count()));
                    ui.label(format!("connections: {}", model.edge_count()));

                    let reload_label = if is_loading {
                        "Reloading..."
                    } else {
                        "Reload dataset"
                    };
                    if ui
                        .add_enabled(!is_loading, egui::Button::new(reload_label))
                        .clicked()
                    {
                        *reload_requested = true;
                    }
                    if ui.button("Reset view").clicked() {
                        self.controller.reset_view();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.status_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    fn status_text(&self) -> String {
        let highlighted = self.controller.highlighted_node_ids().len();
        let zoom = self.controller.transform().scale() * 100.0;
        if highlighted > 0 {
            format!("zoom {zoom:.0}%  |  {highlighted} matches")
        } else {
            format!("zoom {zoom:.0}%")
        }
    }
}
