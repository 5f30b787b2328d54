use eframe::egui::{self, Align, Layout, RichText, Ui};
use netgraph_view::network::style::category_color;
use netgraph_view::network::{NodeCategory, rank_matches};

use super::super::{MatchListCache, ViewModel};

const MATCH_ROW_HEIGHT: f32 = 22.0;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Network Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (name, title or skill)")
            .on_hover_text("Highlight every person whose name, title or skills contain the text.");
        let mut term = self.controller.search_term().to_owned();
        let search_response = ui.text_edit_singleline(&mut term);
        if search_response.changed() {
            self.controller.set_search_term(term);
        }
        search_response
            .on_hover_text("Matches are case-insensitive. Clear the box to stop highlighting.");

        ui.separator();

        ui.horizontal_wrapped(|ui| {
            if ui.button("Zoom in").on_hover_text("Shortcut: +").clicked() {
                self.controller.zoom_in();
            }
            if ui.button("Zoom out").on_hover_text("Shortcut: -").clicked() {
                self.controller.zoom_out();
            }
            if ui.button("Reset").on_hover_text("Shortcut: 0").clicked() {
                self.controller.reset_view();
            }
            if ui
                .button("Fit")
                .on_hover_text("Scale and center the whole network in the canvas.")
                .clicked()
            {
                self.controller.fit_to_graph();
            }
            let has_selection = self.controller.selected_node_id().is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new("Focus selected"))
                .on_hover_text("Shortcut: F")
                .clicked()
            {
                self.controller.focus_selected();
            }
        });

        let mut show_labels = self.controller.show_labels();
        if ui
            .checkbox(&mut show_labels, "Show labels")
            .on_hover_text("Names appear once zoomed in past the label threshold. Shortcut: L")
            .changed()
        {
            self.controller.set_show_labels(show_labels);
        }

        ui.separator();
        ui.collapsing("Legend", |ui| {
            for category in NodeCategory::ALL {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("\u{25cf}").color(category_color(category)));
                    ui.label(category.label());
                });
            }
        });

        ui.separator();
        self.draw_match_list(ui);
    }

    fn draw_match_list(&mut self, ui: &mut Ui) {
        let term = self.controller.search_term().trim();
        if term.is_empty() {
            self.match_list_cache = None;
            ui.weak("Type in the search box to list matching people.");
            return;
        }

        let stale = self
            .match_list_cache
            .as_ref()
            .is_none_or(|cache| cache.term != term);
        if stale {
            let ids = rank_matches(
                term,
                self.controller.model(),
                self.controller.highlighted_node_ids(),
            )
            .into_iter()
            .map(|node| node.id.clone())
            .collect();
            self.match_list_cache = Some(MatchListCache {
                term: term.to_owned(),
                ids,
            });
        }

        let Some(cache) = self.match_list_cache.as_ref() else {
            return;
        };
        ui.label(format!("Matches ({})", cache.ids.len()));

        let mut selected_id = None;
        egui::ScrollArea::vertical()
            .id_salt("search_matches")
            .max_height(260.0)
            .auto_shrink([false, false])
            .show_rows(ui, MATCH_ROW_HEIGHT, cache.ids.len(), |ui, row_range| {
                for index in row_range {
                    let Some(id) = cache.ids.get(index) else {
                        continue;
                    };
                    let Ok(node) = self.controller.model().get_node(id) else {
                        continue;
                    };
                    let is_selected = self.controller.selected_node_id() == Some(id.as_str());

                    let clicked = ui
                        .horizontal(|ui| {
                            let clicked =
                                ui.selectable_label(is_selected, &node.display_name).clicked();
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.weak(&node.title);
                            });
                            clicked
                        })
                        .inner;

                    if clicked {
                        selected_id = Some(id.clone());
                    }
                }
            });

        if let Some(id) = selected_id {
            self.select_and_focus(&id);
        }
    }

    /// List selection also brings the person into view.
    pub(in crate::app) fn select_and_focus(&mut self, id: &str) {
        if let Err(error) = self.controller.select_node(Some(id)) {
            log::warn!("ignoring selection: {error}");
            return;
        }
        self.related_rows_visible = Self::INITIAL_RELATED_ROWS;
        self.controller.focus_selected();
    }
}
