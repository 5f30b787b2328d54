use eframe::egui::{self, RichText, Ui};
use netgraph_view::network::style::{category_color, strength_color};
use netgraph_view::util::{format_age, format_percent, unix_now};

use super::super::ViewModel;

struct RelatedEntry {
    id: String,
    name: String,
    strength: f64,
    class_label: &'static str,
    color: egui::Color32,
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Person Details");
        ui.add_space(6.0);

        let Some(node) = self.controller.selected_node() else {
            ui.label("Select someone on the canvas or from the search matches.");
            return;
        };

        ui.label(
            RichText::new(&node.display_name)
                .strong()
                .color(category_color(node.category)),
        );
        ui.label(&node.title);
        if let Some(company) = &node.company {
            ui.small(company);
        }
        ui.add_space(6.0);

        ui.label(format!("Relationship: {}", node.category.label()));
        ui.label(format!(
            "Connection strength: {}",
            format_percent(node.connection_strength)
        ));
        ui.label(format!(
            "Last active: {}",
            format_age(node.last_activity_at, unix_now())
        ));

        if !node.skills.is_empty() {
            ui.separator();
            ui.label(RichText::new("Skills").strong());
            ui.horizontal_wrapped(|ui| {
                for skill in &node.skills {
                    let matched = self.controller.highlighted_node_ids().contains(&node.id)
                        && skill
                            .to_lowercase()
                            .contains(&self.controller.search_term().trim().to_lowercase());
                    if matched {
                        ui.label(RichText::new(skill).strong());
                    } else {
                        ui.label(skill);
                    }
                }
            });
        }

        let related = self.related_entries(&node.id);

        ui.separator();
        ui.label(RichText::new(format!("Connections ({})", related.len())).strong());
        if related.is_empty() {
            ui.label("No connections recorded for this person.");
            return;
        }

        let row_count = related.len().min(self.related_rows_visible);
        let mut should_load_more = false;
        let mut selected_id = None;

        egui::ScrollArea::vertical()
            .id_salt("related_people_scroll")
            .max_height(320.0)
            .auto_shrink([false, false])
            .show_rows(ui, 22.0, row_count, |ui, row_range| {
                if row_range.end + Self::RELATED_PREFETCH_MARGIN >= row_count {
                    should_load_more = true;
                }

                for index in row_range {
                    let Some(entry) = related.get(index) else {
                        continue;
                    };
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("\u{25cf}").color(entry.color));
                        let label = format!(
                            "{}  ({}, {})",
                            entry.name,
                            entry.class_label,
                            format_percent(entry.strength)
                        );
                        if ui.link(label).clicked() {
                            selected_id = Some(entry.id.clone());
                        }
                    });
                }
            });

        if let Some(id) = selected_id {
            self.select_and_focus(&id);
        } else if should_load_more && row_count < related.len() {
            self.related_rows_visible = (row_count + Self::RELATED_PAGE_ROWS).min(related.len());
        }
    }

    /// Neighbors of `id`, strongest link first.
    fn related_entries(&self, id: &str) -> Vec<RelatedEntry> {
        let neighbors = match self.controller.model().neighbors(id) {
            Ok(neighbors) => neighbors,
            Err(error) => {
                log::warn!("cannot list connections: {error}");
                return Vec::new();
            }
        };

        let mut entries = neighbors
            .into_iter()
            .map(|(edge, other)| RelatedEntry {
                id: other.id.clone(),
                name: other.display_name.clone(),
                strength: edge.strength,
                class_label: edge.strength_class.label(),
                color: strength_color(edge.strength_class),
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| {
            b.strength
                .total_cmp(&a.strength)
                .then_with(|| a.name.cmp(&b.name))
        });
        entries
    }
}
