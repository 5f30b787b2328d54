use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui, vec2};
use netgraph_view::network::{DisplayList, ScreenPoint, pick};
use netgraph_view::util::format_percent;

use super::super::ViewModel;
use super::interaction::to_viewport;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.controller.resize(ScreenPoint::new(
            f64::from(rect.width()),
            f64::from(rect.height()),
        ));
        if self.controller.surface().is_none() {
            self.controller.attach_surface(DisplayList::default());
        }
        if self.needs_initial_fit && rect.width() > 1.0 && rect.height() > 1.0 {
            self.controller.fit_to_graph();
            self.needs_initial_fit = false;
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pointer(ui, rect);
        self.handle_graph_keys(ui);

        if let Some(display_list) = self.controller.surface() {
            display_list.paint(&painter, rect.min);
        }

        if self.controller.is_pointer_active() {
            ui.ctx().request_repaint();
        }

        let hovered = response
            .hover_pos()
            .and_then(|pos| {
                pick(
                    to_viewport(rect, pos),
                    self.controller.transform(),
                    self.controller.model(),
                )
            })
            .and_then(|id| self.controller.model().get_node(id).ok());

        if let Some(node) = hovered {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
            let panel_text = format!(
                "{}  |  {}  |  {}  |  strength {}",
                node.display_name,
                node.title,
                node.category.label(),
                format_percent(node.connection_strength)
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }
}
