use eframe::egui::{self, Key, Pos2, Rect, Ui};
use netgraph_view::network::ScreenPoint;

use super::super::ViewModel;

/// Canvas-relative pointer position; the controller works in viewport pixels.
pub(super) fn to_viewport(rect: Rect, pos: Pos2) -> ScreenPoint {
    ScreenPoint::new(f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y))
}

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        self.controller
            .on_scroll(to_viewport(rect, pointer), f64::from(scroll));
    }

    /// Feeds primary-button press, drag and release to the controller, which
    /// decides whether the gesture was a click or a pan.
    pub(in crate::app) fn handle_graph_pointer(&mut self, ui: &Ui, rect: Rect) {
        let (pressed, released, down, latest) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.primary_down(),
                input.pointer.latest_pos(),
            )
        });
        let Some(pointer) = latest else {
            return;
        };
        let point = to_viewport(rect, pointer);

        if pressed && rect.contains(pointer) {
            self.controller.on_pointer_down(point);
        }
        if !self.controller.is_pointer_active() {
            return;
        }
        if down {
            self.controller.on_pointer_move(point);
        }
        if released {
            self.controller.on_pointer_up(point);
        }
    }

    pub(in crate::app) fn handle_graph_keys(&mut self, ui: &Ui) {
        if ui.ctx().wants_keyboard_input() {
            return;
        }

        let (zoom_in, zoom_out, reset, labels, focus) = ui.input(|input| {
            (
                input.key_pressed(Key::Plus) || input.key_pressed(Key::Equals),
                input.key_pressed(Key::Minus),
                input.key_pressed(Key::Num0),
                input.key_pressed(Key::L),
                input.key_pressed(Key::F),
            )
        });

        if zoom_in {
            self.controller.zoom_in();
        }
        if zoom_out {
            self.controller.zoom_out();
        }
        if reset {
            self.controller.reset_view();
        }
        if labels {
            let show = !self.controller.show_labels();
            self.controller.set_show_labels(show);
        }
        if focus {
            self.controller.focus_selected();
        }
    }
}
