use std::collections::HashSet;

use crate::config::{ConfigError, ViewConfig};

use super::highlight::search;
use super::hit::pick;
use super::model::{GraphError, GraphModel, Node};
use super::render::render;
use super::surface::{DisplayList, Surface};
use super::transform::{ScreenPoint, ViewTransform};

/// Padding, in pixels, left around the graph by [`ViewportController::fit_to_graph`].
const FIT_PADDING: f64 = 40.0;
/// Wheel delta is mapped to a zoom factor the same way for every host.
const SCROLL_ZOOM_RATE: f64 = 0.0018;
const MAX_SCROLL_FACTOR: f64 = 1.15;
const MIN_SCROLL_FACTOR: f64 = 0.85;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionState {
    Idle,
    /// Pointer is held down. `dragging` flips once travel from `origin`
    /// reaches the drag threshold; until then nothing moves.
    Panning {
        origin: ScreenPoint,
        last: ScreenPoint,
        dragging: bool,
    },
    /// Only observable inside a zoom handler.
    Zooming,
}

/// Owns the view state (transform, selection, search highlight) for one
/// session and redraws the surface exactly once per state-changing event.
pub struct ViewportController<S: Surface = DisplayList> {
    model: GraphModel,
    config: ViewConfig,
    transform: ViewTransform,
    state: InteractionState,
    selected: Option<String>,
    selection_revision: u64,
    search_term: String,
    highlighted: HashSet<String>,
    show_labels: bool,
    viewport: ScreenPoint,
    surface: Option<S>,
}

impl<S: Surface> ViewportController<S> {
    /// Fails when `config` does not pass [`ViewConfig::validate`].
    pub fn new(model: GraphModel, config: ViewConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transform: ViewTransform::new(config.scale_limits()),
            model,
            config,
            state: InteractionState::Idle,
            selected: None,
            selection_revision: 0,
            search_term: String::new(),
            highlighted: HashSet::new(),
            show_labels: true,
            viewport: ScreenPoint::ZERO,
            surface: None,
        })
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected
            .as_deref()
            .and_then(|id| self.model.get_node(id).ok())
    }

    /// Bumped every time the selected id changes.
    pub fn selection_revision(&self) -> u64 {
        self.selection_revision
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn highlighted_node_ids(&self) -> &HashSet<String> {
        &self.highlighted
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn is_pointer_active(&self) -> bool {
        matches!(self.state, InteractionState::Panning { .. })
    }

    /// Mounts the drawing surface and draws the first frame onto it.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        self.redraw();
    }

    pub fn resize(&mut self, viewport: ScreenPoint) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.redraw();
    }

    pub fn on_pointer_down(&mut self, point: ScreenPoint) {
        if self.state != InteractionState::Idle {
            return;
        }
        self.state = InteractionState::Panning {
            origin: point,
            last: point,
            dragging: false,
        };
    }

    pub fn on_pointer_move(&mut self, point: ScreenPoint) {
        let InteractionState::Panning {
            origin,
            last,
            dragging,
        } = self.state
        else {
            return;
        };

        let dragging = dragging || origin.distance(point) >= self.config.drag_threshold_pixels;
        if !dragging {
            return;
        }

        self.state = InteractionState::Panning {
            origin,
            last: point,
            dragging,
        };
        let delta = point - last;
        if delta.is_zero() {
            return;
        }
        self.transform.pan_by(delta);
        self.redraw();
    }

    /// Ends a press. A press that never turned into a drag is treated as a click.
    pub fn on_pointer_up(&mut self, point: ScreenPoint) {
        let InteractionState::Panning {
            origin, dragging, ..
        } = self.state
        else {
            return;
        };

        if !dragging && origin.distance(point) < self.config.drag_threshold_pixels {
            self.state = InteractionState::Idle;
            self.on_click(point);
            return;
        }

        self.on_pointer_move(point);
        self.state = InteractionState::Idle;
    }

    pub fn on_click(&mut self, point: ScreenPoint) {
        if self.state != InteractionState::Idle {
            return;
        }
        let picked = pick(point, &self.transform, &self.model).map(str::to_owned);
        self.set_selected(picked);
        self.redraw();
    }

    /// Wheel zoom anchored at the cursor.
    pub fn on_scroll(&mut self, anchor: ScreenPoint, scroll_delta: f64) {
        if scroll_delta.abs() <= f64::EPSILON {
            return;
        }
        let factor =
            (1.0 + scroll_delta * SCROLL_ZOOM_RATE).clamp(MIN_SCROLL_FACTOR, MAX_SCROLL_FACTOR);
        self.zoom_step(anchor, factor);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_step(self.viewport_center(), self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_step(self.viewport_center(), 1.0 / self.config.zoom_step);
    }

    fn zoom_step(&mut self, anchor: ScreenPoint, factor: f64) {
        if self.state != InteractionState::Idle {
            return;
        }
        self.state = InteractionState::Zooming;
        self.transform.zoom_at(anchor, factor);
        self.state = InteractionState::Idle;
        self.redraw();
    }

    pub fn reset_view(&mut self) {
        self.transform.reset();
        self.state = InteractionState::Idle;
        self.set_selected(None);
        self.search_term.clear();
        self.highlighted.clear();
        self.redraw();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.highlighted = search(&self.search_term, &self.model);
        log::debug!(
            "search {:?} matched {} nodes",
            self.search_term,
            self.highlighted.len()
        );
        self.redraw();
    }

    pub fn set_show_labels(&mut self, show_labels: bool) {
        self.show_labels = show_labels;
        self.redraw();
    }

    /// Selects a node by id from outside the canvas (lists, detail panels).
    pub fn select_node(&mut self, id: Option<&str>) -> Result<(), GraphError> {
        if let Some(id) = id {
            self.model.get_node(id)?;
        }
        self.set_selected(id.map(str::to_owned));
        self.redraw();
        Ok(())
    }

    /// Pans so the selected node sits at the viewport center. Returns `false` with no selection.
    pub fn focus_selected(&mut self) -> bool {
        let Some(position) = self.selected_node().map(|node| node.position) else {
            return false;
        };
        self.transform.center_on(position, self.viewport_center());
        self.redraw();
        true
    }

    pub fn fit_to_graph(&mut self) {
        let Some(bounds) = self.model.bounds() else {
            return;
        };
        self.transform.fit(bounds, self.viewport, FIT_PADDING);
        self.redraw();
    }

    fn viewport_center(&self) -> ScreenPoint {
        self.viewport * 0.5
    }

    fn set_selected(&mut self, selected: Option<String>) {
        if self.selected == selected {
            return;
        }
        log::info!("selection changed: {:?} -> {:?}", self.selected, selected);
        self.selected = selected;
        self.selection_revision = self.selection_revision.wrapping_add(1);
    }

    fn redraw(&mut self) {
        render(
            self.surface.as_mut(),
            &self.model,
            &self.transform,
            self.selected.as_deref(),
            &self.highlighted,
            &self.config.render_options(self.show_labels),
        );
    }
}
