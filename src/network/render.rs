use std::collections::HashSet;

use eframe::egui::{Align2, Stroke};

use super::model::{GraphModel, NodeCategory};
use super::style::{
    self, BACKGROUND, HIGHLIGHT_RING, LABEL_COLOR, LABEL_GAP, NODE_OUTLINE, SELECTED_RING,
    SELECTION_RING_GAP, SELF_RING, SELF_RING_GAP,
};
use super::surface::Surface;
use super::transform::{ViewTransform, WorldPoint};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub show_labels: bool,
    /// Labels are drawn only while `scale` is strictly above this.
    pub label_visibility_scale_threshold: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_labels: true,
            label_visibility_scale_threshold: 0.8,
        }
    }
}

/// Draws one full frame: clear, edges, nodes, then labels.
///
/// A missing surface (not mounted yet) makes this a no-op.
pub fn render<S: Surface + ?Sized>(
    surface: Option<&mut S>,
    model: &GraphModel,
    transform: &ViewTransform,
    selected: Option<&str>,
    highlighted: &HashSet<String>,
    options: &RenderOptions,
) {
    let Some(surface) = surface else {
        return;
    };

    surface.clear(BACKGROUND);
    surface.push_transform(*transform);

    let scale = transform.scale();
    draw_edges(surface, model, scale);
    draw_nodes(surface, model, scale, selected, highlighted);
    if options.show_labels && scale > options.label_visibility_scale_threshold {
        draw_labels(surface, model, scale);
    }

    surface.pop_transform();
}

fn draw_edges<S: Surface + ?Sized>(surface: &mut S, model: &GraphModel, scale: f64) {
    for (edge, source, target) in model.edges_with_endpoints() {
        surface.line(
            source.position,
            target.position,
            style::edge_stroke(edge, scale),
        );
    }
}

fn draw_nodes<S: Surface + ?Sized>(
    surface: &mut S,
    model: &GraphModel,
    scale: f64,
    selected: Option<&str>,
    highlighted: &HashSet<String>,
) {
    let search_active = !highlighted.is_empty();
    let pixel = 1.0 / scale;

    for node in model.all_nodes() {
        let is_selected = selected == Some(node.id.as_str());
        let is_highlighted = highlighted.contains(&node.id);

        let mut fill = style::node_fill(node);
        if search_active && !is_selected && !is_highlighted {
            fill = style::dim_color(fill, 0.38);
        }

        surface.circle_filled(node.position, node.visual_size, fill);
        surface.circle_stroke(
            node.position,
            node.visual_size,
            Stroke::new(pixel as f32, NODE_OUTLINE),
        );

        if is_selected {
            surface.circle_stroke(
                node.position,
                node.visual_size + SELECTION_RING_GAP * pixel,
                Stroke::new((2.6 * pixel) as f32, SELECTED_RING),
            );
        } else if is_highlighted {
            surface.circle_stroke(
                node.position,
                node.visual_size + SELECTION_RING_GAP * pixel,
                Stroke::new((2.0 * pixel) as f32, HIGHLIGHT_RING),
            );
        }

        if node.category == NodeCategory::You {
            surface.circle_stroke(
                node.position,
                node.visual_size + SELF_RING_GAP * pixel,
                Stroke::new((1.5 * pixel) as f32, SELF_RING),
            );
        }
    }
}

fn draw_labels<S: Surface + ?Sized>(surface: &mut S, model: &GraphModel, scale: f64) {
    let size = style::label_font_size(scale) / scale;

    for node in model.all_nodes() {
        let anchor = WorldPoint::new(
            node.position.x,
            node.position.y + node.visual_size + LABEL_GAP / scale,
        );
        surface.text(anchor, Align2::CENTER_TOP, &node.display_name, size, LABEL_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::model::fixtures::{node, small_model};
    use crate::network::model::{Edge, GraphDataset, StrengthClass};
    use crate::network::surface::{DisplayList, DrawCommand};
    use crate::network::transform::ScreenPoint;

    fn rings_around(list: &DisplayList, center: ScreenPoint) -> Vec<Stroke> {
        list.commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::CircleStroke {
                    center: at, stroke, ..
                } if *at == center => Some(*stroke),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn missing_surface_is_a_noop() {
        let model = small_model();
        render::<DisplayList>(
            None,
            &model,
            &ViewTransform::default(),
            None,
            &HashSet::new(),
            &RenderOptions::default(),
        );
    }

    #[test]
    fn draws_clear_then_edges_then_nodes_then_labels() {
        let model = small_model();
        let mut list = DisplayList::default();
        render(
            Some(&mut list),
            &model,
            &ViewTransform::default(),
            None,
            &HashSet::new(),
            &RenderOptions::default(),
        );

        let kinds = list
            .commands()
            .iter()
            .map(|command| match command {
                DrawCommand::Clear(_) => 0,
                DrawCommand::Line { .. } => 1,
                DrawCommand::CircleFilled { .. } | DrawCommand::CircleStroke { .. } => 2,
                DrawCommand::Text { .. } => 3,
            })
            .collect::<Vec<_>>();

        assert_eq!(kinds.first(), Some(&0));
        assert!(kinds.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(kinds.iter().filter(|kind| **kind == 1).count(), 2);
        assert_eq!(kinds.iter().filter(|kind| **kind == 3).count(), 3);
    }

    #[test]
    fn nodes_follow_dataset_order() {
        let model = small_model();
        let mut list = DisplayList::default();
        render(
            Some(&mut list),
            &model,
            &ViewTransform::default(),
            None,
            &HashSet::new(),
            &RenderOptions::default(),
        );

        let centers = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::CircleFilled { center, .. } => Some(center.x),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(centers, [-100.0, 0.0, 100.0]);
    }

    #[test]
    fn labels_hidden_below_threshold_or_when_disabled() {
        let model = small_model();
        let count_text = |transform: &ViewTransform, options: &RenderOptions| {
            let mut list = DisplayList::default();
            render(Some(&mut list), &model, transform, None, &HashSet::new(), options);
            list.commands()
                .iter()
                .filter(|command| matches!(command, DrawCommand::Text { .. }))
                .count()
        };

        let mut zoomed_out = ViewTransform::default();
        zoomed_out.zoom_at(ScreenPoint::ZERO, 0.5);
        assert_eq!(count_text(&zoomed_out, &RenderOptions::default()), 0);

        let hidden = RenderOptions {
            show_labels: false,
            ..RenderOptions::default()
        };
        assert_eq!(count_text(&ViewTransform::default(), &hidden), 0);
    }

    #[test]
    fn label_size_stays_legible_on_screen() {
        let model = small_model();
        let mut transform = ViewTransform::default();
        transform.zoom_at(ScreenPoint::ZERO, 5.0);

        let mut list = DisplayList::default();
        render(
            Some(&mut list),
            &model,
            &transform,
            None,
            &HashSet::new(),
            &RenderOptions::default(),
        );

        for command in list.commands() {
            if let DrawCommand::Text { size, .. } = command {
                assert!((*size - style::MAX_LABEL_SIZE).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn selection_wins_over_highlight_and_self_ring_is_permanent() {
        let model = small_model();
        let transform = ViewTransform::default();
        let highlighted = HashSet::from(["ana".to_owned(), "ben".to_owned()]);

        let mut list = DisplayList::default();
        render(
            Some(&mut list),
            &model,
            &transform,
            Some("ana"),
            &highlighted,
            &RenderOptions::default(),
        );

        let ana = rings_around(&list, ScreenPoint::new(-100.0, 0.0));
        assert_eq!(ana.len(), 2);
        assert_eq!(ana[1].color, SELECTED_RING);

        let ben = rings_around(&list, ScreenPoint::new(100.0, 0.0));
        assert_eq!(ben.len(), 2);
        assert_eq!(ben[1].color, HIGHLIGHT_RING);

        let you = rings_around(&list, ScreenPoint::new(0.0, 0.0));
        assert_eq!(you.len(), 2);
        assert_eq!(you[1].color, SELF_RING);

        let mut list = DisplayList::default();
        render(
            Some(&mut list),
            &model,
            &transform,
            Some("you"),
            &highlighted,
            &RenderOptions::default(),
        );
        let you = rings_around(&list, ScreenPoint::new(0.0, 0.0));
        assert_eq!(you.len(), 3);
        assert_eq!(you[1].color, SELECTED_RING);
        assert_eq!(you[2].color, SELF_RING);
    }

    #[test]
    fn edges_follow_dataset_order_and_color_by_class() {
        fn link(source: &str, target: &str, strength: f64, strength_class: StrengthClass) -> Edge {
            Edge {
                id: format!("{source}-{target}"),
                source_id: source.to_owned(),
                target_id: target.to_owned(),
                strength,
                strength_class,
            }
        }

        let model = GraphModel::new(GraphDataset {
            nodes: vec![
                node("ana", NodeCategory::Direct, -100.0, 0.0, 10.0),
                node("you", NodeCategory::You, 0.0, 0.0, 20.0),
                node("ben", NodeCategory::Mutual, 100.0, 0.0, 10.0),
                node("cleo", NodeCategory::Potential, 0.0, 100.0, 10.0),
            ],
            edges: vec![
                link("you", "cleo", 0.3, StrengthClass::Weak),
                link("you", "ana", 0.9, StrengthClass::Weak),
                link("ana", "ben", 0.5, StrengthClass::Strong),
            ],
        })
        .unwrap();

        let mut list = DisplayList::default();
        render(
            Some(&mut list),
            &model,
            &ViewTransform::default(),
            None,
            &HashSet::new(),
            &RenderOptions::default(),
        );

        let lines = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Line { from, to, stroke } => Some((*from, *to, *stroke)),
                _ => None,
            })
            .collect::<Vec<_>>();
        let endpoints = lines
            .iter()
            .map(|(from, to, _)| ((from.x, from.y), (to.x, to.y)))
            .collect::<Vec<_>>();
        assert_eq!(
            endpoints,
            [
                ((0.0, 0.0), (0.0, 100.0)),
                ((0.0, 0.0), (-100.0, 0.0)),
                ((-100.0, 0.0), (100.0, 0.0)),
            ]
        );

        for ((_, _, stroke), edge) in lines.iter().zip(model.all_edges()) {
            let alpha = (70.0 + edge.strength * 170.0) as u8;
            assert_eq!(
                stroke.color,
                style::with_alpha(style::strength_color(edge.strength_class), alpha)
            );
        }
        let strong_looking_weak = lines[1].2;
        assert_ne!(
            strong_looking_weak.color,
            style::with_alpha(style::strength_color(StrengthClass::Strong), 223)
        );
        assert!(strong_looking_weak.width > lines[0].2.width);
    }

    #[test]
    fn unmatched_nodes_dim_during_search() {
        let model = small_model();
        let highlighted = HashSet::from(["ben".to_owned()]);
        let mut list = DisplayList::default();
        render(
            Some(&mut list),
            &model,
            &ViewTransform::default(),
            None,
            &highlighted,
            &RenderOptions::default(),
        );

        let fills = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::CircleFilled { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(fills[2], style::node_fill(model.get_node("ben").unwrap()));
        assert_ne!(fills[0], style::node_fill(model.get_node("ana").unwrap()));
    }
}
