use eframe::egui::{Color32, Stroke};

use super::model::{Edge, Node, NodeCategory, StrengthClass};

pub const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub const SELECTED_RING: Color32 = Color32::from_rgb(245, 206, 93);
pub const HIGHLIGHT_RING: Color32 = Color32::from_rgb(103, 196, 255);
pub const SELF_RING: Color32 = Color32::from_rgb(236, 240, 246);
pub const NODE_OUTLINE: Color32 = Color32::from_rgba_premultiplied(15, 15, 15, 190);
pub const LABEL_COLOR: Color32 = Color32::from_gray(238);

pub const LABEL_BASE_SIZE: f64 = 12.0;
pub const MIN_LABEL_SIZE: f64 = 9.0;
pub const MAX_LABEL_SIZE: f64 = 22.0;
/// Screen-pixel gap between a node circle and its label.
pub const LABEL_GAP: f64 = 4.0;

pub const SELECTION_RING_GAP: f64 = 3.0;
pub const SELF_RING_GAP: f64 = 8.0;

pub const MIN_NODE_RADIUS: f64 = 8.0;
pub const MAX_NODE_RADIUS: f64 = 30.0;

pub fn category_color(category: NodeCategory) -> Color32 {
    match category {
        NodeCategory::You => Color32::from_rgb(139, 92, 246),
        NodeCategory::Direct => Color32::from_rgb(59, 130, 246),
        NodeCategory::Mutual => Color32::from_rgb(16, 185, 129),
        NodeCategory::Recommended => Color32::from_rgb(245, 158, 11),
        NodeCategory::Potential => Color32::from_rgb(148, 163, 184),
    }
}

pub fn strength_color(class: StrengthClass) -> Color32 {
    match class {
        StrengthClass::Strong => Color32::from_rgb(34, 197, 94),
        StrengthClass::Medium => Color32::from_rgb(234, 179, 8),
        StrengthClass::Weak => Color32::from_rgb(100, 116, 139),
    }
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

/// Edge stroke in world units. Width and opacity both grow with `strength`; the
/// width stays constant on screen whatever the zoom.
pub fn edge_stroke(edge: &Edge, scale: f64) -> Stroke {
    let strength = edge.strength.clamp(0.0, 1.0);
    let screen_width = 0.8 + strength * 2.4;
    let alpha = (70.0 + strength * 170.0) as u8;

    Stroke::new(
        (screen_width / scale) as f32,
        with_alpha(strength_color(edge.strength_class), alpha),
    )
}

pub fn node_fill(node: &Node) -> Color32 {
    let alpha = (140.0 + node.connection_strength.clamp(0.0, 1.0) * 115.0) as u8;
    with_alpha(category_color(node.category), alpha)
}

/// Label font size in screen pixels at `scale`.
pub fn label_font_size(scale: f64) -> f64 {
    (LABEL_BASE_SIZE * scale).clamp(MIN_LABEL_SIZE, MAX_LABEL_SIZE)
}

fn normalize_log(value: u64, min: u64, max: u64) -> f64 {
    let min = min.max(1) as f64;
    let max = max.max(min as u64) as f64;
    let value = value.max(1) as f64;

    let denominator = max.ln() - min.ln();
    if denominator.abs() < f64::EPSILON {
        return 0.5;
    }

    ((value.ln() - min.ln()) / denominator).clamp(0.0, 1.0)
}

/// World-unit radius for a node with `weight` connections, log-scaled over the dataset range.
pub fn node_radius(weight: u64, min: u64, max: u64) -> f64 {
    MIN_NODE_RADIUS + normalize_log(weight, min, max) * (MAX_NODE_RADIUS - MIN_NODE_RADIUS)
}
