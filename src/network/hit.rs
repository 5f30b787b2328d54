use super::model::GraphModel;
use super::transform::{ScreenPoint, ViewTransform};

/// Returns the topmost node whose world-space circle contains `screen`.
///
/// Overlaps resolve to the node drawn last, i.e. the last match in
/// [`GraphModel::all_nodes`] order.
pub fn pick<'a>(
    screen: ScreenPoint,
    transform: &ViewTransform,
    model: &'a GraphModel,
) -> Option<&'a str> {
    let world = transform.screen_to_world(screen);

    model
        .all_nodes()
        .iter()
        .rev()
        .find(|node| node.position.distance(world) <= node.visual_size)
        .map(|node| node.id.as_str())
}
