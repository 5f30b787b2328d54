mod controller;
mod highlight;
mod hit;
mod model;
mod render;
pub mod style;
mod surface;
mod transform;

pub use controller::{InteractionState, ViewportController};
pub use highlight::{rank_matches, search};
pub use hit::pick;
pub use model::{
    DataIntegrityError, Edge, GraphDataset, GraphError, GraphModel, Node, NodeCategory,
    StrengthClass,
};
pub use render::{RenderOptions, render};
pub use surface::{DisplayList, DrawCommand, Surface};
pub use transform::{ScaleLimits, ScreenPoint, ViewTransform, WorldBounds, WorldPoint};
