use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Stroke, pos2};

use super::transform::{ScreenPoint, ViewTransform, WorldPoint};

/// A 2D drawing capability. Geometry passed to the draw calls is in world
/// space; the surface maps it through whatever transform was pushed last.
pub trait Surface {
    fn clear(&mut self, color: Color32);
    fn push_transform(&mut self, transform: ViewTransform);
    fn pop_transform(&mut self);
    fn line(&mut self, from: WorldPoint, to: WorldPoint, stroke: Stroke);
    fn circle_filled(&mut self, center: WorldPoint, radius: f64, fill: Color32);
    fn circle_stroke(&mut self, center: WorldPoint, radius: f64, stroke: Stroke);
    fn text(&mut self, anchor: WorldPoint, align: Align2, text: &str, size: f64, color: Color32);
}

/// Screen-space drawing command recorded by a [`DisplayList`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color32),
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        stroke: Stroke,
    },
    CircleFilled {
        center: ScreenPoint,
        radius: f64,
        fill: Color32,
    },
    CircleStroke {
        center: ScreenPoint,
        radius: f64,
        stroke: Stroke,
    },
    Text {
        anchor: ScreenPoint,
        align: Align2,
        text: String,
        size: f64,
        color: Color32,
    },
}

/// Records one frame of draw calls in screen space so it can be replayed onto
/// an egui [`Painter`] every UI pass until the next redraw.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    transforms: Vec<ViewTransform>,
    frames: u64,
}

impl DisplayList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames recorded so far; each `clear` starts a new one.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    fn project(&self, point: WorldPoint) -> ScreenPoint {
        match self.transforms.last() {
            Some(transform) => transform.world_to_screen(point),
            None => ScreenPoint::new(point.x, point.y),
        }
    }

    fn scale(&self) -> f64 {
        self.transforms
            .last()
            .map_or(1.0, |transform| transform.scale())
    }

    fn scale_stroke(&self, stroke: Stroke) -> Stroke {
        Stroke::new(stroke.width * self.scale() as f32, stroke.color)
    }

    pub fn paint(&self, painter: &Painter, origin: Pos2) {
        let to_pos =
            |point: ScreenPoint| pos2(origin.x + point.x as f32, origin.y + point.y as f32);

        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => {
                    painter.rect_filled(painter.clip_rect(), 0.0, *color);
                }
                DrawCommand::Line { from, to, stroke } => {
                    painter.line_segment([to_pos(*from), to_pos(*to)], *stroke);
                }
                DrawCommand::CircleFilled {
                    center,
                    radius,
                    fill,
                } => {
                    painter.circle_filled(to_pos(*center), *radius as f32, *fill);
                }
                DrawCommand::CircleStroke {
                    center,
                    radius,
                    stroke,
                } => {
                    painter.circle_stroke(to_pos(*center), *radius as f32, *stroke);
                }
                DrawCommand::Text {
                    anchor,
                    align,
                    text,
                    size,
                    color,
                } => {
                    painter.text(
                        to_pos(*anchor),
                        *align,
                        text,
                        FontId::proportional(*size as f32),
                        *color,
                    );
                }
            }
        }
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, color: Color32) {
        self.commands.clear();
        self.transforms.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear(color));
    }

    fn push_transform(&mut self, transform: ViewTransform) {
        self.transforms.push(transform);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }

    fn line(&mut self, from: WorldPoint, to: WorldPoint, stroke: Stroke) {
        self.commands.push(DrawCommand::Line {
            from: self.project(from),
            to: self.project(to),
            stroke: self.scale_stroke(stroke),
        });
    }

    fn circle_filled(&mut self, center: WorldPoint, radius: f64, fill: Color32) {
        self.commands.push(DrawCommand::CircleFilled {
            center: self.project(center),
            radius: radius * self.scale(),
            fill,
        });
    }

    fn circle_stroke(&mut self, center: WorldPoint, radius: f64, stroke: Stroke) {
        self.commands.push(DrawCommand::CircleStroke {
            center: self.project(center),
            radius: radius * self.scale(),
            stroke: self.scale_stroke(stroke),
        });
    }

    fn text(&mut self, anchor: WorldPoint, align: Align2, text: &str, size: f64, color: Color32) {
        self.commands.push(DrawCommand::Text {
            anchor: self.project(anchor),
            align,
            text: text.to_owned(),
            size: size * self.scale(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::transform::ScaleLimits;

    #[test]
    fn records_in_screen_space_under_pushed_transform() {
        let mut transform = ViewTransform::new(ScaleLimits::default());
        transform.zoom_at(ScreenPoint::ZERO, 2.0);
        transform.pan_by(ScreenPoint::new(10.0, 20.0));

        let mut list = DisplayList::default();
        list.clear(Color32::BLACK);
        list.push_transform(transform);
        list.circle_filled(WorldPoint::new(5.0, 5.0), 4.0, Color32::RED);
        list.pop_transform();
        list.circle_filled(WorldPoint::new(5.0, 5.0), 4.0, Color32::RED);

        assert_eq!(
            list.commands()[1],
            DrawCommand::CircleFilled {
                center: ScreenPoint::new(20.0, 30.0),
                radius: 8.0,
                fill: Color32::RED,
            }
        );
        assert_eq!(
            list.commands()[2],
            DrawCommand::CircleFilled {
                center: ScreenPoint::new(5.0, 5.0),
                radius: 4.0,
                fill: Color32::RED,
            }
        );
    }

    #[test]
    fn clear_starts_a_new_frame() {
        let mut list = DisplayList::default();
        list.clear(Color32::BLACK);
        list.line(WorldPoint::default(), WorldPoint::new(1.0, 1.0), Stroke::NONE);
        list.clear(Color32::BLACK);

        assert_eq!(list.frame_count(), 2);
        assert_eq!(list.commands(), [DrawCommand::Clear(Color32::BLACK)]);
    }
}
