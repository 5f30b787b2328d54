use std::ops::{Add, Mul, Sub};

/// A point in graph space, where node positions live.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A point (or a delta) in surface pixels, relative to the surface's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for ScreenPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ScreenPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for ScreenPoint {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned world-space box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub min: WorldPoint,
    pub max: WorldPoint,
}

impl WorldBounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl ScaleLimits {
    /// Never panics; with inverted bounds `max` wins.
    pub fn clamp(self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: 0.1, max: 6.0 }
    }
}

/// Scale-plus-translate mapping: `screen = world * scale + translate`.
///
/// `scale` is kept inside `limits` by every operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    translate: ScreenPoint,
    limits: ScaleLimits,
}

impl ViewTransform {
    pub fn new(limits: ScaleLimits) -> Self {
        Self {
            scale: limits.clamp(1.0),
            translate: ScreenPoint::ZERO,
            limits,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> ScreenPoint {
        self.translate
    }

    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    pub fn world_to_screen(&self, point: WorldPoint) -> ScreenPoint {
        ScreenPoint::new(
            point.x * self.scale + self.translate.x,
            point.y * self.scale + self.translate.y,
        )
    }

    pub fn screen_to_world(&self, point: ScreenPoint) -> WorldPoint {
        WorldPoint::new(
            (point.x - self.translate.x) / self.scale,
            (point.y - self.translate.y) / self.scale,
        )
    }

    /// Rescales by `factor` while keeping the world point under `anchor` fixed on screen.
    pub fn zoom_at(&mut self, anchor: ScreenPoint, factor: f64) {
        if !factor.is_finite() {
            return;
        }

        let next_scale = self.limits.clamp(self.scale * factor);
        let ratio = next_scale / self.scale;
        self.translate = anchor - (anchor - self.translate) * ratio;
        self.scale = next_scale;
    }

    pub fn pan_by(&mut self, delta: ScreenPoint) {
        self.translate = self.translate + delta;
    }

    pub fn reset(&mut self) {
        self.scale = self.limits.clamp(1.0);
        self.translate = ScreenPoint::ZERO;
    }

    /// Moves `world` to `screen_center` without changing the scale.
    pub fn center_on(&mut self, world: WorldPoint, screen_center: ScreenPoint) {
        self.translate = ScreenPoint::new(
            screen_center.x - world.x * self.scale,
            screen_center.y - world.y * self.scale,
        );
    }

    /// Picks the largest in-limit scale that shows `bounds` inside `viewport` minus `padding`.
    pub fn fit(&mut self, bounds: WorldBounds, viewport: ScreenPoint, padding: f64) {
        let usable_width = (viewport.x - padding * 2.0).max(1.0);
        let usable_height = (viewport.y - padding * 2.0).max(1.0);
        let width = bounds.width().max(f64::EPSILON);
        let height = bounds.height().max(f64::EPSILON);

        self.scale = self
            .limits
            .clamp((usable_width / width).min(usable_height / height));
        self.center_on(bounds.center(), viewport * 0.5);
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(ScaleLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zoom_keeps_anchor_in_place() {
        let mut transform = ViewTransform::default();
        transform.pan_by(ScreenPoint::new(40.0, -25.0));
        let anchor = ScreenPoint::new(320.0, 180.0);
        let world_before = transform.screen_to_world(anchor);

        transform.zoom_at(anchor, 1.1);
        transform.zoom_at(anchor, 1.1);

        let after = transform.world_to_screen(world_before);
        assert!(approx(after.x, anchor.x));
        assert!(approx(after.y, anchor.y));
        assert!(approx(transform.scale(), 1.21));
    }

    #[test]
    fn zoom_clamps_at_limits() {
        let mut transform = ViewTransform::new(ScaleLimits { min: 0.5, max: 2.0 });
        for _ in 0..50 {
            transform.zoom_at(ScreenPoint::new(10.0, 10.0), 1.5);
        }
        assert_eq!(transform.scale(), 2.0);

        for _ in 0..50 {
            transform.zoom_at(ScreenPoint::new(10.0, 10.0), 0.0);
        }
        assert_eq!(transform.scale(), 0.5);
    }

    #[test]
    fn inverted_limits_clamp_without_panicking() {
        let limits = ScaleLimits { min: 3.0, max: 2.0 };
        assert_eq!(limits.clamp(1.0), 2.0);
        assert_eq!(limits.clamp(5.0), 2.0);

        let mut transform = ViewTransform::new(limits);
        transform.zoom_at(ScreenPoint::new(10.0, 10.0), 4.0);
        assert_eq!(transform.scale(), 2.0);
    }

    #[test]
    fn non_finite_zoom_factor_is_ignored() {
        let mut transform = ViewTransform::default();
        transform.zoom_at(ScreenPoint::ZERO, f64::NAN);
        transform.zoom_at(ScreenPoint::ZERO, f64::INFINITY);
        assert_eq!(transform, ViewTransform::default());
    }

    #[test]
    fn reset_restores_identity() {
        let mut transform = ViewTransform::default();
        transform.zoom_at(ScreenPoint::new(100.0, 100.0), 3.0);
        transform.pan_by(ScreenPoint::new(7.0, 9.0));
        transform.reset();
        assert_eq!(transform.scale(), 1.0);
        assert_eq!(transform.translate(), ScreenPoint::ZERO);
    }

    #[test]
    fn reset_respects_limits_that_exclude_one() {
        let mut transform = ViewTransform::new(ScaleLimits { min: 2.0, max: 4.0 });
        transform.reset();
        assert_eq!(transform.scale(), 2.0);
    }

    #[test]
    fn fit_centers_bounds_in_viewport() {
        let mut transform = ViewTransform::default();
        let bounds = WorldBounds {
            min: WorldPoint::new(-100.0, -50.0),
            max: WorldPoint::new(100.0, 50.0),
        };
        transform.fit(bounds, ScreenPoint::new(440.0, 240.0), 20.0);

        assert!(approx(transform.scale(), 2.0));
        let center = transform.world_to_screen(bounds.center());
        assert!(approx(center.x, 220.0));
        assert!(approx(center.y, 120.0));
    }
}
