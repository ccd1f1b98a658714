//! Geometry primitives and helpers shared by hit-testing, transforms, and rendering.
//!
//! All coordinates live in the overlay's local space, which is Y-up: a
//! rectangle's origin is its bottom-left corner and `max_y` is its top edge.

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};

// ============================================================================
// Points and Rectangles
// ============================================================================

/// A position in local overlay coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle; `(x, y)` is the minimum (bottom-left) corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from min/max bounds.
    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Builds a normalized rectangle spanning two arbitrary corners.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::from_min_max(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Smallest rectangle enclosing every point; `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Self::new(first.x, first.y, 0.0, 0.0);
        for point in rest {
            rect = rect.expand_to_include(*point);
        }
        Some(rect)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.min_x(), self.min_y())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.max_x(), self.min_y())
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.min_x(), self.max_y())
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.max_x(), self.max_y())
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Returns the rectangle grown by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Returns the smallest rectangle covering this one and `point`.
    pub fn expand_to_include(&self, point: Point) -> Self {
        Self::from_min_max(
            self.min_x().min(point.x),
            self.min_y().min(point.y),
            self.max_x().max(point.x),
            self.max_y().max(point.y),
        )
    }

    /// Square of side `size` centered on `center`.
    pub fn centered_square(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two wing points of an arrowhead whose tip sits at `tip`.
///
/// The head points along the direction from `tail` to `tip`. Its length is
/// capped at 30% of the shaft so short arrows keep a sensible head.
///
/// # Arguments
/// * `tip` - Arrowhead tip (the arrow's end point)
/// * `tail` - Arrow tail (the arrow's start point)
/// * `length` - Desired arrowhead length
/// * `angle_degrees` - Angle between each wing and the shaft
///
/// # Returns
/// `[left, right]` wing points. A shaft shorter than one unit yields the tip twice.
pub fn calculate_arrowhead(tip: Point, tail: Point, length: f64, angle_degrees: f64) -> [Point; 2] {
    let dx = tip.x - tail.x;
    let dy = tip.y - tail.y;
    let line_length = dx.hypot(dy);

    if line_length < 1.0 {
        return [tip, tip];
    }

    let ux = dx / line_length;
    let uy = dy / line_length;
    let arrow_length = length.min(line_length * 0.3);

    let angle = angle_degrees.to_radians();
    let cos_a = angle.cos();
    let sin_a = angle.sin();

    let left = Point::new(
        tip.x - arrow_length * (ux * cos_a - uy * sin_a),
        tip.y - arrow_length * (uy * cos_a + ux * sin_a),
    );
    let right = Point::new(
        tip.x - arrow_length * (ux * cos_a + uy * sin_a),
        tip.y - arrow_length * (uy * cos_a - ux * sin_a),
    );

    [left, right]
}

/// Shortest distance from `point` to the segment `a`–`b`.
///
/// Degenerate segments fall back to the distance to `a`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f64::EPSILON {
        return point.distance_to(a);
    }

    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrowhead_caps_at_thirty_percent_of_line_length() {
        let [left, _] = calculate_arrowhead(Point::new(10.0, 10.0), Point::new(0.0, 10.0), 100.0, 30.0);
        let distance = left.distance_to(Point::new(10.0, 10.0));
        assert!((distance - 3.0).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_handles_degenerate_lines() {
        let tip = Point::new(5.0, 5.0);
        let [left, right] = calculate_arrowhead(tip, tip, 15.0, 45.0);
        assert_eq!(left, tip);
        assert_eq!(right, tip);
    }

    #[test]
    fn arrowhead_wings_trail_behind_tip() {
        let [left, right] =
            calculate_arrowhead(Point::new(100.0, 0.0), Point::new(0.0, 0.0), 20.0, 30.0);
        assert!(left.x < 100.0 && right.x < 100.0);
        assert!((left.y + right.y).abs() < 1e-9);
    }

    #[test]
    fn segment_distance_projects_and_clamps() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((distance_to_segment(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
        assert!((distance_to_segment(Point::new(14.0, 3.0), a, b) - 5.0).abs() < 1e-9);
        assert!((distance_to_segment(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn rect_from_points_normalizes_corners() {
        let rect = Rect::from_points(Point::new(30.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(rect, Rect::new(10.0, 5.0, 20.0, 20.0));
        assert_eq!(rect.top_left(), Point::new(10.0, 25.0));
        assert_eq!(rect.bottom_right(), Point::new(30.0, 5.0));
    }

    #[test]
    fn rect_inflate_and_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0).inflate(4.0);
        assert!(rect.contains(Point::new(-4.0, 14.0)));
        assert!(!rect.contains(Point::new(-4.5, 5.0)));
    }

    #[test]
    fn name_color_lookup() {
        assert_eq!(name_to_color("White").unwrap(), WHITE);
        assert!(name_to_color("chartreuse").is_none());
    }
}
