//! Annotation definitions, geometry, and hit-testing.

use super::color::Color;
use super::font::{ESTIMATED_ADVANCE_RATIO, LINE_HEIGHT_RATIO};
use super::render::Canvas;
use crate::util::{self, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Side of the square drag handle centered on each bounds corner.
pub const HANDLE_SIZE: f64 = 10.0;
/// Radius around an arrow endpoint that grabs that endpoint.
pub const ENDPOINT_RADIUS: f64 = 8.0;
/// Distance from an arrow shaft (beyond half the stroke) that still counts as the body.
pub const LINE_TOLERANCE: f64 = 6.0;
/// Margin added on every side of the bounds for hover highlighting.
pub const HOVER_MARGIN: f64 = 4.0;

/// Default arrowhead length.
pub const ARROW_HEAD_LENGTH: f64 = 20.0;
/// Default arrowhead angle in degrees.
pub const ARROW_HEAD_ANGLE: f64 = 30.0;

/// Globally unique annotation identifier, minted once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named sub-region of an annotation returned by hit-testing.
///
/// Corner names follow the Y-up convention: `Bottom*` corners sit at `min_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Body,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    /// Arrow start point
    Start,
    /// Arrow end point (the head)
    End,
}

/// Discriminant of an [`Annotation`], used for tools and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Rectangle,
    Arrow,
    Text,
}

/// Capability set shared by every annotation variant.
///
/// `hit_test` defaults to [`default_hit_test`] over [`bounds`](Self::bounds);
/// variants with their own notion of grabbable regions override it.
pub trait AnnotationShape {
    fn id(&self) -> AnnotationId;

    /// Axis-aligned bounds enclosing everything the shape paints.
    fn bounds(&self) -> Rect;

    fn stroke_color(&self) -> Color;

    fn stroke_width(&self) -> f64;

    fn draw(&self, canvas: &mut dyn Canvas);

    /// Moves the whole shape by `(dx, dy)`.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Point that paste offsets are measured from.
    fn reference_point(&self) -> Point;

    /// Point that lands exactly on the target of a paste-at-point.
    fn paste_anchor(&self) -> Point;

    fn hit_test(&self, point: Point) -> Option<Handle> {
        default_hit_test(self.bounds(), point)
    }

    fn contains(&self, point: Point) -> bool {
        self.hit_test(point).is_some()
    }
}

/// Bounds corners in hit-test order: bottom-left, bottom-right, top-left, top-right.
pub fn corner_handles(bounds: Rect) -> [(Handle, Point); 4] {
    [
        (Handle::BottomLeft, bounds.bottom_left()),
        (Handle::BottomRight, bounds.bottom_right()),
        (Handle::TopLeft, bounds.top_left()),
        (Handle::TopRight, bounds.top_right()),
    ]
}

/// Edge midpoints: top, bottom, left, right.
pub fn edge_handles(bounds: Rect) -> [(Handle, Point); 4] {
    let center = bounds.center();
    [
        (Handle::Top, Point::new(center.x, bounds.max_y())),
        (Handle::Bottom, Point::new(center.x, bounds.min_y())),
        (Handle::Left, Point::new(bounds.min_x(), center.y)),
        (Handle::Right, Point::new(bounds.max_x(), center.y)),
    ]
}

fn handle_at(handles: &[(Handle, Point)], point: Point) -> Option<Handle> {
    handles
        .iter()
        .find(|(_, center)| Rect::centered_square(*center, HANDLE_SIZE).contains(point))
        .map(|(handle, _)| *handle)
}

/// Corner handles first (bottom-left, bottom-right, top-left, top-right), then the body.
pub fn default_hit_test(bounds: Rect, point: Point) -> Option<Handle> {
    handle_at(&corner_handles(bounds), point)
        .or_else(|| bounds.contains(point).then_some(Handle::Body))
}

// ============================================================================
// Rectangle
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RectangleAnnotation {
    id: AnnotationId,
    pub rect: Rect,
    pub color: Color,
    pub stroke_width: f64,
}

impl RectangleAnnotation {
    pub fn new(rect: Rect, color: Color, stroke_width: f64) -> Self {
        Self::with_id(AnnotationId::new(), rect, color, stroke_width)
    }

    pub(crate) fn with_id(id: AnnotationId, rect: Rect, color: Color, stroke_width: f64) -> Self {
        Self {
            id,
            rect,
            color,
            stroke_width,
        }
    }
}

impl AnnotationShape for RectangleAnnotation {
    fn id(&self) -> AnnotationId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn stroke_color(&self) -> Color {
        self.color
    }

    fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.stroke_rect(self.rect, self.color, self.stroke_width);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.rect = self.rect.translated(dx, dy);
    }

    fn reference_point(&self) -> Point {
        self.rect.bottom_left()
    }

    fn paste_anchor(&self) -> Point {
        self.rect.center()
    }

    /// Corners, then edge midpoints, then the body.
    fn hit_test(&self, point: Point) -> Option<Handle> {
        handle_at(&corner_handles(self.rect), point)
            .or_else(|| handle_at(&edge_handles(self.rect), point))
            .or_else(|| self.rect.contains(point).then_some(Handle::Body))
    }
}

// ============================================================================
// Arrow
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowAnnotation {
    id: AnnotationId,
    pub start: Point,
    /// Head end of the arrow
    pub end: Point,
    pub color: Color,
    pub stroke_width: f64,
    pub head_length: f64,
    pub head_angle: f64,
}

impl ArrowAnnotation {
    pub fn new(start: Point, end: Point, color: Color, stroke_width: f64) -> Self {
        Self::with_id(
            AnnotationId::new(),
            start,
            end,
            color,
            stroke_width,
            ARROW_HEAD_LENGTH,
            ARROW_HEAD_ANGLE,
        )
    }

    pub(crate) fn with_id(
        id: AnnotationId,
        start: Point,
        end: Point,
        color: Color,
        stroke_width: f64,
        head_length: f64,
        head_angle: f64,
    ) -> Self {
        Self {
            id,
            start,
            end,
            color,
            stroke_width,
            head_length,
            head_angle,
        }
    }

    /// Overrides the arrowhead shape (from configuration).
    pub fn with_head(mut self, head_length: f64, head_angle: f64) -> Self {
        self.head_length = head_length;
        self.head_angle = head_angle;
        self
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// The two arrowhead wing points.
    pub fn head_points(&self) -> [Point; 2] {
        util::calculate_arrowhead(self.end, self.start, self.head_length, self.head_angle)
    }
}

impl AnnotationShape for ArrowAnnotation {
    fn id(&self) -> AnnotationId {
        self.id
    }

    /// Encloses both endpoints and both wing points.
    fn bounds(&self) -> Rect {
        let [left, right] = self.head_points();
        let rect = Rect::from_points(self.start, self.end);
        rect.expand_to_include(left).expand_to_include(right)
    }

    fn stroke_color(&self) -> Color {
        self.color
    }

    fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.stroke_line(self.start, self.end, self.color, self.stroke_width);
        for wing in self.head_points() {
            canvas.stroke_line(self.end, wing, self.color, self.stroke_width);
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.start = self.start.offset(dx, dy);
        self.end = self.end.offset(dx, dy);
    }

    fn reference_point(&self) -> Point {
        self.start
    }

    fn paste_anchor(&self) -> Point {
        self.start
    }

    /// Endpoints win over the shaft, and the start wins over the end.
    fn hit_test(&self, point: Point) -> Option<Handle> {
        if point.distance_to(self.start) <= ENDPOINT_RADIUS {
            return Some(Handle::Start);
        }
        if point.distance_to(self.end) <= ENDPOINT_RADIUS {
            return Some(Handle::End);
        }

        let tolerance = LINE_TOLERANCE + self.stroke_width / 2.0;
        if util::distance_to_segment(point, self.start, self.end) <= tolerance {
            Some(Handle::Body)
        } else {
            None
        }
    }
}

// ============================================================================
// Text
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    id: AnnotationId,
    pub text: String,
    /// Bottom-left corner of the text block (before background padding)
    pub position: Point,
    pub font_size: f64,
    pub color: Color,
    pub background: Option<Color>,
    pub background_padding: f64,
    pub stroke_width: f64,
}

impl TextAnnotation {
    pub fn new(text: String, position: Point, font_size: f64, color: Color) -> Self {
        Self::with_id(
            AnnotationId::new(),
            text,
            position,
            font_size,
            color,
            None,
            0.0,
            1.0,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn with_id(
        id: AnnotationId,
        text: String,
        position: Point,
        font_size: f64,
        color: Color,
        background: Option<Color>,
        background_padding: f64,
        stroke_width: f64,
    ) -> Self {
        Self {
            id,
            text,
            position,
            font_size,
            color,
            background,
            background_padding,
            stroke_width,
        }
    }

    pub fn with_background(mut self, background: Color, padding: f64) -> Self {
        self.background = Some(background);
        self.background_padding = padding;
        self
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Estimated extent of the glyphs alone.
    pub fn text_bounds(&self) -> Rect {
        let advance = self.font_size * ESTIMATED_ADVANCE_RATIO;
        let widest = self.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let line_count = self.lines().count().max(1);
        Rect::new(
            self.position.x,
            self.position.y,
            widest as f64 * advance,
            line_count as f64 * self.font_size * LINE_HEIGHT_RATIO,
        )
    }
}

impl AnnotationShape for TextAnnotation {
    fn id(&self) -> AnnotationId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let text = self.text_bounds();
        if self.background.is_some() {
            text.inflate(self.background_padding)
        } else {
            text
        }
    }

    fn stroke_color(&self) -> Color {
        self.color
    }

    fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(background) = self.background {
            canvas.fill_rect(self.bounds(), background);
        }

        // Lines stack downward from the top of the block.
        let line_height = self.font_size * LINE_HEIGHT_RATIO;
        let top = self.text_bounds().max_y();
        for (index, line) in self.lines().enumerate() {
            let baseline = Point::new(self.position.x, top - line_height * (index as f64 + 1.0));
            canvas.draw_text(baseline, line, self.font_size, self.color);
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.offset(dx, dy);
    }

    fn reference_point(&self) -> Point {
        self.position
    }

    fn paste_anchor(&self) -> Point {
        self.position
    }
}

// ============================================================================
// Annotation
// ============================================================================

/// A shape drawn over the captured region.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Rectangle(RectangleAnnotation),
    Arrow(ArrowAnnotation),
    Text(TextAnnotation),
}

impl Annotation {
    pub fn shape(&self) -> &dyn AnnotationShape {
        match self {
            Annotation::Rectangle(rect) => rect,
            Annotation::Arrow(arrow) => arrow,
            Annotation::Text(text) => text,
        }
    }

    pub fn shape_mut(&mut self) -> &mut dyn AnnotationShape {
        match self {
            Annotation::Rectangle(rect) => rect,
            Annotation::Arrow(arrow) => arrow,
            Annotation::Text(text) => text,
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::Rectangle(_) => AnnotationKind::Rectangle,
            Annotation::Arrow(_) => AnnotationKind::Arrow,
            Annotation::Text(_) => AnnotationKind::Text,
        }
    }

    pub fn id(&self) -> AnnotationId {
        self.shape().id()
    }

    pub fn bounds(&self) -> Rect {
        self.shape().bounds()
    }

    pub fn hit_test(&self, point: Point) -> Option<Handle> {
        self.shape().hit_test(point)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.shape().contains(point)
    }

    /// Coarse targeting (context menus): anywhere inside the visual bounds.
    ///
    /// For arrows this accepts points the strict [`contains`](Self::contains) rejects.
    pub fn visual_contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Bounds used only to decide whether the pointer is near enough to highlight.
    pub fn hover_bounds(&self) -> Rect {
        self.bounds().inflate(HOVER_MARGIN)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.shape().draw(canvas);
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.shape_mut().translate(dx, dy);
    }

    /// Grabbable handle positions a renderer should paint for a selection.
    pub fn handle_points(&self) -> Vec<(Handle, Point)> {
        match self {
            Annotation::Arrow(arrow) => vec![(Handle::Start, arrow.start), (Handle::End, arrow.end)],
            Annotation::Rectangle(rect) => {
                let mut points = corner_handles(rect.rect).to_vec();
                points.extend(edge_handles(rect.rect));
                points
            }
            Annotation::Text(_) => corner_handles(self.bounds()).to_vec(),
        }
    }
}

impl From<RectangleAnnotation> for Annotation {
    fn from(value: RectangleAnnotation) -> Self {
        Annotation::Rectangle(value)
    }
}

impl From<ArrowAnnotation> for Annotation {
    fn from(value: ArrowAnnotation) -> Self {
        Annotation::Arrow(value)
    }
}

impl From<TextAnnotation> for Annotation {
    fn from(value: TextAnnotation) -> Self {
        Annotation::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};

    fn arrow(start: (f64, f64), end: (f64, f64)) -> ArrowAnnotation {
        ArrowAnnotation::new(
            Point::new(start.0, start.1),
            Point::new(end.0, end.1),
            RED,
            3.0,
        )
    }

    #[test]
    fn ids_are_unique_per_creation() {
        let a = RectangleAnnotation::new(Rect::new(0.0, 0.0, 10.0, 10.0), RED, 2.0);
        let b = RectangleAnnotation::new(Rect::new(0.0, 0.0, 10.0, 10.0), RED, 2.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn default_hit_test_prefers_corners_over_body() {
        let bounds = Rect::new(100.0, 100.0, 50.0, 50.0);
        assert_eq!(
            default_hit_test(bounds, Point::new(101.0, 102.0)),
            Some(Handle::BottomLeft)
        );
        assert_eq!(
            default_hit_test(bounds, Point::new(149.0, 101.0)),
            Some(Handle::BottomRight)
        );
        assert_eq!(
            default_hit_test(bounds, Point::new(100.0, 150.0)),
            Some(Handle::TopLeft)
        );
        assert_eq!(
            default_hit_test(bounds, Point::new(154.0, 154.0)),
            Some(Handle::TopRight)
        );
        assert_eq!(
            default_hit_test(bounds, Point::new(125.0, 125.0)),
            Some(Handle::Body)
        );
        assert_eq!(default_hit_test(bounds, Point::new(160.0, 125.0)), None);
    }

    #[test]
    fn overlapping_corner_handles_resolve_bottom_left_first() {
        // On a tiny rectangle every corner handle covers the center.
        let bounds = Rect::new(0.0, 0.0, 4.0, 4.0);
        assert_eq!(
            default_hit_test(bounds, Point::new(2.0, 2.0)),
            Some(Handle::BottomLeft)
        );
    }

    #[test]
    fn rectangle_edge_midpoints_are_handles() {
        let rect = RectangleAnnotation::new(Rect::new(100.0, 100.0, 60.0, 40.0), RED, 2.0);
        assert_eq!(rect.hit_test(Point::new(130.0, 141.0)), Some(Handle::Top));
        assert_eq!(rect.hit_test(Point::new(128.0, 99.0)), Some(Handle::Bottom));
        assert_eq!(rect.hit_test(Point::new(100.0, 122.0)), Some(Handle::Left));
        assert_eq!(rect.hit_test(Point::new(163.0, 120.0)), Some(Handle::Right));
        assert_eq!(rect.hit_test(Point::new(101.0, 139.0)), Some(Handle::TopLeft));
        assert_eq!(rect.hit_test(Point::new(115.0, 120.0)), Some(Handle::Body));

        let points = Annotation::from(rect).handle_points();
        assert_eq!(points.len(), 8);
        assert!(points.contains(&(Handle::Right, Point::new(160.0, 120.0))));
    }

    #[test]
    fn arrow_hit_test_endpoint_priority() {
        let arrow = arrow((100.0, 100.0), (300.0, 300.0));
        assert_eq!(arrow.hit_test(Point::new(101.0, 101.0)), Some(Handle::Start));
        assert_eq!(arrow.hit_test(Point::new(299.0, 299.0)), Some(Handle::End));
        assert_eq!(arrow.hit_test(Point::new(200.0, 200.0)), Some(Handle::Body));
    }

    #[test]
    fn arrow_start_wins_when_endpoints_overlap() {
        let arrow = arrow((100.0, 100.0), (104.0, 100.0));
        assert_eq!(arrow.hit_test(Point::new(102.0, 100.0)), Some(Handle::Start));
    }

    #[test]
    fn arrow_body_tolerance_includes_stroke() {
        let arrow = arrow((0.0, 0.0), (200.0, 0.0));
        // 6 tolerance + 1.5 half stroke
        assert_eq!(arrow.hit_test(Point::new(100.0, 7.4)), Some(Handle::Body));
        assert_eq!(arrow.hit_test(Point::new(100.0, 7.6)), None);
    }

    #[test]
    fn arrow_visual_bounds_accept_points_contains_rejects() {
        let annotation = Annotation::from(arrow((100.0, 100.0), (300.0, 300.0)));
        let off_line = Point::new(280.0, 120.0);
        assert!(!annotation.contains(off_line));
        assert!(annotation.visual_contains(off_line));
    }

    #[test]
    fn arrow_bounds_enclose_head_wings() {
        let arrow = arrow((100.0, 100.0), (50.0, 120.0));
        let bounds = arrow.bounds();
        for wing in arrow.head_points() {
            assert!(bounds.contains(wing));
        }
        assert!(bounds.contains(arrow.start));
        assert!(bounds.contains(arrow.end));
    }

    #[test]
    fn hover_bounds_expand_by_margin() {
        let annotation = Annotation::from(RectangleAnnotation::new(
            Rect::new(10.0, 10.0, 20.0, 20.0),
            RED,
            2.0,
        ));
        assert_eq!(annotation.hover_bounds(), Rect::new(6.0, 6.0, 28.0, 28.0));
    }

    #[test]
    fn text_bounds_grow_with_lines_and_background() {
        let text = TextAnnotation::new("ab\nabcd".to_string(), Point::new(10.0, 20.0), 10.0, WHITE);
        let bounds = text.bounds();
        assert!((bounds.width - 24.0).abs() < 1e-9);
        assert!((bounds.height - 24.0).abs() < 1e-9);

        let padded = text.with_background(crate::draw::color::BLACK, 5.0);
        assert_eq!(padded.bounds().x, 5.0);
        assert!((padded.bounds().width - 34.0).abs() < 1e-9);
    }

    #[test]
    fn translate_moves_all_geometry() {
        let mut annotation = Annotation::from(arrow((0.0, 0.0), (50.0, 0.0)));
        annotation.translate(10.0, -5.0);
        let Annotation::Arrow(arrow) = annotation else {
            panic!("expected arrow");
        };
        assert_eq!(arrow.start, Point::new(10.0, -5.0));
        assert_eq!(arrow.end, Point::new(60.0, -5.0));
    }
}
