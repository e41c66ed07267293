//! Edge docking and companion placement.
//!
//! Every edge-dependent computation goes through [`Edge::spec`], which maps an
//! edge to the axis it lies on and the side of that axis. No call site matches
//! on individual edges.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Point, Rect, Size};

// ============================================================================
// Axis / Side
// ============================================================================

/// Screen axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Which end of an axis an edge sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left or top (the axis origin).
    Near,
    /// Right or bottom.
    Far,
}

/// Table entry describing an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSpec {
    /// Axis perpendicular to the edge line (the axis the widget docks along).
    pub axis: Axis,
    /// Side of the axis the edge is on.
    pub side: Side,
}

// ============================================================================
// Edge
// ============================================================================

/// The screen boundary the widget is docked to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// All edges in tie-break order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Returns the table entry for this edge.
    #[must_use]
    pub const fn spec(self) -> EdgeSpec {
        match self {
            Self::Left => EdgeSpec { axis: Axis::Horizontal, side: Side::Near },
            Self::Right => EdgeSpec { axis: Axis::Horizontal, side: Side::Far },
            Self::Top => EdgeSpec { axis: Axis::Vertical, side: Side::Near },
            Self::Bottom => EdgeSpec { axis: Axis::Vertical, side: Side::Far },
        }
    }

    /// Returns the edge name as a static lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Signed distance from the widget's near side to this screen edge.
    ///
    /// Negative when the widget already extends past the edge.
    #[must_use]
    pub fn distance(self, widget: &Rect, screen: &Rect) -> f64 {
        let EdgeSpec { axis, side } = self.spec();
        match side {
            Side::Near => widget.start(axis) - screen.start(axis),
            Side::Far => screen.end(axis) - widget.end(axis),
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

// ============================================================================
// Resolver
// ============================================================================

/// Returns the screen edge closest to the widget.
///
/// Ties go to the first edge in left, right, top, bottom order.
#[must_use]
pub fn nearest_edge(widget: &Rect, screen: &Rect) -> Edge {
    let mut best = Edge::Left;
    let mut best_distance = Edge::Left.distance(widget, screen);

    for edge in &Edge::ALL[1..] {
        let distance = edge.distance(widget, screen);
        if distance < best_distance {
            best = *edge;
            best_distance = distance;
        }
    }

    best
}

/// Computes where the widget sits when docked to `edge`.
///
/// On the docking axis the widget is flush with the edge, or pushed half of
/// its extent past it when `half_hidden`. On the other axis the widget keeps
/// its current coordinate, clamped into the screen.
#[must_use]
pub fn docked_position(edge: Edge, half_hidden: bool, screen: &Rect, widget: &Rect) -> Point {
    let EdgeSpec { axis, side } = edge.spec();
    let extent = widget.extent(axis);
    let overhang = if half_hidden { extent / 2.0 } else { 0.0 };

    let main = match side {
        Side::Near => screen.start(axis) - overhang,
        Side::Far => screen.end(axis) - extent + overhang,
    };

    let cross_axis = axis.cross();
    let cross =
        screen.clamp_span(cross_axis, widget.start(cross_axis), widget.extent(cross_axis));

    Point::from_axes(axis, main, cross)
}

/// Positions a companion surface next to the docked anchor.
///
/// The companion goes on the side facing away from the dock edge, `gap`
/// pixels from the anchor, centered on the anchor's cross axis. The result is
/// always clamped fully inside `screen`.
#[must_use]
pub fn place_relative_to(
    anchor: &Rect,
    edge: Edge,
    companion: Size,
    screen: &Rect,
    gap: f64,
) -> Point {
    let EdgeSpec { axis, side } = edge.spec();

    let main = match side {
        Side::Near => anchor.end(axis) + gap,
        Side::Far => anchor.start(axis) - companion.along(axis) - gap,
    };

    let cross_axis = axis.cross();
    let cross = anchor.start(cross_axis) + anchor.extent(cross_axis) / 2.0
        - companion.along(cross_axis) / 2.0;

    screen.clamp_origin(Point::from_axes(axis, main, cross), companion)
}

// ============================================================================
// Tests
// ============================================================================
