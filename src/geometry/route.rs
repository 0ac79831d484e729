//! Connector routes as ordered drawing segments.

use super::Point;
use std::fmt::{self, Write};

/// How a route should be stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeRole {
    /// The neutral bundle linking a parent to every visible child.
    Passive,
    /// The highlighted line to the selected child.
    Active,
}

/// Turning direction of a corner arc, in screen space (y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSweep {
    /// SVG sweep flag 1.
    Clockwise,
    /// SVG sweep flag 0.
    CounterClockwise,
}

impl ArcSweep {
    /// SVG `sweep-flag` value.
    pub fn flag(self) -> u8 {
        match self {
            ArcSweep::Clockwise => 1,
            ArcSweep::CounterClockwise => 0,
        }
    }
}

/// One drawing instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Lift the pen and start a new sub-path.
    MoveTo(Point),
    /// Straight line from the current point.
    LineTo(Point),
    /// Quarter-circle corner from the current point to `to`.
    Arc {
        /// End point of the arc.
        to: Point,
        /// Circle radius; both axes are equal.
        radius: f64,
        /// Turning direction.
        sweep: ArcSweep,
    },
}

impl Segment {
    /// Where the pen rests after this segment.
    pub fn end(&self) -> Point {
        match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) => p,
            Segment::Arc { to, .. } => to,
        }
    }
}

/// An ordered list of segments with a stroke role.
///
/// Routes are produced fresh for every draw cycle and never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    role: StrokeRole,
    segments: Vec<Segment>,
}

impl Route {
    /// Passive bundle or active line.
    pub fn role(&self) -> StrokeRole {
        self.role
    }

    /// Drawing instructions in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Where the pen stops.
    pub fn end_point(&self) -> Option<Point> {
        self.segments.last().map(Segment::end)
    }

    /// Number of drawn (non-move) segments.
    pub fn stroke_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| !matches!(s, Segment::MoveTo(_)))
            .count()
    }

    /// Whether any corner is rounded.
    pub fn has_arcs(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Arc { .. }))
    }

    /// Iterate drawn lines as `(from, to)` pairs, arcs excluded.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let mut pen = None;
        self.segments.iter().filter_map(move |seg| {
            let from = pen;
            pen = Some(seg.end());
            match (seg, from) {
                (Segment::LineTo(to), Some(from)) => Some((from, *to)),
                _ => None,
            }
        })
    }

    /// SVG path data (`d` attribute).
    ///
    /// Output is deterministic for identical routes.
    pub fn to_svg_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.segments {
            match *seg {
                Segment::MoveTo(p) => write!(f, "M{},{}", num(p.x), num(p.y))?,
                Segment::LineTo(p) => write!(f, "L{},{}", num(p.x), num(p.y))?,
                Segment::Arc { to, radius, sweep } => write!(
                    f,
                    "A{r},{r},0,0,{},{},{}",
                    sweep.flag(),
                    num(to.x),
                    num(to.y),
                    r = num(radius)
                )?,
            }
        }
        Ok(())
    }
}

/// Avoid printing `-0`.
fn num(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Incremental route construction.
///
/// Redundant pen moves and zero-length lines are dropped so that degenerate
/// geometry never produces empty strokes.
#[derive(Debug)]
pub(crate) struct RouteBuilder {
    role: StrokeRole,
    segments: Vec<Segment>,
    pen: Option<Point>,
}

impl RouteBuilder {
    pub(crate) fn new(role: StrokeRole) -> Self {
        Self {
            role,
            segments: Vec::new(),
            pen: None,
        }
    }

    pub(crate) fn move_to(&mut self, p: Point) {
        if self.pen == Some(p) {
            return;
        }
        if let Some(Segment::MoveTo(last)) = self.segments.last_mut() {
            *last = p;
        } else {
            self.segments.push(Segment::MoveTo(p));
        }
        self.pen = Some(p);
    }

    pub(crate) fn line_to(&mut self, p: Point) {
        match self.pen {
            None => self.move_to(p),
            Some(pen) if pen == p => {}
            Some(_) => {
                self.segments.push(Segment::LineTo(p));
                self.pen = Some(p);
            }
        }
    }

    /// Turn at `corner` towards `toward` with a rounded corner of `radius`.
    ///
    /// Draws the straight run up to where the arc starts, then the arc. The
    /// radius is clamped to both legs. A non-positive radius, or legs that do
    /// not actually turn, produce a plain line to the corner and no arc.
    pub(crate) fn corner_to(&mut self, corner: Point, toward: Point, radius: f64) {
        let Some(from) = self.pen else {
            self.move_to(corner);
            return;
        };
        let incoming = from.distance(corner);
        let outgoing = corner.distance(toward);
        let radius = radius.min(incoming).min(outgoing);
        if radius <= 0.0 {
            self.line_to(corner);
            return;
        }

        let (ix, iy) = ((corner.x - from.x) / incoming, (corner.y - from.y) / incoming);
        let (ox, oy) = ((toward.x - corner.x) / outgoing, (toward.y - corner.y) / outgoing);
        let cross = ix * oy - iy * ox;
        if cross == 0.0 {
            self.line_to(corner);
            return;
        }

        let entry = Point::new(corner.x - ix * radius, corner.y - iy * radius);
        let exit = Point::new(corner.x + ox * radius, corner.y + oy * radius);
        self.line_to(entry);
        self.segments.push(Segment::Arc {
            to: exit,
            radius,
            sweep: if cross > 0.0 {
                ArcSweep::Clockwise
            } else {
                ArcSweep::CounterClockwise
            },
        });
        self.pen = Some(exit);
    }

    pub(crate) fn finish(mut self) -> Route {
        // A trailing pen move draws nothing.
        if let Some(Segment::MoveTo(_)) = self.segments.last() {
            self.segments.pop();
        }
        Route {
            role: self.role,
            segments: self.segments,
        }
    }
}

/// Render several routes into one path string, joined by spaces.
pub fn join_svg_paths<'a>(routes: impl IntoIterator<Item = &'a Route>) -> String {
    let mut out = String::new();
    for (i, route) in routes.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", route);
    }
    out
}
