//! Grid geometry: cells, continuous points, axes and rail segments.
//!
//! Every spatial question the core answers is phrased in whole grid cells
//! (`Position`).  `Point` exists only so trains can move smoothly between
//! cells; nothing in the rail graph ever looks at it.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{CoreError, CoreResult};

// ── Position ──────────────────────────────────────────────────────────────────

/// An integer grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev distance: number of king moves between two cells.
    #[inline]
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// `true` if `other` is one of the eight surrounding cells.
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.chebyshev(other) == 1
    }

    /// `true` if `other` shares an edge with `self` (no diagonals).
    #[inline]
    pub fn is_orthogonally_adjacent(self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }

    /// The four edge-sharing neighbours, in N, E, S, W order.
    pub fn orthogonal_neighbours(self) -> [Position; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }

    /// All eight surrounding cells.
    pub fn neighbours(self) -> impl Iterator<Item = Position> {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Continuous point at the centre of this cell.
    #[inline]
    pub fn to_point(self) -> Point {
        Point::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A continuous coordinate measured in grid cells.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `true` if both axes are within `tolerance` of `other` (exclusive).
    #[inline]
    pub fn within(self, other: Point, tolerance: f32) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

// ── Axis ──────────────────────────────────────────────────────────────────────

/// Orientation of a straight run of track or a station.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    EastWest,
    NorthSouth,
}

impl Axis {
    /// Unit step along the axis, pointing towards increasing coordinates.
    #[inline]
    pub fn step(self) -> (i32, i32) {
        match self {
            Axis::EastWest   => (1, 0),
            Axis::NorthSouth => (0, 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::EastWest   => "east-west",
            Axis::NorthSouth => "north-south",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rail ──────────────────────────────────────────────────────────────────────

/// An undirected track segment between two cells.
///
/// Identity is the **unordered** endpoint pair: `Rail::new(a, b)` and
/// `Rail::new(b, a)` compare, hash and order identically.  Endpoints are
/// stored normalised (`a <= b`) so the derived-looking impls below are cheap.
///
/// The `legal` flag is placement-preview metadata only and takes no part in
/// equality.  Deserialising goes through [`Rail::new`], so stored endpoints
/// may come in either order.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RailRepr"))]
pub struct Rail {
    a:     Position,
    b:     Position,
    legal: bool,
}

impl Rail {
    /// Create a rail between `p` and `q`.
    ///
    /// Non-adjacent endpoints are representable so a drag preview can show
    /// them; the grid marks such rails illegal and refuses to commit them.
    pub fn new(p: Position, q: Position) -> Self {
        let (a, b) = if p <= q { (p, q) } else { (q, p) };
        Self { a, b, legal: true }
    }

    /// Rails joining consecutive cells of `cells`.
    pub fn path(cells: &[Position]) -> Vec<Rail> {
        cells.windows(2).map(|w| Rail::new(w[0], w[1])).collect()
    }

    #[inline]
    pub fn endpoints(&self) -> (Position, Position) {
        (self.a, self.b)
    }

    #[inline]
    pub fn has_endpoint(&self, pos: Position) -> bool {
        self.a == pos || self.b == pos
    }

    /// The endpoint that is not `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is not an endpoint.  Asking a rail for the far end of
    /// a cell it does not touch is a bug in the caller.
    #[inline]
    pub fn other_end(&self, pos: Position) -> Position {
        match self.try_other_end(pos) {
            Ok(p) => p,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible form of [`other_end`](Self::other_end).
    pub fn try_other_end(&self, pos: Position) -> CoreResult<Position> {
        if pos == self.a {
            Ok(self.b)
        } else if pos == self.b {
            Ok(self.a)
        } else {
            Err(CoreError::NotAnEndpoint { rail: *self, position: pos })
        }
    }

    /// `true` if the endpoints are distinct neighbouring cells.
    #[inline]
    pub fn is_unit_length(&self) -> bool {
        self.a.is_adjacent(self.b)
    }

    /// The axis this rail runs along, or `None` for diagonal / degenerate rails.
    pub fn axis(&self) -> Option<Axis> {
        if !self.is_unit_length() {
            return None;
        }
        if self.a.y == self.b.y {
            Some(Axis::EastWest)
        } else if self.a.x == self.b.x {
            Some(Axis::NorthSouth)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_legal(&self) -> bool {
        self.legal
    }

    #[inline]
    pub fn set_legal(&mut self, legal: bool) {
        self.legal = legal;
    }
}

/// Serialized shape of a [`Rail`], endpoints as written.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RailRepr {
    a:     Position,
    b:     Position,
    legal: bool,
}

#[cfg(feature = "serde")]
impl From<RailRepr> for Rail {
    fn from(repr: RailRepr) -> Self {
        let mut rail = Rail::new(repr.a, repr.b);
        rail.set_legal(repr.legal);
        rail
    }
}

impl PartialEq for Rail {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl Eq for Rail {}

impl Hash for Rail {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a.hash(state);
        self.b.hash(state);
    }
}

impl PartialOrd for Rail {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rail {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.a, self.b).cmp(&(other.a, other.b))
    }
}

impl fmt::Display for Rail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}
