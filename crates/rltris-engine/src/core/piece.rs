use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Integer cell coordinate on the grid.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left cell of the grid, including the hidden spawn rows
/// - X increases rightward (columns)
/// - Y increases downward (rows)
///
/// Coordinates are signed so that a rotation or shift may produce positions
/// outside the grid; such positions are rejected by collision checks, never
/// clamped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Rotates this coordinate by 90° about `pivot`.
    ///
    /// `(x, y)` maps to `((y - py) + px, -(x - px) + py)`.
    #[must_use]
    pub const fn rotated_about(self, pivot: Coord) -> Self {
        Self::new(
            (self.y - pivot.y) + pivot.x,
            -(self.x - pivot.x) + pivot.y,
        )
    }
}

/// Enum representing the shape of a piece.
///
/// The discriminant doubles as the color id written into the grid when a
/// piece of this shape locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 1,
    /// J-piece.
    J = 2,
    /// L-piece.
    L = 3,
    /// O-piece.
    O = 4,
    /// S-piece.
    S = 5,
    /// T-piece.
    T = 6,
    /// Z-piece.
    Z = 7,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shapes (7).
    pub const LEN: usize = 7;

    pub const ALL: [ShapeKind; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Returns the color id (1..=7) of this shape.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(ShapeKind::I),
            2 => Some(ShapeKind::J),
            3 => Some(ShapeKind::L),
            4 => Some(ShapeKind::O),
            5 => Some(ShapeKind::S),
            6 => Some(ShapeKind::T),
            7 => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Returns the single character representation of this shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use rltris_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
            ShapeKind::O => 'O',
            ShapeKind::S => 'S',
            ShapeKind::T => 'T',
            ShapeKind::Z => 'Z',
        }
    }

    fn template(self) -> &'static ShapeTemplate {
        &SHAPE_TEMPLATES[self as usize - 1]
    }
}

/// Spawn layout of a shape: four cells and the rotation pivot.
///
/// X is relative to the spawn column offset, Y is absolute (rows 0 and 1 are
/// the hidden spawn rows).
#[derive(Debug)]
struct ShapeTemplate {
    cells: [Coord; 4],
    pivot: Coord,
}

static SHAPE_TEMPLATES: [ShapeTemplate; ShapeKind::LEN] = {
    const fn t(cells: [(i32, i32); 4], pivot: (i32, i32)) -> ShapeTemplate {
        ShapeTemplate {
            cells: [
                Coord::new(cells[0].0, cells[0].1),
                Coord::new(cells[1].0, cells[1].1),
                Coord::new(cells[2].0, cells[2].1),
                Coord::new(cells[3].0, cells[3].1),
            ],
            pivot: Coord::new(pivot.0, pivot.1),
        }
    }

    [
        // I: ####
        t([(0, 1), (1, 1), (2, 1), (3, 1)], (1, 1)),
        // J: #..
        //    ###
        t([(0, 0), (0, 1), (1, 1), (2, 1)], (1, 1)),
        // L: ..#
        //    ###
        t([(2, 0), (0, 1), (1, 1), (2, 1)], (1, 1)),
        // O: .##
        //    .##
        t([(1, 0), (2, 0), (1, 1), (2, 1)], (1, 1)),
        // S: .##
        //    ##.
        t([(1, 0), (2, 0), (0, 1), (1, 1)], (1, 1)),
        // T: .#.
        //    ###
        t([(1, 0), (0, 1), (1, 1), (2, 1)], (1, 1)),
        // Z: ##.
        //    .##
        t([(0, 0), (1, 0), (1, 1), (2, 1)], (1, 1)),
    ]
};

/// A falling tetromino: four occupied cells in absolute grid coordinates plus
/// the pivot it rotates about.
///
/// Pieces are immutable - movement and rotation operations return new `Piece`
/// instances. Legality against a [`Grid`] is checked separately with
/// [`Piece::fits`], so a caller can build a candidate and discard it when it
/// collides.
///
/// # Example
///
/// ```
/// use rltris_engine::{Grid, Piece, ShapeKind};
///
/// let grid = Grid::new(10, 22);
/// let piece = Piece::spawn(ShapeKind::T, 3);
/// let moved = piece.right();
/// assert!(moved.fits(&grid));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    cells: [Coord; 4],
    pivot: Coord,
}

impl Piece {
    /// Creates a piece at its fixed spawn layout, shifted right by `spawn_x`.
    #[must_use]
    pub fn spawn(kind: ShapeKind, spawn_x: i32) -> Self {
        let template = kind.template();
        Self {
            kind,
            cells: template.cells.map(|c| c.offset(spawn_x, 0)),
            pivot: template.pivot.offset(spawn_x, 0),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn cells(&self) -> &[Coord; 4] {
        &self.cells
    }

    #[must_use]
    pub fn pivot(&self) -> Coord {
        self.pivot
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            cells: self.cells.map(|c| c.offset(dx, dy)),
            pivot: self.pivot.offset(dx, dy),
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.translated(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.translated(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.translated(0, 1)
    }

    /// Rotates every cell by 90° about the pivot. The pivot itself is fixed.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            cells: self.cells.map(|c| c.rotated_about(self.pivot)),
            pivot: self.pivot,
        }
    }

    /// Returns `true` if every cell of the piece is inside the grid and empty.
    #[must_use]
    pub fn fits(&self, grid: &Grid) -> bool {
        self.cells.iter().all(|c| grid.is_empty(c.x, c.y))
    }

    /// Returns the piece moved down as far as it fits on `grid`.
    #[must_use]
    pub fn simulate_drop_position(&self, grid: &Grid) -> Self {
        let mut dropped = *self;
        while dropped.down().fits(grid) {
            dropped = dropped.down();
        }
        dropped
    }
}
