use cgmath::Vector3;

use crate::Coords;

/// Coordinate axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum Axis {
    /// Left-right axis, pointing toward R.
    X = 0,
    /// Down-up axis, pointing toward U.
    Y = 1,
    /// Back-front axis, pointing toward F.
    Z = 2,
}
impl Axis {
    /// All axes, in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the index of the axis (0 for X, 1 for Y, 2 for Z).
    pub fn index(self) -> usize {
        self as usize
    }
    /// Returns the positive unit vector along the axis.
    pub fn unit_vector(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }
}

/// Face of the cube.
///
/// The discriminant of each face is its face-color slot on a cubie: 0=+X(R),
/// 1=-X(L), 2=+Y(U), 3=-Y(D), 4=+Z(F), 5=-Z(B).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum Face {
    /// Right face (+X).
    R = 0,
    /// Left face (-X).
    L = 1,
    /// Up face (+Y).
    U = 2,
    /// Down face (-Y).
    D = 3,
    /// Front face (+Z).
    F = 4,
    /// Back face (-Z).
    B = 5,
}
impl Face {
    /// All faces, in slot order.
    pub const ALL: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];
    /// All faces, in the order their blocks appear in a facelet state.
    pub const BLOCK_ORDER: [Face; 6] = [Face::U, Face::L, Face::F, Face::R, Face::B, Face::D];

    /// Returns the face-color slot for the face.
    pub fn slot(self) -> usize {
        self as usize
    }
    /// Returns the face with the given face-color slot.
    pub fn from_slot(slot: usize) -> Option<Face> {
        Self::ALL.get(slot).copied()
    }

    /// Returns the index of the first facelet of this face in a facelet state.
    pub fn block_start(self) -> usize {
        match self {
            Face::U => 0,
            Face::L => 9,
            Face::F => 18,
            Face::R => 27,
            Face::B => 36,
            Face::D => 45,
        }
    }

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }
    /// Returns the coordinate of the face's layer along [`Face::axis()`]: `1`
    /// for R, U, and F; `-1` for L, D, and B.
    pub fn layer(self) -> i8 {
        match self {
            Face::R | Face::U | Face::F => 1,
            Face::L | Face::D | Face::B => -1,
        }
    }
    /// Returns the face on the other side of the cube.
    pub fn opposite(self) -> Face {
        Face::from_normal(self.axis(), -self.layer())
    }

    /// Returns the face whose outward normal points along `axis` with the sign
    /// of `sign`.
    pub fn from_normal(axis: Axis, sign: i8) -> Face {
        match (axis, sign >= 0) {
            (Axis::X, true) => Face::R,
            (Axis::X, false) => Face::L,
            (Axis::Y, true) => Face::U,
            (Axis::Y, false) => Face::D,
            (Axis::Z, true) => Face::F,
            (Axis::Z, false) => Face::B,
        }
    }
    /// Returns the outward normal of the face as lattice coordinates.
    pub fn normal(self) -> Coords {
        let mut ret = Coords::new(0, 0, 0);
        ret.set(self.axis(), self.layer());
        ret
    }
    /// Returns the face whose outward normal is closest to `v`.
    pub fn nearest_to(v: Vector3<f32>) -> Face {
        let components = [v.x, v.y, v.z];
        let mut best = Axis::X;
        for axis in Axis::ALL {
            if components[axis.index()].abs() > components[best.index()].abs() {
                best = axis;
            }
        }
        Face::from_normal(best, if components[best.index()] < 0.0 { -1 } else { 1 })
    }

    /// Returns the face that this face's normal points toward after rotating
    /// by `quarter_turns` counterclockwise quarter turns around `axis`.
    pub fn rotate(self, axis: Axis, quarter_turns: i8) -> Face {
        let n = self.normal().rotate(axis, quarter_turns);
        Axis::ALL
            .into_iter()
            .find(|&ax| n.get(ax) != 0)
            .map(|ax| Face::from_normal(ax, n.get(ax)))
            .unwrap_or(self)
    }

    /// Parses a face letter.
    pub fn from_char(c: char) -> Option<Face> {
        match c {
            'R' => Some(Face::R),
            'L' => Some(Face::L),
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }
    /// Returns the face letter.
    pub fn to_char(self) -> char {
        match self {
            Face::R => 'R',
            Face::L => 'L',
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
        }
    }
}
