//! Integer cell coordinates.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An `(x, y)` cell coordinate. Signed so neighbour arithmetic can step off
/// the map before a range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    pub x: i32,
    pub y: i32,
}

impl CellAddress {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Euclidean distance between two addresses.
    pub fn distance(self, other: CellAddress) -> f32 {
        self.as_ivec2().as_vec2().distance(other.as_ivec2().as_vec2())
    }

    /// The four orthogonal neighbours, west and north before south and east.
    pub fn orthogonal_neighbors(self) -> [CellAddress; 4] {
        [
            CellAddress::new(self.x - 1, self.y),
            CellAddress::new(self.x, self.y - 1),
            CellAddress::new(self.x, self.y + 1),
            CellAddress::new(self.x + 1, self.y),
        ]
    }
}

impl From<(i32, i32)> for CellAddress {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for CellAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer centroid of a set of addresses, or `None` if the set is empty.
pub fn find_center(addresses: impl IntoIterator<Item = CellAddress>) -> Option<CellAddress> {
    let mut sum = IVec2::ZERO;
    let mut count = 0i32;
    for address in addresses {
        sum += address.as_ivec2();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(CellAddress::new(sum.x / count, sum.y / count))
}
