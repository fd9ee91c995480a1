mod belief;
mod coordinate;
mod orientation;
mod tile;

pub use belief::MapModel;
pub use coordinate::Coordinate;
pub use orientation::{Orientation, RelativeDirection};
pub use tile::{ObservedTile, TileBelief, TileKind};

#[cfg(test)]
pub(crate) use belief::tests::map_from_rows;
