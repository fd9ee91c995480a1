mod bfs;
mod path;

pub use bfs::{TrapPolicy, breadth_first, find_path};
pub use path::Path;
