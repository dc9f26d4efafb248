//! Track library: scanning a directory tree for playable audio files.

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;
