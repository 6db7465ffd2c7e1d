mod output;
mod resolve_path;
mod spinner;

pub use output::*;
pub use resolve_path::*;
pub use spinner::*;
