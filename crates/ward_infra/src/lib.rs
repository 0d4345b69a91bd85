mod archive;
mod console;
mod env;
mod fs_meta;
mod fs_read;
mod fs_remove;
mod fs_write;
mod ward_infra;

pub use archive::*;
pub use console::*;
pub use env::*;
pub use fs_meta::*;
pub use fs_read::*;
pub use fs_remove::*;
pub use fs_write::*;
pub use ward_infra::*;
