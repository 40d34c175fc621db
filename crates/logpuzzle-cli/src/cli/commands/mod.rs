//! CLI command handlers: print the ordered list, or run the full download.

mod download;
mod list;

pub use download::run_download;
pub use list::run_list;
