//! Terminal user interface: menus, the transport view, and display
//! formatting

mod cli;
mod format;
mod transport;
#[cfg(test)]
mod tests;

pub use cli::{Args, Cli, MenuAction};
pub use format::format_timestamp;
pub use transport::{spawn_media_bridge, Transport};
