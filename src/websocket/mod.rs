pub mod broadcaster;
pub mod handler;
pub mod protocol;
pub mod sessions;

pub use handler::ws_index;
