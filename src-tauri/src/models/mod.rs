pub mod connection;
pub mod grid;
pub mod session;

pub use connection::*;
pub use grid::*;
pub use session::*;
