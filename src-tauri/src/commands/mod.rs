pub mod auth;
pub mod grid;
pub mod mutation;

pub use auth::*;
pub use grid::*;
pub use mutation::*;
