pub mod handlers;
pub mod shape;

pub use handlers::*;
