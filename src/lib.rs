pub mod logging;
pub mod repl;
pub mod sandbox;

pub use sandbox::Sandbox;
