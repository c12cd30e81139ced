pub mod effect;
pub mod event;
pub mod intent;
pub mod key_bindings;
pub mod reducer;
pub mod replay;
pub mod runner;
pub mod scheduler;
pub mod session;

pub use runner::Runtime;
pub use session::Session;
