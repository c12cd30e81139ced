pub mod base;
pub mod inputs;
pub mod suggest;
pub mod traits;
