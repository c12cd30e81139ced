pub mod core;
pub mod error;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::NodeId;
pub use crate::core::config;
pub use crate::core::search;

pub use error::{Error, Result};

pub use state::form;

pub use ui::frame_json;
pub use ui::renderer;
pub use ui::span;
pub use ui::style;
pub use ui::theme;

pub use widgets::suggest;
