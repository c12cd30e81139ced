pub mod matcher;

pub use matcher::{Match, Matcher, find_matches};
