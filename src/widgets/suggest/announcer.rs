use crate::core::config::Politeness;

/// Read when a query first produces a visible list.
pub const USAGE_HINT: &str = "Suggestions are available for this field. Use up and down arrows to select a suggestion and enter key to use it.";

/// Off-screen status text read by assistive technology.
///
/// Each announcement replaces the previous text. `revision` increases on
/// every announcement, so a repeated text still counts as a new update.
#[derive(Debug, Clone, Default)]
pub struct LiveRegion {
    text: String,
    politeness: Politeness,
    revision: u64,
}

impl LiveRegion {
    pub fn new(politeness: Politeness) -> Self {
        Self {
            text: String::new(),
            politeness,
            revision: 0,
        }
    }

    pub fn announce(&mut self, text: impl Into<String>) -> &str {
        self.text = text.into();
        self.revision = self.revision.wrapping_add(1);
        tracing::info!(
            target: "typeahead::announce",
            politeness = self.politeness.as_str(),
            revision = self.revision,
            "{}",
            self.text
        );
        &self.text
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn politeness(&self) -> Politeness {
        self.politeness
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
