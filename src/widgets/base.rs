use crate::core::NodeId;
use crate::widgets::traits::RenderContext;

#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: NodeId,
    label: String,
}

impl WidgetBase {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn node_id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_focused(&self, ctx: &RenderContext) -> bool {
        ctx.focused_id.as_ref().is_some_and(|id| id == &self.id)
    }

    pub fn focus_marker(&self, focused: bool) -> &'static str {
        if focused { ">" } else { " " }
    }

    /// Text drawn before the value, e.g. `> Country: `.
    pub fn prefixed_label(&self, focused: bool) -> String {
        format!("{} {}: ", self.focus_marker(focused), self.label)
    }
}
