use super::text_edit;
use crate::core::NodeId;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, TextEditState,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Single-line text field. This is the element a suggestion list attaches to.
#[derive(Debug, Clone)]
pub struct TextInput {
    base: WidgetBase,
    value: String,
    cursor: usize,
    placeholder: Option<String>,
}

impl TextInput {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(id, label),
            value: String::new(),
            cursor: 0,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        Interactive::set_value(&mut self, value.into());
        self
    }

    pub fn node_id(&self) -> &NodeId {
        self.base.node_id()
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    /// Display column where the value starts, i.e. the width of the label prefix.
    pub fn value_column(&self, focused: bool) -> u16 {
        UnicodeWidthStr::width(self.base.prefixed_label(focused).as_str()) as u16
    }
}

impl Drawable for TextInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let label_style = if focused {
            ctx.theme.focused_label
        } else {
            ctx.theme.label
        };

        let mut line = vec![Span::styled(self.base.prefixed_label(focused), label_style)];
        match &self.placeholder {
            Some(placeholder) if self.value.is_empty() => {
                line.push(Span::styled(placeholder.clone(), ctx.theme.placeholder));
            }
            _ => line.push(Span::new(self.value.clone())),
        }

        DrawOutput { lines: vec![line] }
    }
}

impl Interactive for TextInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let plain = !key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);

        let changed = match key.code {
            KeyCode::Char(ch) if plain => {
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                true
            }
            KeyCode::Backspace => text_edit::backspace_char(&mut self.value, &mut self.cursor),
            KeyCode::Delete => text_edit::delete_char(&mut self.value, &mut self.cursor),
            KeyCode::Left => text_edit::move_left(&mut self.cursor, &self.value),
            KeyCode::Right => text_edit::move_right(&mut self.cursor, &self.value),
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                true
            }
            KeyCode::Enter => return InteractionResult::input_done(),
            _ => return InteractionResult::ignored(),
        };

        if changed {
            InteractionResult::handled()
        } else {
            InteractionResult::consumed()
        }
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        Some(TextEditState {
            value: &mut self.value,
            cursor: &mut self.cursor,
        })
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let value_width: usize = self
            .value
            .chars()
            .take(text_edit::clamp_cursor(self.cursor, &self.value))
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum();
        Some(CursorPos {
            col: self.value_column(true).saturating_add(value_width as u16),
            row: 0,
        })
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
        self.cursor = text_edit::char_count(&self.value);
    }
}
