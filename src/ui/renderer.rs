use crate::core::NodeId;
use crate::state::form::Form;
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::ui::theme::Theme;
use crate::widgets::traits::RenderContext;

const KEY_HINTS: &str = "Tab next field  ↑/↓ choose  Enter accept  Esc close  Ctrl+C quit";

/// Rows occupied by one field in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegion {
    pub id: NodeId,
    pub start_row: u16,
    pub height: u16,
}

impl FieldRegion {
    /// Field-local row for a frame row, if the row falls inside this field.
    pub fn local_row(&self, row: u16) -> Option<u16> {
        let local = row.checked_sub(self.start_row)?;
        (local < self.height).then_some(local)
    }
}

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
    pub regions: Vec<FieldRegion>,
}

impl RenderFrame {
    /// Field and field-local row under a frame row.
    pub fn hit_test(&self, row: u16) -> Option<(&NodeId, u16)> {
        self.regions
            .iter()
            .find_map(|region| region.local_row(row).map(|local| (&region.id, local)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RendererConfig {
    pub title: Option<String>,
    pub show_live_region: bool,
    /// Append a one-line key reference under the form.
    pub show_key_hints: bool,
    pub theme: Theme,
}

#[derive(Default)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, form: &Form) -> RenderFrame {
        let mut frame = RenderFrame::default();
        let ctx = RenderContext {
            focused_id: form.focused_id().cloned(),
            theme: self.config.theme.clone(),
            show_live_region: self.config.show_live_region,
        };
        let mut row_offset: u16 = 0;

        if let Some(title) = &self.config.title {
            frame.lines.push(vec![Span::styled(
                title.clone(),
                Style::new().color(Color::Cyan).bold(),
            )]);
            row_offset = row_offset.saturating_add(1);
        }

        for (id, field) in form.fields() {
            let node = field.node();
            let out = node.draw(&ctx);
            let height = out.lines.len() as u16;

            if frame.cursor.is_none() && ctx.focused_id.as_ref() == Some(id) {
                if let Some(local_cursor) = node.cursor_pos() {
                    frame.cursor = Some(CursorPos {
                        col: local_cursor.col,
                        row: row_offset.saturating_add(local_cursor.row),
                    });
                }
            }

            frame.regions.push(FieldRegion {
                id: id.clone(),
                start_row: row_offset,
                height,
            });
            row_offset = row_offset.saturating_add(height);
            frame.lines.extend(out.lines);
        }

        if self.config.show_key_hints {
            frame.lines.push(Vec::new());
            frame.lines.push(vec![Span::styled(
                KEY_HINTS,
                Style::new().color(Color::DarkGrey),
            )]);
        }

        frame
    }
}
