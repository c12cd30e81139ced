//! Typeahead suggestions for a text field.
//!
//! A [`SuggestField`] wraps a [`TextInput`] and owns everything the
//! suggestion lifecycle needs: the per-field configuration, the matches for
//! the current query, the keyboard cursor and the live region used for
//! screen reader announcements.

pub mod announcer;
pub mod navigation;
pub mod render;

use crate::core::NodeId;
use crate::core::config::SuggestConfig;
use crate::core::search::{Match, find_matches};
use crate::runtime::event::{SystemEvent, WidgetAction};
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::widgets::inputs::text::TextInput;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, TextAction,
};

use announcer::{LiveRegion, USAGE_HINT};
use navigation::{Cursor, NavigationState};

pub struct SuggestField {
    input: TextInput,
    config: SuggestConfig,
    matches: Vec<Match>,
    nav: NavigationState,
    live: LiveRegion,
}

impl SuggestField {
    pub fn attach(input: TextInput, config: SuggestConfig) -> Self {
        let live = LiveRegion::new(config.politeness);
        Self {
            input,
            config,
            matches: Vec::new(),
            nav: NavigationState::new(),
            live,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        self.input.node_id()
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn suggestions(&self) -> Vec<&str> {
        self.matches.iter().map(|item| item.text.as_str()).collect()
    }

    pub fn is_list_visible(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn cursor(&self) -> Cursor {
        self.nav.cursor(self.matches.len())
    }

    pub fn live_region(&self) -> &LiveRegion {
        &self.live
    }

    /// Maps a field-local row to an item index. Row 0 is the input line.
    pub fn item_at_row(&self, row: u16) -> Option<usize> {
        render::item_at_row(row, self.matches.len())
    }

    /// Empties and hides the list. Returns false when it was already hidden.
    pub fn dismiss(&mut self) -> bool {
        self.nav.reset();
        if self.matches.is_empty() {
            return false;
        }
        self.matches.clear();
        true
    }

    /// Deferred dismissal after blur. Safe to run after a commit already
    /// cleared the list.
    pub fn teardown(&mut self) -> bool {
        let cleared = self.dismiss();
        tracing::debug!(field = %self.node_id(), cleared, "suggestion teardown");
        cleared
    }

    /// Writes the suggestion at `index` into the input and closes the list.
    pub fn commit(&mut self, index: usize) -> InteractionResult {
        let Some(item) = self.matches.get(index) else {
            return InteractionResult::ignored();
        };
        let value = item.text.clone();
        self.input.set_value(value.clone());
        self.dismiss();
        tracing::info!(field = %self.node_id(), value, "suggestion committed");

        InteractionResult::with_action(WidgetAction::ValueCommitted {
            target: self.node_id().clone(),
            value,
        })
    }

    fn refresh(&mut self) -> InteractionResult {
        let was_visible = self.is_list_visible();
        self.matches = find_matches(
            &self.config.source,
            self.input.text(),
            self.config.min_length,
            self.config.max_results,
        );
        self.nav.reset();
        tracing::debug!(
            field = %self.node_id(),
            query = self.input.text(),
            matches = self.matches.len(),
            "suggestions recomputed"
        );

        let mut result = InteractionResult::handled();
        if !was_visible && self.is_list_visible() {
            result.push(self.announce(USAGE_HINT.to_string()));
        }
        result
    }

    fn navigate(&mut self, down: bool) -> InteractionResult {
        let count = self.matches.len();
        if count == 0 {
            return InteractionResult::ignored();
        }

        let moved = if down {
            self.nav.next(count)
        } else {
            self.nav.prev(count)
        };
        let Some(index) = self.nav.selected(count).filter(|_| moved) else {
            return InteractionResult::consumed();
        };

        let text = self.matches[index].text.clone();
        InteractionResult::with_action(self.announce(text))
    }

    fn announce(&mut self, text: String) -> WidgetAction {
        let text = self.live.announce(text).to_string();
        WidgetAction::Announced {
            target: self.node_id().clone(),
            text,
            politeness: self.live.politeness(),
        }
    }

    /// Runs an edit on the input and recomputes the list if the query changed.
    fn edit_with(
        &mut self,
        edit: impl FnOnce(&mut TextInput) -> InteractionResult,
    ) -> InteractionResult {
        let before = self.input.text().to_string();
        let mut result = edit(&mut self.input);
        if self.input.text() != before {
            result.merge(self.refresh());
        }
        result
    }
}

impl Drawable for SuggestField {
    fn id(&self) -> &str {
        self.input.id()
    }

    fn label(&self) -> &str {
        self.input.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let mut out = self.input.draw(ctx);
        let indent = self.input.value_column(false);
        out.lines.extend(render::list_lines(
            &self.matches,
            self.nav.selected(self.matches.len()),
            indent,
            &ctx.theme,
        ));
        if ctx.show_live_region && !self.live.text().is_empty() {
            out.lines
                .push(render::live_region_line(self.live.text(), indent, &ctx.theme));
        }
        out
    }
}

impl Interactive for SuggestField {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                if self.dismiss() {
                    InteractionResult::handled()
                } else {
                    InteractionResult::ignored()
                }
            }
            KeyCode::Enter => match self.nav.selected(self.matches.len()) {
                Some(index) => self.commit(index),
                None => self.input.on_key(key),
            },
            KeyCode::Down => self.navigate(true),
            KeyCode::Up => self.navigate(false),
            _ => self.edit_with(|input| input.on_key(key)),
        }
    }

    fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        self.edit_with(|input| input.on_text_action(action))
    }

    fn on_click_row(&mut self, row: u16) -> InteractionResult {
        match self.item_at_row(row) {
            Some(index) => self.commit(index),
            None => InteractionResult::ignored(),
        }
    }

    fn on_focus(&mut self) -> InteractionResult {
        let instructions = self.config.instructions.clone();
        InteractionResult::with_action(self.announce(instructions))
    }

    fn on_blur(&mut self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::TeardownAfter {
            target: self.node_id().clone(),
            delay: self.config.commit_grace,
        })
    }

    fn on_system_event(&mut self, event: &SystemEvent) -> InteractionResult {
        match event {
            SystemEvent::Teardown { target } if target == self.node_id() => {
                if self.teardown() {
                    InteractionResult::handled()
                } else {
                    InteractionResult::consumed()
                }
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.input.cursor_pos()
    }

    fn value(&self) -> String {
        self.input.value()
    }

    fn set_value(&mut self, value: String) {
        self.input.set_value(value);
        self.dismiss();
    }
}
