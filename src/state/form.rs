use crate::core::NodeId;
use crate::core::config::{FormSpec, SuggestConfig};
use crate::error::Result;
use crate::runtime::event::{AppEvent, SystemEvent, WidgetAction};
use crate::runtime::scheduler::SchedulerCommand;
use crate::terminal::{KeyCode, KeyEvent};
use crate::widgets::inputs::text::TextInput;
use crate::widgets::suggest::SuggestField;
use crate::widgets::traits::{InteractionResult, InteractiveNode, TextAction};
use indexmap::IndexMap;
use std::path::Path;
use std::time::Duration;

/// A form element: a plain text input, or one enhanced with suggestions.
pub enum Field {
    Text(TextInput),
    Suggest(SuggestField),
}

impl Field {
    pub fn node(&self) -> &dyn InteractiveNode {
        match self {
            Self::Text(input) => input,
            Self::Suggest(field) => field,
        }
    }

    pub fn node_mut(&mut self) -> &mut dyn InteractiveNode {
        match self {
            Self::Text(input) => input,
            Self::Suggest(field) => field,
        }
    }

    pub fn as_suggest(&self) -> Option<&SuggestField> {
        match self {
            Self::Suggest(field) => Some(field),
            Self::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    /// The element already carries suggestions; nothing changed.
    AlreadyAttached,
    /// No element with that id; nothing changed.
    MissingElement,
}

/// Ordered set of fields with a single focus.
#[derive(Default)]
pub struct Form {
    fields: IndexMap<NodeId, Field>,
    focus: Option<usize>,
    pending_scheduler_commands: Vec<SchedulerCommand>,
    exit_requested: bool,
}

pub fn teardown_key(id: &NodeId) -> String {
    format!("suggest-teardown:{id}")
}

/// Delayed teardown for `target`, keyed so refocusing the field can cancel it.
pub fn teardown_command(target: NodeId, delay: Duration) -> SchedulerCommand {
    SchedulerCommand::EmitAfter {
        key: teardown_key(&target),
        delay,
        event: AppEvent::System(SystemEvent::Teardown { target }),
    }
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the fields of a form definition. Relative source files resolve
    /// against `base_dir`.
    pub fn from_spec(spec: &FormSpec, base_dir: &Path) -> Result<Self> {
        let mut form = Self::new();
        for field in &spec.fields {
            let mut input = TextInput::new(field.id.clone(), field.label.clone());
            if let Some(placeholder) = &field.placeholder {
                input = input.with_placeholder(placeholder.clone());
            }
            if let Some(value) = &field.value {
                input = input.with_default(value.clone());
            }
            if !form.add_field(input) {
                tracing::warn!(field = %field.id, "duplicate field id ignored");
                continue;
            }
            if let Some(suggest) = &field.suggest {
                let config = suggest.resolve(&field.id, base_dir)?;
                form.attach(&field.id, config);
            }
        }
        Ok(form)
    }

    pub fn with_field(mut self, input: TextInput) -> Self {
        self.add_field(input);
        self
    }

    /// Appends a field. Returns false if the id is already taken.
    pub fn add_field(&mut self, input: TextInput) -> bool {
        let id = input.node_id().clone();
        if self.fields.contains_key(&id) {
            return false;
        }
        self.fields.insert(id, Field::Text(input));
        true
    }

    /// Enhances the text input `id` with suggestions.
    ///
    /// Attaching to an element that already has suggestions, or to an id that
    /// does not exist, leaves the form untouched.
    pub fn attach(&mut self, id: &NodeId, config: SuggestConfig) -> AttachOutcome {
        let Some(field) = self.fields.get_mut(id) else {
            tracing::debug!(field = %id, "attach skipped: no such element");
            return AttachOutcome::MissingElement;
        };
        let Field::Text(input) = &*field else {
            tracing::debug!(field = %id, "attach skipped: already enhanced");
            return AttachOutcome::AlreadyAttached;
        };

        tracing::debug!(
            field = %id,
            candidates = config.source.len(),
            min_length = config.min_length,
            max_results = config.max_results,
            "suggestions attached"
        );
        let input = input.clone();
        *field = Field::Suggest(SuggestField::attach(input, config));
        AttachOutcome::Attached
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.get(id)
    }

    pub fn suggest_field(&self, id: &str) -> Option<&SuggestField> {
        self.field(id).and_then(Field::as_suggest)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&NodeId, &Field)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn values(&self) -> IndexMap<NodeId, String> {
        self.fields
            .iter()
            .map(|(id, field)| (id.clone(), field.node().value()))
            .collect()
    }

    pub fn focused_id(&self) -> Option<&NodeId> {
        self.focus
            .and_then(|index| self.fields.get_index(index))
            .map(|(id, _)| id)
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    pub fn take_pending_scheduler_commands(&mut self) -> Vec<SchedulerCommand> {
        std::mem::take(&mut self.pending_scheduler_commands)
    }

    // --- focus ---

    pub fn focus_first(&mut self) -> InteractionResult {
        self.focus_index(0)
    }

    pub fn focus_next(&mut self) -> InteractionResult {
        let len = self.fields.len();
        match self.focus {
            Some(current) if len > 0 => self.focus_index((current + 1) % len),
            _ => self.focus_first(),
        }
    }

    pub fn focus_prev(&mut self) -> InteractionResult {
        let len = self.fields.len();
        match self.focus {
            Some(current) if len > 0 => self.focus_index((current + len - 1) % len),
            _ => self.focus_first(),
        }
    }

    /// Tab: the focused field sees the key first (closing its list), then
    /// focus moves on.
    pub fn tab_forward(&mut self) -> InteractionResult {
        let mut result = self.dispatch_key_to_focused(KeyEvent::plain(KeyCode::Tab));
        result.merge(self.focus_next());
        result
    }

    pub fn tab_backward(&mut self) -> InteractionResult {
        let mut result = self.dispatch_key_to_focused(KeyEvent::plain(KeyCode::BackTab));
        result.merge(self.focus_prev());
        result
    }

    pub fn focus_index(&mut self, index: usize) -> InteractionResult {
        if index >= self.fields.len() || self.focus == Some(index) {
            return InteractionResult::ignored();
        }

        let mut result = InteractionResult::handled();
        if let Some((_, previous)) = self.focus.and_then(|i| self.fields.get_index_mut(i)) {
            result.merge(previous.node_mut().on_blur());
        }

        self.focus = Some(index);
        if let Some((id, field)) = self.fields.get_index_mut(index) {
            self.pending_scheduler_commands.push(SchedulerCommand::Cancel {
                key: teardown_key(id),
            });
            result.merge(field.node_mut().on_focus());
        }
        self.absorb(result)
    }

    // --- dispatch ---

    pub fn dispatch_key_to_focused(&mut self, key: KeyEvent) -> InteractionResult {
        let Some(field) = self.focused_field_mut() else {
            return InteractionResult::ignored();
        };
        let result = field.node_mut().on_key(key);
        self.absorb(result)
    }

    pub fn dispatch_text_action_to_focused(&mut self, action: TextAction) -> InteractionResult {
        let Some(field) = self.focused_field_mut() else {
            return InteractionResult::ignored();
        };
        let result = field.node_mut().on_text_action(action);
        self.absorb(result)
    }

    /// Mouse press on `row` of field `target`. Item rows commit even when the
    /// field has already lost focus and its list is waiting for teardown;
    /// the input row moves focus to the field.
    pub fn click(&mut self, target: &NodeId, row: u16) -> InteractionResult {
        let Some(index) = self.fields.get_index_of(target) else {
            return InteractionResult::ignored();
        };
        let result = self.fields[index].node_mut().on_click_row(row);
        if result.handled {
            return self.absorb(result);
        }
        if row == 0 {
            return self.focus_index(index);
        }
        InteractionResult::ignored()
    }

    pub fn handle_system_event(&mut self, event: &SystemEvent) -> InteractionResult {
        let mut result = InteractionResult::ignored();
        match event {
            SystemEvent::Teardown { target } => {
                if let Some(field) = self.fields.get_mut(target) {
                    result.merge(field.node_mut().on_system_event(event));
                }
            }
        }
        self.absorb(result)
    }

    fn focused_field_mut(&mut self) -> Option<&mut Field> {
        let index = self.focus?;
        self.fields.get_index_mut(index).map(|(_, field)| field)
    }

    /// Turns teardown requests into scheduled events; other actions pass up.
    fn absorb(&mut self, mut result: InteractionResult) -> InteractionResult {
        let actions = std::mem::take(&mut result.actions);
        for action in actions {
            match action {
                WidgetAction::TeardownAfter { target, delay } => {
                    self.pending_scheduler_commands
                        .push(teardown_command(target, delay));
                }
                other => result.actions.push(other),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::{AttachOutcome, Form, teardown_key};
    use crate::core::NodeId;
    use crate::core::config::{FormSpec, SuggestConfig};
    use crate::runtime::event::{AppEvent, SystemEvent, WidgetAction};
    use crate::runtime::scheduler::SchedulerCommand;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::inputs::text::TextInput;
    use std::path::Path;
    use std::time::Duration;

    fn source() -> Vec<String> {
        ["Canada", "Cameroon", "Chad"]
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    fn form() -> Form {
        let mut form = Form::new()
            .with_field(TextInput::new("country", "Country"))
            .with_field(TextInput::new("notes", "Notes"));
        form.attach(
            &NodeId::from("country"),
            SuggestConfig::new(source())
                .with_min_length(1)
                .with_instructions("Pick a country"),
        );
        form
    }

    fn type_text(form: &mut Form, text: &str) {
        for ch in text.chars() {
            form.dispatch_key_to_focused(KeyEvent::plain(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn attach_is_idempotent() {
        let mut form = form();
        let second = form.attach(
            &NodeId::from("country"),
            SuggestConfig::new(vec!["Other".to_string()]),
        );
        assert_eq!(second, AttachOutcome::AlreadyAttached);
        let field = form.suggest_field("country").expect("suggest field");
        assert_eq!(field.config().source, source());
    }

    #[test]
    fn attach_to_missing_element_is_a_no_op() {
        let mut form = form();
        let outcome = form.attach(&NodeId::from("nope"), SuggestConfig::default());
        assert_eq!(outcome, AttachOutcome::MissingElement);
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn attach_keeps_the_existing_value() {
        let mut form = Form::new().with_field(TextInput::new("c", "C").with_default("Chad"));
        assert_eq!(
            form.attach(&NodeId::from("c"), SuggestConfig::default()),
            AttachOutcome::Attached
        );
        assert_eq!(form.values()[&NodeId::from("c")], "Chad");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut form = form();
        assert!(!form.add_field(TextInput::new("notes", "Again")));
    }

    #[test]
    fn focusing_announces_and_cancels_pending_teardown() {
        let mut form = form();
        let result = form.focus_first();
        assert!(result.actions.iter().any(|action| matches!(
            action,
            WidgetAction::Announced { text, .. } if text == "Pick a country"
        )));
        let commands = form.take_pending_scheduler_commands();
        assert!(matches!(
            commands.as_slice(),
            [SchedulerCommand::Cancel { key }] if key == &teardown_key(&NodeId::from("country"))
        ));
    }

    #[test]
    fn tab_closes_the_list_and_schedules_teardown() {
        let mut form = form();
        form.focus_first();
        form.take_pending_scheduler_commands();
        type_text(&mut form, "Ca");
        assert!(form.suggest_field("country").expect("field").is_list_visible());

        form.tab_forward();
        assert_eq!(form.focused_id(), Some(&NodeId::from("notes")));
        assert!(!form.suggest_field("country").expect("field").is_list_visible());

        let commands = form.take_pending_scheduler_commands();
        assert!(commands.iter().any(|command| matches!(
            command,
            SchedulerCommand::EmitAfter { delay, event: AppEvent::System(SystemEvent::Teardown { target }), .. }
                if *delay == Duration::from_millis(200) && target == &NodeId::from("country")
        )));
    }

    #[test]
    fn click_on_item_commits_during_grace_window() {
        let mut form = form();
        form.focus_first();
        type_text(&mut form, "Ca");

        form.click(&NodeId::from("notes"), 0);
        assert_eq!(form.focused_id(), Some(&NodeId::from("notes")));
        assert!(form.suggest_field("country").expect("field").is_list_visible());

        let result = form.click(&NodeId::from("country"), 2);
        assert!(result.actions.contains(&WidgetAction::ValueCommitted {
            target: NodeId::from("country"),
            value: "Cameroon".to_string(),
        }));
        assert_eq!(form.values()[&NodeId::from("country")], "Cameroon");

        let teardown = SystemEvent::Teardown {
            target: NodeId::from("country"),
        };
        let late = form.handle_system_event(&teardown);
        assert!(!late.request_render);
        assert_eq!(form.values()[&NodeId::from("country")], "Cameroon");
    }

    #[test]
    fn teardown_event_hides_the_list() {
        let mut form = form();
        form.focus_first();
        type_text(&mut form, "C");
        form.handle_system_event(&SystemEvent::Teardown {
            target: NodeId::from("country"),
        });
        assert!(!form.suggest_field("country").expect("field").is_list_visible());
    }

    #[test]
    fn keys_without_focus_are_ignored() {
        let mut form = form();
        let result = form.dispatch_key_to_focused(KeyEvent::plain(KeyCode::Char('x')));
        assert!(!result.handled);
    }

    #[test]
    fn fields_are_independent() {
        let mut form = Form::new()
            .with_field(TextInput::new("a", "A"))
            .with_field(TextInput::new("b", "B"));
        form.attach(&NodeId::from("a"), SuggestConfig::new(source()).with_min_length(1));
        form.attach(&NodeId::from("b"), SuggestConfig::new(source()).with_min_length(1));
        form.focus_first();
        type_text(&mut form, "C");
        form.dispatch_key_to_focused(KeyEvent::plain(KeyCode::Down));

        let a = form.suggest_field("a").expect("a");
        let b = form.suggest_field("b").expect("b");
        assert_eq!(a.matches().len(), 3);
        assert!(b.matches().is_empty());
        assert_eq!(a.cursor(), crate::widgets::suggest::navigation::Cursor::At(0));
        assert_eq!(b.cursor(), crate::widgets::suggest::navigation::Cursor::None);
    }

    #[test]
    fn form_builds_from_definition() {
        let spec = FormSpec::from_yaml(
            r#"
fields:
  - id: country
    label: Country
    suggest:
      min_length: 1
      source: [Canada, Chad]
  - id: notes
    label: Notes
    value: hello
"#,
        )
        .expect("yaml");
        let form = Form::from_spec(&spec, Path::new(".")).expect("form");
        assert_eq!(form.len(), 2);
        assert!(form.suggest_field("country").is_some());
        assert!(form.suggest_field("notes").is_none());
        assert_eq!(form.values()[&NodeId::from("notes")], "hello");
    }
}
