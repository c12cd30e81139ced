use crate::runtime::effect::Effect;
use crate::runtime::event::AppEvent;
use crate::runtime::intent::Intent;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::runtime::scheduler::Scheduler;
use crate::state::form::Form;
use crate::terminal::TerminalEvent;
use crate::ui::renderer::{RenderFrame, Renderer};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Form, timers and the last drawn frame, driven by explicit instants.
///
/// The terminal runtime and scripted replays share this, so both go through
/// the same key bindings, reducer and scheduler.
pub struct Session {
    form: Form,
    scheduler: Scheduler,
    key_bindings: KeyBindings,
    renderer: Renderer,
    frame: RenderFrame,
}

impl Session {
    pub fn new(form: Form, renderer: Renderer) -> Self {
        Self::with_key_bindings(form, renderer, KeyBindings::new())
    }

    pub fn with_key_bindings(form: Form, renderer: Renderer, key_bindings: KeyBindings) -> Self {
        let frame = renderer.render(&form);
        Self {
            form,
            scheduler: Scheduler::new(),
            key_bindings,
            renderer,
            frame,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn into_form(self) -> Form {
        self.form
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn should_exit(&self) -> bool {
        self.form.should_exit()
    }

    /// Focuses the first field.
    pub fn start(&mut self, now: Instant) {
        // With nothing focused, moving forward lands on the first field.
        self.process_intent(Intent::NextFocus, now);
        self.render();
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.scheduler.poll_timeout(now, default_timeout)
    }

    /// Due time of the latest pending timer.
    pub fn last_due(&self) -> Option<Instant> {
        self.scheduler.last_due()
    }

    /// Fires every timer due at `now`. Returns true when the frame changed.
    pub fn process_scheduled(&mut self, now: Instant) -> bool {
        let mut rendered = false;
        for event in self.scheduler.drain_ready(now) {
            rendered |= self.dispatch(event, now);
        }
        rendered
    }

    /// Handles one event. Returns true when the frame changed.
    pub fn dispatch(&mut self, event: AppEvent, now: Instant) -> bool {
        match event {
            AppEvent::Terminal(TerminalEvent::Key(key)) => {
                let intent = self
                    .key_bindings
                    .resolve(key)
                    .unwrap_or(Intent::InputKey(key));
                self.process_intent(intent, now)
            }
            AppEvent::Terminal(TerminalEvent::Click(pos)) => {
                let intent = match self.frame.hit_test(pos.row) {
                    Some((target, row)) => Intent::Click {
                        target: target.clone(),
                        row,
                    },
                    None => Intent::Noop,
                };
                self.process_intent(intent, now)
            }
            AppEvent::Terminal(TerminalEvent::Resize(_)) => {
                self.render();
                true
            }
            AppEvent::Terminal(TerminalEvent::Tick) => self.process_intent(Intent::Tick, now),
            AppEvent::Intent(intent) => self.process_intent(intent, now),
            AppEvent::Action(action) => {
                let effects = Reducer::react(&mut self.form, action);
                self.apply_effects(effects, now)
            }
            AppEvent::System(event) => {
                let effects = Reducer::system(&mut self.form, &event);
                self.apply_effects(effects, now)
            }
        }
    }

    fn process_intent(&mut self, intent: Intent, now: Instant) -> bool {
        let effects = Reducer::reduce(&mut self.form, intent);
        self.apply_effects(effects, now)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, now: Instant) -> bool {
        let mut queue = VecDeque::from(effects);
        let mut render_requested = false;

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Action(action) => {
                    queue.extend(Reducer::react(&mut self.form, action));
                }
                Effect::Schedule(command) => {
                    self.scheduler.schedule(command, now);
                }
                Effect::RequestRender => {
                    render_requested = true;
                }
            }
        }

        if render_requested {
            self.render();
        }
        render_requested
    }

    fn render(&mut self) {
        self.frame = self.renderer.render(&self.form);
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::core::NodeId;
    use crate::core::config::SuggestConfig;
    use crate::runtime::event::AppEvent;
    use crate::state::form::Form;
    use crate::terminal::{CursorPos, KeyCode, KeyEvent, TerminalEvent};
    use crate::ui::renderer::Renderer;
    use crate::widgets::inputs::text::TextInput;
    use std::time::{Duration, Instant};

    fn session() -> Session {
        let mut form = Form::new()
            .with_field(TextInput::new("country", "Country"))
            .with_field(TextInput::new("notes", "Notes"));
        form.attach(
            &NodeId::from("country"),
            SuggestConfig::new(vec![
                "Canada".to_string(),
                "Cameroon".to_string(),
                "Chad".to_string(),
            ])
            .with_min_length(1),
        );
        Session::new(form, Renderer::default())
    }

    fn key(session: &mut Session, code: KeyCode, now: Instant) -> bool {
        session.dispatch(AppEvent::Terminal(TerminalEvent::Key(KeyEvent::plain(code))), now)
    }

    fn click(session: &mut Session, row: u16, now: Instant) -> bool {
        session.dispatch(
            AppEvent::Terminal(TerminalEvent::Click(CursorPos { col: 14, row })),
            now,
        )
    }

    fn country(session: &Session) -> &crate::widgets::suggest::SuggestField {
        session.form().suggest_field("country").expect("country")
    }

    #[test]
    fn start_focuses_the_first_field() {
        let mut session = session();
        session.start(Instant::now());
        assert_eq!(session.form().focused_id(), Some(&NodeId::from("country")));
        assert_eq!(country(&session).live_region().revision(), 1);
    }

    #[test]
    fn tab_away_tears_down_after_the_grace_window() {
        let t0 = Instant::now();
        let mut session = session();
        session.start(t0);
        key(&mut session, KeyCode::Char('c'), t0);
        key(&mut session, KeyCode::Enter, t0);
        assert_eq!(session.form().focused_id(), Some(&NodeId::from("notes")));
        assert!(country(&session).is_list_visible());

        assert!(!session.process_scheduled(t0 + Duration::from_millis(150)));
        assert!(country(&session).is_list_visible());
        assert!(session.process_scheduled(t0 + Duration::from_millis(200)));
        assert!(!country(&session).is_list_visible());
    }

    #[test]
    fn click_within_grace_window_commits() {
        let t0 = Instant::now();
        let mut session = session();
        session.start(t0);
        key(&mut session, KeyCode::Char('c'), t0);
        assert_eq!(session.frame().regions[0].height, 4);

        // Pressing on the notes row blurs the country field first.
        click(&mut session, 4, t0);
        assert_eq!(session.form().focused_id(), Some(&NodeId::from("notes")));

        click(&mut session, 2, t0 + Duration::from_millis(50));
        assert_eq!(session.form().values()[&NodeId::from("country")], "Cameroon");
        assert!(!country(&session).is_list_visible());

        session.process_scheduled(t0 + Duration::from_secs(1));
        assert_eq!(session.form().values()[&NodeId::from("country")], "Cameroon");
    }

    #[test]
    fn refocus_cancels_the_pending_teardown() {
        let t0 = Instant::now();
        let mut session = session();
        session.start(t0);
        key(&mut session, KeyCode::Char('c'), t0);
        key(&mut session, KeyCode::Esc, t0);
        key(&mut session, KeyCode::Char('a'), t0);
        assert!(country(&session).is_list_visible());

        key(&mut session, KeyCode::Tab, t0);
        assert!(!country(&session).is_list_visible());
        key(&mut session, KeyCode::BackTab, t0);
        key(&mut session, KeyCode::Backspace, t0);
        assert!(country(&session).is_list_visible());

        session.process_scheduled(t0 + Duration::from_secs(1));
        assert!(country(&session).is_list_visible());
    }

    #[test]
    fn click_outside_any_field_does_nothing() {
        let mut session = session();
        session.start(Instant::now());
        assert!(!click(&mut session, 40, Instant::now()));
    }
}
