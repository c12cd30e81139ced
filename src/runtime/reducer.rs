use crate::runtime::effect::Effect;
use crate::runtime::event::{SystemEvent, WidgetAction};
use crate::runtime::intent::Intent;
use crate::state::form::{Form, teardown_command};
use crate::widgets::traits::InteractionResult;

pub struct Reducer;

impl Reducer {
    pub fn reduce(form: &mut Form, intent: Intent) -> Vec<Effect> {
        let effects = match intent {
            Intent::Exit => {
                form.request_exit();
                vec![Effect::RequestRender]
            }
            Intent::NextFocus => collect_effects(form.tab_forward()),
            Intent::PrevFocus => collect_effects(form.tab_backward()),
            Intent::InputKey(key) => collect_effects(form.dispatch_key_to_focused(key)),
            Intent::TextAction(action) => {
                collect_effects(form.dispatch_text_action_to_focused(action))
            }
            Intent::Click { target, row } => collect_effects(form.click(&target, row)),
            Intent::Tick | Intent::Noop => vec![],
        };
        with_pending(form, effects)
    }

    /// Follow-up for an action a widget reported.
    pub fn react(form: &mut Form, action: WidgetAction) -> Vec<Effect> {
        let effects = match action {
            WidgetAction::InputDone => collect_effects(form.focus_next()),
            WidgetAction::ValueCommitted { target, value } => {
                tracing::debug!(field = %target, value, "value committed");
                vec![Effect::RequestRender]
            }
            WidgetAction::Announced { .. } => vec![],
            WidgetAction::TeardownAfter { target, delay } => {
                vec![Effect::Schedule(teardown_command(target, delay))]
            }
        };
        with_pending(form, effects)
    }

    pub fn system(form: &mut Form, event: &SystemEvent) -> Vec<Effect> {
        let effects = collect_effects(form.handle_system_event(event));
        with_pending(form, effects)
    }
}

fn with_pending(form: &mut Form, mut effects: Vec<Effect>) -> Vec<Effect> {
    effects.extend(
        form.take_pending_scheduler_commands()
            .into_iter()
            .map(Effect::Schedule),
    );
    effects
}

fn collect_effects(result: InteractionResult) -> Vec<Effect> {
    let mut effects: Vec<Effect> = result.actions.into_iter().map(Effect::Action).collect();
    if result.request_render {
        effects.push(Effect::RequestRender);
    }
    effects
}
