use crate::core::NodeId;
use crate::core::config::Politeness;
use crate::runtime::intent::Intent;
use crate::terminal::TerminalEvent;
use std::time::Duration;

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the form and runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    /// A suggestion was written into the input.
    ValueCommitted { target: NodeId, value: String },
    /// The live region of `target` now reads `text`.
    Announced {
        target: NodeId,
        text: String,
        politeness: Politeness,
    },
    /// Widget signals it is done with its value.
    /// Navigation decides: focus the next field.
    InputDone,
    /// Tear the suggestion list of `target` down once `delay` has elapsed.
    TeardownAfter { target: NodeId, delay: Duration },
}

/// Events dispatched by the runtime to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemEvent {
    Teardown { target: NodeId },
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Terminal(TerminalEvent),
    Intent(Intent),
    Action(WidgetAction),
    System(SystemEvent),
}
