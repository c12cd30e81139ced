use crate::runtime::event::WidgetAction;
use crate::runtime::scheduler::SchedulerCommand;

#[derive(Debug, Clone)]
pub enum Effect {
    Action(WidgetAction),
    Schedule(SchedulerCommand),
    RequestRender,
}
