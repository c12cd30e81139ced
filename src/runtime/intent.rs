use crate::core::NodeId;
use crate::terminal::KeyEvent;
use crate::widgets::traits::TextAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Exit,
    NextFocus,
    PrevFocus,
    InputKey(KeyEvent),
    TextAction(TextAction),
    /// Mouse press on row `row` of field `target`, counted from the field's first line.
    Click { target: NodeId, row: u16 },
    Tick,
    Noop,
}
