/// Keyboard highlight within the displayed suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    None,
    At(usize),
}

/// Tracks which suggestion is highlighted.
///
/// The cursor never wraps: moving down from the last item or up from the
/// first one leaves it where it is. Every method takes the current list
/// length, and a cursor at or beyond it reads as `Cursor::None`.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    cursor: Cursor,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self, count: usize) -> Cursor {
        match self.cursor {
            Cursor::At(index) if index < count => Cursor::At(index),
            _ => Cursor::None,
        }
    }

    pub fn selected(&self, count: usize) -> Option<usize> {
        match self.cursor(count) {
            Cursor::At(index) => Some(index),
            Cursor::None => None,
        }
    }

    /// Returns true when the cursor moved.
    pub fn next(&mut self, count: usize) -> bool {
        let target = match self.cursor(count) {
            Cursor::None if count > 0 => 0,
            Cursor::At(index) if index + 1 < count => index + 1,
            _ => return false,
        };
        self.cursor = Cursor::At(target);
        true
    }

    /// Returns true when the cursor moved.
    pub fn prev(&mut self, count: usize) -> bool {
        match self.cursor(count) {
            Cursor::At(index) if index > 0 => {
                self.cursor = Cursor::At(index - 1);
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.cursor = Cursor::None;
    }
}
