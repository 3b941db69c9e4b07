use crate::lifecycle::VisibilityHub;
use crate::record::LocationRecord;
use tracing::debug;

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Search,
    History,
}

/// Request produced by a screen that wants to move the user elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationRequest {
    /// Pop back to `target`, handing it `record`.
    PopTo { target: Screen, record: LocationRecord },
}

/// Screen stack plus the visibility events of its screens.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Screen>,
    visibility: VisibilityHub,
}

impl Navigator {
    /// Creates a stack with `root` on it. No event is emitted for the root.
    pub fn new(root: Screen) -> Self {
        Self {
            stack: vec![root],
            visibility: VisibilityHub::new(),
        }
    }

    pub fn current(&self) -> Screen {
        // The stack is never emptied below its root.
        self.stack.last().copied().unwrap_or(Screen::Search)
    }

    pub fn visibility(&self) -> &VisibilityHub {
        &self.visibility
    }

    /// Pushes `screen` and makes it visible. Pushing the current screen only
    /// re-emits its visibility.
    pub fn push(&mut self, screen: Screen) {
        if self.current() != screen {
            self.stack.push(screen);
        }
        debug!(?screen, depth = self.stack.len(), "Screen pushed");
        self.visibility.emit(screen);
    }

    /// Pops everything above `target` and makes it visible.
    ///
    /// Returns the screens that were removed, topmost first. If `target` is
    /// not on the stack nothing happens.
    pub fn pop_to(&mut self, target: Screen) -> Vec<Screen> {
        let Some(pos) = self.stack.iter().rposition(|s| *s == target) else {
            return Vec::new();
        };
        let mut removed = self.stack.split_off(pos + 1);
        removed.reverse();
        debug!(?target, ?removed, "Popped to screen");
        self.visibility.emit(target);
        removed
    }

    /// Pops the current screen unless it is the root.
    pub fn pop(&mut self) -> Option<Screen> {
        if self.stack.len() <= 1 {
            return None;
        }
        let removed = self.stack.pop();
        self.visibility.emit(self.current());
        removed
    }
}
