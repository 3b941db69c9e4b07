/// Visibility of the help popup.
#[derive(Debug, Default)]
pub struct Help {
    visible: bool,
}

impl Help {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}
