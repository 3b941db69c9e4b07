use std::cell::Cell;

/// Selection and scroll position of a list that is rendered in a window.
#[derive(Debug, Default)]
pub struct ListViewState {
    selected_index: usize,
    viewport_offset: usize,
    item_count: usize,
    /// Rows available at the last render. Written while rendering, hence the Cell.
    viewport_height: Cell<usize>,
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Records the height of the area the list was rendered into.
    pub fn set_viewport_height(&self, height: usize) {
        self.viewport_height.set(height);
    }

    /// Updates the number of items, keeping the selection in range.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
        self.scroll_to_selection();
    }

    fn scroll_to_selection(&mut self) {
        let height = self.viewport_height.get();
        if self.item_count == 0 {
            self.viewport_offset = 0;
            return;
        }
        if height == 0 {
            return;
        }

        if self.selected_index < self.viewport_offset {
            self.viewport_offset = self.selected_index;
        } else if self.selected_index >= self.viewport_offset + height {
            self.viewport_offset = self.selected_index + 1 - height;
        }
        self.viewport_offset = self.viewport_offset.min(self.item_count.saturating_sub(height));
    }

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.scroll_to_selection();
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.item_count {
            self.selected_index += 1;
            self.scroll_to_selection();
        }
    }

    fn page_size(&self) -> usize {
        self.viewport_height.get().saturating_sub(1).max(1)
    }

    pub fn page_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(self.page_size());
        self.scroll_to_selection();
    }

    pub fn page_down(&mut self) {
        if self.item_count > 0 {
            self.selected_index = (self.selected_index + self.page_size()).min(self.item_count - 1);
            self.scroll_to_selection();
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.scroll_to_selection();
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.item_count.saturating_sub(1);
        self.scroll_to_selection();
    }

    /// Returns to the top of the list.
    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.viewport_offset = 0;
    }
}
