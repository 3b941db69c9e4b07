use crate::error::HistoryResult;
use crate::record::LocationRecord;
use crate::store::Snapshot;
use tracing::warn;
use tui_input::{Input, InputRequest};

pub const RECORD_FAILED_NOTICE: &str = "The lookup could not be added to the history.";

/// State of the search screen: the lookup being typed and the location
/// handed back from the history screen.
#[derive(Debug, Default)]
pub struct SearchScreen {
    input: Input,
    selected: Option<LocationRecord>,
    last_recorded: Option<String>,
    notice: Option<&'static str>,
}

impl SearchScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.handle(InputRequest::InsertChar(c));
    }

    pub fn delete_char(&mut self) {
        self.input.handle(InputRequest::DeletePrevChar);
    }

    pub fn clear_input(&mut self) {
        self.input.reset();
    }

    /// Takes the typed location name, if there is one.
    pub fn take_query(&mut self) -> Option<String> {
        let query = self.input.value().trim().to_string();
        if query.is_empty() {
            return None;
        }
        self.input.reset();
        Some(query)
    }

    /// Location handed back by the history screen, untouched.
    pub fn selected(&self) -> Option<&LocationRecord> {
        self.selected.as_ref()
    }

    pub fn receive(&mut self, record: LocationRecord) {
        self.selected = Some(record);
    }

    pub fn last_recorded(&self) -> Option<&str> {
        self.last_recorded.as_deref()
    }

    pub fn on_recorded(&mut self, result: &HistoryResult<Snapshot>) {
        match result {
            Ok(snapshot) => {
                self.last_recorded = snapshot.last().map(|record| record.name.clone());
            }
            Err(e) => {
                warn!("Recording lookup failed: {}", e);
                self.notice = Some(RECORD_FAILED_NOTICE);
            }
        }
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
