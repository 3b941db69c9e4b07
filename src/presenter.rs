//! History screen state: what to show for a snapshot and how user actions
//! move the screen between loading, listing and confirming a clear.

use crate::confirm::{ClearChoice, ClearConfirmation, ConfirmOutcome};
use crate::error::HistoryResult;
use crate::lifecycle::{LifecycleBinder, VisibilityHub};
use crate::list_view_state::ListViewState;
use crate::localization::LocalizationTable;
use crate::navigation::{NavigationRequest, Screen};
use crate::record::LocationRecord;
use crate::store::{LoadOutcome, Snapshot};
use tracing::{debug, warn};

pub const EMPTY_MESSAGE: &str = "No lookup history yet.";
pub const LOAD_FAILED_NOTICE: &str = "Could not load the lookup history. Showing the last known list.";
pub const CLEAR_FAILED_NOTICE: &str = "The history was not cleared. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// Not mounted, or mounted but never shown.
    Idle,
    AwaitingLoad,
    Populated,
    Empty,
    /// The clear prompt is open, or a confirmed clear is still running.
    ConfirmingClear,
}

/// One row of the history list.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem<'a> {
    /// Unique within the snapshot even when names repeat.
    pub key: String,
    pub label: &'a str,
    pub record: &'a LocationRecord,
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<'a> {
    Items(Vec<DisplayItem<'a>>),
    Empty(&'static str),
}

/// Builds the list rows for `snapshot`, in snapshot order.
pub fn listing<'a>(snapshot: &'a [LocationRecord], table: &'a LocalizationTable) -> Listing<'a> {
    if snapshot.is_empty() {
        return Listing::Empty(EMPTY_MESSAGE);
    }
    Listing::Items(
        snapshot
            .iter()
            .enumerate()
            .map(|(index, record)| DisplayItem {
                key: format!("{}-{}", record.name, index),
                label: table.resolve(&record.name),
                record,
            })
            .collect(),
    )
}

/// Presenter of the history screen.
#[derive(Debug)]
pub struct HistoryPresenter {
    state: HistoryState,
    binder: LifecycleBinder,
    confirmation: ClearConfirmation,
    clear_in_flight: bool,
    list: ListViewState,
    notice: Option<&'static str>,
}

impl Default for HistoryPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryPresenter {
    pub fn new() -> Self {
        Self {
            state: HistoryState::Idle,
            binder: LifecycleBinder::new(),
            confirmation: ClearConfirmation::new(),
            clear_in_flight: false,
            list: ListViewState::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> HistoryState {
        self.state
    }

    pub fn list(&self) -> &ListViewState {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListViewState {
        &mut self.list
    }

    pub fn confirmation(&self) -> &ClearConfirmation {
        &self.confirmation
    }

    pub fn is_clearing(&self) -> bool {
        self.clear_in_flight
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.binder.is_mounted()
    }

    /// Binds `reload` to the history screen's visibility. Only the first call
    /// per mount attaches anything.
    pub fn mount(&mut self, visibility: &VisibilityHub, reload: impl Fn() + Send + Sync + 'static) -> bool {
        self.binder.mount(visibility, Screen::History, reload)
    }

    /// Releases the visibility listener and forgets screen-local state.
    pub fn unmount(&mut self) {
        self.binder.unmount();
        self.confirmation.dismiss();
        self.clear_in_flight = false;
        self.list.reset();
        self.state = HistoryState::Idle;
    }

    /// The screen became visible and a reload has been dispatched.
    pub fn on_visible(&mut self) {
        self.confirmation.dismiss();
        self.state = HistoryState::AwaitingLoad;
    }

    /// A dispatched load finished. `snapshot` is the store's current one.
    pub fn on_load_finished(&mut self, result: &HistoryResult<LoadOutcome>, snapshot: &[LocationRecord]) {
        match result {
            Ok(LoadOutcome::Applied(len)) => debug!(len, "History load applied"),
            Ok(LoadOutcome::Superseded) => debug!("History load superseded"),
            Err(e) => {
                warn!("Keeping previous history after failed load: {}", e);
                self.notice = Some(LOAD_FAILED_NOTICE);
            }
        }
        self.settle(snapshot);
    }

    fn settle(&mut self, snapshot: &[LocationRecord]) {
        self.list.set_item_count(snapshot.len());
        let confirming = self.confirmation.is_open() || self.clear_in_flight;
        self.state = if snapshot.is_empty() {
            self.confirmation.dismiss();
            HistoryState::Empty
        } else if confirming {
            HistoryState::ConfirmingClear
        } else {
            HistoryState::Populated
        };
    }

    /// Whether the clear action is offered: the history is non-empty and no
    /// prompt or clear is already under way.
    pub fn clear_control_visible(&self, snapshot: &[LocationRecord]) -> bool {
        self.state != HistoryState::Idle
            && !snapshot.is_empty()
            && !self.confirmation.is_open()
            && !self.clear_in_flight
    }

    /// Opens the clear prompt. Returns false when clearing is not on offer.
    pub fn request_clear(&mut self, snapshot: &[LocationRecord]) -> bool {
        if !self.clear_control_visible(snapshot) {
            return false;
        }
        if self.confirmation.request_clear(snapshot.len()) {
            self.state = HistoryState::ConfirmingClear;
            return true;
        }
        false
    }

    pub fn toggle_clear_focus(&mut self) {
        self.confirmation.toggle_focus();
    }

    /// Answers the clear prompt. On [`ConfirmOutcome::Clear`] the caller must
    /// dispatch the store's clear and report back via [`Self::on_clear_finished`].
    pub fn answer_clear(&mut self, choice: ClearChoice) -> ConfirmOutcome {
        self.finish_prompt(|gate| gate.choose(choice))
    }

    /// Answers the clear prompt with its focused option.
    pub fn answer_focused(&mut self) -> ConfirmOutcome {
        self.finish_prompt(ClearConfirmation::choose_focused)
    }

    /// Closes the prompt without an answer.
    pub fn dismiss_clear(&mut self) {
        self.finish_prompt(|gate| {
            gate.dismiss();
            ConfirmOutcome::Dismissed
        });
    }

    fn finish_prompt(&mut self, answer: impl FnOnce(&mut ClearConfirmation) -> ConfirmOutcome) -> ConfirmOutcome {
        if self.state != HistoryState::ConfirmingClear || self.clear_in_flight {
            return ConfirmOutcome::Dismissed;
        }
        let outcome = answer(&mut self.confirmation);
        match outcome {
            ConfirmOutcome::Clear => self.clear_in_flight = true,
            ConfirmOutcome::Dismissed => self.state = HistoryState::Populated,
        }
        outcome
    }

    /// A dispatched clear finished. `snapshot` is the store's current one.
    pub fn on_clear_finished(&mut self, result: &HistoryResult<()>, snapshot: &[LocationRecord]) {
        self.clear_in_flight = false;
        self.report_clear_failure(result);
        self.settle(snapshot);
    }

    /// A clear finished after the screen was left. The state stays `Idle`, but
    /// a failure still raises the notice, which is drawn over any screen.
    pub fn report_clear_failure(&mut self, result: &HistoryResult<()>) {
        if let Err(e) = result {
            warn!("History clear did not complete: {}", e);
            self.notice = Some(CLEAR_FAILED_NOTICE);
        }
    }

    /// Navigation request for the row at `index`, carrying the original record.
    pub fn select(&self, snapshot: &Snapshot, index: usize) -> Option<NavigationRequest> {
        if self.state == HistoryState::ConfirmingClear {
            return None;
        }
        snapshot.get(index).map(|record| NavigationRequest::PopTo {
            target: Screen::Search,
            record: record.clone(),
        })
    }

    /// Navigation request for the highlighted row.
    pub fn select_highlighted(&self, snapshot: &Snapshot) -> Option<NavigationRequest> {
        self.select(snapshot, self.list.selected_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistoryError;

    fn snapshot(names: &[&str]) -> Snapshot {
        names.iter().map(|n| LocationRecord::new(*n)).collect::<Vec<_>>().into()
    }

    fn loaded(names: &[&str]) -> (HistoryPresenter, Snapshot) {
        let snap = snapshot(names);
        let mut presenter = HistoryPresenter::new();
        presenter.on_visible();
        presenter.on_load_finished(&Ok(LoadOutcome::Applied(snap.len())), &snap);
        (presenter, snap)
    }

    #[test]
    fn test_listing_resolves_labels_in_order() {
        let table = LocalizationTable::from_entries([("taipei".to_string(), "台北".to_string())]);
        let snap = snapshot(&["Taipei", "Unknown City"]);

        let Listing::Items(items) = listing(&snap, &table) else {
            panic!("expected items");
        };
        let labels: Vec<&str> = items.iter().map(|i| i.label).collect();
        assert_eq!(labels, ["台北", "Unknown City"]);
        assert_eq!(items[0].record.name, "Taipei");
    }

    #[test]
    fn test_listing_keys_unique_for_repeated_names() {
        let table = LocalizationTable::new();
        let snap = snapshot(&["Tainan", "Tainan", "Tainan"]);
        let Listing::Items(items) = listing(&snap, &table) else {
            panic!("expected items");
        };
        let mut keys: Vec<&str> = items.iter().map(|i| i.key.as_str()).collect();
        keys.dedup();
        assert_eq!(keys, ["Tainan-0", "Tainan-1", "Tainan-2"]);
    }

    #[test]
    fn test_empty_snapshot_lists_message() {
        let table = LocalizationTable::builtin();
        assert_eq!(listing(&[], &table), Listing::Empty(EMPTY_MESSAGE));
    }

    #[test]
    fn test_load_settles_by_size() {
        let (presenter, _) = loaded(&["Taipei"]);
        assert_eq!(presenter.state(), HistoryState::Populated);

        let (presenter, _) = loaded(&[]);
        assert_eq!(presenter.state(), HistoryState::Empty);
    }

    #[test]
    fn test_failed_load_keeps_list_and_sets_notice() {
        let (mut presenter, snap) = loaded(&["Taipei", "Keelung"]);
        presenter.on_visible();
        presenter.on_load_finished(&Err(HistoryError::PersistenceRead("gone".into())), &snap);

        assert_eq!(presenter.state(), HistoryState::Populated);
        assert_eq!(presenter.notice(), Some(LOAD_FAILED_NOTICE));
        presenter.dismiss_notice();
        assert_eq!(presenter.notice(), None);
    }

    #[test]
    fn test_select_yields_original_record() {
        let table = LocalizationTable::builtin();
        let (presenter, snap) = loaded(&["taipei", "Kaohsiung"]);
        assert_eq!(table.resolve("Kaohsiung"), "高雄");

        for (i, expected) in snap.iter().enumerate() {
            assert_eq!(
                presenter.select(&snap, i),
                Some(NavigationRequest::PopTo {
                    target: Screen::Search,
                    record: expected.clone(),
                })
            );
        }
        assert_eq!(presenter.select(&snap, 2), None);
    }

    #[test]
    fn test_clear_not_offered_for_empty_history() {
        let (mut presenter, snap) = loaded(&[]);
        assert!(!presenter.clear_control_visible(&snap));
        assert!(!presenter.request_clear(&snap));
        assert_eq!(presenter.state(), HistoryState::Empty);
    }

    #[test]
    fn test_cancel_returns_to_populated() {
        let (mut presenter, snap) = loaded(&["Miaoli"]);
        assert!(presenter.request_clear(&snap));
        assert_eq!(presenter.state(), HistoryState::ConfirmingClear);
        assert!(!presenter.clear_control_visible(&snap));

        assert_eq!(presenter.answer_clear(ClearChoice::Cancel), ConfirmOutcome::Dismissed);
        assert_eq!(presenter.state(), HistoryState::Populated);
    }

    #[test]
    fn test_dismiss_returns_to_populated() {
        let (mut presenter, snap) = loaded(&["Miaoli"]);
        presenter.request_clear(&snap);
        presenter.dismiss_clear();
        assert_eq!(presenter.state(), HistoryState::Populated);
    }

    #[test]
    fn test_confirmed_clear_waits_for_store() {
        let (mut presenter, snap) = loaded(&["Changhua"]);
        presenter.request_clear(&snap);

        assert_eq!(presenter.answer_clear(ClearChoice::Confirm), ConfirmOutcome::Clear);
        assert_eq!(presenter.state(), HistoryState::ConfirmingClear);
        assert!(presenter.is_clearing());
        assert_eq!(presenter.select(&snap, 0), None);

        presenter.on_clear_finished(&Ok(()), &[]);
        assert_eq!(presenter.state(), HistoryState::Empty);
        assert!(!presenter.is_clearing());
    }

    #[test]
    fn test_failed_clear_keeps_history() {
        let (mut presenter, snap) = loaded(&["Changhua"]);
        presenter.request_clear(&snap);
        presenter.answer_focused();
        presenter.request_clear(&snap);
        presenter.toggle_clear_focus();
        assert_eq!(presenter.answer_focused(), ConfirmOutcome::Clear);

        presenter.on_clear_finished(&Err(HistoryError::PersistenceWrite("ro".into())), &snap);
        assert_eq!(presenter.state(), HistoryState::Populated);
        assert_eq!(presenter.notice(), Some(CLEAR_FAILED_NOTICE));
    }

    #[test]
    fn test_visibility_gain_closes_prompt() {
        let (mut presenter, snap) = loaded(&["Yunlin"]);
        presenter.request_clear(&snap);
        presenter.on_visible();

        assert_eq!(presenter.state(), HistoryState::AwaitingLoad);
        assert!(!presenter.confirmation().is_open());
    }

    #[test]
    fn test_unmount_resets_to_idle() {
        let hub = VisibilityHub::new();
        let (mut presenter, _) = loaded(&["Pingtung"]);
        assert!(presenter.mount(&hub, || {}));
        assert!(!presenter.mount(&hub, || {}));

        presenter.unmount();
        assert_eq!(presenter.state(), HistoryState::Idle);
        assert_eq!(hub.listener_count(Screen::History), 0);
    }
}
