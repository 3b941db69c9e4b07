use crate::{
    command::Command,
    confirm::{ClearChoice, ConfirmOutcome},
    event::{AppEvent, Event, EventHandler},
    help::Help,
    keybindings::{KeybindingContext, KeybindingRegistry},
    localization::LocalizationTable,
    navigation::{NavigationRequest, Navigator, Screen},
    presenter::HistoryPresenter,
    record::LocationRecord,
    search::SearchScreen,
    store::HistoryStore,
};
use chrono::Utc;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use tracing::{debug, info};

/// Application.
#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub help: Help,
    pub events: EventHandler,
    pub keybindings: KeybindingRegistry,
    pub store: HistoryStore,
    pub labels: LocalizationTable,
    pub navigator: Navigator,
    pub history: HistoryPresenter,
    pub search: SearchScreen,
}

impl App {
    /// Constructs a new instance of [`App`] on the search screen.
    pub fn new(store: HistoryStore, labels: LocalizationTable, events: EventHandler) -> Self {
        Self {
            running: true,
            help: Help::new(),
            events,
            keybindings: KeybindingRegistry::new(),
            store,
            labels,
            navigator: Navigator::new(Screen::Search),
            history: HistoryPresenter::new(),
            search: SearchScreen::new(),
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            let event = self.events.next().await?;
            self.handle_event(event);
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Tick => {}
            Event::Crossterm(CrosstermEvent::Key(key_event)) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_events(key_event)
            }
            Event::Crossterm(_) => {}
            Event::App(app_event) => self.handle_app_event(app_event),
        }
    }

    fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::HistoryVisible => self.reload_history(),
            AppEvent::HistoryLoaded(result) => {
                if !self.history.is_mounted() {
                    debug!("History screen gone before load finished");
                    return;
                }
                self.history.on_load_finished(&result, &self.store.current_snapshot());
            }
            AppEvent::HistoryCleared(result) => {
                if !self.history.is_mounted() {
                    debug!("History screen gone before clear finished");
                    self.history.report_clear_failure(&result);
                    return;
                }
                self.history.on_clear_finished(&result, &self.store.current_snapshot());
            }
            AppEvent::LookupRecorded(result) => self.search.on_recorded(&result),
        }
    }

    /// Context the next key press is interpreted in.
    pub fn keybinding_context(&self) -> KeybindingContext {
        match self.navigator.current() {
            Screen::Search => KeybindingContext::Search,
            Screen::History if self.history.confirmation().is_open() => KeybindingContext::ConfirmClear,
            Screen::History => KeybindingContext::History,
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        // Notices and help swallow the key that closes them.
        if self.history.notice().is_some() || self.search.notice().is_some() {
            self.history.dismiss_notice();
            self.search.dismiss_notice();
            return;
        }
        if self.help.is_visible() {
            self.help.hide();
            return;
        }

        let context = self.keybinding_context();
        if let Some(command) = self.keybindings.lookup(context, key_event) {
            debug!(?command, ?context, "Executing command");
            command.execute(self);
            return;
        }

        if context == KeybindingContext::Search {
            match key_event.code {
                KeyCode::Char(c) => self.search.insert_char(c),
                KeyCode::Backspace => self.search.delete_char(),
                _ => {}
            }
        }
    }

    /// Shows the history screen, mounting its presenter on first entry.
    pub fn open_history(&mut self) {
        if !self.history.is_mounted() {
            let sender = self.events.sender();
            self.history
                .mount(self.navigator.visibility(), move || sender.send(AppEvent::HistoryVisible));
        }
        self.navigator.push(Screen::History);
    }

    /// Dispatches a reload of the history for the now visible screen.
    fn reload_history(&mut self) {
        self.history.on_visible();
        let load = self.store.load();
        let sender = self.events.sender();
        tokio::spawn(async move {
            sender.send(AppEvent::HistoryLoaded(load.await));
        });
    }

    /// Leaves the current screen.
    pub fn back(&mut self) {
        if self.navigator.pop() == Some(Screen::History) {
            self.history.unmount();
        }
    }

    pub fn select_entry(&mut self) {
        let snapshot = self.store.current_snapshot();
        if let Some(request) = self.history.select_highlighted(&snapshot) {
            self.navigate(request);
        }
    }

    fn navigate(&mut self, request: NavigationRequest) {
        match request {
            NavigationRequest::PopTo { target, record } => {
                info!(?target, location = %record.name, "Returning selected location");
                let removed = self.navigator.pop_to(target);
                if removed.contains(&Screen::History) {
                    self.history.unmount();
                }
                if target == Screen::Search {
                    self.search.receive(record);
                }
            }
        }
    }

    pub fn request_clear(&mut self) {
        let snapshot = self.store.current_snapshot();
        self.history.request_clear(&snapshot);
    }

    /// Answers the clear prompt, `None` meaning the highlighted option.
    pub fn answer_clear(&mut self, choice: Option<ClearChoice>) {
        let outcome = match choice {
            Some(choice) => self.history.answer_clear(choice),
            None => self.history.answer_focused(),
        };
        if outcome == ConfirmOutcome::Clear {
            let clear = self.store.clear();
            let sender = self.events.sender();
            tokio::spawn(async move {
                sender.send(AppEvent::HistoryCleared(clear.await));
            });
        }
    }

    /// Records the typed location as a new lookup.
    pub fn record_lookup(&mut self) {
        let Some(name) = self.search.take_query() else {
            return;
        };
        let append = self.store.append(LocationRecord::looked_up(name, Utc::now()));
        let sender = self.events.sender();
        tokio::spawn(async move {
            sender.send(AppEvent::LookupRecorded(append.await));
        });
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
