mod controller;
mod dialogs;
mod dispatch;
mod intake;
mod state;
mod theme;
mod ui;

use chrono::Utc;
use eframe::{egui, App};
use tracing::{info, warn};

pub use controller::{Dialogs, DownloadSink, PageController, SelectionChanged, Settled};
pub use dialogs::{NativeDialogs, SaveToDisk};
pub use dispatch::{Dispatcher, Finished};
pub use intake::{parse_accept, DropZone, DEFAULT_ACCEPT};
pub use state::{ActivePage, Route, Slot, SlotId, Ticket};

pub struct InventoryApp {
    page: ActivePage,
    next_ticket: Ticket,
    dispatcher: Dispatcher,
    dialogs: Box<dyn Dialogs>,
    downloads: Box<dyn DownloadSink>,
}

impl InventoryApp {
    pub fn new(
        start: Route,
        dispatcher: Dispatcher,
        dialogs: Box<dyn Dialogs>,
        downloads: Box<dyn DownloadSink>,
    ) -> Self {
        info!(page = start.path(), "starting inventory reports");
        Self {
            page: ActivePage::new(start, 1),
            next_ticket: 2,
            dispatcher,
            dialogs,
            downloads,
        }
    }

    pub fn page(&self) -> &ActivePage {
        &self.page
    }

    pub fn route(&self) -> Route {
        self.page.route
    }

    /// Swaps in a fresh page. Selections and the in-flight flag of the old page
    /// go away with it.
    pub fn navigate(&mut self, route: Route) {
        if route == self.page.route {
            return;
        }
        info!(from = self.page.route.path(), to = route.path(), "navigating");
        self.page = ActivePage::new(route, self.next_ticket);
        self.next_ticket += 1;
    }

    pub fn select(&mut self, event: SelectionChanged) {
        self.page.apply(event);
    }

    /// Starts a request for the current page if it is ready. Returns whether a
    /// request was sent.
    pub fn submit<F>(&mut self, on_done: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        match self.page.controller.begin_submit() {
            Some(request) => {
                self.dispatcher.dispatch(self.page.ticket, request, on_done);
                true
            }
            None => false,
        }
    }

    /// Settles every finished request that belongs to the page on screen.
    pub fn update_state(&mut self) -> Vec<Settled> {
        let mut settled = Vec::new();
        for finished in self.dispatcher.poll() {
            if finished.ticket != self.page.ticket {
                warn!(
                    ticket = finished.ticket,
                    "discarding report for a page that is no longer open"
                );
                continue;
            }
            settled.push(self.page.controller.finish(
                finished.outcome,
                self.dialogs.as_mut(),
                self.downloads.as_mut(),
                Utc::now(),
            ));
        }
        settled
    }
}

impl App for InventoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state();
        self.render(ctx);
    }
}
