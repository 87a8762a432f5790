use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::state::{Route, SlotId};
use crate::client::{ClientError, ReportBlob, ReportRequest, SelectedFile};
use crate::utils::report_filename;

/// Blocking confirmation and alert capability.
pub trait Dialogs {
    fn confirm(&mut self, message: &str) -> bool;
    fn notify(&mut self, message: &str);
}

/// Takes a finished report and puts it somewhere the user can open it.
pub trait DownloadSink {
    fn offer(&mut self, report: &ReportBlob, filename: &str);
}

/// Emitted by a drop zone whenever its selection changes. `file` is `None`
/// after a clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    pub slot: SlotId,
    pub file: Option<SelectedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Downloaded { filename: String },
    Declined,
    Failed,
}

#[derive(Debug)]
pub struct PageController {
    route: Route,
    official: Option<SelectedFile>,
    divergent: Option<SelectedFile>,
    in_flight: bool,
}

impl PageController {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            official: None,
            divergent: None,
            in_flight: false,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn file(&self, slot: SlotId) -> Option<&SelectedFile> {
        match slot {
            SlotId::Official => self.official.as_ref(),
            SlotId::Divergent => self.divergent.as_ref(),
        }
    }

    pub fn apply(&mut self, event: SelectionChanged) {
        if !self.route.slots().iter().any(|slot| slot.id == event.slot) {
            warn!(slot = ?event.slot, route = ?self.route, "selection for a slot this page does not have");
            return;
        }
        match &event.file {
            Some(file) => info!(slot = ?event.slot, name = %file.name, bytes = file.len(), "file selected"),
            None => info!(slot = ?event.slot, "selection cleared"),
        }
        match event.slot {
            SlotId::Official => self.official = event.file,
            SlotId::Divergent => self.divergent = event.file,
        }
    }

    pub fn has_required_files(&self) -> bool {
        self.route
            .slots()
            .iter()
            .all(|slot| self.file(slot.id).is_some())
    }

    pub fn can_submit(&self) -> bool {
        self.has_required_files() && !self.in_flight
    }

    /// Marks the page as submitting and returns the request to send, or `None`
    /// when a slot is empty or a request is already out.
    pub fn begin_submit(&mut self) -> Option<ReportRequest> {
        if !self.can_submit() {
            return None;
        }
        let request = self.build_request()?;
        self.in_flight = true;
        Some(request)
    }

    fn build_request(&self) -> Option<ReportRequest> {
        let request = match self.route {
            Route::Compare => ReportRequest::Compare {
                official: self.official.clone()?,
                divergent: self.divergent.clone()?,
            },
            Route::BlindTemplate => ReportRequest::BlindTemplate {
                official: self.official.clone()?,
            },
            Route::Blank => ReportRequest::Blank {
                wms: self.official.clone()?,
            },
        };
        Some(request)
    }

    /// Settles a finished request: ask before saving a report, alert on
    /// failure. The in-flight flag is cleared whatever the outcome.
    pub fn finish(
        &mut self,
        outcome: Result<ReportBlob, ClientError>,
        dialogs: &mut dyn Dialogs,
        downloads: &mut dyn DownloadSink,
        now: DateTime<Utc>,
    ) -> Settled {
        let settled = self.settle(outcome, dialogs, downloads, now);
        self.in_flight = false;
        settled
    }

    fn settle(
        &self,
        outcome: Result<ReportBlob, ClientError>,
        dialogs: &mut dyn Dialogs,
        downloads: &mut dyn DownloadSink,
        now: DateTime<Utc>,
    ) -> Settled {
        match outcome {
            Ok(report) => {
                if !dialogs.confirm(self.route.confirm_message()) {
                    info!(route = ?self.route, "report download declined");
                    return Settled::Declined;
                }
                let filename = report_filename(self.route.filename_prefix(), now);
                downloads.offer(&report, &filename);
                Settled::Downloaded { filename }
            }
            Err(err) => {
                error!(route = ?self.route, error = %err, "report generation failed");
                dialogs.notify(self.route.failure_message());
                Settled::Failed
            }
        }
    }
}
