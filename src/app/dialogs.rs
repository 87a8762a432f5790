use std::fs;
use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::{error, info};

use super::controller::{Dialogs, DownloadSink};
use crate::client::ReportBlob;

const DIALOG_TITLE: &str = "Inventory Automation";

/// Only an explicit "Yes" counts; closing the box is a refusal.
fn confirmed(result: MessageDialogResult) -> bool {
    result == MessageDialogResult::Yes
}

/// Native message boxes.
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        let dialog = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(DIALOG_TITLE)
            .set_description(message)
            .set_buttons(MessageButtons::YesNo);
        confirmed(dialog.show())
    }

    fn notify(&mut self, message: &str) {
        let dialog = MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(DIALOG_TITLE)
            .set_description(message)
            .set_buttons(MessageButtons::Ok);
        let _ = dialog.show();
    }
}

/// Writes reports to disk, either straight into a configured directory or to
/// a location picked in a save dialog.
pub struct SaveToDisk {
    directory: Option<PathBuf>,
}

impl SaveToDisk {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    fn target(&self, filename: &str) -> Option<PathBuf> {
        match &self.directory {
            Some(dir) => Some(dir.join(filename)),
            None => FileDialog::new()
                .set_file_name(filename)
                .add_filter("Planilha Excel", &["xlsx"])
                .save_file(),
        }
    }
}

impl DownloadSink for SaveToDisk {
    fn offer(&mut self, report: &ReportBlob, filename: &str) {
        let Some(path) = self.target(filename) else {
            info!(filename, "save dialog dismissed");
            return;
        };
        match fs::write(&path, &report.bytes) {
            Ok(()) => info!(path = %path.display(), bytes = report.len(), "report saved"),
            Err(err) => error!(path = %path.display(), error = %err, "failed to save report"),
        }
    }
}
