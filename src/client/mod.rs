mod error;
mod http;
mod types;

pub use error::ClientError;
pub use http::{ReportBackend, ReportClient};
pub use types::{
    field, mime_for_name, ReportBlob, ReportKind, ReportRequest, SelectedFile, OOXML_MIME,
};
