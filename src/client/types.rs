use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

pub const OOXML_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const XLS_MIME: &str = "application/vnd.ms-excel";
const FALLBACK_MIME: &str = "application/octet-stream";

/// Multipart field names expected by the report service.
pub mod field {
    pub const OFFICIAL: &str = "planilha_oficial";
    pub const DIVERGENT: &str = "planilha_divergente";
    pub const WMS: &str = "wms";
}

pub fn mime_for_name(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("xlsx") => OOXML_MIME,
        Some("xls") => XLS_MIME,
        _ => FALLBACK_MIME,
    }
}

/// A spreadsheet picked by the user, held in memory until it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: &'static str,
    content: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        Self {
            mime: mime_for_name(&name),
            name,
            content: content.into(),
        }
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
        let content = fs::read(path)?;
        Ok(Self::new(name, content))
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Binary workbook returned by the report service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl ReportBlob {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Compare,
    BlindTemplate,
    Blank,
}

impl ReportKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            ReportKind::Compare => "/compare",
            ReportKind::BlindTemplate => "/blind-template",
            ReportKind::Blank => "/blank",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    Compare {
        official: SelectedFile,
        divergent: SelectedFile,
    },
    BlindTemplate {
        official: SelectedFile,
    },
    Blank {
        wms: SelectedFile,
    },
}

impl ReportRequest {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportRequest::Compare { .. } => ReportKind::Compare,
            ReportRequest::BlindTemplate { .. } => ReportKind::BlindTemplate,
            ReportRequest::Blank { .. } => ReportKind::Blank,
        }
    }

    /// Form parts in the order they are appended to the multipart body.
    pub fn parts(&self) -> Vec<(&'static str, &SelectedFile)> {
        match self {
            ReportRequest::Compare {
                official,
                divergent,
            } => vec![(field::OFFICIAL, official), (field::DIVERGENT, divergent)],
            ReportRequest::BlindTemplate { official } => vec![(field::OFFICIAL, official)],
            ReportRequest::Blank { wms } => vec![(field::WMS, wms)],
        }
    }
}
