use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{ClientError, ReportBlob, ReportRequest, SelectedFile, OOXML_MIME};
use crate::config::ClientConfig;

/// Anything that can turn a [`ReportRequest`] into a workbook.
#[async_trait::async_trait]
pub trait ReportBackend: Send + Sync {
    async fn generate(&self, request: &ReportRequest) -> Result<ReportBlob, ClientError>;
}

/// FastAPI puts the failure reason under `detail`, either as a string or as a
/// list of validation errors.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct ReportClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ReportClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { config, http })
    }

    pub async fn compare(
        &self,
        official: &SelectedFile,
        divergent: &SelectedFile,
    ) -> Result<ReportBlob, ClientError> {
        self.generate(&ReportRequest::Compare {
            official: official.clone(),
            divergent: divergent.clone(),
        })
        .await
    }

    pub async fn blind_template(&self, official: &SelectedFile) -> Result<ReportBlob, ClientError> {
        self.generate(&ReportRequest::BlindTemplate {
            official: official.clone(),
        })
        .await
    }

    pub async fn blank(&self, wms: &SelectedFile) -> Result<ReportBlob, ClientError> {
        self.generate(&ReportRequest::Blank { wms: wms.clone() }).await
    }

    fn build_form(request: &ReportRequest) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for (field, file) in request.parts() {
            let part = Part::bytes(file.content().to_vec())
                .file_name(file.name.clone())
                .mime_str(file.mime)
                .map_err(ClientError::Form)?;
            form = form.part(field, part);
        }
        Ok(form)
    }

    fn map_transport(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.config.timeout)
        } else {
            ClientError::Transport(err)
        }
    }
}

#[async_trait::async_trait]
impl ReportBackend for ReportClient {
    async fn generate(&self, request: &ReportRequest) -> Result<ReportBlob, ClientError> {
        let url = self.config.endpoint(request.kind().endpoint());
        let form = Self::build_form(request)?;
        info!(%url, "requesting report");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, OOXML_MIME)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let detail = extract_detail(&body);
            warn!(%status, detail = detail.as_deref().unwrap_or(""), "report request rejected");
            return Err(ClientError::Status { status, detail });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await.map_err(|e| self.map_transport(e))?;
        debug!(bytes = bytes.len(), ?content_type, "report received");

        Ok(ReportBlob {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

fn extract_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_read_from_fastapi_errors() {
        assert_eq!(
            extract_detail(br#"{"detail":"Erro ao processar: coluna ausente"}"#).as_deref(),
            Some("Erro ao processar: coluna ausente")
        );
        assert_eq!(
            extract_detail(br#"{"detail":[{"loc":["body","wms"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body","wms"]}]"#)
        );
        assert_eq!(extract_detail(b"Internal Server Error"), None);
        assert_eq!(extract_detail(br#"{"detail":null}"#), None);
    }
}
