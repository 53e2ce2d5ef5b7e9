//! Per-send log record.

use crate::client::CloopenError;
use crate::domain::{TemplateId, TemplateSms};

const ABORTED: &str = "send aborted before completion";

/// Everything known about one `text` call once it is over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendRecord {
    pub phone: String,
    pub template_name: String,
    pub template_id: Option<String>,
    pub error: Option<String>,
    pub response: Option<String>,
    pub http_status: Option<u16>,
}

/// Sink for send records. Called exactly once per `text` call.
pub trait SendLog: Send + Sync {
    fn record(&self, record: &SendRecord);
}

/// Default sink: one `tracing` event on the `cloopen` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSendLog;

impl SendLog for TracingSendLog {
    fn record(&self, record: &SendRecord) {
        tracing::info!(
            target: "cloopen",
            phone = record.phone.as_str(),
            template_name = record.template_name.as_str(),
            template_id = record.template_id.as_deref(),
            error = record.error.as_deref(),
            response = record.response.as_deref(),
            http_status = record.http_status,
            "template sms"
        );
    }
}

/// Fills a [`SendRecord`] as a send progresses and hands it to the sink on drop.
pub(crate) struct SendLogGuard<'a> {
    log: &'a dyn SendLog,
    record: SendRecord,
    finished: bool,
}

impl<'a> SendLogGuard<'a> {
    pub(crate) fn new(log: &'a dyn SendLog, request: &TemplateSms) -> Self {
        Self {
            log,
            record: SendRecord {
                phone: request.to.clone(),
                template_name: request.template_name.clone(),
                template_id: request.explicit_template_id().map(str::to_owned),
                ..SendRecord::default()
            },
            finished: false,
        }
    }

    pub(crate) fn template_id(&mut self, template_id: &TemplateId) {
        self.record.template_id = Some(template_id.as_str().to_owned());
    }

    pub(crate) fn response(&mut self, status: u16, body: &str) {
        self.record.http_status = Some(status);
        self.record.response = Some(body.to_owned());
    }

    /// Record the outcome and emit the record.
    pub(crate) fn finish<T>(mut self, result: Result<T, CloopenError>) -> Result<T, CloopenError> {
        self.record.error = result.as_ref().err().map(ToString::to_string);
        self.finished = true;
        result
    }
}

impl Drop for SendLogGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.record.error = Some(ABORTED.to_owned());
        }
        self.log.record(&self.record);
    }
}
