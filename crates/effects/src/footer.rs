//! Firmware version footer
//!
//! Fetches `/info.json` once and writes `Firmware v<version> - BattBrrr
//! Controller` into the footer element. Any failure leaves the page's
//! fallback text alone. Outcomes can be mirrored to a reporter channel.

use std::future::Future;

use futures::channel::mpsc::UnboundedSender;
use tracing::debug;

use crate::error::FooterError;

/// Endpoint serving the controller info document
pub const VERSION_PATH: &str = "/info.json";
pub const PRODUCT_NAME: &str = "BattBrrr Controller";

/// Raw answer from the version endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoReply {
    pub status: u16,
    pub body: String,
}

impl InfoReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Label written on success, or why nothing was written
pub type FooterOutcome = Result<String, FooterError>;

pub fn format_label(version: &str) -> String {
    format!("Firmware v{version} - {PRODUCT_NAME}")
}

/// Turn a transport result into the footer label.
///
/// `version` must be a non-empty JSON string. Any other shape (absent,
/// null, numbers, booleans, arrays, objects, `""`) counts as missing.
pub fn resolve_label(reply: Result<InfoReply, FooterError>) -> FooterOutcome {
    let reply = reply?;
    if !reply.is_success() {
        return Err(FooterError::Status(reply.status));
    }

    let doc: serde_json::Value =
        serde_json::from_str(&reply.body).map_err(|e| FooterError::Malformed(e.to_string()))?;

    let version = match doc.get("version") {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(FooterError::MissingVersion),
    };

    Ok(format_label(&version))
}

/// Where the label ends up (the `#fwFooter` element in the browser)
pub trait TextSink {
    fn set_text(&mut self, text: &str);
}

impl TextSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

pub struct Footer<S> {
    sink: S,
    reporter: Option<UnboundedSender<FooterOutcome>>,
}

impl<S: TextSink> Footer<S> {
    pub const fn new(sink: S) -> Self {
        Self { sink, reporter: None }
    }

    /// Mirror every outcome to `reporter`
    #[must_use]
    pub fn with_reporter(mut self, reporter: UnboundedSender<FooterOutcome>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Write the label if `reply` carries a usable version. Returns whether
    /// the sink was touched.
    pub fn apply(&mut self, reply: Result<InfoReply, FooterError>) -> bool {
        let outcome = resolve_label(reply);
        let written = match &outcome {
            Ok(label) => {
                self.sink.set_text(label);
                true
            }
            Err(e) => {
                debug!(error = %e, "footer left unchanged");
                false
            }
        };

        if let Some(reporter) = &self.reporter {
            // Receiver may be gone; reporting is best effort
            let _ = reporter.unbounded_send(outcome);
        }
        written
    }

    /// Await `fetch` and apply its result
    pub async fn load<F>(&mut self, fetch: F) -> bool
    where
        F: Future<Output = Result<InfoReply, FooterError>>,
    {
        let reply = fetch.await;
        self.apply(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("1.2.3"), "Firmware v1.2.3 - BattBrrr Controller");
    }

    #[test]
    fn test_resolve_label_success() {
        let label = resolve_label(Ok(InfoReply::ok(r#"{"version":"1.2.3","rssi":-60}"#)));
        assert_eq!(label.unwrap(), "Firmware v1.2.3 - BattBrrr Controller");
    }

    #[test]
    fn test_resolve_label_rejects_non_string_versions() {
        for body in [
            r#"{"version":2}"#,
            r#"{"version":1.0}"#,
            r#"{"version":1e2}"#,
            r#"{"version":true}"#,
            r#"{"version":[1]}"#,
            r#"{"version":{"major":1}}"#,
        ] {
            assert_eq!(
                resolve_label(Ok(InfoReply::ok(body))),
                Err(FooterError::MissingVersion),
                "body {body}"
            );
        }
    }

    #[test]
    fn test_resolve_label_missing_versions() {
        for body in [r#"{}"#, r#"{"version":""}"#, r#"{"version":null}"#, "null", "[]"] {
            assert_eq!(
                resolve_label(Ok(InfoReply::ok(body))),
                Err(FooterError::MissingVersion),
                "body {body}"
            );
        }
    }

    #[test]
    fn test_resolve_label_status() {
        let reply = InfoReply { status: 404, body: r#"{"version":"1"}"#.into() };
        assert_eq!(resolve_label(Ok(reply)), Err(FooterError::Status(404)));
    }

    #[test]
    fn test_resolve_label_network() {
        let err = FooterError::Network("offline".into());
        assert_eq!(resolve_label(Err(err.clone())), Err(err));
    }
}
