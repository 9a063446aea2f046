use std::{fs, path::PathBuf};

use log::debug;
use serde::Serialize;

use crate::error::SendError;

/// The fields of a single email as supplied on the command line
///
/// Required fields are still `Option` so that their absence is reported by
/// validation rather than by the argument parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRequest {
    /// Recipient address
    pub to: Option<String>,

    /// Sender address, may include a display name
    pub from: Option<String>,

    pub subject: Option<String>,

    /// Plain text body
    pub text: Option<String>,

    /// Path to a file whose contents are sent as the HTML body
    pub htmlpath: Option<PathBuf>,

    /// Address replies should be directed to, sent as a `Reply-To` header
    pub reply: Option<String>,

    pub cc: Option<String>,

    pub bcc: Option<String>,

    /// If true the outcome includes the provider's message id and status
    pub verbose: bool,
}

/// Form fields for the Mailgun messages endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MailgunPayload {
    pub from: String,
    pub to: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    /// Mailgun takes custom headers as `h:` prefixed fields
    #[serde(rename = "h:Reply-To", skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Shapes a validated request into the provider payload
///
/// Reads the HTML file if one was given, otherwise does no I/O.
pub fn compose(request: &MessageRequest) -> Result<MailgunPayload, SendError> {
    let html = match &request.htmlpath {
        Some(path) => {
            debug!("Reading HTML body from {path:?}");
            let contents = fs::read_to_string(path).map_err(|source| SendError::LocalResource {
                path: path.clone(),
                source,
            })?;
            Some(contents)
        }
        None => None,
    };

    Ok(MailgunPayload {
        from: request.from.clone().unwrap_or_default(),
        to: request.to.clone().unwrap_or_default(),
        subject: request.subject.clone().unwrap_or_default(),
        text: non_empty(&request.text),
        html,
        cc: non_empty(&request.cc),
        bcc: non_empty(&request.bcc),
        reply_to: non_empty(&request.reply),
    })
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
