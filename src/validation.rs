use std::{fmt::Display, sync::OnceLock};

use log::debug;
use regex::Regex;

use crate::message::MessageRequest;

/// Prefix put in front of every violation when displayed to the user
const BULLET: &str = "\n\t❌  ";

/// Ordered list of rule violations, one entry per failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for msg in &self.0 {
            write!(f, "{BULLET}{msg}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks the request against every rule and collects all violations in rule order
pub fn validate(request: &MessageRequest) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    required_email("To", request.to.as_deref(), &mut errors);
    required_email("From", request.from.as_deref(), &mut errors);
    optional_email("Reply", request.reply.as_deref(), &mut errors);
    optional_email("Cc", request.cc.as_deref(), &mut errors);
    optional_email("Bcc", request.bcc.as_deref(), &mut errors);

    if is_blank(request.subject.as_deref()) {
        errors.push(blank("Subject"));
    }

    let no_html = request
        .htmlpath
        .as_ref()
        .map_or(true, |path| path.as_os_str().is_empty());
    if is_blank(request.text.as_deref()) && no_html {
        errors.push("Text or htmlpath must be provided".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!("Request failed validation with {} violation(s)", errors.len());
        Err(ValidationErrors(errors))
    }
}

/// Accepts `Name <user@host>`, `"Name" <user@host>`, `<user@host>` and `user@host`
pub fn is_valid_email(value: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let re = CELL.get_or_init(|| {
        debug!("Compiling regex for email addresses");
        Regex::new(r#"^(?:"?([^"]*)"?\s)?(?:<?(.+@[^>]+)>?)$"#).expect("failed to compile regex")
    });
    re.is_match(value)
}

fn required_email(field: &str, value: Option<&str>, errors: &mut Vec<String>) {
    match value {
        Some(value) if !value.trim().is_empty() => {
            if !is_valid_email(value) {
                errors.push(not_email(field));
            }
        }
        _ => errors.push(blank(field)),
    }
}

fn optional_email(field: &str, value: Option<&str>, errors: &mut Vec<String>) {
    if let Some(value) = value {
        if !value.is_empty() && !is_valid_email(value) {
            errors.push(not_email(field));
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn blank(field: &str) -> String {
    format!("{field} can't be blank")
}

fn not_email(field: &str) -> String {
    format!("{field} is not a valid email")
}
