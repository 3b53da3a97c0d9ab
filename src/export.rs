//! Scorecard export
//!
//! The export is a small CSV table: a `Hole` column followed by one column per
//! player, one line per hole. The same text is offered as a download and as
//! the body of a prefilled mail draft.

use std::fmt::Write;

use thiserror::Error;

use crate::round::RoundState;

/// File name offered for the download
pub const EXPORT_FILE_NAME: &str = "golf-scores.csv";

/// Subject line of the mail draft
pub const MAIL_SUBJECT: &str = "Golf scores";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("an email address is required to send the scorecard")]
    MissingRecipient,
    #[error("{0:?} is not an email address")]
    InvalidRecipient(String),
}

/// Render the round as CSV (header plus one line per hole)
pub fn export_text(state: &RoundState) -> String {
    let mut out = String::from("Hole");
    for player in 0..state.num_players as usize {
        out.push(',');
        out.push_str(&csv_field(&state.display_name(player)));
    }
    out.push('\n');

    for hole in 0..state.num_holes as usize {
        let _ = write!(out, "{}", hole + 1);
        for row in &state.players {
            let _ = write!(out, ",{}", row.get(hole).copied().unwrap_or(0));
        }
        out.push('\n');
    }
    out
}

/// Build a `mailto:` URL carrying the export as its body
pub fn mail_draft(recipient: &str, state: &RoundState) -> Result<String, ExportError> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return Err(ExportError::MissingRecipient);
    }
    if !recipient.contains('@') || recipient.contains(char::is_whitespace) {
        return Err(ExportError::InvalidRecipient(recipient.to_string()));
    }

    Ok(format!(
        "mailto:{}?subject={}&body={}",
        encode(recipient).replace("%40", "@"),
        encode(MAIL_SUBJECT),
        encode(&export_text(state)),
    ))
}

/// Quote a CSV field when it holds a separator, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Percent-encode for a mailto query; mail clients want `%20`, not `+`
fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
