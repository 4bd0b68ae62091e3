//! Engine setup payload.
//!
//! The engine opens a session by pushing one JSON document:
//!
//! ```json
//! {
//!   "input": "",
//!   "home_input": "",
//!   "delimiters": ["/", "."],
//!   "big_delimiters": [" "],
//!   "pattern_types": ["@*", "@/"]
//! }
//! ```
//!
//! Every field defaults; a malformed payload degrades to the defaults with a
//! warning instead of an error, so a broken engine cannot wedge the widget
//! before it becomes interactive. Normalization guarantees the space
//! character is present in both delimiter sets.

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize, Default)]
struct SetupFile {
    #[serde(default)]
    input: String,
    #[serde(default)]
    home_input: String,
    #[serde(default)]
    delimiters: Vec<String>,
    #[serde(default)]
    big_delimiters: Vec<String>,
    #[serde(default)]
    pattern_types: Vec<String>,
}

/// Normalized session parameters, read-only after setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupParams {
    /// Initial input prepended to anything typed before readiness.
    pub input: String,
    /// Target of the jump-home command; empty disables it.
    pub home_input: String,
    /// Word-erase boundary characters. Always contains `' '`.
    pub delimiters: Vec<char>,
    /// Big-word-erase boundary characters. Always contains `' '`.
    pub big_delimiters: Vec<char>,
    /// Cyclic prefix toggle states, in order.
    pub pattern_types: Vec<String>,
}

impl Default for SetupParams {
    fn default() -> Self {
        SetupFile::default().into()
    }
}

impl From<SetupFile> for SetupParams {
    fn from(file: SetupFile) -> Self {
        Self {
            input: file.input,
            home_input: file.home_input,
            delimiters: normalize_delimiters(&file.delimiters),
            big_delimiters: normalize_delimiters(&file.big_delimiters),
            pattern_types: file
                .pattern_types
                .into_iter()
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

/// Parse the raw setup JSON. Never fails: malformed input yields the default
/// parameters (space-only delimiter sets, no patterns).
pub fn parse_setup(payload: &str) -> SetupParams {
    match serde_json::from_str::<SetupFile>(payload) {
        Ok(file) => file.into(),
        Err(error) => {
            warn!(
                target: "config.setup",
                payload_len = payload.len(),
                %error,
                "malformed_setup_payload"
            );
            SetupParams::default()
        }
    }
}

/// Collapse delimiter strings to their first character, dropping empties and
/// duplicates, and guarantee the space delimiter is present.
fn normalize_delimiters(raw: &[String]) -> Vec<char> {
    let mut delimiters: Vec<char> = Vec::with_capacity(raw.len() + 1);
    for entry in raw {
        if let Some(c) = entry.chars().next()
            && !delimiters.contains(&c)
        {
            delimiters.push(c);
        }
    }
    if !delimiters.contains(&' ') {
        delimiters.push(' ');
    }
    delimiters
}
