//! Decoding of the `GET /repos/{owner}/{repo}/readme` response body.
//!
//! The API returns file content as base64 with embedded line breaks:
//! ```json
//! { "name": "README.md", "encoding": "base64", "content": "IyBI\nZWxsbw==\n" }
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use vibesite_shared::{Result, VibesiteError};

/// The subset of the contents-API response we use.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReadmePayload {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: String,
}

/// Turn the payload into README text.
///
/// An empty `encoding` means `content` is already plain text.
pub(crate) fn decode_content(payload: ReadmePayload) -> Result<String> {
    match payload.encoding.as_str() {
        "base64" => {
            let cleaned: String = payload
                .content
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();

            let bytes = STANDARD
                .decode(cleaned)
                .map_err(|e| VibesiteError::decode(format!("invalid base64 content: {e}")))?;

            String::from_utf8(bytes)
                .map_err(|e| VibesiteError::decode(format!("README is not UTF-8: {e}")))
        }
        "" => Ok(payload.content),
        other => Err(VibesiteError::decode(format!(
            "unsupported content encoding: {other}"
        ))),
    }
}
