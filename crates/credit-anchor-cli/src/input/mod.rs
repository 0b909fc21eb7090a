pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// JSON payload from `--input` when given, otherwise from piped stdin.
///
/// `Ok(None)` means neither source supplied anything and the caller should
/// fall back to individual flags.
pub fn read_payload<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Like [`read_payload`] but the payload is mandatory.
pub fn require_payload<T: DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    read_payload(path)?.ok_or_else(|| format!("{what} requires --input <file> or JSON on stdin").into())
}
