use serde_json::Value;
use std::io::{self, Read};

/// JSON piped on stdin, or `None` for an interactive terminal or empty pipe.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped(buffer: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    tracing::debug!(bytes = trimmed.len(), "reading JSON from stdin");
    Ok(Some(serde_json::from_str(trimmed)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pipe_is_none() {
        assert!(parse_piped("  \n").unwrap().is_none());
    }

    #[test]
    fn test_piped_json_parsed() {
        let v = parse_piped(r#"{"payoff_amount": "5000"}"#).unwrap().unwrap();
        assert_eq!(v["payoff_amount"], "5000");
    }

    #[test]
    fn test_malformed_pipe_errors() {
        assert!(parse_piped("{not json").is_err());
    }
}
