//! JSON I/O handling for CLI
//!
//! - Input: one JSON object per line
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read one JSON request line
pub fn read_request<R: BufRead>(reader: &mut R) -> CliResult<Value> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&line)?)
}

/// Non-blank request lines until end of input
pub fn read_requests<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<String>> {
    reader
        .lines()
        .map(|line| line.map_err(CliError::from))
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
}

pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    write_json(writer, &json!({"status": "ok", "data": data}).to_string())
}

pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({"status": "error", "code": code, "message": message});
    write_json(writer, &response.to_string())
}

/// Write a raw JSON string followed by a newline
pub fn write_json<W: Write>(writer: &mut W, json_str: &str) -> CliResult<()> {
    writeln!(writer, "{}", json_str)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_request() {
        let mut input = Cursor::new("{\"op\": \"current_user\"}\n{\"op\": \"ignored\"}\n");
        let value = read_request(&mut input).unwrap();
        assert_eq!(value["op"], "current_user");
    }

    #[test]
    fn test_read_request_rejects_empty() {
        let err = read_request(&mut Cursor::new("\n")).unwrap_err();
        assert_eq!(err.code_str(), "QRM_CLI_IO_ERROR");
    }

    #[test]
    fn test_read_requests_skips_blank_lines() {
        let lines: Vec<String> = read_requests(Cursor::new("a\n\n  \nb\n"))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_write_error_shape() {
        let mut out = Vec::new();
        write_error(&mut out, "QRM_CLI_IO_ERROR", "closed").unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, json!({"status": "error", "code": "QRM_CLI_IO_ERROR", "message": "closed"}));
        assert!(out.ends_with(b"\n"));
    }
}
