//! CLI command implementations
//!
//! Every command loads the config first. Commands other than `init`
//! refuse to run against a directory `init` has not prepared.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::json;

use crate::api::ApiHandler;
use crate::config::Config;
use crate::forum::Forum;
use crate::model::ForumData;
use crate::observability::{Event, Logger};
use crate::storage::{write_json as store_json, FileMedium};
use crate::store::FORUM_DATA_KEY;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_requests, write_error, write_json, write_response};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    match cmd {
        Command::Init { config } => init(&config, &mut stdout.lock()),
        Command::Exec { config } => exec(&config, &mut stdin.lock(), &mut stdout.lock()),
        Command::Serve { config } => serve(&config, stdin.lock(), &mut stdout.lock()),
        Command::Whoami { config } => whoami(&config, &mut stdout.lock()),
    }
}

/// Create the data directory and an empty forum aggregate
pub fn init<W: Write>(config_path: &Path, out: &mut W) -> CliResult<()> {
    let config = Config::load(config_path)?;

    if is_initialized(config.data_path()) {
        return Err(CliError::already_initialized());
    }

    let medium = FileMedium::open(config.data_path()).map_err(|e| {
        CliError::config_error(format!(
            "Failed to create directory {}: {}",
            config.data_path().display(),
            e
        ))
    })?;
    store_json(&medium, FORUM_DATA_KEY, &ForumData::new())
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    write_response(
        out,
        json!({"initialized": true, "data_dir": config.data_path().display().to_string()}),
    )
}

/// Execute one request from `input` and write its response
pub fn exec<R: BufRead, W: Write>(config_path: &Path, input: &mut R, out: &mut W) -> CliResult<()> {
    let handler = boot(config_path)?;

    let request = read_request(input)?;
    let response = handler.handle_value(request);
    write_json(out, &response.to_json())
}

/// Answer requests line by line until `input` is exhausted
pub fn serve<R: BufRead, W: Write>(config_path: &Path, input: R, out: &mut W) -> CliResult<()> {
    let (handler, log_events) = boot_with_flag(config_path)?;

    if log_events {
        Logger::info(Event::Serving.as_str(), &[]);
    }

    let mut served: u64 = 0;
    for line in read_requests(input) {
        match line {
            Ok(request) => {
                let response = handler.handle(&request);
                write_json(out, &response.to_json())?;
                served += 1;
            }
            Err(e) => {
                write_error(out, e.code_str(), e.message())?;
                break;
            }
        }
    }

    if log_events {
        let served = served.to_string();
        Logger::info(Event::ShutdownComplete.as_str(), &[("requests", served.as_str())]);
    }
    Ok(())
}

/// Print the client identity, creating it on first use
pub fn whoami<W: Write>(config_path: &Path, out: &mut W) -> CliResult<()> {
    let handler = boot(config_path)?;
    let user = handler.forum().initialize_identity()?;
    write_response(out, serde_json::to_value(user)?)
}

fn boot(config_path: &Path) -> CliResult<ApiHandler> {
    boot_with_flag(config_path).map(|(handler, _)| handler)
}

fn boot_with_flag(config_path: &Path) -> CliResult<(ApiHandler, bool)> {
    let config = Config::load(config_path)?;

    if !is_initialized(config.data_path()) {
        return Err(CliError::not_initialized());
    }

    let forum = Forum::open(&config)?;
    Ok((ApiHandler::new(forum), config.log_events))
}

/// Check if a data directory is initialized
fn is_initialized(data_dir: &Path) -> bool {
    FileMedium::at(data_dir).path_for(FORUM_DATA_KEY).exists()
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use crate::storage::{read_json, Medium};
    use serde_json::Value;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_config(temp_dir: &TempDir) -> std::path::PathBuf {
        let config_path = temp_dir.path().join("quorum.json");
        let data_dir = temp_dir.path().join("data");

        let config = json!({
            "data_dir": data_dir.to_string_lossy()
        });

        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    fn lines(out: &[u8]) -> Vec<Value> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn initialized(temp_dir: &TempDir) -> std::path::PathBuf {
        let config_path = create_config(temp_dir);
        init(&config_path, &mut Vec::new()).unwrap();
        config_path
    }

    #[test]
    fn test_init_creates_empty_aggregate() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);
        let mut out = Vec::new();

        init(&config_path, &mut out).unwrap();

        assert_eq!(lines(&out)[0]["data"]["initialized"], true);
        let medium = FileMedium::at(&temp_dir.path().join("data"));
        let data: Option<ForumData> = read_json(&medium, FORUM_DATA_KEY).unwrap();
        assert_eq!(data, Some(ForumData::new()));
        assert!(medium.read("current_user").unwrap().is_none());
    }

    #[test]
    fn test_init_refuses_reinit() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = initialized(&temp_dir);

        let result = init(&config_path, &mut Vec::new());
        assert_eq!(
            result.unwrap_err().code(),
            &CliErrorCode::AlreadyInitialized
        );
    }

    #[test]
    fn test_exec_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        let mut input = Cursor::new("{\"op\": \"list_questions\"}\n");
        let result = exec(&config_path, &mut input, &mut Vec::new());
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::NotInitialized);
    }

    #[test]
    fn test_missing_config_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = whoami(&temp_dir.path().join("nope.json"), &mut Vec::new());
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_whoami_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = initialized(&temp_dir);

        let mut first = Vec::new();
        let mut second = Vec::new();
        whoami(&config_path, &mut first).unwrap();
        whoami(&config_path, &mut second).unwrap();

        assert_eq!(first, second);
        let user = &lines(&first)[0]["data"];
        assert!(user["displayName"].as_str().unwrap().starts_with("Anonymous User #"));
    }

    #[test]
    fn test_serve_answers_each_line() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = initialized(&temp_dir);

        let input = [
            json!({
                "op": "create_question",
                "title": "Why does X fail",
                "content": "It fails with an opaque error every time.",
                "raw_tags": "debugging, x",
            })
            .to_string(),
            String::new(),
            "not json".to_string(),
            json!({"op": "search_questions", "query": "debug"}).to_string(),
        ]
        .join("\n");

        let mut out = Vec::new();
        serve(&config_path, Cursor::new(input), &mut out).unwrap();

        let responses = lines(&out);
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["status"], "ok");
        assert_eq!(responses[0]["data"]["tags"], json!(["debugging", "x"]));
        assert_eq!(responses[1]["code"], "QRM_INVALID_REQUEST");
        assert_eq!(responses[2]["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_exec_persists_between_runs() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = initialized(&temp_dir);

        let create = json!({
            "op": "create_question",
            "title": "Does state survive restarts?",
            "content": "Each exec opens the engine from scratch.",
        });
        let mut out = Vec::new();
        exec(&config_path, &mut Cursor::new(create.to_string()), &mut out).unwrap();
        let id = lines(&out)[0]["data"]["id"].as_str().unwrap().to_string();

        let get = json!({"op": "get_question", "id": id});
        let mut out = Vec::new();
        exec(&config_path, &mut Cursor::new(get.to_string()), &mut out).unwrap();
        assert_eq!(
            lines(&out)[0]["data"]["title"],
            "Does state survive restarts?"
        );
    }
}
