//! # Corrugate CLI
//!
//! ```text
//! corrugate_cli <workbook.json> [request-id]   quote one or all saved requests
//! corrugate_cli --demo                         print the worked examples
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr (`RUST_LOG`).

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use corrugate_cli::file_io::load_workbook_with_lock_check;
use corrugate_cli::workbook::Workbook;
use corrugate_cli::{demo, logging};
use corrugate_core::errors::{CalcError, CalcResult};
use corrugate_core::workflow::{quote_from_repository, QuoteOutcome};

const USAGE: &str = "usage: corrugate_cli <workbook.json> [request-id]\n       corrugate_cli --demo";

#[derive(Debug, Serialize)]
struct QuotedRequest {
    request_id: Uuid,
    #[serde(flatten)]
    result: RequestResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum RequestResult {
    Outcome(QuoteOutcome),
    Error { code: &'static str, error: CalcError },
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn quote_request(workbook: &Workbook, id: Uuid) -> QuotedRequest {
    let result = match workbook.get_request(&id) {
        None => Err(CalcError::not_found("Request", id.to_string())),
        Some(request) => quote_from_repository(workbook, request, &workbook.settings),
    };
    let result = match result {
        Ok(outcome) => RequestResult::Outcome(outcome),
        Err(error) => {
            warn!(request_id = %id, code = error.error_code(), "request failed: {}", error);
            RequestResult::Error { code: error.error_code(), error }
        }
    };
    QuotedRequest { request_id: id, result }
}

fn run_workbook(path: &Path, request_id: Option<&str>) -> CalcResult<()> {
    let (workbook, holder) = load_workbook_with_lock_check(path)?;
    if let Some(holder) = holder {
        info!(user = %holder.user_id, machine = %holder.machine, "workbook is open elsewhere; reading only");
    }
    workbook.master.validate()?;

    match request_id {
        Some(raw) => {
            let id = Uuid::parse_str(raw)
                .map_err(|e| CalcError::invalid_input("request-id", raw, e.to_string()))?;
            let quoted = quote_request(&workbook, id);
            if let RequestResult::Error { error, .. } = &quoted.result {
                return Err(error.clone());
            }
            print_json(&quoted)
        }
        None => {
            let quoted: Vec<_> = workbook
                .sorted_requests()
                .into_iter()
                .map(|(id, _)| quote_request(&workbook, *id))
                .collect();
            info!(count = quoted.len(), "workbook quoted");
            print_json(&quoted)
        }
    }
}

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.as_slice() {
        [flag] if flag == "--demo" => demo::run().and_then(|reports| print_json(&reports)),
        [flag] if flag == "--help" || flag == "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        [path] => run_workbook(Path::new(path), None),
        [path, request_id] => run_workbook(Path::new(path), Some(request_id)),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), "{}", err);
            eprintln!("{}", json!({ "code": err.error_code(), "error": err }));
            ExitCode::FAILURE
        }
    }
}
