//! Implementation of `otzar search`.

use std::process::ExitCode;

use otzar_index::{DEFAULT_LIMIT, SearchRequest, Searcher};

use crate::cli::args::SearchCommand;

/// Runs one search request and prints the JSON response.
pub fn run(cmd: &SearchCommand) -> ExitCode {
    let searcher = match Searcher::open(&cmd.index) {
        Ok(searcher) => searcher,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let request = SearchRequest {
        query: cmd.query.clone(),
        limit: cmd.limit.unwrap_or(DEFAULT_LIMIT),
        book_filter: cmd.book.clone(),
        category_filter: cmd.category.clone(),
        wildcard_mode: cmd.wildcard,
    };

    let response = searcher.search(&request);

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            return ExitCode::FAILURE;
        }
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
