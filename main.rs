use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use itertools::Itertools;
use log::{error, info};
use rayon::prelude::*;
use word_freq::{
    Config, DocumentKind, ResponseBody, TieOrder, UploadHandler, UploadRequest, UploadResponse,
    UploadedFile,
};

const WORD_COLUMN: usize = 15;
const MAX_BAR: usize = 60;

#[derive(Parser)]
#[command(name = "word-freq")]
#[command(version)]
#[command(about = "Word frequencies of text, PDF and HTML documents", long_about = None)]
struct Cli {
    /// Documents to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,

    /// Only show the N most frequent words
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Ordering among equal counts (overrides the config file)
    #[arg(long, value_enum)]
    tie_order: Option<TieOrderArg>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Clone, Copy, ValueEnum)]
enum TieOrderArg {
    FirstSeen,
    Lexicographic,
}

impl From<TieOrderArg> for TieOrder {
    fn from(arg: TieOrderArg) -> Self {
        match arg {
            TieOrderArg::FirstSeen => TieOrder::FirstSeen,
            TieOrderArg::Lexicographic => TieOrder::Lexicographic,
        }
    }
}

/// Wrap a file on disk as a POST upload.
fn read_upload(path: &Path) -> std::io::Result<UploadRequest> {
    let bytes = fs::read(path)?;
    let content_type = DocumentKind::from_path(path).map(|k| k.mime().to_string());
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
    Ok(UploadRequest::post(UploadedFile::new(file_name, content_type, bytes)))
}

fn render(response: &UploadResponse, format: Format, top: Option<usize>) -> serde_json::Result<String> {
    let out = match (&response.body, format) {
        (ResponseBody::Words(words), Format::Table) => {
            let shown = top.unwrap_or(words.words.len());
            // The number of '#' indicates the word frequency.
            words
                .words
                .iter()
                .take(shown)
                .map(|w| {
                    let bar = "#".repeat(w.count.min(MAX_BAR));
                    format!("{:<width$} {:>6} {}", w.word, w.count, bar, width = WORD_COLUMN)
                })
                .join("\n")
        }
        (ResponseBody::Words(words), Format::Json) => {
            let mut words = words.clone();
            if let Some(n) = top {
                words.words.truncate(n);
            }
            serde_json::to_string_pretty(&words)?
        }
        (ResponseBody::Error(err), _) => format!("error ({}): {}", response.status, err.error),
    };
    Ok(out)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(order) = cli.tie_order {
        config.tie_order = order.into();
    }
    let handler = UploadHandler::new(config);

    // Process files in parallel, print in argument order
    let results: Vec<(&PathBuf, UploadResponse)> = cli
        .files
        .par_iter()
        .map(|path| {
            let response = match read_upload(path) {
                Ok(request) => handler.handle(&request),
                Err(e) => {
                    error!("Error reading {}: {}", path.display(), e);
                    UploadResponse::error(500, word_freq::upload::PROCESSING_FAILED)
                }
            };
            (path, response)
        })
        .collect();

    let mut failed = false;
    for (path, response) in &results {
        failed |= response.status != 200;
        if results.len() > 1 {
            println!("--- {} ---", path.display());
        }
        match render(response, cli.format, cli.top) {
            Ok(out) if !out.is_empty() => println!("{}", out),
            Ok(_) => {}
            Err(e) => {
                error!("Failed to render {}: {}", path.display(), e);
                failed = true;
            }
        }
    }
    info!("processed {} file(s)", results.len());

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use word_freq::{WordCount, WordsResponse};

    fn words_response() -> UploadResponse {
        UploadResponse::ok(WordsResponse {
            words: vec![
                WordCount { word: "the".into(), count: 3 },
                WordCount { word: "cat".into(), count: 1 },
            ],
            char_count: 11,
        })
    }

    #[test]
    fn json_output_honours_top() {
        let out = render(&words_response(), Format::Json, Some(1)).unwrap();
        let parsed: WordsResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.words, vec![WordCount { word: "the".into(), count: 3 }]);
        assert_eq!(parsed.char_count, 11);
    }

    #[test]
    fn table_output_has_bars() {
        let out = render(&words_response(), Format::Table, None).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("the "));
        assert!(lines[0].ends_with(" ###"));
    }

    #[test]
    fn error_body_is_rendered() {
        let response = UploadResponse::error(500, "Failed to process file");
        let out = render(&response, Format::Json, None).unwrap();
        assert_eq!(out, "error (500): Failed to process file");
    }
}
