// SPDX-License-Identifier: MIT OR Apache-2.0
//! oisin CLI binary - compare JSON documents from files or live APIs

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use oisin_cli::keys::candidate_keys_by_path;
use oisin_cli::render::{OutputFormat, render, render_candidates, render_exclusion_hints};
use oisin_cli::source::{FetchOptions, HttpMethod, load_document, parse_header, parse_param};
use oisin_diff::{
    DiffOptions, DiffStatus, FilterSpec, JoinKeySpec, apply_filters, diff_values, normalize,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "oisin")]
#[command(version, about, long_about = None)]
struct Args {
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for oisin CLI
#[derive(Subcommand)]
enum Commands {
    /// Compare two JSON documents and report structural differences
    Compare {
        /// Left document: file path or http(s) URL
        left: String,
        /// Right document: file path or http(s) URL
        right: String,

        /// Join key for an array path, e.g. `$.users=id,uuid`.
        /// An empty key list (`$.users=`) pins positional alignment.
        #[arg(long = "join-key", value_name = "PATH=KEYS")]
        join_keys: Vec<String>,

        /// Retain unchanged entries in the output
        #[arg(long)]
        include_unchanged: bool,

        /// Keep only entries with these statuses (comma separated:
        /// added,removed,changed,unchanged)
        #[arg(long = "only-status", value_delimiter = ',')]
        only_status: Vec<String>,

        /// Drop entries whose path contains this object key
        #[arg(long = "exclude-key", value_name = "KEY")]
        exclude_keys: Vec<String>,

        /// Print a hint (to stderr) naming volatile-looking keys worth
        /// excluding, e.g. timestamps and run identifiers
        #[arg(long)]
        suggest_exclusions: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// HTTP method for URL sources
        #[arg(long, default_value = "GET")]
        method: String,

        /// Request header for URL sources (`Name: value`)
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
        headers: Vec<String>,

        /// Query parameter for GET URL sources (`name=value`)
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        /// JSON request body for POST URL sources
        #[arg(long)]
        body: Option<String>,

        /// Request timeout in seconds for URL sources
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
    /// Suggest candidate join keys for arrays of objects in both documents
    InferKeys {
        /// Left document: file path or http(s) URL
        left: String,
        /// Right document: file path or http(s) URL
        right: String,

        /// Request header for URL sources (`Name: value`)
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
        headers: Vec<String>,

        /// Request timeout in seconds for URL sources
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
    /// Format JSON (pretty-print or compact)
    Format {
        /// JSON file (reads from stdin if not provided)
        file: Option<PathBuf>,
        /// Compact output
        #[arg(short = 'c', long = "compact")]
        compact: bool,
        /// Indentation level
        #[arg(short = 'i', long = "indent", default_value = "2")]
        indent: usize,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Compare { .. } => handle_compare(&args),
        Commands::InferKeys { .. } => handle_infer_keys(&args),
        Commands::Format { .. } => handle_format(&args),
    }
}

fn handle_compare(args: &Args) {
    if let Commands::Compare {
        left,
        right,
        join_keys,
        include_unchanged,
        only_status,
        exclude_keys,
        suggest_exclusions,
        format,
        method,
        headers,
        params,
        body,
        timeout,
    } = &args.command
        && let Err(e) = run_compare(
            left,
            right,
            join_keys,
            *include_unchanged,
            only_status,
            exclude_keys,
            *suggest_exclusions,
            *format,
            &build_fetch_options(method, headers, params, body.as_deref(), *timeout)
                .unwrap_or_else(|e| fail(&e)),
            args.output.as_ref(),
        )
    {
        fail(&e);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_compare(
    left: &str,
    right: &str,
    join_keys: &[String],
    include_unchanged: bool,
    only_status: &[String],
    exclude_keys: &[String],
    suggest_exclusions: bool,
    format: OutputFormat,
    fetch: &FetchOptions,
    output: Option<&PathBuf>,
) -> Result<()> {
    let left_doc = load_document(left, fetch)?;
    let right_doc = load_document(right, fetch)?;

    let mut options = DiffOptions::new().report_unchanged(include_unchanged);
    for raw in join_keys {
        let (path, spec) = parse_join_key(raw)?;
        options = options.with_join_key(path, spec);
    }

    let entries = diff_values(&left_doc, &right_doc, &options)?;
    log::debug!("comparison produced {} entries", entries.len());

    // Hints come from the unfiltered diff so an excluded key still shows up.
    if suggest_exclusions
        && let Some(hint) = render_exclusion_hints(&entries)
    {
        eprintln!("{hint}");
    }

    let mut filter = FilterSpec::new();
    for key in exclude_keys {
        filter = filter.exclude_key(key.clone());
    }
    if !only_status.is_empty() {
        let statuses = only_status
            .iter()
            .map(|s| {
                DiffStatus::parse(s)
                    .ok_or_else(|| anyhow::anyhow!("unknown status filter: {s}"))
            })
            .collect::<Result<Vec<_>>>()?;
        filter = filter.only_statuses(statuses);
    }
    let entries = apply_filters(&entries, &filter);

    write_output(&render(&entries, format)?, output)
}

fn handle_infer_keys(args: &Args) {
    if let Commands::InferKeys {
        left,
        right,
        headers,
        timeout,
    } = &args.command
        && let Err(e) = run_infer_keys(left, right, headers, *timeout, args.output.as_ref())
    {
        fail(&e);
    }
}

fn run_infer_keys(
    left: &str,
    right: &str,
    headers: &[String],
    timeout: u64,
    output: Option<&PathBuf>,
) -> Result<()> {
    let fetch = build_fetch_options("GET", headers, &[], None, timeout)?;
    let left_tree = normalize(&load_document(left, &fetch)?)?;
    let right_tree = normalize(&load_document(right, &fetch)?)?;
    let candidates = candidate_keys_by_path(&left_tree, &right_tree);
    write_output(&render_candidates(&candidates), output)
}

fn handle_format(args: &Args) {
    if let Commands::Format {
        file,
        compact,
        indent,
    } = &args.command
        && let Err(e) = run_format(file.as_ref(), *compact, *indent, args.output.as_ref())
    {
        fail(&e);
    }
}

fn run_format(
    file: Option<&PathBuf>,
    compact: bool,
    indent: usize,
    output: Option<&PathBuf>,
) -> Result<()> {
    let input_str = read_input(file)?;
    let value: serde_json::Value = serde_json::from_str(&input_str)?;
    let text = if compact {
        serde_json::to_string(&value)?
    } else {
        let indent_str = " ".repeat(indent);
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_str.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        String::from_utf8(buf)?
    };
    write_output(&text, output)
}

/// Parse a `--join-key PATH=KEYS` flag into a config path and spec.
fn parse_join_key(raw: &str) -> Result<(String, JoinKeySpec)> {
    let Some((path, keys)) = raw.split_once('=') else {
        bail!("invalid join key (expected `PATH=KEY[,KEY..]`): {raw}");
    };
    if path.is_empty() {
        bail!("invalid join key (empty path): {raw}");
    }
    let spec: JoinKeySpec = keys
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect();
    Ok((path.to_string(), spec))
}

fn build_fetch_options(
    method: &str,
    headers: &[String],
    params: &[String],
    body: Option<&str>,
    timeout: u64,
) -> Result<FetchOptions> {
    Ok(FetchOptions {
        method: HttpMethod::parse(method)?,
        headers: headers
            .iter()
            .map(|h| parse_header(h))
            .collect::<Result<Vec<_>>>()?,
        params: params
            .iter()
            .map(|p| parse_param(p))
            .collect::<Result<Vec<_>>>()?,
        body: body
            .map(|b| serde_json::from_str(b).map_err(|e| anyhow::anyhow!("invalid body: {e}")))
            .transpose()?,
        timeout: Duration::from_secs(timeout),
    })
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    if let Some(p) = path {
        Ok(fs::read_to_string(p)?)
    } else {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Ok(input)
    }
}

fn write_output(text: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                handle.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

fn fail(e: &anyhow::Error) -> ! {
    eprintln!("Error: {e:#}");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_key_flag_parses_path_and_candidates() {
        let (path, spec) = parse_join_key("$.users=id,uuid").unwrap();
        assert_eq!(path, "$.users");
        assert_eq!(spec.candidates(), ["id", "uuid"]);
    }

    #[test]
    fn empty_candidate_list_pins_positional() {
        let (_, spec) = parse_join_key("$.users=").unwrap();
        assert!(spec.is_positional());
    }

    #[test]
    fn malformed_join_key_flags_are_rejected() {
        assert!(parse_join_key("no-equals").is_err());
        assert!(parse_join_key("=id").is_err());
    }

    #[test]
    fn fetch_options_collect_headers_and_params() {
        let fetch = build_fetch_options(
            "post",
            &["Accept: application/json".to_string()],
            &[],
            Some(r#"{"q": 1}"#),
            5,
        )
        .unwrap();
        assert_eq!(fetch.method, HttpMethod::Post);
        assert_eq!(fetch.headers.len(), 1);
        assert_eq!(fetch.body, Some(serde_json::json!({"q": 1})));
        assert_eq!(fetch.timeout, Duration::from_secs(5));
    }
}
