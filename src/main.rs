// Main CLI entry point for redirhound
// Uses clap for argument parsing

use clap::{Arg, Command};
use redirhound::analysis::dynamics::identify_dynamic_parameters;
use redirhound::checker::{check_redirect_substitution, CheckFailure};
use redirhound::fuzz::{FuzzDriver, SystemRunner};
use redirhound::models::{ScanOutcome, ScanRecord};
use redirhound::reporting::{append_flagged, export_csv, export_json, export_markdown};
use redirhound::requester::Requester;
use std::fs;

#[tokio::main]
async fn main() {
    let matches = Command::new("redirhound")
        .version("1.0.0")
        .about("Open-redirect reconnaissance via redirect_uri substitution and response diffing")
        .after_help("EXAMPLES:\n  redirhound --input urls.txt\n  redirhound -i urls.txt -o flagged.txt -n 10 --no-fuzzing\n\nEach input URL is requested N times, query parameters that rotate per\nrequest are redacted, and the response is diffed against the same URL\nwith redirect_uri pointed at a neutral placeholder. Flagged URLs are\nhanded to recollapse + ffuf for bypass fuzzing.")
        .arg(Arg::new("input")
            .short('i')
            .long("input")
            .required(true)
            .num_args(1)
            .help("Newline-delimited file of URLs carrying a redirect_uri parameter"))
        .arg(Arg::new("flagged_output")
            .short('o')
            .long("flagged-output")
            .num_args(1)
            .default_value("flagged_urls.txt")
            .help("Append-only file of URLs whose response changed under substitution"))
        .arg(Arg::new("requests")
            .short('n')
            .long("requests")
            .num_args(1)
            .default_value("10")
            .help("Number of repeated GET requests per URL"))
        .arg(Arg::new("placeholder")
            .long("placeholder")
            .num_args(1)
            .default_value("https://example.com")
            .help("Neutral domain substituted into redirect_uri"))
        .arg(Arg::new("wordlist_tool")
            .long("wordlist-tool")
            .num_args(1)
            .default_value("recollapse")
            .help("External tool that generates bypass candidates for a domain"))
        .arg(Arg::new("fuzz_tool")
            .long("fuzz-tool")
            .num_args(1)
            .default_value("ffuf")
            .help("External fuzzer replayed against the FUZZ slot"))
        .arg(Arg::new("no_fuzzing")
            .long("no-fuzzing")
            .action(clap::ArgAction::SetTrue)
            .help("Flag URLs only; skip the external fuzzing tools"))
        .arg(Arg::new("csv_report")
            .long("csv-report")
            .action(clap::ArgAction::SetTrue)
            .help("Output CSV scan summary (default: on)"))
        .arg(Arg::new("markdown_report")
            .long("markdown-report")
            .action(clap::ArgAction::SetTrue)
            .help("Output Markdown scan summary (default: on)"))
        .arg(Arg::new("json_report")
            .long("json-report")
            .action(clap::ArgAction::SetTrue)
            .help("Output JSON scan summary (default: off)"))
        .get_matches();

    let input = matches.get_one::<String>("input").expect("input is required");
    let flagged_output = matches.get_one::<String>("flagged_output").expect("has default");
    let placeholder = matches.get_one::<String>("placeholder").expect("has default");
    let wordlist_tool = matches.get_one::<String>("wordlist_tool").expect("has default");
    let fuzz_tool = matches.get_one::<String>("fuzz_tool").expect("has default");
    let fuzzing = !matches.get_flag("no_fuzzing");
    let csv_report = matches.get_flag("csv_report")
        || (!matches.get_flag("markdown_report") && !matches.get_flag("json_report"));
    let markdown_report = matches.get_flag("markdown_report")
        || (!matches.get_flag("csv_report") && !matches.get_flag("json_report"));
    let json_report = matches.get_flag("json_report");

    let num_requests = matches
        .get_one::<String>("requests")
        .expect("has default")
        .parse::<usize>()
        .unwrap_or_else(|_| {
            eprintln!("--requests must be a positive integer");
            std::process::exit(2);
        });
    if num_requests == 0 {
        eprintln!("--requests must be a positive integer");
        std::process::exit(2);
    }

    let urls = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Failed to read input file {}: {}", input, e);
        std::process::exit(1);
    });

    let requester = Requester::new(num_requests);
    let runner = SystemRunner;
    let driver = FuzzDriver::new(&runner, wordlist_tool, fuzz_tool);

    let mut results: Vec<ScanRecord> = Vec::new();

    for url in urls.lines() {
        let url = url.trim();
        if url.is_empty() {
            continue;
        }
        println!("Processing URL: {}", url);

        // Step 1: repeated GETs against the unmodified URL
        let original_responses = match requester.get_batch(url).await {
            Some(bodies) => bodies,
            None => {
                println!("Failed to complete request batch for URL: {}", url);
                results.push(ScanRecord::new(url, ScanOutcome::RequestFailed, None));
                continue;
            }
        };

        // Step 2: infer per-request dynamic parameters
        let dynamic_params = identify_dynamic_parameters(&original_responses);
        if !dynamic_params.is_empty() {
            println!("Dynamic parameters: {:?}", dynamic_params);
        }

        // Step 3: substitute the placeholder into redirect_uri and diff
        let report = match check_redirect_substitution(
            &requester,
            url,
            &original_responses,
            &dynamic_params,
            placeholder,
        )
        .await
        {
            Ok(report) => report,
            Err(CheckFailure::NoRedirectParam) => {
                results.push(ScanRecord::new(url, ScanOutcome::ExtractionFailed, None));
                continue;
            }
            Err(CheckFailure::VariantRequestFailed) => {
                println!("Failed to complete variant request batch for URL: {}", url);
                results.push(ScanRecord::new(url, ScanOutcome::RequestFailed, None));
                continue;
            }
        };

        if !report.has_diff {
            println!("[NO-DIFF] {}", url);
            results.push(ScanRecord::new(url, ScanOutcome::NoDifference, None));
            continue;
        }

        // Step 4: record the flagged URL
        match report.marker_word.as_deref() {
            Some(marker) => println!("[FLAGGED] {} (marker: {})", url, marker),
            None => println!("[FLAGGED] {} (no marker word found)", url),
        }
        if let Err(e) = append_flagged(url, flagged_output) {
            eprintln!("Failed to record flagged URL {}: {}", url, e);
        }

        // Step 5: hand off to the external fuzzing tools
        if fuzzing {
            match driver.run(url, &report) {
                Ok(Some(output_path)) => println!("Fuzzer output: {}", output_path),
                Ok(None) => {}
                Err(e) => eprintln!("Fuzzing failed for {}: {}", url, e),
            }
        }

        results.push(ScanRecord::new(url, ScanOutcome::Flagged, report.marker_word));
    }

    // Export results
    if csv_report {
        match export_csv(&results) {
            Ok(path) => println!("CSV report: {}", path),
            Err(e) => eprintln!("CSV export failed: {}", e),
        }
    }
    if markdown_report {
        match export_markdown(&results) {
            Ok(path) => println!("Markdown report: {}", path),
            Err(e) => eprintln!("Markdown export failed: {}", e),
        }
    }
    if json_report {
        match export_json(&results) {
            Ok(path) => println!("JSON report: {}", path),
            Err(e) => eprintln!("JSON export failed: {}", e),
        }
    }
}
