// External fuzz tooling driver
// recollapse generates bypass candidates for the redirect domain, ffuf
// replays them into the FUZZ slot with the marker word as match condition

use crate::checker::extract_redirect_target;
use crate::models::DifferenceReport;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::process::Command;

/// Fallback ffuf match string when no marker word was found. Almost
/// certainly matches nothing, but keeps the pipeline from hard-failing.
pub const GENERIC_MATCH: &str = "unique-word";

/// Seam for invoking external tools, so the driver can be exercised in
/// tests without recollapse/ffuf installed.
pub trait ProcessRunner {
    /// Run `program` with `args` and return captured stdout.
    fn invoke(&self, program: &str, args: &[String]) -> std::io::Result<String>;
}

/// Real subprocess runner. Blocks until the child exits.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn invoke(&self, program: &str, args: &[String]) -> std::io::Result<String> {
        let output = Command::new(program).args(args).output()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Hex SHA-256, used only to derive stable output filenames.
fn content_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub struct FuzzDriver<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub wordlist_tool: String,
    pub fuzz_tool: String,
}

impl<'a> FuzzDriver<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, wordlist_tool: &str, fuzz_tool: &str) -> Self {
        Self {
            runner,
            wordlist_tool: wordlist_tool.to_string(),
            fuzz_tool: fuzz_tool.to_string(),
        }
    }

    /// Generate the bypass wordlist for the URL's redirect target, then
    /// fuzz the redirect slot with the report's marker as match condition.
    /// Returns the ffuf output path on success.
    pub fn run(&self, url: &str, report: &DifferenceReport) -> std::io::Result<Option<String>> {
        let domain = match extract_redirect_target(url) {
            Some(domain) => domain,
            None => {
                println!("Failed to extract target from redirect_uri: {}", url);
                return Ok(None);
            }
        };

        println!("Generating bypass wordlist for redirect target: {}", domain);
        let wordlist_path = format!("{}-recollapse.txt", content_hash(domain));
        let wordlist = self.runner.invoke(
            &self.wordlist_tool,
            &["-an".to_string(), domain.to_string()],
        )?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&wordlist_path)?;
        file.write_all(wordlist.as_bytes())?;

        let fuzzed_url = url.replace(domain, "FUZZ");
        let matcher = report.marker_word.as_deref().unwrap_or(GENERIC_MATCH);
        let args: Vec<String> = [
            "-w",
            wordlist_path.as_str(),
            "-u",
            fuzzed_url.as_str(),
            "-mr",
            matcher,
            "-t",
            "10",
            "-p",
            "1.0",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let ffuf_output = self.runner.invoke(&self.fuzz_tool, &args)?;
        let output_path = format!("{}-ffuf.txt", content_hash(url));
        std::fs::write(&output_path, ffuf_output)?;
        Ok(Some(output_path))
    }
}
