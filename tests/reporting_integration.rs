use redirhound::models::{ScanOutcome, ScanRecord};
use std::fs;

// The export filenames are timestamped at second resolution, so all
// export assertions live in one test to avoid concurrent collisions.
#[test]
fn reporting_exports_create_files() {
    let records = vec![
        ScanRecord::new(
            "https://idp.example/a?redirect_uri=https://app.example/cb",
            ScanOutcome::Flagged,
            Some("SECRET123".to_string()),
        ),
        // Marker words come from attacker-controlled response bodies, so
        // they must not smuggle spreadsheet formulas into the report
        ScanRecord::new(
            "https://idp.example/b?redirect_uri=https://x/cb",
            ScanOutcome::Flagged,
            Some("=HYPERLINK(\"http://evil.com\")".to_string()),
        ),
        ScanRecord::new(
            "https://idp.example/c?redirect_uri=https://x/cb",
            ScanOutcome::Flagged,
            Some("+cmd|'/C calc'!A1".to_string()),
        ),
        ScanRecord::new(
            "https://idp.example/d?state=1",
            ScanOutcome::ExtractionFailed,
            None,
        ),
    ];

    let csv_filename =
        redirhound::reporting::export_csv(&records).expect("CSV export should succeed");
    let md_filename =
        redirhound::reporting::export_markdown(&records).expect("Markdown export should succeed");
    let json_filename =
        redirhound::reporting::export_json(&records).expect("JSON export should succeed");

    let csv = fs::read_to_string(&csv_filename).expect("CSV file should exist");
    assert!(csv.starts_with("URL,Outcome,Marker\n"));
    assert!(csv.contains("SECRET123"));
    assert!(csv.contains("\"'=HYPERLINK"), "CSV should escape = prefix");
    assert!(csv.contains("\"'+cmd"), "CSV should escape + prefix");
    assert!(csv.contains("NO-REDIRECT-URI"));

    let md = fs::read_to_string(&md_filename).expect("Markdown file should exist");
    assert!(md.contains("FLAGGED"));
    assert!(md.contains("`SECRET123`"));

    let json = fs::read_to_string(&json_filename).expect("JSON file should exist");
    assert!(json.contains("\"Flagged\""));
    assert!(json.contains("\"marker_word\""));

    let _ = fs::remove_file(csv_filename);
    let _ = fs::remove_file(md_filename);
    let _ = fs::remove_file(json_filename);
}

#[test]
fn flagged_urls_append_one_per_line() {
    let path = "test_flagged_append.txt";
    let _ = fs::remove_file(path);

    redirhound::reporting::append_flagged("https://one.example/?redirect_uri=https://a/cb", path)
        .expect("first append should succeed");
    redirhound::reporting::append_flagged("https://two.example/?redirect_uri=https://b/cb", path)
        .expect("second append should succeed");

    let content = fs::read_to_string(path).expect("flagged file should exist");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "https://one.example/?redirect_uri=https://a/cb");
    assert_eq!(lines[1], "https://two.example/?redirect_uri=https://b/cb");

    let _ = fs::remove_file(path);
}
