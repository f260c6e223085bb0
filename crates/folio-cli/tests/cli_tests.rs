//! Integration tests for the Folio CLI
//!
//! These tests invoke the actual folio-cli binary and verify:
//! - Exit codes (0 = success, 1 = not found / verification failure, 2 = error)
//! - stdout/stderr output
//! - JSON output format
//! - Configuration layering (file, environment, flags)

use std::path::PathBuf;
use std::process::Command;

// ── Helpers ───────────────────────────────────────────────

fn folio_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_folio-cli"))
}

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(format!("../../tests/fixtures/{}", name))
        .to_str()
        .expect("fixture path is UTF-8")
        .to_string()
}

fn folio_command(args: &[&str]) -> Command {
    let mut cmd = Command::new(folio_bin());
    cmd.args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("FOLIO_LOOKUP");
    cmd
}

fn run_folio(args: &[&str]) -> std::process::Output {
    folio_command(args)
        .output()
        .expect("failed to execute folio-cli")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("should be valid JSON")
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_folio(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("folio"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_flag() {
    let output = run_folio(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ── List ──────────────────────────────────────────────────

#[test]
fn test_list_human_output() {
    let output = run_folio(&["list", &fixture("portfolio.json")]);
    assert!(output.status.success(), "list should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let atlas = stdout.find("Atlas Maps").expect("lists Atlas Maps");
    let ledger = stdout.find("Ledger").expect("lists Ledger");
    assert!(atlas < ledger, "listing keeps data file order");
    assert!(stdout.contains("[Fintech]"));
}

#[test]
fn test_list_json_output() {
    let output = run_folio(&["list", "--json", &fixture("portfolio.json")]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    let projects = json.as_array().expect("array of projects");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["id"], "atlas-maps");
    assert_eq!(projects[0]["description"], "Vector maps that stay fast on a phone.");
    assert_eq!(projects[0]["image"], "/images/atlas/card.webp");
    assert_eq!(projects[0]["viewText"], "Read the case study");
    assert_eq!(
        projects[0]["technologies"],
        serde_json::json!(["React", "MapLibre", "Rust", "PostGIS", "Docker", "GitHub Actions"])
    );
    assert_eq!(projects[1]["title"], "Ledger");
    assert_eq!(projects[1]["category"], "Fintech");
    assert_eq!(projects[1]["image"], "/images/ledger/1.webp");
    assert_eq!(projects[1]["liveSite"], "https://ledger.example.com");
    assert_eq!(projects[1]["viewText"], "View Details");
}

#[test]
fn test_list_shapes_agree() {
    let single = stdout_json(&run_folio(&["list", "--json", &fixture("single.json")]));
    assert_eq!(single.as_array().map(Vec::len), Some(1));
    assert_eq!(single[0]["id"], "solo");

    let flat = stdout_json(&run_folio(&["list", "--json", &fixture("flat.json")]));
    assert_eq!(flat[0]["id"], "x1");
    assert_eq!(flat[1]["id"], "project-1");
    assert_eq!(flat[1]["title"], "Bar");
}

#[test]
fn test_list_empty_store() {
    let output = run_folio(&["list", "--json", &fixture("empty.json")]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), serde_json::json!([]));
}

#[test]
fn test_list_quiet() {
    let output = run_folio(&["--quiet", "list", &fixture("portfolio.json")]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "quiet mode should produce no stdout");
}

#[test]
fn test_list_nonexistent_file() {
    let output = run_folio(&["list", "nonexistent.json"]);
    assert_eq!(output.status.code(), Some(2), "missing file should exit 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nonexistent.json"));
}

#[test]
fn test_list_invalid_json() {
    let output = run_folio(&["list", &fixture("invalid.json")]);
    assert_eq!(output.status.code(), Some(2), "invalid JSON should exit 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Parse error"));
}

// ── Show ──────────────────────────────────────────────────

#[test]
fn test_show_found() {
    let output = run_folio(&["show", &fixture("portfolio.json"), "atlas-maps"]);
    assert!(output.status.success(), "show should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Atlas"));
    assert!(stdout.contains("Offline tiles"));
    assert!(stdout.contains("https://github.com/example/atlas"));
    assert!(stdout.contains("Ledger"), "should show next link");
}

#[test]
fn test_show_json() {
    let output = run_folio(&["show", "--json", &fixture("portfolio.json"), "atlas-maps"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["id"], "atlas-maps");
    assert_eq!(json["heroImage"], "/images/atlas/hero.webp");
    assert_eq!(json["titleLead"], "Atlas");
    assert_eq!(json["titleRest"], "Maps");
    assert_eq!(json["roadmap"][1]["step"], "2");
    assert_eq!(json["meta"][1]["value"], "2024");
    assert_eq!(json["next"]["id"], "ledger");
    assert_eq!(json["previous"], serde_json::Value::Null);
}

#[test]
fn test_show_not_found() {
    let output = run_folio(&["show", &fixture("portfolio.json"), "missing"]);
    assert_eq!(output.status.code(), Some(1), "unknown id should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Project not found"));
}

#[test]
fn test_show_not_found_json() {
    let output = run_folio(&["show", "--json", &fixture("portfolio.json"), "missing"]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["found"], false);
    assert_eq!(json["id"], "missing");
}

#[test]
fn test_show_synthesized_id_strict_by_default() {
    let flat = fixture("flat.json");
    assert!(run_folio(&["show", &flat, "x1"]).status.success());
    let output = run_folio(&["show", &flat, "project-1"]);
    assert_eq!(
        output.status.code(),
        Some(1),
        "synthesized ids are not reachable in strict mode"
    );
}

#[test]
fn test_show_synthesized_id_with_listing_lookup() {
    let output = run_folio(&[
        "--lookup",
        "listing",
        "show",
        "--json",
        &fixture("flat.json"),
        "project-1",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["title"], "Bar");
}

#[test]
fn test_show_lookup_from_environment() {
    let output = folio_command(&["show", &fixture("flat.json"), "project-1"])
        .env("FOLIO_LOOKUP", "listing")
        .output()
        .expect("failed to execute folio-cli");
    assert!(output.status.success(), "FOLIO_LOOKUP=listing should apply");
}

#[test]
fn test_invalid_lookup_flag() {
    let output = run_folio(&["--lookup", "fuzzy", "list", &fixture("flat.json")]);
    assert_eq!(output.status.code(), Some(2), "clap rejects bad values with 2");
}

// ── Normalize ─────────────────────────────────────────────

#[test]
fn test_normalize_outputs_listing() {
    let output = run_folio(&["normalize", &fixture("portfolio.json")]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_normalize_determinism() {
    let path = fixture("portfolio.json");
    let first = run_folio(&["normalize", &path]).stdout;
    for _ in 0..10 {
        assert_eq!(first, run_folio(&["normalize", &path]).stdout);
    }
}

// ── Verify ────────────────────────────────────────────────

#[test]
fn test_verify_clean_catalog() {
    let output = run_folio(&["verify", &fixture("portfolio.json")]);
    assert!(output.status.success(), "clean catalog should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 projects, 0 errors, 0 warnings"));
}

#[test]
fn test_verify_reports_unreachable_record() {
    let output = run_folio(&["verify", "--json", &fixture("flat.json")]);
    assert!(output.status.success(), "warnings alone should exit 0");
    let json = stdout_json(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["warnings"], 1);
    assert_eq!(json["diagnostics"][0]["kind"], "unreachable");
    assert_eq!(json["diagnostics"][0]["index"], 1);
}

#[test]
fn test_verify_duplicate_ids_fail() {
    let output = run_folio(&["verify", &fixture("duplicates.json")]);
    assert_eq!(output.status.code(), Some(1), "duplicate ids should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate-id"));
}

#[test]
fn test_verify_empty_catalog() {
    let output = run_folio(&["verify", "--json", &fixture("empty.json")]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["projects"], 0);
    assert_eq!(json["diagnostics"][0]["kind"], "empty-catalog");
}

// ── Configuration ─────────────────────────────────────────

#[test]
fn test_config_file_labels() {
    let config = std::env::temp_dir()
        .join(format!("folio_cli_test_labels_{}.toml", std::process::id()));
    std::fs::write(
        &config,
        "[labels]\ndefault_category = \"Case Study\"\nview_details = \"Open\"\n",
    )
    .expect("write temp config");

    let output = run_folio(&[
        "--config",
        config.to_str().unwrap(),
        "list",
        "--json",
        &fixture("flat.json"),
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json[0]["category"], "Case Study");
    assert_eq!(json[1]["viewText"], "Open");
    let _ = std::fs::remove_file(&config);
}

#[test]
fn test_missing_config_file() {
    let output = run_folio(&[
        "--config",
        "does-not-exist.toml",
        "list",
        &fixture("flat.json"),
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let output = run_folio(&["--verbose", "list", "--json", &fixture("flat.json")]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("synthesized"), "debug log should mention id synthesis");
    // stdout stays machine-readable
    stdout_json(&output);
}
