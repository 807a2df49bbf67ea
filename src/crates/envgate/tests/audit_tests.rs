//! Integration tests for the startup usage audit
//!
//! These tests synthesize real source trees in temp directories and audit
//! them against injected environments:
//! - scan root resolution (src/ preferred, root fallback)
//! - usage extraction across files and modifiers
//! - fail-fast reporting of missing and unparseable variables
//! - non-fatal handling of unparseable usage lines

use std::fs;
use std::path::Path;

use envgate::{run_audit, AuditConfig, EnvAccessor, EnvFile, MapSource};
use tempfile::TempDir;

/// Helper to create a test project directory
fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Helper to write a source file, creating parent directories
fn write_source(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config_for(dir: &TempDir) -> AuditConfig {
    AuditConfig::new().with_root(dir.path())
}

#[test]
fn test_clean_tree_passes() {
    let dir = create_test_dir();
    write_source(
        dir.path(),
        "src/app.js",
        "const host = ENV.HOST;\nconst port = ENV.num.PORT;\n",
    );

    let env = MapSource::new()
        .with_var("HOST", "localhost")
        .with_var("PORT", "8080");

    let outcome = run_audit(&config_for(&dir), &env).unwrap();
    assert!(outcome.is_none());
}

#[test]
fn test_missing_required_variable_is_reported() {
    let dir = create_test_dir();
    write_source(dir.path(), "src/app.js", "const token = ENV.API_TOKEN;\n");

    let outcome = run_audit(&config_for(&dir), &MapSource::new()).unwrap();
    let violation = outcome.expect("audit should report the missing variable");
    assert_eq!(violation.name, "API_TOKEN");
    assert!(violation.to_string().contains("API_TOKEN"));
}

#[test]
fn test_unparseable_numeric_variable_is_reported() {
    let dir = create_test_dir();
    write_source(dir.path(), "src/workers.ts", "spawn(ENV.num.WORKERS);\n");

    let env = MapSource::new().with_var("WORKERS", "notanumber");
    let violation = run_audit(&config_for(&dir), &env).unwrap().unwrap();

    assert_eq!(violation.name, "WORKERS");
    assert_eq!(violation.value, Some("notanumber".to_string()));
    assert!(violation.to_string().contains("WORKERS"));
    assert!(violation.to_string().contains("notanumber"));
}

#[test]
fn test_optional_variables_are_never_required() {
    let dir = create_test_dir();
    write_source(
        dir.path(),
        "src/app.js",
        "const region = ENV.opt.AWS_REGION;\nconst debug = ENV.opt.DEBUG;\n",
    );

    let outcome = run_audit(&config_for(&dir), &MapSource::new()).unwrap();
    assert!(outcome.is_none());
}

#[test]
fn test_first_violation_in_scan_order_wins() {
    let dir = create_test_dir();
    // Files are visited sorted, so a.js is audited before b.js.
    write_source(dir.path(), "src/a.js", "use(ENV.ALPHA);\n");
    write_source(dir.path(), "src/b.js", "use(ENV.BETA);\n");

    let violation = run_audit(&config_for(&dir), &MapSource::new())
        .unwrap()
        .unwrap();
    assert_eq!(violation.name, "ALPHA");
}

#[test]
fn test_scan_prefers_src_directory() {
    let dir = create_test_dir();
    // The usage outside src/ must not be seen once src/ exists.
    write_source(dir.path(), "scratch.js", "use(ENV.OUTSIDE);\n");
    write_source(dir.path(), "src/app.js", "use(ENV.opt.INSIDE);\n");

    let outcome = run_audit(&config_for(&dir), &MapSource::new()).unwrap();
    assert!(outcome.is_none());
}

#[test]
fn test_scan_falls_back_to_root_without_src() {
    let dir = create_test_dir();
    write_source(dir.path(), "app.js", "use(ENV.ROOT_LEVEL);\n");

    let violation = run_audit(&config_for(&dir), &MapSource::new())
        .unwrap()
        .unwrap();
    assert_eq!(violation.name, "ROOT_LEVEL");
}

#[test]
fn test_non_source_extensions_are_ignored() {
    let dir = create_test_dir();
    write_source(dir.path(), "src/notes.md", "mentions ENV.DOCUMENTED\n");
    write_source(dir.path(), "src/main.rs", "uses(ENV.COMPILED);\n");

    let outcome = run_audit(&config_for(&dir), &MapSource::new()).unwrap();
    assert!(outcome.is_none());
}

#[test]
fn test_custom_extensions_and_token() {
    let dir = create_test_dir();
    write_source(dir.path(), "src/main.rs", "uses(CFG.num.THREADS);\n");

    let config = config_for(&dir)
        .with_accessor_token("CFG")
        .with_extensions(["rs"]);
    let env = MapSource::new().with_var("THREADS", "4eva");

    let outcome = run_audit(&config, &env).unwrap();
    assert!(outcome.is_none(), "leading integer of \"4eva\" is 4");

    let violation = run_audit(&config, &MapSource::new()).unwrap().unwrap();
    assert_eq!(violation.name, "THREADS");
}

#[test]
fn test_anomalous_line_skips_rest_of_file_only() {
    let dir = create_test_dir();
    // The malformed usage aborts a.js before ENV.HIDDEN is checked; the
    // audit still reaches b.js and reports its missing variable.
    write_source(
        dir.path(),
        "src/a.js",
        "x = ENV.num.2FAST;\nuse(ENV.HIDDEN);\n",
    );
    write_source(dir.path(), "src/b.js", "use(ENV.VISIBLE);\n");

    let violation = run_audit(&config_for(&dir), &MapSource::new())
        .unwrap()
        .unwrap();
    assert_eq!(violation.name, "VISIBLE");
}

#[test]
fn test_empty_value_counts_as_missing() {
    let dir = create_test_dir();
    write_source(dir.path(), "src/app.js", "use(ENV.BLANK);\n");

    let env = MapSource::new().with_var("BLANK", "");
    let violation = run_audit(&config_for(&dir), &env).unwrap().unwrap();
    assert_eq!(violation.name, "BLANK");
}

#[test]
fn test_missing_scan_root_passes() {
    let dir = create_test_dir();
    let config = AuditConfig::new().with_root(dir.path().join("gone"));

    let outcome = run_audit(&config, &MapSource::new()).unwrap();
    assert!(outcome.is_none());
}

#[test]
fn test_env_file_backs_a_passing_audit() {
    let dir = create_test_dir();
    write_source(
        dir.path(),
        "src/app.js",
        "connect(ENV.DB_HOST, ENV.num.DB_PORT);\n",
    );
    write_source(dir.path(), ".env", "# local overrides\nDB_HOST=db\nDB_PORT=5432\n");

    let env = EnvFile::load(dir.path().join(".env")).unwrap().into_source();

    let outcome = run_audit(&config_for(&dir), &env).unwrap();
    assert!(outcome.is_none());

    // The same source also serves accessor reads after the gate passes.
    let accessor = EnvAccessor::new(env);
    assert_eq!(accessor.get("DB_HOST").unwrap(), "db");
    assert_eq!(accessor.get_numeric("DB_PORT").unwrap(), 5432);
}
