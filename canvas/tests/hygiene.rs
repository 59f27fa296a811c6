//! Hygiene: enforces coding standards at test time
//!
//! These tests scan the canvas crate source tree for antipatterns that violate
//! project standards. Each has a budget (ideally zero). If you must add one,
//! you have to fix an existing one first. The budget never grows.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// Panics: these crash the process.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

// Silent loss: discards errors without inspecting.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Style / structure.
const MAX_ALLOW_DEAD_CODE: usize = 0;

// Output goes through the `log` facade, never straight to stdout/stderr.
const MAX_PRINTLN: usize = 0;
const MAX_EPRINTLN: usize = 0;
const MAX_RAW_CONSOLE: usize = 0;

// Confinement: (patterns, the only files allowed to contain them).
const NUMERIC_CASTS: (&[&str], &[&str]) = (&[" as u32", " as i32", " as u64", " as usize"], &["export.rs"]);
const STORAGE_KEYS: (&[&str], &[&str]) =
    (&["SCENES_KEY", "CUSTOM_BACKGROUNDS_KEY", "WELCOME_SEEN_KEY"], &["consts.rs", "persistence.rs"]);
const BROWSER_STORAGE: (&[&str], &[&str]) = (&[".local_storage("], &["storage.rs"]);

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `canvas/src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            if name == "target" || name == "tests" {
                continue;
            }
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            // Skip test files
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains(pattern))
                .count();
            if count > 0 {
                Some((file.path.clone(), count))
            } else {
                None
            }
        })
        .collect()
}

/// Occurrences of any of `patterns` in files whose name is not in `allowed`.
fn count_outside(files: &[SourceFile], (patterns, allowed): (&[&str], &[&str])) -> Vec<(String, usize)> {
    files
        .iter()
        .filter(|file| {
            let name = Path::new(&file.path).file_name().unwrap_or_default().to_string_lossy().to_string();
            !allowed.contains(&name.as_str())
        })
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| patterns.iter().any(|p| line.contains(p)))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn total(hits: &[(String, usize)]) -> usize {
    hits.iter().map(|(_, c)| c).sum()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn unwrap_budget() {
    let files = source_files();
    let hits = count_in_source(&files, ".unwrap()");
    let count = total(&hits);
    assert!(
        count <= MAX_UNWRAP,
        ".unwrap() budget exceeded: found {count}, max {MAX_UNWRAP}.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn expect_budget() {
    let files = source_files();
    let hits = count_in_source(&files, ".expect(");
    let count = total(&hits);
    assert!(
        count <= MAX_EXPECT,
        ".expect() budget exceeded: found {count}, max {MAX_EXPECT}.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn panic_budget() {
    let files = source_files();
    let hits = count_in_source(&files, "panic!(");
    let count = total(&hits);
    assert!(
        count <= MAX_PANIC,
        "panic!() budget exceeded: found {count}, max {MAX_PANIC}.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn unreachable_budget() {
    let files = source_files();
    let hits = count_in_source(&files, "unreachable!(");
    let count = total(&hits);
    assert!(
        count <= MAX_UNREACHABLE,
        "unreachable!() budget exceeded: found {count}, max {MAX_UNREACHABLE}.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn todo_budget() {
    let files = source_files();
    let hits = count_in_source(&files, "todo!(");
    let count = total(&hits);
    assert!(
        count <= MAX_TODO,
        "todo!() budget exceeded: found {count}, max {MAX_TODO}. Ratchet down as stubs are implemented.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn unimplemented_budget() {
    let files = source_files();
    let hits = count_in_source(&files, "unimplemented!(");
    let count = total(&hits);
    assert!(
        count <= MAX_UNIMPLEMENTED,
        "unimplemented!() budget exceeded: found {count}, max {MAX_UNIMPLEMENTED}.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn silent_discard_budget() {
    let files = source_files();
    let hits = count_in_source(&files, "let _ =");
    let count = total(&hits);
    assert!(
        count <= MAX_SILENT_DISCARD,
        "let _ = budget exceeded: found {count}, max {MAX_SILENT_DISCARD}.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn dot_ok_budget() {
    let files = source_files();
    let hits = count_in_source(&files, ".ok()");
    let count = total(&hits);
    assert!(
        count <= MAX_DOT_OK,
        ".ok() budget exceeded: found {count}, max {MAX_DOT_OK}.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn allow_dead_code_budget() {
    let files = source_files();
    let hits = count_in_source(&files, "#[allow(dead_code)]");
    let count = total(&hits);
    assert!(
        count <= MAX_ALLOW_DEAD_CODE,
        "#[allow(dead_code)] budget exceeded: found {count}, max {MAX_ALLOW_DEAD_CODE}.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn println_budget() {
    let files = source_files();
    let hits: Vec<(String, usize)> = files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains("println!(") && !line.contains("eprintln!("))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect();
    let count = total(&hits);
    assert!(
        count <= MAX_PRINTLN,
        "println!() budget exceeded: found {count}, max {MAX_PRINTLN}. Use log::info! instead.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn eprintln_budget() {
    let files = source_files();
    let hits = count_in_source(&files, "eprintln!(");
    let count = total(&hits);
    assert!(
        count <= MAX_EPRINTLN,
        "eprintln!() budget exceeded: found {count}, max {MAX_EPRINTLN}. Use log::error! instead.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn raw_console_budget() {
    let files = source_files();
    let hits = count_in_source(&files, "web_sys::console");
    let count = total(&hits);
    assert!(
        count <= MAX_RAW_CONSOLE,
        "web_sys::console budget exceeded: found {count}, max {MAX_RAW_CONSOLE}. Use the log facade.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn numeric_casts_stay_in_export() {
    let hits = count_outside(&source_files(), NUMERIC_CASTS);
    assert!(
        hits.is_empty(),
        "integer casts belong to raster sizing in export.rs; keep logical math in f64.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn storage_keys_stay_in_persistence() {
    let hits = count_outside(&source_files(), STORAGE_KEYS);
    assert!(
        hits.is_empty(),
        "storage keys are read and written only by PersistenceService.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn browser_storage_stays_in_backend() {
    let hits = count_outside(&source_files(), BROWSER_STORAGE);
    assert!(
        hits.is_empty(),
        "window.localStorage is reached only through storage::LocalStorage.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn test_module_paths_exist() {
    let missing: Vec<String> = source_files()
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .filter_map(|line| line.trim().strip_prefix("#[path = \"")?.strip_suffix("\"]"))
                .filter(|target| !Path::new("src").join(target).exists())
                .map(|target| format!("  {}: {target}", file.path))
                .collect::<Vec<_>>()
        })
        .collect();
    assert!(missing.is_empty(), "#[path] points at missing test files:\n{}", missing.join("\n"));
}
