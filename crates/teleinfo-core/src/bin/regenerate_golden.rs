use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use teleinfo_core::{Mode, decode_frame_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.txt");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected_report.json");
        regenerate_one(&input, &output, mode_for(&path))?;
    }

    Ok(())
}

/// Case directories are prefixed with the mode they are decoded in.
fn mode_for(case: &Path) -> Mode {
    let name = case
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    if name.starts_with("historic") {
        Mode::Historic
    } else {
        Mode::Standard
    }
}

fn regenerate_one(input: &Path, output: &Path, mode: Mode) -> Result<(), String> {
    let mut report = decode_frame_file(input, mode)
        .map_err(|err| format!("decoding failed for {}: {}", input.display(), err))?;
    report.generated_at = teleinfo_core::DEFAULT_GENERATED_AT.to_string();
    report.input.path = "input.txt".to_string();
    let json = serde_json::to_string(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
