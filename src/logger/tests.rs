use std::io::Write;
use std::path::Path;

use tempfile::tempdir;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use super::*;

fn settings_with_file(path: &Path, format: LogFormat) -> LoggerSettings {
    LoggerSettings {
        level: LogLevel::Info,
        console: ConsoleOutput {
            enabled: false,
            colored: false,
        },
        file: FileOutput {
            enabled: true,
            path: path.to_path_buf(),
            append: true,
            format,
        },
    }
}

#[test]
fn test_default_settings_build_only_the_console_layer() {
    assert_eq!(build_layers(&LoggerSettings::default()).unwrap().len(), 1);
}

#[test]
fn test_no_outputs_is_an_error() {
    let mut settings = LoggerSettings::default();
    settings.console.enabled = false;
    assert!(build_layers(&settings).is_err());
}

#[test]
fn test_file_layer_creates_missing_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("service.log");
    let mut settings = settings_with_file(&path, LogFormat::Compact);
    settings.console.enabled = true;

    assert_eq!(build_layers(&settings).unwrap().len(), 2);
    assert!(path.exists());
}

#[test]
fn test_json_file_receives_events() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("service.log");
    let layers = build_layers(&settings_with_file(&path, LogFormat::Json)).unwrap();

    let subscriber = tracing_subscriber::registry().with(layers);
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(product_id = 7, "Product created");
    });

    let contents = std::fs::read_to_string(&path).unwrap();
    let line: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
    assert_eq!(line["level"], "INFO");
    assert_eq!(line["fields"]["message"], "Product created");
    assert_eq!(line["fields"]["product_id"], 7);
}

#[test]
fn test_append_flag_controls_existing_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("service.log");

    for (append, expected) in [(true, "kept\nadded\n"), (false, "added\n")] {
        std::fs::write(&path, "kept\n").unwrap();
        let mut output = settings_with_file(&path, LogFormat::Full).file;
        output.append = append;

        let writer = writer::open_log_file(&output).unwrap();
        writer.make_writer().write_all(b"added\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }
}
