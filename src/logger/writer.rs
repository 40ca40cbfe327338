use std::fs::{File, OpenOptions};
use std::io::LineWriter;
use std::path::Path;
use std::sync::Mutex;

use crate::config::FileOutput;
use crate::logger::LoggerError;

/// Opens the tracing log file. Each completed line is flushed straight away.
pub(crate) fn open_log_file(output: &FileOutput) -> Result<Mutex<LineWriter<File>>, LoggerError> {
    create_parent_dir(&output.path)?;
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(output.append)
        .truncate(!output.append)
        .open(&output.path)
        .map_err(|e| LoggerError::io(&output.path, e))?;
    Ok(Mutex::new(LineWriter::new(file)))
}

pub(crate) fn create_parent_dir(path: &Path) -> Result<(), LoggerError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| LoggerError::io(parent, e))
        }
        _ => Ok(()),
    }
}
