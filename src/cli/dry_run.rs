//! Summary printed by `serve --dry-run`.

use crate::config::{Environment, Settings};

/// Lines describing what `serve` would do with `settings`.
pub fn report(settings: &Settings, environment: Environment) -> Vec<String> {
    let mut lines = vec![
        format!("✓ Configuration is valid ({environment})"),
        format!("✓ Server would bind to: {}", settings.server.address()),
        format!(
            "✓ Requests time out after {}s",
            settings.server.request_timeout
        ),
    ];

    let logger = &settings.logger;
    let mut outputs = Vec::new();
    if logger.console.enabled {
        outputs.push("console".to_string());
    }
    if logger.file.enabled {
        outputs.push(format!("{} ({})", logger.file.path.display(), logger.file.format));
    }
    lines.push(format!("✓ Logging at {} to {}", logger.level, outputs.join(" and ")));

    lines.push(if settings.error_log.enabled {
        format!("✓ Error log: {}", settings.error_log.path.display())
    } else {
        "✓ Error log is disabled".to_string()
    });
    lines
}
