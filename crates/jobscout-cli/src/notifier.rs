//! Local digest delivery.

use crate::error::CliError;
use crate::output::Formatter;
use jobscout_domain::{DigestMessage, Notifier};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Renders the digest with a [`Formatter`] and writes it to a file or stdout.
pub struct PreviewNotifier {
    formatter: Formatter,
    output: Option<PathBuf>,
}

impl PreviewNotifier {
    /// Deliver to stdout.
    pub fn stdout(formatter: Formatter) -> Self {
        Self {
            formatter,
            output: None,
        }
    }

    /// Deliver to `path`, replacing any existing file.
    pub fn file(formatter: Formatter, path: PathBuf) -> Self {
        Self {
            formatter,
            output: Some(path),
        }
    }

    /// Whether the digest goes to a file.
    pub fn writes_file(&self) -> bool {
        self.output.is_some()
    }
}

impl Notifier for PreviewNotifier {
    type Error = CliError;

    fn deliver(&self, message: &DigestMessage) -> Result<(), Self::Error> {
        let rendered = self.formatter.format_digest(message)?;
        match &self.output {
            Some(path) => {
                fs::write(path, format!("{}\n", rendered))?;
                info!("Digest written to {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", rendered)?;
            }
        }
        Ok(())
    }
}
