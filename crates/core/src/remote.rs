//! Scripts given as URLs are downloaded to a temporary file first.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[cfg(feature = "remote")]
use crate::console::DiagnosticSink;
#[cfg(feature = "remote")]
use std::io::Write;
#[cfg(feature = "remote")]
use std::time::Duration;

/// Timeout for downloading a remote script
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum RemoteError {
    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to download {url}: HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Remote scripts are not supported in this build: {0}")]
    Unsupported(String),
}

fn url_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^/\s?#]+").ok())
        .as_ref()
}

/// Scheme followed by `://` and a non-empty host
pub fn is_url(value: &str) -> bool {
    url_pattern().is_some_and(|re| re.is_match(value))
}

/// Where the script to analyze lives
#[derive(Debug)]
pub enum ScriptSource {
    Local(PathBuf),
    #[cfg(feature = "remote")]
    Remote {
        url: String,
        file: tempfile::NamedTempFile,
    },
}

impl ScriptSource {
    /// Local path used as-is; URLs are downloaded.
    #[cfg(feature = "remote")]
    pub fn resolve(
        arg: &str,
        sink: &dyn DiagnosticSink,
        show_progress: bool,
    ) -> Result<Self, RemoteError> {
        if !is_url(arg) {
            return Ok(ScriptSource::Local(PathBuf::from(arg)));
        }

        sink.info(&format!("Downloading script from {}", arg));
        let file = download_script(arg, show_progress)?;
        sink.verbose(&format!("Saved remote script to {}", file.path().display()));

        Ok(ScriptSource::Remote {
            url: arg.to_string(),
            file,
        })
    }

    #[cfg(not(feature = "remote"))]
    pub fn resolve(arg: &str) -> Result<Self, RemoteError> {
        if is_url(arg) {
            return Err(RemoteError::Unsupported(arg.to_string()));
        }
        Ok(ScriptSource::Local(PathBuf::from(arg)))
    }

    pub fn path(&self) -> &Path {
        match self {
            ScriptSource::Local(path) => path,
            #[cfg(feature = "remote")]
            ScriptSource::Remote { file, .. } => file.path(),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ScriptSource::Local(_) => None,
            #[cfg(feature = "remote")]
            ScriptSource::Remote { url, .. } => Some(url),
        }
    }

    pub fn is_remote(&self) -> bool {
        self.url().is_some()
    }

    /// Keep a downloaded copy on disk past the end of the process
    pub fn into_persistent_path(self) -> Result<PathBuf, RemoteError> {
        match self {
            ScriptSource::Local(path) => Ok(path),
            #[cfg(feature = "remote")]
            ScriptSource::Remote { file, .. } => {
                let (_, path) = file.keep().map_err(|e| RemoteError::Io(e.error))?;
                Ok(path)
            }
        }
    }
}

/// Fetch `url` into a `autopep723_*.py` temporary file
#[cfg(feature = "remote")]
pub fn download_script(
    url: &str,
    show_progress: bool,
) -> Result<tempfile::NamedTempFile, RemoteError> {
    let spinner = if show_progress {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {}", url));
        Some(pb)
    } else {
        None
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let response = client.get(url).send()?;

    if !response.status().is_success() {
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        return Err(RemoteError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body = response.bytes()?;

    let mut file = tempfile::Builder::new()
        .prefix("autopep723_")
        .suffix(".py")
        .tempfile()?;
    file.write_all(&body)?;
    file.flush()?;

    if let Some(pb) = spinner {
        pb.finish_with_message(format!("Downloaded {} bytes", body.len()));
    }

    Ok(file)
}
