//! The Graphviz engine: a validated `dot` executable.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Engine construction failure. Cached for the process lifetime.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No `dot` executable on the search path.
    #[error("no 'dot' executable found on PATH")]
    NotFound,
    /// A `dot` executable was found but did not answer the version probe.
    #[error("'dot' probe failed: {0}")]
    Probe(String),
}

/// Failure rendering a single diagram.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// The renderer process could not be started or driven.
    #[error("failed to run dot: {0}")]
    Process(#[source] std::io::Error),
    /// The renderer rejected the diagram source.
    #[error("{0}")]
    Render(String),
    /// The renderer produced output that is not UTF-8.
    #[error("dot produced non-UTF-8 output")]
    InvalidOutput,
}

/// Handle to a validated Graphviz installation.
///
/// Construction is asynchronous (it probes the executable); rendering a
/// single diagram is a bounded, in-process pipe through `dot -Tsvg`.
#[derive(Debug, Clone)]
pub struct GraphvizEngine {
    dot_path: PathBuf,
}

impl GraphvizEngine {
    /// Locate and probe the `dot` executable.
    ///
    /// Runs once per process via the shared cell in the crate root.
    pub(crate) async fn construct() -> Result<Self, EngineError> {
        let dot_path = which::which("dot").map_err(|_| EngineError::NotFound)?;

        let output = Command::new(&dot_path)
            .arg("-V")
            .output()
            .await
            .map_err(|err| EngineError::Probe(err.to_string()))?;
        if !output.status.success() {
            return Err(EngineError::Probe(format!(
                "exit status {}",
                output.status
            )));
        }

        // dot prints its version banner on stderr
        let version = String::from_utf8_lossy(&output.stderr);
        tracing::info!(
            path = %dot_path.display(),
            version = %version.trim(),
            "Graphviz engine initialized"
        );

        Ok(Self { dot_path })
    }

    /// Render DOT source to SVG markup.
    ///
    /// The XML prolog is stripped so the result embeds directly into an
    /// HTML page.
    pub async fn render_svg(&self, source: &str) -> Result<String, DiagramError> {
        let mut child = Command::new(&self.dot_path)
            .arg("-Tsvg")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(DiagramError::Process)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .await
                .map_err(DiagramError::Process)?;
            // Closing stdin signals end of input to dot
            drop(stdin);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(DiagramError::Process)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiagramError::Render(stderr.trim().to_owned()));
        }

        let svg = String::from_utf8(output.stdout).map_err(|_| DiagramError::InvalidOutput)?;
        Ok(strip_xml_prolog(&svg).to_owned())
    }
}

/// Drop everything before the opening `<svg` tag (XML declaration and
/// DOCTYPE emitted by dot).
fn strip_xml_prolog(svg: &str) -> &str {
    svg.find("<svg").map_or(svg, |start| &svg[start..])
}
