//! CLI commands.

use std::path::PathBuf;

use clap::Args;
use docview_config::{CliSettings, Config};
use docview_server::server_config_from_config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `serve` command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Documentation source directory (overrides config).
    #[arg(long, value_name = "DIR")]
    pub(crate) docs_dir: Option<PathBuf>,

    /// Host address to bind to (overrides config).
    #[arg(long)]
    pub(crate) host: Option<String>,

    /// Port to listen on (overrides config).
    #[arg(long)]
    pub(crate) port: Option<u16>,

    /// Configuration file (default: discover docview.toml upwards).
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Disable server-side graphviz rendering.
    #[arg(long)]
    pub(crate) no_graphviz: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ServeArgs {
    /// Run the documentation server until shutdown.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let cwd = std::env::current_dir()?;
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.docs_dir,
            graphviz: self.no_graphviz.then_some(false),
        };

        let config = match &self.config {
            Some(path) => Config::load_file(path, &cwd, &cli_settings)?,
            None => Config::load(&cwd, &cli_settings)?,
        };

        let server_config = server_config_from_config(&config);
        if !server_config.docs_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Docs directory does not exist: {}",
                server_config.docs_dir.display()
            )));
        }

        output.success(&format!(
            "Serving {} at http://{}:{}/",
            server_config.docs_dir.display(),
            server_config.host,
            server_config.port
        ));
        output.info("Press Ctrl+C to stop");

        docview_server::run_server(server_config)
            .await
            .map_err(|err| CliError::Server(err.to_string()))
    }
}
