use brigates_config::{BrigatesConfig, ConfigError, Loader};
use brigates_lsp::BrigatesLanguageServer;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

fn load_config() -> Result<BrigatesConfig, ConfigError> {
    match std::env::var_os("BRIGATES_CONFIG") {
        Some(path) => Loader::new().with_file(path).build(),
        None => Loader::new().build(),
    }
}

/// Logs go to stderr; stdout carries the protocol.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_env("BRIGATES_LOG")
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() {
    let config = load_config().unwrap_or_else(|e| {
        eprintln!("Error: failed to load configuration: {}", e);
        std::process::exit(1);
    });
    init_logging(&config.logging.level);

    let server_config = config.server;
    let (service, socket) =
        LspService::new(move |client| BrigatesLanguageServer::new(client, server_config.clone()));
    Server::new(stdin(), stdout(), socket).serve(service).await;
}
