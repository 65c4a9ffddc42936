use clap::Parser;

/// Command-line and environment configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "chess_match_server")]
#[command(about = "Authoritative server for a two-player chess match")]
pub struct Args {
    /// Address to bind
    #[arg(long, env = "CHESS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "CHESS_PORT", default_value_t = 8080)]
    pub port: u16,
}
