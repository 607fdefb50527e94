use clap::Parser;
use std::net::SocketAddr;

/// Configurazione del server: flag da riga di comando, con fallback sulle variabili d'ambiente
/// (caricate anche da un eventuale file .env).
#[derive(Debug, Clone, Parser)]
#[command(name = "mural-server")]
#[command(about = "REST backend for the mural message board")]
pub struct Config {
    /// Percorso del file SQLite, URL sqlite:// oppure "sqlite::memory:"
    #[arg(long, env = "DATABASE_URL", default_value = "mural.db")]
    pub database_url: String,

    /// Indirizzo host:porta su cui ascoltare
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Direttiva di logging (sintassi EnvFilter)
    #[arg(long = "log", env = "MURAL_LOG", default_value = "info")]
    pub log_filter: String,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}
