use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "dracin-server")]
#[command(about = "Short-drama front end for the Netshort and DramaBox APIs", long_about = None)]
struct Args {
    /// Optional YAML config file.
    #[arg(short, long)]
    config: Option<String>,
    /// Port to listen on; overrides the config file.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dracin=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match dracin::config::Config::load(args.config.as_deref(), args.port) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = dracin::run(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
