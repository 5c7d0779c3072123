use clap::{Parser, Subcommand};
use micrographia::headless::{self, Script};
use micrographia_core::{config::Config, GramFilter};
use micrographia_gateway::HttpGateway;

#[derive(Parser)]
#[command(name = "micrographia", about = "Micrographia: browse the microbial taxonomy API")]
struct Cli {
    /// Write debug logs to /tmp/micrographia-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// API base URL, overriding `[api] base_url` in config.toml.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Run one interaction headlessly and print the page as HTML.
    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Search organisms by name.
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
        /// Gram stain filter: any, positive or negative.
        #[arg(long, default_value = "any")]
        gram: GramFilter,
    },
    /// Show one organism's detail.
    Detail { tax_id: String },
    /// Compare organisms side by side.
    Compare {
        #[arg(required = true, num_args = 1..)]
        tax_ids: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/micrographia-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("micrographia debug log started, tail -f /tmp/micrographia-debug.log");
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });

    let Some(command) = cli.command else {
        return micrographia_tui::run(config, cli.base_url);
    };

    let script = match command {
        Cmd::Search { term, gram } => Script::Search {
            term: term.join(" "),
            filter: gram,
        },
        Cmd::Detail { tax_id } => Script::Detail { tax_id },
        Cmd::Compare { tax_ids } => Script::Compare { tax_ids },
    };

    let base_url = cli.base_url.unwrap_or_else(|| config.api.base_url.clone());
    let gateway = HttpGateway::with_user_agent(&base_url, &config.api.user_agent)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let rendered = runtime.block_on(headless::render_script(&gateway, script));
    println!("{}", rendered.html);
    match rendered.fatal {
        Some(message) => anyhow::bail!("{message}"),
        None => Ok(()),
    }
}
