//! micrographia TUI: the ratatui front end.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use micrographia_core::config::Config;
use micrographia_gateway::HttpGateway;

/// Start the TUI against `base_url`, or the configured API when `None`.
pub fn run(config: Config, base_url: Option<String>) -> anyhow::Result<()> {
    let base_url = base_url.unwrap_or_else(|| config.api.base_url.clone());
    let gateway = HttpGateway::with_user_agent(&base_url, &config.api.user_agent)?;
    let host = gateway.base_url().host_str().unwrap_or_default().to_string();
    tracing::info!(base_url = %base_url, "starting tui");
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(gateway, config, theme, host)?.run()
}
