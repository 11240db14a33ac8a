use splitdns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        doh_url = %config.upstream.doh_url,
        query_timeout_ms = config.upstream.query_timeout_ms,
        cache_max_entries = config.cache.max_entries,
        rules = %config.rules.path,
        "Configuration loaded"
    );

    Ok(config)
}
