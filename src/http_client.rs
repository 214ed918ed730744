use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::config::Config;

/// Pooled client shared by every probe of one run. Dropping it closes the pool.
pub fn create_probe_client(config: &Config) -> reqwest::Result<Client> {
    create_client(config.timeout(), config.connect_timeout(), &config.user_agent)
}

pub fn create_client(timeout: Duration, connect_timeout: Duration, user_agent: &str) -> reqwest::Result<Client> {
    ClientBuilder::new()
        // Connection pooling - reuse connections across probes
        .pool_max_idle_per_host(64)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)

        // Timeouts
        .timeout(timeout)
        .connect_timeout(connect_timeout)

        // Status must come from the probed URL itself
        .redirect(reqwest::redirect::Policy::none())

        .use_rustls_tls()
        .https_only(false)
        .user_agent(user_agent)

        // Disable certificate validation for pentesting (ONLY for security research!)
        .danger_accept_invalid_certs(true)

        .build()
}
