//! Run the forwarding engine on a TUN device.
//!
//! ```sh
//! sudo ipv4-router demos/router.toml
//! ```
//!
//! Root privileges (or CAP_NET_ADMIN) are required to create the device.
//! The device still has to be addressed and brought up, e.g.
//! `ip addr add 10.0.0.254/24 dev tun0 && ip link set up dev tun0`.

use anyhow::{Context, Result};
use ipv4_forwarder::iface::tun::{self, TunLink};
use ipv4_forwarder::StackConfig;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ipv4_forwarder=info,ipv4_router=info".into()),
        )
        .with_target(false)
        .with_line_number(true)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/router.toml".to_string());
    let config = StackConfig::from_file(&path)
        .with_context(|| format!("loading configuration from {path}"))?;

    let link = TunLink::open(&config.tun.name, config.ignore_checksum)
        .with_context(|| format!("opening TUN device {}", config.tun.name))?;
    let mut iface = config
        .build_interface(link)
        .context("applying configuration")?;

    iface.register_receiver(|src, dst, payload| {
        info!(%src, %dst, len = payload.len(), "TCP segment received");
    });

    info!(
        device = iface.link().name(),
        local_address = %config.local_address,
        routes = iface.forwarding_table().len(),
        "starting IPv4 forwarder v{}",
        env!("CARGO_PKG_VERSION")
    );

    tun::serve(&mut iface).context("TUN device failed")?;
    Ok(())
}
