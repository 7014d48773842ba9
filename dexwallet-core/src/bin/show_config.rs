use anyhow::{Context, Result};
use dexwallet_core::core::routers::RouterRegistry;
use dexwallet_core::shared::constants::SUPPORTED_NETWORKS;
use dexwallet_core::CoreConfig;

fn main() -> Result<()> {
    let path = std::env::args().nth(1);
    let config = CoreConfig::load_from(path.as_deref()).context("failed to load configuration")?;
    let routers = RouterRegistry::new();

    println!("DexWallet Core Configuration:\n");
    println!("  Default Chain: {}", config.default_chain_id);
    println!("  Default Slippage: {}%", config.default_slippage);
    println!("  Log Level: {}", config.log_level);
    println!(
        "  Storage Dir: {}",
        config.storage_dir.as_deref().unwrap_or("(platform data dir)")
    );

    println!("\nNetworks:");
    for network in SUPPORTED_NETWORKS {
        let rpc_url = config.rpc_url(network.chain_id);
        let router = routers
            .default_router(network.chain_id)
            .map(|r| format!("{} {}", r.name(), r.address))
            .unwrap_or_else(|| "(none, approvals always required)".to_string());
        println!("  {} ({}, native {})", network.name, network.chain_id, network.native_currency);
        println!("    RPC URL: {}", rpc_url.as_deref().unwrap_or("(not set)"));
        println!("    Default Router: {}", router);
    }
    Ok(())
}
