//! Links to the Solana explorer for accounts created during a launch.

use solana_address::Address;
use url::form_urlencoded;

use crate::config::{
    Cluster,
    LaunchConfig,
};

const EXPLORER_URL: &str = "https://explorer.solana.com";

/// Links to `address` on the configured cluster. Localnet links point the explorer at the RPC
/// endpoint the launch actually used.
pub fn address_url(address: &Address, config: &LaunchConfig) -> String {
    match config.cluster {
        Cluster::Localnet => {
            let rpc_url: String =
                form_urlencoded::byte_serialize(config.rpc_url().as_bytes()).collect();
            format!("{EXPLORER_URL}/address/{address}?cluster=custom&customUrl={rpc_url}")
        }
        cluster => format!("{EXPLORER_URL}/address/{address}?cluster={cluster}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cluster: Cluster, rpc_url: Option<&str>) -> LaunchConfig {
        LaunchConfig {
            cluster,
            rpc_url: rpc_url.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn devnet_link() {
        let address = Address::new_unique();
        assert_eq!(
            address_url(&address, &config(Cluster::Devnet, None)),
            format!("https://explorer.solana.com/address/{address}?cluster=devnet")
        );
    }

    #[test]
    fn localnet_link() {
        let url = address_url(&Address::new_unique(), &config(Cluster::Localnet, None));
        assert!(url.ends_with("?cluster=custom&customUrl=http%3A%2F%2F127.0.0.1%3A8899"));
    }

    #[test]
    fn localnet_link_follows_the_rpc_override() {
        let config = config(Cluster::Localnet, Some("http://10.0.0.7:9000"));
        let url = address_url(&Address::new_unique(), &config);
        assert!(
            url.ends_with("?cluster=custom&customUrl=http%3A%2F%2F10.0.0.7%3A9000"),
            "{url}"
        );
        assert!(!url.contains("8899"));
    }
}
