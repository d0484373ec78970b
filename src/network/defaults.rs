use crate::network::{Chain, NativeAsset, NetworkConfig};
use alloy_primitives::{Address, address};
use once_cell::sync::Lazy;

/// Placeholder the Balancer API and SDK use for the chain's native currency.
pub const NATIVE_ASSET_PLACEHOLDER: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

const MAINNET_WEIGHTED_POOL_2_TOKENS_FACTORY: Address =
    address!("A5bf2ddF098bb0Ef6d120C98217dD6B141c74EE0");

fn network(chain: Chain, chain_id: u64, symbol: &str, wrapped: Address) -> NetworkConfig {
    NetworkConfig {
        chain,
        chain_id,
        native_asset: NativeAsset {
            address: NATIVE_ASSET_PLACEHOLDER,
            symbol: symbol.to_string(),
            decimals: 18,
        },
        wrapped_native_asset: wrapped,
        weighted_pool_2_tokens_factory: None,
        disallow_nested_actions: Vec::new(),
        csp_issue_pool_ids: Vec::new(),
    }
}

pub static BUILTIN_NETWORKS: Lazy<Vec<NetworkConfig>> = Lazy::new(|| {
    vec![
        NetworkConfig {
            weighted_pool_2_tokens_factory: Some(MAINNET_WEIGHTED_POOL_2_TOKENS_FACTORY),
            ..network(
                Chain::Mainnet,
                1,
                "ETH",
                address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            )
        },
        network(
            Chain::Arbitrum,
            42161,
            "ETH",
            address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1"),
        ),
        network(
            Chain::Avalanche,
            43114,
            "AVAX",
            address!("B31f66AA3C1e785363F0875A1B74E27b85FD66c7"),
        ),
        network(
            Chain::Base,
            8453,
            "ETH",
            address!("4200000000000000000000000000000000000006"),
        ),
        network(
            Chain::Gnosis,
            100,
            "xDAI",
            address!("e91D153E0b41518A2Ce8Dd3D7944Fa863463a97d"),
        ),
        network(
            Chain::Optimism,
            10,
            "ETH",
            address!("4200000000000000000000000000000000000006"),
        ),
        network(
            Chain::Polygon,
            137,
            "POL",
            address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"),
        ),
        network(
            Chain::Sepolia,
            11155111,
            "ETH",
            address!("7b79995e5f793A07Bc00c21412e50Ecae098E7f9"),
        ),
        network(
            Chain::Sonic,
            146,
            "S",
            address!("039e2fB66102314Ce7b64Ce5Ce3E5183bc94aD38"),
        ),
        network(
            Chain::Fraxtal,
            252,
            "frxETH",
            address!("FC00000000000000000000000000000000000006"),
        ),
        network(
            Chain::Mode,
            34443,
            "ETH",
            address!("4200000000000000000000000000000000000006"),
        ),
        network(
            Chain::Zkevm,
            1101,
            "ETH",
            address!("4F9A0e7FD2Bf6067db6994CF12E4495Df938E6e9"),
        ),
    ]
});
