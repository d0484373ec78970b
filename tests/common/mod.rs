#![allow(dead_code)]

use alloy_primitives::{Address, address};
use balrs::{NetworkConfig, NetworkRegistry, Pool, balancer::api::ApiPool, network::Chain};
use serde_json::{Value, json};

pub const BAL_ADDRESS: Address = address!("ba100000625a3754423978a60c9317c58a424e3D");
pub const WETH_ADDRESS: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const USDC_ADDRESS: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
pub const NATIVE_ADDRESS: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");
pub const BAL_WETH_POOL_ADDRESS: Address = address!("5c6Ee304399DBdB9C8Ef030aB642B10820DB8F56");
pub const BAL_WETH_POOL_ID: &str =
    "0x5c6ee304399dbdb9c8ef030ab642b10820db8f56000200000000000000000014";

pub const SEPOLIA_WETH_ADDRESS: Address = address!("7b79995e5f793a07bc00c21412e50ecae098e7f9");
pub const STATA_USDT_ADDRESS: Address = address!("978206fae13faf5a8d293fb614326b237684b750");
pub const USDT_AAVE_ADDRESS: Address = address!("aa8e23fb1079ea71e0a56f48a2aa51851d8433d0");

pub fn mainnet() -> NetworkConfig {
    NetworkRegistry::default().get(Chain::Mainnet).unwrap().clone()
}

pub fn sepolia() -> NetworkConfig {
    NetworkRegistry::default().get(Chain::Sepolia).unwrap().clone()
}

pub fn to_pool(value: Value) -> Pool {
    let api_pool: ApiPool = serde_json::from_value(value).unwrap();
    Pool::try_from(api_pool).unwrap()
}

/// 80BAL-20WETH on mainnet, Balancer v2.
pub fn bal_weth_pool_json() -> Value {
    json!({
        "id": BAL_WETH_POOL_ID,
        "address": BAL_WETH_POOL_ADDRESS,
        "name": "Balancer 80 BAL 20 WETH",
        "version": 1,
        "factory": "0xa5bf2ddf098bb0ef6d120c98217dd6b141c74ee0",
        "type": "WEIGHTED",
        "chain": "MAINNET",
        "protocolVersion": 2,
        "dynamicData": {
            "totalShares": "13653990.045",
            "isInRecoveryMode": false,
            "isPaused": false,
            "swapFee": "0.01"
        },
        "poolTokens": [
            {
                "address": WETH_ADDRESS,
                "symbol": "WETH",
                "decimals": 18,
                "index": 1,
                "balance": "5000.5",
                "weight": "0.2",
                "nestedPool": null
            },
            {
                "address": BAL_ADDRESS,
                "symbol": "BAL",
                "decimals": 18,
                "index": 0,
                "balance": "35000000.1",
                "weight": "0.8",
                "nestedPool": null
            }
        ]
    })
}

/// Minimal two-token pool of the given type; USDC (6 decimals) and WETH.
pub fn simple_pool_json(pool_type: &str, protocol_version: u8, version: u32) -> Value {
    json!({
        "id": "0x1111111111111111111111111111111111111111000000000000000000000042",
        "address": "0x1111111111111111111111111111111111111111",
        "version": version,
        "factory": "0x2222222222222222222222222222222222222222",
        "type": pool_type,
        "chain": "MAINNET",
        "protocolVersion": protocol_version,
        "dynamicData": {
            "totalShares": "100",
            "isInRecoveryMode": false,
            "isPaused": false
        },
        "poolTokens": [
            { "address": USDC_ADDRESS, "symbol": "USDC", "decimals": 6, "index": 0, "balance": "1000" },
            { "address": WETH_ADDRESS, "symbol": "WETH", "decimals": 18, "index": 1, "balance": "1" }
        ]
    })
}

/// 50WETH-50stataEthUSDT on Sepolia, Balancer v3, with the USDT wrapper used via its
/// underlying for add/remove.
pub fn partial_boosted_pool_json() -> Value {
    json!({
        "id": "0x445a49d1ad280b68026629fe029ed0fbef549a94",
        "address": "0x445a49d1ad280b68026629fe029ed0fbef549a94",
        "name": "50WETH 50stataEthUSDT",
        "version": 1,
        "factory": "0x7532d5a3be916e4a4d900240f49f0babd4fd855c",
        "type": "WEIGHTED",
        "chain": "SEPOLIA",
        "protocolVersion": 3,
        "tags": ["BOOSTED_AAVE", "BOOSTED"],
        "hasErc4626": true,
        "liquidityManagement": { "disableUnbalancedLiquidity": false },
        "dynamicData": {
            "totalShares": "8.008128835706017977",
            "isInRecoveryMode": false,
            "isPaused": false,
            "swapFee": "0.001"
        },
        "poolTokens": [
            {
                "address": SEPOLIA_WETH_ADDRESS,
                "symbol": "WETH",
                "decimals": 18,
                "index": 0,
                "balance": "0.10805627553902844",
                "weight": "0.5",
                "useUnderlyingForAddRemove": null,
                "nestedPool": null,
                "isErc4626": false,
                "underlyingToken": null
            },
            {
                "address": STATA_USDT_ADDRESS,
                "symbol": "stataEthUSDT",
                "decimals": 6,
                "index": 1,
                "balance": "440.809182",
                "weight": "0.5",
                "useUnderlyingForAddRemove": true,
                "nestedPool": null,
                "isErc4626": true,
                "underlyingToken": {
                    "address": USDT_AAVE_ADDRESS,
                    "symbol": "usdt-aave",
                    "decimals": 6
                }
            }
        ]
    })
}

pub const NESTED_POOL_ID: &str =
    "0x3333333333333333333333333333333333333333000000000000000000000077";
pub const NESTED_BPT_ADDRESS: Address = address!("3333333333333333333333333333333333333333");
pub const DAI_ADDRESS: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
pub const USDT_ADDRESS: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");

/// v2 weighted pool holding WETH and the BPT of a DAI/USDT/USDC composable stable pool.
pub fn nested_pool_json() -> Value {
    json!({
        "id": "0x4444444444444444444444444444444444444444000100000000000000000088",
        "address": "0x4444444444444444444444444444444444444444",
        "version": 4,
        "type": "WEIGHTED",
        "chain": "MAINNET",
        "protocolVersion": 2,
        "dynamicData": { "totalShares": "500" },
        "poolTokens": [
            { "address": WETH_ADDRESS, "symbol": "WETH", "decimals": 18, "index": 0, "balance": "10" },
            {
                "address": NESTED_BPT_ADDRESS,
                "symbol": "bb-usd",
                "decimals": 18,
                "index": 1,
                "balance": "20000",
                "nestedPool": {
                    "id": NESTED_POOL_ID,
                    "address": NESTED_BPT_ADDRESS,
                    "type": "COMPOSABLE_STABLE",
                    "totalShares": "30000",
                    "tokens": [
                        { "address": USDC_ADDRESS, "symbol": "USDC", "decimals": 6, "index": 2 },
                        { "address": NESTED_BPT_ADDRESS, "symbol": "bb-usd", "decimals": 18, "index": 1 },
                        { "address": DAI_ADDRESS, "symbol": "DAI", "decimals": 18, "index": 0 },
                        { "address": USDT_ADDRESS, "symbol": "USDT", "decimals": 6, "index": 3 }
                    ]
                }
            }
        ]
    })
}
