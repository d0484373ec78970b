mod common;

use alloy_primitives::{U256, address};
use balrs::{
    BalRsError, HumanTokenAmount, LiquidityActionHelpers, NetworkRegistry,
    balancer::adapter::*,
    core::token::KnownToken,
    network::defaults::NATIVE_ASSET_PLACEHOLDER,
    reporting::{ErrorContext, ErrorReporter, Severity},
};
use common::*;
use serde_json::json;
use std::cell::RefCell;

fn u256_dec(s: &str) -> U256 {
    U256::from_str_radix(s, 10).unwrap()
}

#[derive(Default)]
struct RecordingReporter {
    captured: RefCell<Vec<(String, ErrorContext)>>,
}

impl ErrorReporter for RecordingReporter {
    fn capture(&self, error: &BalRsError, context: &ErrorContext) {
        self.captured
            .borrow_mut()
            .push((error.to_string(), context.clone()));
    }
}

#[test]
fn test_to_input_amounts_uses_token_decimals() {
    let pool = to_pool(partial_boosted_pool_json());
    let network = sepolia();
    let helpers = LiquidityActionHelpers::new(&pool, &network).unwrap();

    let amounts = helpers
        .to_input_amounts(&[
            HumanTokenAmount::new("1", SEPOLIA_WETH_ADDRESS),
            HumanTokenAmount::new("2.5", USDT_AAVE_ADDRESS),
        ])
        .unwrap();

    assert_eq!(amounts.len(), 2);
    assert_eq!(amounts[0].address, SEPOLIA_WETH_ADDRESS);
    assert_eq!(amounts[0].raw_amount, u256_dec("1000000000000000000"));
    assert_eq!(amounts[0].decimals, 18);
    assert_eq!(amounts[0].symbol, "WETH");

    // Underlying tokens resolve through the pool's full token list.
    assert_eq!(amounts[1].address, USDT_AAVE_ADDRESS);
    assert_eq!(amounts[1].raw_amount, U256::from(2_500_000u64));
    assert_eq!(amounts[1].decimals, 6);
    assert_eq!(amounts[1].symbol, "usdt-aave");
}

#[test]
fn test_to_input_amounts_skips_empty_amounts() {
    let pool = to_pool(bal_weth_pool_json());
    let network = mainnet();
    let helpers = LiquidityActionHelpers::new(&pool, &network).unwrap();

    assert!(helpers.to_input_amounts(&[]).unwrap().is_empty());

    let amounts = helpers
        .to_input_amounts(&[
            HumanTokenAmount::new("", BAL_ADDRESS),
            HumanTokenAmount::new("0.00", WETH_ADDRESS),
            // Empty amounts are dropped before the token lookup.
            HumanTokenAmount::new("0", USDC_ADDRESS),
        ])
        .unwrap();
    assert!(amounts.is_empty());
}

#[test]
fn test_to_input_amounts_drops_zero_and_scales_the_rest() {
    let pool = to_pool(simple_pool_json("WEIGHTED", 2, 4));
    let network = mainnet();
    let helpers = LiquidityActionHelpers::new(&pool, &network).unwrap();

    let amounts = helpers
        .to_input_amounts(&[
            HumanTokenAmount::new("0", WETH_ADDRESS),
            HumanTokenAmount::new("5", USDC_ADDRESS),
        ])
        .unwrap();
    assert_eq!(amounts.len(), 1);
    assert_eq!(amounts[0].address, USDC_ADDRESS);
    assert_eq!(amounts[0].raw_amount, U256::from(5_000_000u64));
    assert_eq!(amounts[0].to_human(), "5");
}

#[test]
fn test_to_input_amounts_native_asset() {
    let pool = to_pool(bal_weth_pool_json());
    let network = mainnet();
    let helpers = LiquidityActionHelpers::new(&pool, &network).unwrap();

    let amounts = helpers
        .to_input_amounts(&[HumanTokenAmount::new("0.5", NATIVE_ADDRESS)])
        .unwrap();
    assert_eq!(amounts[0].address, NATIVE_ADDRESS);
    assert_eq!(amounts[0].raw_amount, u256_dec("500000000000000000"));
    assert_eq!(amounts[0].decimals, 18);
    assert_eq!(amounts[0].symbol, "ETH");

    let sdk_amounts = helpers
        .to_sdk_input_amounts(&[
            HumanTokenAmount::new("0.5", NATIVE_ADDRESS),
            HumanTokenAmount::new("10", BAL_ADDRESS),
        ])
        .unwrap();
    assert_eq!(sdk_amounts[0].address, WETH_ADDRESS);
    assert_eq!(sdk_amounts[0].raw_amount, amounts[0].raw_amount);
    assert_eq!(sdk_amounts[1].address, BAL_ADDRESS);

    assert!(helpers.is_native_asset_in(&[HumanTokenAmount::new("1", NATIVE_ADDRESS)]));
    assert!(!helpers.is_native_asset_in(&[HumanTokenAmount::new("1", WETH_ADDRESS)]));
}

#[test]
fn test_to_input_amounts_unknown_token() {
    let pool = to_pool(bal_weth_pool_json());
    let network = mainnet();
    let helpers = LiquidityActionHelpers::new(&pool, &network).unwrap();

    let err = helpers
        .to_input_amounts(&[HumanTokenAmount::new("1", USDC_ADDRESS)])
        .unwrap_err();
    match err {
        BalRsError::TokenNotFound {
            address,
            pool_tokens,
        } => {
            assert_eq!(address, USDC_ADDRESS);
            assert!(pool_tokens.contains(&BAL_ADDRESS.to_string()));
            assert!(pool_tokens.contains(&WETH_ADDRESS.to_string()));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_to_input_amounts_invalid_amount() {
    let pool = to_pool(bal_weth_pool_json());
    let network = mainnet();
    let helpers = LiquidityActionHelpers::new(&pool, &network).unwrap();

    assert!(matches!(
        helpers.to_input_amounts(&[HumanTokenAmount::new("-1", BAL_ADDRESS)]),
        Err(BalRsError::InvalidAmount { .. })
    ));
}

#[test]
fn test_amounts_to_approve() {
    let pool = to_pool(bal_weth_pool_json());
    let network = mainnet();
    let helpers = LiquidityActionHelpers::new(&pool, &network).unwrap();

    let approvals = helpers
        .amounts_to_approve(&[HumanTokenAmount::new("3", BAL_ADDRESS)], true)
        .unwrap();
    assert_eq!(approvals.len(), 1);
    assert!(approvals[0].is_permit2);
    assert_eq!(approvals[0].token_address, BAL_ADDRESS);
    assert_eq!(approvals[0].required_raw_amount, u256_dec("3000000000000000000"));
    assert_eq!(approvals[0].requested_raw_amount, approvals[0].required_raw_amount);
    assert_eq!(approvals[0].symbol, "BAL");
}

#[test]
fn test_pool_state_for_v2_weighted() {
    let pool = to_pool(bal_weth_pool_json());
    let state = to_pool_state(&pool);

    assert_eq!(state.id, BAL_WETH_POOL_ID);
    assert_eq!(state.address, BAL_WETH_POOL_ADDRESS);
    assert_eq!(state.pool_type, "Weighted");
    assert_eq!(state.protocol_version, 2);
    assert_eq!(state.tokens.len(), 2);
    assert_eq!(state.tokens[0].address, BAL_ADDRESS);
    assert_eq!(state.tokens[0].index, 0);
    assert_eq!(state.tokens[1].address, WETH_ADDRESS);

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["type"], json!("Weighted"));
    assert_eq!(value["protocolVersion"], json!(2));
    assert_eq!(value["tokens"][1]["decimals"], json!(18));
}

#[test]
fn test_pool_state_type_mapping() {
    let cases = [
        ("COMPOSABLE_STABLE", 2, "ComposableStable"),
        ("PHANTOM_STABLE", 2, "ComposableStable"),
        ("META_STABLE", 2, "MetaStable"),
        ("GYROE", 2, "GyroE"),
        ("GYRO", 2, "Gyro2"),
        ("COW_AMM", 1, "CowAmm"),
        ("STABLE", 3, "STABLE"),
        ("WEIGHTED", 3, "WEIGHTED"),
    ];
    for (tag, version, expected) in cases {
        let pool = to_pool(simple_pool_json(tag, version, 1));
        assert_eq!(to_pool_state(&pool).pool_type, expected, "{tag} v{version}");
    }
}

#[test]
fn test_boosted_pool_state() {
    let pool = to_pool(partial_boosted_pool_json());
    let state = to_boosted_pool_state(&pool);

    assert_eq!(state.protocol_version, 3);
    assert_eq!(state.pool_type, "WEIGHTED");
    assert_eq!(state.total_shares, "8.008128835706017977");
    assert_eq!(state.tokens.len(), 2);

    let weth = &state.tokens[0];
    assert_eq!(weth.address, SEPOLIA_WETH_ADDRESS);
    assert_eq!(weth.balance, "0.10805627553902844");
    assert!(weth.underlying_token.is_none());

    let stata = &state.tokens[1];
    assert_eq!(stata.address, STATA_USDT_ADDRESS);
    assert_eq!(stata.decimals, 6);
    let underlying = stata.underlying_token.as_ref().unwrap();
    assert_eq!(underlying.address, USDT_AAVE_ADDRESS);
    assert_eq!(underlying.decimals, 6);
    assert_eq!(underlying.index, 1);

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["tokens"][0]["underlyingToken"], json!(null));
    assert_eq!(value["totalShares"], json!("8.008128835706017977"));
}

#[test]
fn test_boosted_pool_state_ignores_unused_underlying() {
    let mut json = partial_boosted_pool_json();
    json["poolTokens"][1]["useUnderlyingForAddRemove"] = json!(false);
    let pool = to_pool(json);
    let state = to_boosted_pool_state(&pool);
    assert!(state.tokens[1].underlying_token.is_none());
}

#[test]
fn test_nested_pool_state() {
    let pool = to_pool(nested_pool_json());
    let state = to_nested_pool_state(&pool);

    assert_eq!(state.protocol_version, 2);
    assert_eq!(state.pools.len(), 2);

    let nested = &state.pools[0];
    assert_eq!(nested.id, NESTED_POOL_ID);
    assert_eq!(nested.level, 0);
    assert_eq!(nested.pool_type, "ComposableStable");
    let nested_indexes: Vec<usize> = nested.tokens.iter().map(|t| t.index).collect();
    assert_eq!(nested_indexes, vec![0, 1, 2, 3]);

    let parent = &state.pools[1];
    assert_eq!(parent.id, pool.id);
    assert_eq!(parent.level, 1);
    assert_eq!(parent.pool_type, "Weighted");

    let main_tokens: Vec<_> = state.main_tokens.iter().map(|t| t.address).collect();
    assert_eq!(
        main_tokens,
        vec![DAI_ADDRESS, USDC_ADDRESS, USDT_ADDRESS, WETH_ADDRESS]
    );
    assert_eq!(state.main_tokens[1].decimals, 6);
}

#[test]
fn test_nested_tokens_are_valid_inputs() {
    let pool = to_pool(nested_pool_json());
    let network = mainnet();
    let helpers = LiquidityActionHelpers::new(&pool, &network).unwrap();

    let amounts = helpers
        .to_input_amounts(&[HumanTokenAmount::new("100", DAI_ADDRESS)])
        .unwrap();
    assert_eq!(amounts[0].symbol, "DAI");
    assert_eq!(amounts[0].raw_amount, u256_dec("100000000000000000000"));
}

#[test]
fn test_supports_nested_actions_respects_deny_list() {
    let pool = to_pool(nested_pool_json());
    let mut network = mainnet();
    assert!(supports_nested_actions(&pool, &network));

    network.disallow_nested_actions = vec![pool.id.clone()];
    assert!(!supports_nested_actions(&pool, &network));

    assert!(!supports_nested_actions(&to_pool(bal_weth_pool_json()), &mainnet()));
}

#[test]
fn test_filter_human_amounts_in_treats_native_and_wrapped_alike() {
    let registry = NetworkRegistry::default();
    for chain in registry.chains() {
        let network = registry.get(chain).unwrap();
        let wrapped = network.wrapped_native_asset;
        let other = address!("1111111111111111111111111111111111111111");
        let amounts = vec![
            HumanTokenAmount::new("1", NATIVE_ASSET_PLACEHOLDER),
            HumanTokenAmount::new("2", wrapped),
            HumanTokenAmount::new("3", other),
        ];

        let without_native = filter_human_amounts_in(&amounts, NATIVE_ASSET_PLACEHOLDER, network);
        let without_wrapped = filter_human_amounts_in(&amounts, wrapped, network);
        assert_eq!(without_native, without_wrapped, "{chain}");
        assert_eq!(without_native, vec![HumanTokenAmount::new("3", other)]);

        let twice = filter_human_amounts_in(&without_native, NATIVE_ASSET_PLACEHOLDER, network);
        assert_eq!(twice, without_native, "{chain}");

        let without_other = filter_human_amounts_in(&amounts, other, network);
        assert_eq!(without_other.len(), 2, "{chain}");
    }
}

#[test]
fn test_round_decimals() {
    let amounts = vec![
        HumanTokenAmount::new("1.123456789012345678", BAL_ADDRESS).with_symbol("BAL"),
        HumanTokenAmount::new("2", WETH_ADDRESS),
    ];
    let rounded = round_decimals(&amounts, 10).unwrap();

    assert_eq!(rounded[0].human_amount, "1.1234567890");
    assert_eq!(rounded[0].symbol.as_deref(), Some("BAL"));
    assert_eq!(rounded[1].human_amount, "2.0000000000");

    assert!(round_decimals(&[HumanTokenAmount::new("1e5", BAL_ADDRESS)], 10).is_err());
}

#[test]
fn test_empty_amount_helpers() {
    let pool = to_pool(bal_weth_pool_json());
    let empty = empty_token_amounts(&pool);
    assert_eq!(empty.len(), 2);
    assert!(empty.iter().all(|amount| amount.raw_amount.is_zero()));
    assert_eq!(empty[0].symbol, "BAL");

    assert!(are_empty_amounts(&[]));
    assert!(are_empty_amounts(&[
        HumanTokenAmount::new("", BAL_ADDRESS),
        HumanTokenAmount::new("0", WETH_ADDRESS),
    ]));
    assert!(!are_empty_amounts(&[
        HumanTokenAmount::new("0", BAL_ADDRESS),
        HumanTokenAmount::new("0.1", WETH_ADDRESS),
    ]));
}

#[test]
fn test_native_asset_injection() {
    let network = mainnet();
    let native = KnownToken {
        address: NATIVE_ADDRESS,
        symbol: "ETH".to_string(),
        decimals: 18,
    };
    let weth = KnownToken {
        address: WETH_ADDRESS,
        symbol: "WETH".to_string(),
        decimals: 18,
    };
    let bal = KnownToken {
        address: BAL_ADDRESS,
        symbol: "BAL".to_string(),
        decimals: 18,
    };

    let pool = to_pool(bal_weth_pool_json());
    let tokens = vec![bal.clone(), weth.clone()];

    let injected = inject_native_asset(tokens.clone(), Some(&native), &pool, &network);
    assert_eq!(injected, vec![native.clone(), bal.clone(), weth.clone()]);
    assert_eq!(inject_native_asset(tokens.clone(), None, &pool, &network), tokens);

    let cow = to_pool(simple_pool_json("COW_AMM", 1, 1));
    assert_eq!(
        inject_native_asset(tokens.clone(), Some(&native), &cow, &network),
        tokens
    );

    let replaced = replace_wrapped_with_native_asset(tokens.clone(), Some(&native), &network);
    assert_eq!(replaced, vec![bal.clone(), native.clone()]);
    assert_eq!(
        replace_wrapped_with_native_asset(tokens.clone(), None, &network),
        tokens
    );

    assert!(should_show_native_wrapped_selector(WETH_ADDRESS, &pool, &network));
    assert!(should_show_native_wrapped_selector(NATIVE_ADDRESS, &pool, &network));
    assert!(!should_show_native_wrapped_selector(BAL_ADDRESS, &pool, &network));
}

#[test]
fn test_ensure_last_query_response() {
    let reporter = RecordingReporter::default();

    let response = ensure_last_query_response("Weighted add liquidity", Some(42u64), &reporter);
    assert_eq!(response.unwrap(), 42);
    assert!(reporter.captured.borrow().is_empty());

    let missing =
        ensure_last_query_response::<u64>("Weighted add liquidity", None, &reporter).unwrap_err();
    assert!(matches!(missing, BalRsError::MissingQueryResult(ref action) if action == "Weighted add liquidity"));

    let captured = reporter.captured.borrow();
    assert_eq!(captured.len(), 1);
    let (message, context) = &captured[0];
    assert!(message.contains("Weighted add liquidity"));
    assert_eq!(context.severity, Severity::Fatal);
    assert_eq!(context.extra["action"], json!("Weighted add liquidity"));
}

#[test]
fn test_helpers_from_registry() {
    let pool = to_pool(partial_boosted_pool_json());
    let registry = NetworkRegistry::default();
    let helpers = LiquidityActionHelpers::from_registry(&pool, &registry).unwrap();
    assert_eq!(helpers.chain_id(), 11155111);
    assert!(helpers.is_v3_pool());
    assert_eq!(helpers.pool_state().protocol_version, 3);

    let empty = NetworkRegistry::empty();
    assert!(matches!(
        LiquidityActionHelpers::from_registry(&pool, &empty),
        Err(BalRsError::UnsupportedChain(chain)) if chain == "SEPOLIA"
    ));
}

#[test]
fn test_helpers_reject_network_of_another_chain() {
    let pool = to_pool(partial_boosted_pool_json());
    let network = mainnet();
    assert!(matches!(
        LiquidityActionHelpers::new(&pool, &network),
        Err(BalRsError::ConfigError(_))
    ));
    assert!(LiquidityActionHelpers::new(&pool, &sepolia()).is_ok());
}
