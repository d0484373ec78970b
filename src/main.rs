use balrs::{
    LiquidityActionHelpers, NetworkRegistry, Pool,
    balancer::{
        adapter::supports_nested_actions,
        classifier::{
            has_no_liquidity, is_boosted, is_composable_stable_v1, requires_proportional_input,
            should_use_recovery_remove_liquidity, supports_proportional_add_liquidity_kind,
        },
        handlers::{
            AddLiquidityType, RemoveLiquidityType, select_add_liquidity_handler,
            select_remove_liquidity_handler,
        },
    },
};
use serde_json::json;

const USAGE: &str = "usage: balrs <pool.json> [networks.json]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let Some(pool_path) = args.next() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let registry = match args.next() {
        Some(networks_path) => {
            tracing::info!(path = %networks_path, "Loading network overrides");
            NetworkRegistry::from_path(networks_path)?
        }
        None => NetworkRegistry::default(),
    };

    let pool = Pool::from_json(&std::fs::read_to_string(&pool_path)?)?;
    tracing::info!(pool = %pool.id, chain = %pool.chain, kind = ?pool.kind, "Loaded pool");

    let helpers = LiquidityActionHelpers::from_registry(&pool, &registry)?;
    let network = helpers.network;

    let add_handler = select_add_liquidity_handler(&pool, network, AddLiquidityType::Unbalanced);
    let remove_handler =
        select_remove_liquidity_handler(&pool, network, RemoveLiquidityType::Proportional);

    let boosted = is_boosted(&pool);
    let nested = supports_nested_actions(&pool, network);

    let report = json!({
        "id": pool.id,
        "kind": format!("{:?}", pool.kind),
        "classification": {
            "composableStableV1": is_composable_stable_v1(&pool),
            "requiresProportionalInput": requires_proportional_input(&pool),
            "supportsProportionalAddLiquidityKind": supports_proportional_add_liquidity_kind(&pool, network),
            "shouldUseRecoveryRemoveLiquidity": should_use_recovery_remove_liquidity(&pool, network),
            "supportsNestedActions": nested,
            "boosted": boosted,
            "hasNoLiquidity": has_no_liquidity(&pool),
        },
        "handlers": {
            "add": add_handler.name(),
            "remove": remove_handler.name(),
        },
        "poolState": helpers.pool_state(),
        "boostedPoolState": boosted.then(|| helpers.boosted_pool_state()),
        "nestedPoolState": nested.then(|| helpers.nested_pool_state()),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
