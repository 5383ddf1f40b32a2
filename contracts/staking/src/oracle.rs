use soroban_sdk::{contractclient, Address, Env};

/// Read-only price feed (XAU/BUSD in the reference deployment).
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn latest_price(env: Env) -> i128;
}

/// Fetch the feed's latest price. Not an input to reward math.
pub fn latest_price(env: &Env, price_feed: &Address) -> i128 {
    PriceFeedClient::new(env, price_feed).latest_price()
}
