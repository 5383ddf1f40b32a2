use soroban_sdk::{log, token, Address, Env};

/// Asset movement the ledger depends on but does not own.
///
/// Both calls report success instead of aborting so the ledger can reject the
/// enclosing operation before touching its own state.
pub trait TransferGateway {
    /// Move `amount` of `asset` from `from` to `to`.
    fn pull(&self, asset: &Address, from: &Address, to: &Address, amount: i128) -> bool;

    /// Send `amount` of `asset` out of ledger custody to `to`.
    fn push(&self, asset: &Address, to: &Address, amount: i128) -> bool;
}

/// Gateway backed by the Soroban token interface.
pub struct TokenGateway<'a> {
    env: &'a Env,
}

impl<'a> TokenGateway<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    fn transfer(&self, asset: &Address, from: &Address, to: &Address, amount: i128) -> bool {
        let client = token::TokenClient::new(self.env, asset);
        match client.try_transfer(from, to, &amount) {
            Ok(Ok(())) => true,
            _ => {
                log!(
                    self.env,
                    "Token {} declined transfer of {} from {}",
                    asset.clone(),
                    amount,
                    from.clone()
                );
                false
            }
        }
    }
}

impl TransferGateway for TokenGateway<'_> {
    fn pull(&self, asset: &Address, from: &Address, to: &Address, amount: i128) -> bool {
        self.transfer(asset, from, to, amount)
    }

    fn push(&self, asset: &Address, to: &Address, amount: i128) -> bool {
        self.transfer(asset, &self.env.current_contract_address(), to, amount)
    }
}

#[cfg(test)]
pub use fake::FakeGateway;

#[cfg(test)]
mod fake {
    use super::TransferGateway;
    use core::cell::Cell;
    use soroban_sdk::Address;

    /// In-memory gateway that counts calls and can be told to decline.
    #[derive(Default)]
    pub struct FakeGateway {
        pub decline_pull: Cell<bool>,
        pub decline_push: Cell<bool>,
        pub pulled: Cell<i128>,
        pub pushed: Cell<i128>,
        pub calls: Cell<u32>,
    }

    impl FakeGateway {
        pub fn declining() -> Self {
            let gateway = Self::default();
            gateway.decline_pull.set(true);
            gateway.decline_push.set(true);
            gateway
        }
    }

    impl TransferGateway for FakeGateway {
        fn pull(&self, _asset: &Address, _from: &Address, _to: &Address, amount: i128) -> bool {
            self.calls.set(self.calls.get() + 1);
            if self.decline_pull.get() {
                return false;
            }
            self.pulled.set(self.pulled.get() + amount);
            true
        }

        fn push(&self, _asset: &Address, _to: &Address, amount: i128) -> bool {
            self.calls.set(self.calls.get() + 1);
            if self.decline_push.get() {
                return false;
            }
            self.pushed.set(self.pushed.get() + amount);
            true
        }
    }
}
