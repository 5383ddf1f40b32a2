//! Enumerable set of addresses with a nonzero deposit.
//!
//! Members live in dense `HolderAt` slots with a reverse `HolderSlot` lookup,
//! so membership, insertion and removal are all constant time. Removal moves
//! the last member into the freed slot.

use soroban_sdk::{Address, Env};

use crate::{extend_entry, extend_instance, DataKey};

pub fn size(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::HolderCount)
        .unwrap_or(0)
}

pub fn contains(env: &Env, holder: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::HolderSlot(holder.clone()))
}

pub fn at(env: &Env, index: u32) -> Option<Address> {
    if index >= size(env) {
        return None;
    }
    env.storage().persistent().get(&DataKey::HolderAt(index))
}

/// Insert `holder`; returns false if it was already a member.
///
/// Both entries of the member get their lifetime extended either way.
pub fn add(env: &Env, holder: &Address) -> bool {
    let slot_key = DataKey::HolderSlot(holder.clone());
    let storage = env.storage().persistent();

    if let Some(slot) = storage.get::<_, u32>(&slot_key) {
        extend_entry(env, &slot_key);
        extend_entry(env, &DataKey::HolderAt(slot - 1));
        return false;
    }

    let count = size(env);
    let at_key = DataKey::HolderAt(count);
    storage.set(&at_key, holder);
    storage.set(&slot_key, &(count + 1));
    extend_entry(env, &at_key);
    extend_entry(env, &slot_key);

    env.storage()
        .instance()
        .set(&DataKey::HolderCount, &(count + 1));
    extend_instance(env);

    true
}

/// Remove `holder`; returns false if it was not a member.
pub fn remove(env: &Env, holder: &Address) -> bool {
    let storage = env.storage().persistent();
    let slot: u32 = match storage.get(&DataKey::HolderSlot(holder.clone())) {
        Some(slot) => slot,
        None => return false,
    };

    let index = slot - 1;
    let last_index = size(env) - 1;

    if index != last_index {
        if let Some(last) = storage.get::<_, Address>(&DataKey::HolderAt(last_index)) {
            let at_key = DataKey::HolderAt(index);
            let slot_key = DataKey::HolderSlot(last.clone());
            storage.set(&at_key, &last);
            storage.set(&slot_key, &slot);
            extend_entry(env, &at_key);
            extend_entry(env, &slot_key);
        }
    }

    storage.remove(&DataKey::HolderAt(last_index));
    storage.remove(&DataKey::HolderSlot(holder.clone()));
    env.storage()
        .instance()
        .set(&DataKey::HolderCount, &last_index);

    true
}
