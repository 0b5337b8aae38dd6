use soroban_sdk::{symbol_short, Address, Env};

use crate::guard;
use crate::storage;
use crate::types::{Config, Error};

pub fn deposit(env: &Env, config: &Config, from: &Address, amount: i128) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InsufficientPayment);
    }

    guard::transfer(
        env,
        &config.token,
        from,
        &env.current_contract_address(),
        amount,
    )?;

    let mut feeder = storage::get_feeder(env, from);
    feeder.stake += amount;
    storage::set_feeder(env, from, &feeder);

    env.events()
        .publish((symbol_short!("deposit"), from.clone()), amount);
    Ok(())
}

pub fn withdraw(
    env: &Env,
    config: &Config,
    to: &Address,
    amount: i128,
    now: u64,
) -> Result<(), Error> {
    let mut feeder = storage::get_feeder(env, to);
    if amount <= 0 || amount > feeder.stake {
        return Err(Error::InsufficientStake);
    }
    // last_active_at == 0 means the feeder never proposed or voted, so there
    // is nothing to dispute and no cooldown applies.
    if feeder.last_active_at != 0 && now - feeder.last_active_at < config.withdraw_cooldown {
        return Err(Error::Locked);
    }

    feeder.stake -= amount;
    storage::set_feeder(env, to, &feeder);

    guard::transfer(env, &config.token, &env.current_contract_address(), to, amount)?;

    env.events()
        .publish((symbol_short!("withdraw"), to.clone()), amount);
    Ok(())
}

/// Debits up to `penalty` from the feeder's stake, floored at zero, and
/// credits the debited amount to the reclaimable slashed pool. Returns the
/// amount actually debited.
pub fn slash(env: &Env, addr: &Address, penalty: i128) -> i128 {
    let mut feeder = storage::get_feeder(env, addr);
    let debited = if penalty > feeder.stake {
        feeder.stake
    } else {
        penalty
    };
    if debited > 0 {
        feeder.stake -= debited;
        storage::set_feeder(env, addr, &feeder);
        storage::set_slashed_pool(env, storage::get_slashed_pool(env) + debited);
        env.events()
            .publish((symbol_short!("slashed"), addr.clone()), debited);
    }
    debited
}

/// Stamps the feeder's last vote/proposal time.
pub fn touch(env: &Env, addr: &Address, now: u64) {
    let mut feeder = storage::get_feeder(env, addr);
    feeder.last_active_at = now;
    storage::set_feeder(env, addr, &feeder);
}
