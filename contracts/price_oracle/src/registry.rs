use soroban_sdk::{symbol_short, Address, Env};

use crate::guard;
use crate::reputation;
use crate::stake;
use crate::storage;
use crate::types::{Config, Error, FillerRole};

/// Files an admission request for an open feed. The fee goes straight to the
/// treasury; the request itself buys nothing until the waiting period runs
/// out. The queue is capped so that completing every pending request at once
/// could never hand newcomers half the quorum.
pub fn request_admission(
    env: &Env,
    config: &Config,
    caller: &Address,
    oracle_id: u64,
    payment: i128,
    now: u64,
) -> Result<(), Error> {
    let mut oracle = storage::get_oracle(env, oracle_id)?;
    if oracle.only_seeders {
        return Err(Error::InvalidState);
    }
    if storage::get_filler(env, oracle_id, caller).is_some() {
        return Err(Error::InvalidState);
    }
    if storage::get_admission(env, oracle_id, caller).is_some() {
        return Err(Error::InvalidState);
    }
    if !reputation::is_eligible(env, caller) {
        return Err(Error::Expelled);
    }
    if storage::get_feeder(env, caller).stake < config.min_stake {
        return Err(Error::InsufficientStake);
    }
    if payment < config.admission_fee {
        return Err(Error::InsufficientPayment);
    }
    // Post-state cap: pending admissions never exceed half the quorum.
    if 2 * (oracle.pending_admissions + 1) > oracle.quorum_size {
        return Err(Error::RateLimited);
    }

    guard::transfer(env, &config.token, caller, &config.treasury, payment)?;

    storage::set_admission(env, oracle_id, caller, now);
    oracle.pending_admissions += 1;
    storage::set_oracle(env, oracle_id, &oracle);

    env.events()
        .publish((symbol_short!("admit_req"), oracle_id), caller.clone());
    Ok(())
}

pub fn complete_admission(
    env: &Env,
    config: &Config,
    caller: &Address,
    oracle_id: u64,
    now: u64,
) -> Result<(), Error> {
    let mut oracle = storage::get_oracle(env, oracle_id)?;
    let requested_at =
        storage::get_admission(env, oracle_id, caller).ok_or(Error::NoPendingRequest)?;
    if now - requested_at < config.admission_wait {
        return Err(Error::TooSoon);
    }
    if !reputation::is_eligible(env, caller) {
        return Err(Error::Expelled);
    }

    storage::remove_admission(env, oracle_id, caller);
    storage::set_filler(env, oracle_id, caller, FillerRole::Normal);
    oracle.pending_admissions -= 1;
    oracle.quorum_size += 1;
    storage::set_oracle(env, oracle_id, &oracle);

    // Grace period: a freshly admitted feeder starts the inactivity clock now.
    stake::touch(env, caller, now);

    env.events()
        .publish((symbol_short!("admitted"), oracle_id), caller.clone());
    Ok(())
}

/// Expels a feeder that has not voted or proposed within the inactivity
/// window and pays the reporter. The last remaining feeder can never be
/// expelled this way.
pub fn mark_inactive(
    env: &Env,
    config: &Config,
    caller: &Address,
    oracle_id: u64,
    target: &Address,
    now: u64,
) -> Result<(), Error> {
    let mut oracle = storage::get_oracle(env, oracle_id)?;
    storage::get_filler(env, oracle_id, target).ok_or(Error::NotFound)?;
    if oracle.quorum_size <= 1 {
        return Err(Error::InvalidState);
    }
    let feeder = storage::get_feeder(env, target);
    if now - feeder.last_active_at < config.inactivity_window {
        return Err(Error::TooSoon);
    }

    storage::remove_filler(env, oracle_id, target);
    oracle.quorum_size -= 1;
    storage::set_oracle(env, oracle_id, &oracle);

    guard::transfer(
        env,
        &config.token,
        &env.current_contract_address(),
        caller,
        config.inactivity_reward,
    )?;

    env.events().publish(
        (symbol_short!("inactive"), oracle_id),
        (target.clone(), caller.clone()),
    );
    Ok(())
}
