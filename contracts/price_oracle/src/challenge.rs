use soroban_sdk::{symbol_short, Address, Env};

use crate::reputation;
use crate::stake;
use crate::storage;
use crate::types::{
    ChallengeRound, Error, FillerRole, Oracle, RoundOutcome, BASIS_POINTS, RATE_BAND_BPS,
    RATE_LIMIT_WINDOW,
};

/// Simple majority of the current quorum.
pub fn majority_threshold(quorum_size: u32) -> u32 {
    quorum_size / 2 + 1
}

/// True when `proposed` sits inside the closed ±1% band around `current`,
/// measured in basis points against the current price. A feed that was never
/// set (`current == 0`) puts every nonzero proposal outside the band.
pub fn within_band(current: i128, proposed: i128) -> bool {
    let delta = if proposed >= current {
        proposed - current
    } else {
        current - proposed
    };
    delta * BASIS_POINTS <= current * RATE_BAND_BPS
}

fn require_voter(env: &Env, oracle: &Oracle, oracle_id: u64, addr: &Address) -> Result<(), Error> {
    if !reputation::is_eligible(env, addr) {
        return Err(Error::Expelled);
    }
    match storage::get_filler(env, oracle_id, addr) {
        Some(FillerRole::Seed) => Ok(()),
        Some(FillerRole::Normal) if !oracle.only_seeders => Ok(()),
        _ => Err(Error::Unauthorized),
    }
}

/// Idle -> Open. The proposer's approve is implicit, which also means a
/// quorum of one resolves the round in the same call: the last filler is
/// always right.
pub fn propose(
    env: &Env,
    caller: &Address,
    oracle_id: u64,
    price: i128,
    now: u64,
) -> Result<u64, Error> {
    if price < 0 {
        return Err(Error::InvalidState);
    }
    let mut oracle = storage::get_oracle(env, oracle_id)?;
    require_voter(env, &oracle, oracle_id, caller)?;
    if oracle.open_round.is_some() {
        return Err(Error::InvalidState);
    }
    if now - oracle.last_updated < RATE_LIMIT_WINDOW && within_band(oracle.price, price) {
        return Err(Error::RateLimited);
    }

    oracle.round_count += 1;
    let round_id = oracle.round_count;
    let round = ChallengeRound {
        id: round_id,
        oracle_id,
        proposed_price: price,
        proposer: caller.clone(),
        approvals: 1,
        rejects: 0,
        outcome: RoundOutcome::Pending,
    };
    storage::set_round(env, oracle_id, round_id, &round);
    storage::set_vote(env, oracle_id, round_id, caller, true);
    oracle.open_round = Some(round_id);
    storage::set_oracle(env, oracle_id, &oracle);

    stake::touch(env, caller, now);

    env.events().publish(
        (symbol_short!("propose"), oracle_id),
        (round_id, caller.clone(), price),
    );

    resolve_if_decided(env, oracle_id, round_id, now)?;
    Ok(round_id)
}

/// Open -> Open, or Open -> Idle when this vote reaches a threshold.
pub fn vote(
    env: &Env,
    caller: &Address,
    oracle_id: u64,
    approve: bool,
    now: u64,
) -> Result<(), Error> {
    let oracle = storage::get_oracle(env, oracle_id)?;
    require_voter(env, &oracle, oracle_id, caller)?;
    let round_id = oracle.open_round.ok_or(Error::InvalidState)?;
    if storage::get_vote(env, oracle_id, round_id, caller).is_some() {
        return Err(Error::DoubleVote);
    }

    storage::set_vote(env, oracle_id, round_id, caller, approve);
    let mut round = storage::get_round(env, oracle_id, round_id)?;
    if approve {
        round.approvals += 1;
    } else {
        round.rejects += 1;
    }
    storage::set_round(env, oracle_id, round_id, &round);

    stake::touch(env, caller, now);

    resolve_if_decided(env, oracle_id, round_id, now)
}

/// Checks the live majority threshold and closes the round if either side
/// reached it. The quorum is re-read here, so a quorum shrunk mid-round
/// lowers the bar for the votes already cast.
fn resolve_if_decided(env: &Env, oracle_id: u64, round_id: u64, now: u64) -> Result<(), Error> {
    let mut oracle = storage::get_oracle(env, oracle_id)?;
    let mut round = storage::get_round(env, oracle_id, round_id)?;
    let threshold = majority_threshold(oracle.quorum_size);

    if round.approvals >= threshold {
        round.outcome = RoundOutcome::Approved;
        storage::set_round(env, oracle_id, round_id, &round);
        oracle.price = round.proposed_price;
        oracle.last_updated = now;
        oracle.version += 1;
        oracle.open_round = None;
        storage::set_oracle(env, oracle_id, &oracle);
        env.events().publish(
            (symbol_short!("approved"), oracle_id),
            (round_id, round.proposed_price, oracle.version),
        );
    } else if round.rejects >= threshold {
        round.outcome = RoundOutcome::Rejected;
        storage::set_round(env, oracle_id, round_id, &round);
        oracle.open_round = None;
        storage::set_oracle(env, oracle_id, &oracle);
        // Re-loads the oracle internally; must run after the round close is
        // persisted so the quorum shrink is not clobbered.
        reputation::record_infraction(env, &round.proposer, oracle_id)?;
        env.events().publish(
            (symbol_short!("rejected"), oracle_id),
            (round_id, round.proposer.clone()),
        );
    }

    Ok(())
}
