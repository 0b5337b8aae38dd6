use soroban_sdk::{symbol_short, Address, Env};

use crate::guard;
use crate::reputation;
use crate::stake;
use crate::storage;
use crate::types::{Config, Error, RoundOutcome, EXPULSION_THRESHOLD};

/// Post-resolution dispute: anyone may report a feeder whose recorded vote
/// contradicts the round's fixed outcome. A valid report earns the caller a
/// reward and the accused a yellow card; once the accused is past the
/// expulsion threshold each further report also slashes their stake. Each
/// (round, accused) pair can be disputed once.
pub fn rat_out(
    env: &Env,
    config: &Config,
    caller: &Address,
    oracle_id: u64,
    round_id: u64,
    accused: &Address,
) -> Result<(), Error> {
    let round = storage::get_round(env, oracle_id, round_id)?;
    if round.outcome == RoundOutcome::Pending {
        return Err(Error::InvalidState);
    }
    let voted_approve =
        storage::get_vote(env, oracle_id, round_id, accused).ok_or(Error::NotFound)?;
    if storage::is_disputed(env, oracle_id, round_id, accused) {
        return Err(Error::AlreadyDisputed);
    }
    if voted_approve == (round.outcome == RoundOutcome::Approved) {
        return Err(Error::FalseAccusation);
    }

    storage::set_disputed(env, oracle_id, round_id, accused);
    let cards = reputation::record_infraction(env, accused, oracle_id)?;
    if cards > EXPULSION_THRESHOLD {
        stake::slash(env, accused, config.slash_penalty);
    }

    guard::transfer(
        env,
        &config.token,
        &env.current_contract_address(),
        caller,
        config.rat_out_reward,
    )?;

    env.events().publish(
        (symbol_short!("ratout"), oracle_id),
        (round_id, accused.clone(), caller.clone()),
    );
    Ok(())
}
