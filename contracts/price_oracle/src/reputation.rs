use soroban_sdk::{symbol_short, Address, Env};

use crate::storage;
use crate::types::{Error, EXPULSION_THRESHOLD};

pub fn is_eligible(env: &Env, addr: &Address) -> bool {
    storage::get_feeder(env, addr).yellow_cards <= EXPULSION_THRESHOLD
}

/// Adds one yellow card. The infraction that pushes the count past the
/// threshold expels the feeder and shrinks the oracle's quorum, once, so the
/// majority threshold keeps tracking the remaining honest voters. Returns
/// the new card count.
pub fn record_infraction(env: &Env, addr: &Address, oracle_id: u64) -> Result<u32, Error> {
    let mut feeder = storage::get_feeder(env, addr);
    feeder.yellow_cards += 1;
    let cards = feeder.yellow_cards;
    storage::set_feeder(env, addr, &feeder);

    env.events()
        .publish((symbol_short!("infract"), addr.clone()), (oracle_id, cards));

    if cards == EXPULSION_THRESHOLD + 1 {
        let mut oracle = storage::get_oracle(env, oracle_id)?;
        if oracle.quorum_size > 1 {
            oracle.quorum_size -= 1;
            storage::set_oracle(env, oracle_id, &oracle);
        }
        env.events()
            .publish((symbol_short!("expelled"), addr.clone()), oracle_id);
    }

    Ok(cards)
}

/// Admin reset of the card counter. Does not restore any quorum shrunk by
/// the expulsion.
pub fn reset(env: &Env, addr: &Address) {
    let mut feeder = storage::get_feeder(env, addr);
    feeder.yellow_cards = 0;
    storage::set_feeder(env, addr, &feeder);
}
