use soroban_sdk::{Address, Env};

use crate::types::{ChallengeRound, Config, DataKey, Error, Feeder, FillerRole, Oracle};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<Config, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_admin(env: &Env, addr: &Address, enabled: bool) {
    env.storage()
        .instance()
        .set(&DataKey::Admin(addr.clone()), &enabled);
}

pub fn is_admin(env: &Env, addr: &Address) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Admin(addr.clone()))
        .unwrap_or(false)
}

pub fn is_entered(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Entered)
}

pub fn set_entered(env: &Env) {
    env.storage().instance().set(&DataKey::Entered, &true);
}

pub fn clear_entered(env: &Env) {
    env.storage().instance().remove(&DataKey::Entered);
}

pub fn next_oracle_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .instance()
        .get(&DataKey::OracleCount)
        .unwrap_or(0)
        + 1;
    env.storage().instance().set(&DataKey::OracleCount, &id);
    id
}

pub fn get_slashed_pool(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::SlashedPool)
        .unwrap_or(0)
}

pub fn set_slashed_pool(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::SlashedPool, &amount);
}

pub fn set_oracle(env: &Env, oracle_id: u64, oracle: &Oracle) {
    env.storage()
        .persistent()
        .set(&DataKey::Oracle(oracle_id), oracle);
}

pub fn get_oracle(env: &Env, oracle_id: u64) -> Result<Oracle, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Oracle(oracle_id))
        .ok_or(Error::NotFound)
}

pub fn set_oracle_admin(env: &Env, oracle_id: u64, addr: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::OracleAdmin(oracle_id, addr.clone()), &true);
}

pub fn is_oracle_admin(env: &Env, oracle_id: u64, addr: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::OracleAdmin(oracle_id, addr.clone()))
        .unwrap_or(false)
}

pub fn set_filler(env: &Env, oracle_id: u64, addr: &Address, role: FillerRole) {
    env.storage()
        .persistent()
        .set(&DataKey::Filler(oracle_id, addr.clone()), &role);
}

pub fn get_filler(env: &Env, oracle_id: u64, addr: &Address) -> Option<FillerRole> {
    env.storage()
        .persistent()
        .get(&DataKey::Filler(oracle_id, addr.clone()))
}

pub fn remove_filler(env: &Env, oracle_id: u64, addr: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Filler(oracle_id, addr.clone()));
}

pub fn set_admission(env: &Env, oracle_id: u64, addr: &Address, requested_at: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::Admission(oracle_id, addr.clone()), &requested_at);
}

pub fn get_admission(env: &Env, oracle_id: u64, addr: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::Admission(oracle_id, addr.clone()))
}

pub fn remove_admission(env: &Env, oracle_id: u64, addr: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Admission(oracle_id, addr.clone()));
}

pub fn get_feeder(env: &Env, addr: &Address) -> Feeder {
    env.storage()
        .persistent()
        .get(&DataKey::Feeder(addr.clone()))
        .unwrap_or(Feeder {
            stake: 0,
            yellow_cards: 0,
            last_active_at: 0,
        })
}

pub fn set_feeder(env: &Env, addr: &Address, feeder: &Feeder) {
    env.storage()
        .persistent()
        .set(&DataKey::Feeder(addr.clone()), feeder);
}

pub fn set_round(env: &Env, oracle_id: u64, round_id: u64, round: &ChallengeRound) {
    env.storage()
        .persistent()
        .set(&DataKey::Round(oracle_id, round_id), round);
}

pub fn get_round(env: &Env, oracle_id: u64, round_id: u64) -> Result<ChallengeRound, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Round(oracle_id, round_id))
        .ok_or(Error::NotFound)
}

pub fn set_vote(env: &Env, oracle_id: u64, round_id: u64, addr: &Address, approve: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::Vote(oracle_id, round_id, addr.clone()), &approve);
}

pub fn get_vote(env: &Env, oracle_id: u64, round_id: u64, addr: &Address) -> Option<bool> {
    env.storage()
        .persistent()
        .get(&DataKey::Vote(oracle_id, round_id, addr.clone()))
}

pub fn is_disputed(env: &Env, oracle_id: u64, round_id: u64, addr: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Disputed(oracle_id, round_id, addr.clone()))
}

pub fn set_disputed(env: &Env, oracle_id: u64, round_id: u64, addr: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Disputed(oracle_id, round_id, addr.clone()), &true);
}
