use soroban_sdk::{token, Address, Env};

use crate::storage;
use crate::types::Error;

/// Runs `f` while holding the exclusive entry marker. Any nested call into a
/// fund-moving operation on this contract observes the marker and fails with
/// `ReentrancyDetected`. The marker is cleared on every exit path.
pub fn non_reentrant<T>(env: &Env, f: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    if storage::is_entered(env) {
        return Err(Error::ReentrancyDetected);
    }
    storage::set_entered(env);
    let result = f();
    storage::clear_entered(env);
    result
}

/// Token transfer that must confirm success; anything else aborts the call.
pub fn transfer(
    env: &Env,
    token_addr: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    let client = token::Client::new(env, token_addr);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailure),
    }
}
