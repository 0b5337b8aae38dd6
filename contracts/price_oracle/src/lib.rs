#![no_std]

use soroban_sdk::{
    contract, contractimpl, contractmeta, symbol_short, Address, Env, Vec,
};

mod challenge;
mod dispute;
mod guard;
mod registry;
mod reputation;
mod stake;
mod storage;
pub mod types;

use types::{
    ChallengeRound, Config, Error, Feeder, FillerRole, Oracle, PriceReading, MAX_SEED_FILLERS,
    BASIS_POINTS, ONE_TOKEN, SECONDS_PER_DAY,
};

contractmeta!(
    key = "Description",
    val = "Price feeds maintained by staked feeders via challenge-round voting"
);

#[contract]
pub struct PriceOracleContract;

#[contractimpl]
impl PriceOracleContract {
    // ───────────── INITIALIZATION ─────────────

    /// Initialize the contract
    ///
    /// # Arguments
    /// * `admin` - First global admin
    /// * `token` - Fungible token used for stake, fees and rewards
    /// * `treasury` - Address receiving the fee share
    /// * `price_per_read` - Fee for one price read
    /// * `min_stake` - Collateral required before requesting admission
    /// * `admission_fee` - Anti-spam fee per admission request
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        treasury: Address,
        price_per_read: i128,
        min_stake: i128,
        admission_fee: i128,
    ) -> Result<(), Error> {
        admin.require_auth();
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        let config = Config {
            token,
            treasury,
            price_per_read,
            min_stake,
            admission_fee,
            read_share_bps: 8_000,
            withdraw_cooldown: 3 * SECONDS_PER_DAY,
            admission_wait: 2 * SECONDS_PER_DAY,
            inactivity_window: 30 * SECONDS_PER_DAY,
            rat_out_reward: 10 * ONE_TOKEN,
            inactivity_reward: 5 * ONE_TOKEN,
            slash_penalty: 50 * ONE_TOKEN,
            paused: false,
        };
        storage::set_config(&env, &config);
        storage::set_admin(&env, &admin, true);

        env.events()
            .publish((symbol_short!("init"), admin), ());
        Ok(())
    }

    // ───────────── STAKE ─────────────

    /// Deposit collateral. Always succeeds for a positive amount.
    pub fn deposit(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&config)?;
        guard::non_reentrant(&env, || stake::deposit(&env, &config, &from, amount))
    }

    /// Withdraw collateral. Refused while the post-activity cooldown runs, so
    /// a feeder cannot vote and exit before a dispute can reach them.
    pub fn withdraw(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        to.require_auth();
        let config = storage::get_config(&env)?;
        let now = env.ledger().timestamp();
        guard::non_reentrant(&env, || stake::withdraw(&env, &config, &to, amount, now))
    }

    // ───────────── FEED MANAGEMENT ─────────────

    /// Create a price feed restricted to a small seed-filler set.
    pub fn create_oracle(
        env: Env,
        caller: Address,
        seed_fillers: Vec<Address>,
    ) -> Result<u64, Error> {
        Self::require_admin(&env, &caller)?;

        let count = seed_fillers.len();
        if count == 0 || count > MAX_SEED_FILLERS {
            return Err(Error::InvalidState);
        }

        let oracle_id = storage::next_oracle_id(&env);
        let now = env.ledger().timestamp();
        let oracle = Oracle {
            price: 0,
            last_updated: 0,
            version: 0,
            only_seeders: true,
            quorum_size: count,
            pending_admissions: 0,
            round_count: 0,
            open_round: None,
        };
        storage::set_oracle(&env, oracle_id, &oracle);
        storage::set_oracle_admin(&env, oracle_id, &caller);

        let mut seen: Vec<Address> = Vec::new(&env);
        for seed in seed_fillers.iter() {
            if seen.contains(&seed) {
                return Err(Error::InvalidState);
            }
            seen.push_back(seed.clone());
            storage::set_filler(&env, oracle_id, &seed, FillerRole::Seed);
            // Start the inactivity clock; a fresh seed has had no chance to act.
            let mut feeder = storage::get_feeder(&env, &seed);
            if feeder.last_active_at == 0 {
                feeder.last_active_at = now;
                storage::set_feeder(&env, &seed, &feeder);
            }
        }

        env.events()
            .publish((symbol_short!("created"), oracle_id), seed_fillers);
        Ok(oracle_id)
    }

    /// One-way transition opening a feed to publicly admitted feeders.
    pub fn open_to_public(env: Env, caller: Address, oracle_id: u64) -> Result<(), Error> {
        caller.require_auth();
        if !storage::is_oracle_admin(&env, oracle_id, &caller) {
            return Err(Error::Unauthorized);
        }
        let mut oracle = storage::get_oracle(&env, oracle_id)?;
        if !oracle.only_seeders {
            return Err(Error::InvalidState);
        }
        oracle.only_seeders = false;
        storage::set_oracle(&env, oracle_id, &oracle);

        env.events().publish((symbol_short!("opened"), oracle_id), ());
        Ok(())
    }

    /// Grant feed-level admin rights.
    pub fn add_oracle_admin(
        env: Env,
        caller: Address,
        oracle_id: u64,
        new_admin: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        if !storage::is_oracle_admin(&env, oracle_id, &caller) {
            return Err(Error::Unauthorized);
        }
        storage::get_oracle(&env, oracle_id)?;
        storage::set_oracle_admin(&env, oracle_id, &new_admin);
        Ok(())
    }

    // ───────────── ADMISSION ─────────────

    /// Request admission as a normal filler on an open feed.
    pub fn request_admission(
        env: Env,
        caller: Address,
        oracle_id: u64,
        payment: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&config)?;
        let now = env.ledger().timestamp();
        guard::non_reentrant(&env, || {
            registry::request_admission(&env, &config, &caller, oracle_id, payment, now)
        })
    }

    /// Complete a matured admission request.
    pub fn complete_admission(env: Env, caller: Address, oracle_id: u64) -> Result<(), Error> {
        caller.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&config)?;
        let now = env.ledger().timestamp();
        registry::complete_admission(&env, &config, &caller, oracle_id, now)
    }

    /// Report a feeder that sat out the whole inactivity window.
    pub fn mark_inactive(
        env: Env,
        caller: Address,
        oracle_id: u64,
        target: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&config)?;
        let now = env.ledger().timestamp();
        guard::non_reentrant(&env, || {
            registry::mark_inactive(&env, &config, &caller, oracle_id, &target, now)
        })
    }

    // ───────────── CHALLENGE ROUNDS ─────────────

    /// Open a challenge round proposing a new price. Returns the round id.
    pub fn propose_price(
        env: Env,
        caller: Address,
        oracle_id: u64,
        price: i128,
    ) -> Result<u64, Error> {
        caller.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&config)?;
        let now = env.ledger().timestamp();
        challenge::propose(&env, &caller, oracle_id, price, now)
    }

    /// Vote on the feed's open round.
    pub fn vote(env: Env, caller: Address, oracle_id: u64, approve: bool) -> Result<(), Error> {
        caller.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&config)?;
        let now = env.ledger().timestamp();
        challenge::vote(&env, &caller, oracle_id, approve, now)
    }

    /// Report a feeder whose vote contradicted a resolved round's outcome.
    pub fn rat_out(
        env: Env,
        caller: Address,
        oracle_id: u64,
        round_id: u64,
        accused: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&config)?;
        guard::non_reentrant(&env, || {
            dispute::rat_out(&env, &config, &caller, oracle_id, round_id, &accused)
        })
    }

    // ───────────── READS ─────────────

    /// Paid read of the current accepted price. A feed that never resolved a
    /// round reads as price zero.
    pub fn read_price(
        env: Env,
        reader: Address,
        oracle_id: u64,
        payment: i128,
    ) -> Result<PriceReading, Error> {
        reader.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&config)?;
        let oracle = storage::get_oracle(&env, oracle_id)?;
        if payment < config.price_per_read {
            return Err(Error::InsufficientPayment);
        }

        guard::non_reentrant(&env, || {
            guard::transfer(
                &env,
                &config.token,
                &reader,
                &env.current_contract_address(),
                payment,
            )?;
            let share = payment * config.read_share_bps as i128 / BASIS_POINTS;
            if share > 0 {
                guard::transfer(
                    &env,
                    &config.token,
                    &env.current_contract_address(),
                    &config.treasury,
                    share,
                )?;
            }
            Ok(())
        })?;

        env.events()
            .publish((symbol_short!("read"), oracle_id), reader);
        Ok(PriceReading {
            price: oracle.price,
            last_updated: oracle.last_updated,
            version: oracle.version,
        })
    }

    // ───────────── ADMIN ─────────────

    pub fn add_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        storage::set_admin(&env, &new_admin, true);
        Ok(())
    }

    pub fn remove_admin(env: Env, caller: Address, target: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        if caller == target {
            return Err(Error::InvalidState);
        }
        storage::set_admin(&env, &target, false);
        Ok(())
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        let mut config = storage::get_config(&env)?;
        config.paused = true;
        storage::set_config(&env, &config);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        let mut config = storage::get_config(&env)?;
        config.paused = false;
        storage::set_config(&env, &config);
        Ok(())
    }

    /// Zero a feeder's yellow cards. Does not restore any shrunk quorum.
    pub fn reset_infractions(env: Env, caller: Address, addr: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        reputation::reset(&env, &addr);
        Ok(())
    }

    /// Drain the slashed-stake pool to `recipient`. Returns the amount moved.
    pub fn claim_slashed_funds(
        env: Env,
        caller: Address,
        recipient: Address,
    ) -> Result<i128, Error> {
        Self::require_admin(&env, &caller)?;
        let config = storage::get_config(&env)?;
        guard::non_reentrant(&env, || {
            let pool = storage::get_slashed_pool(&env);
            if pool > 0 {
                guard::transfer(
                    &env,
                    &config.token,
                    &env.current_contract_address(),
                    &recipient,
                    pool,
                )?;
                storage::set_slashed_pool(&env, 0);
            }
            Ok(pool)
        })
    }

    /// Tune the time windows and economic parameters.
    pub fn update_params(
        env: Env,
        caller: Address,
        withdraw_cooldown: u64,
        admission_wait: u64,
        inactivity_window: u64,
        rat_out_reward: i128,
        inactivity_reward: i128,
        slash_penalty: i128,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        let mut config = storage::get_config(&env)?;
        config.withdraw_cooldown = withdraw_cooldown;
        config.admission_wait = admission_wait;
        config.inactivity_window = inactivity_window;
        config.rat_out_reward = rat_out_reward;
        config.inactivity_reward = inactivity_reward;
        config.slash_penalty = slash_penalty;
        storage::set_config(&env, &config);
        Ok(())
    }

    // ───────────── VIEWS ─────────────

    pub fn get_config(env: Env) -> Result<Config, Error> {
        storage::get_config(&env)
    }

    pub fn is_admin(env: Env, addr: Address) -> bool {
        storage::is_admin(&env, &addr)
    }

    pub fn is_paused(env: Env) -> Result<bool, Error> {
        Ok(storage::get_config(&env)?.paused)
    }

    pub fn get_oracle(env: Env, oracle_id: u64) -> Result<Oracle, Error> {
        storage::get_oracle(&env, oracle_id)
    }

    pub fn get_round(env: Env, oracle_id: u64, round_id: u64) -> Result<ChallengeRound, Error> {
        storage::get_round(&env, oracle_id, round_id)
    }

    pub fn get_vote(env: Env, oracle_id: u64, round_id: u64, addr: Address) -> Option<bool> {
        storage::get_vote(&env, oracle_id, round_id, &addr)
    }

    pub fn get_feeder(env: Env, addr: Address) -> Feeder {
        storage::get_feeder(&env, &addr)
    }

    pub fn filler_role(env: Env, oracle_id: u64, addr: Address) -> Option<FillerRole> {
        storage::get_filler(&env, oracle_id, &addr)
    }

    pub fn slashed_pool(env: Env) -> i128 {
        storage::get_slashed_pool(&env)
    }

    // ───────────── INTERNAL HELPERS ─────────────

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if !storage::is_admin(env, caller) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn require_not_paused(config: &Config) -> Result<(), Error> {
        if config.paused {
            return Err(Error::Paused);
        }
        Ok(())
    }
}
