use soroban_sdk::{contracterror, contracttype, Address};

pub const BASIS_POINTS: i128 = 10_000;
/// Width of the rate-limit band around the current price, in basis points.
pub const RATE_BAND_BPS: i128 = 100;
/// Minimum age of the current price before an in-band proposal is accepted.
pub const RATE_LIMIT_WINDOW: u64 = 3_600;
/// A feeder whose yellow-card count exceeds this is permanently expelled.
pub const EXPULSION_THRESHOLD: u32 = 5;
pub const MAX_SEED_FILLERS: u32 = 3;

pub const SECONDS_PER_DAY: u64 = 86_400;
/// Smallest-unit value of one whole token (7 decimals).
pub const ONE_TOKEN: i128 = 10_000_000;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    Paused = 4,
    InsufficientStake = 5,
    InsufficientPayment = 6,
    InvalidState = 7,
    RateLimited = 8,
    Expelled = 9,
    DoubleVote = 10,
    FalseAccusation = 11,
    TooSoon = 12,
    Locked = 13,
    TransferFailure = 14,
    ReentrancyDetected = 15,
    NotFound = 16,
    NoPendingRequest = 17,
    AlreadyDisputed = 18,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub token: Address,
    pub treasury: Address,
    pub price_per_read: i128,
    pub min_stake: i128,
    pub admission_fee: i128,
    pub read_share_bps: u32,       // share of each read fee forwarded to treasury
    pub withdraw_cooldown: u64,
    pub admission_wait: u64,
    pub inactivity_window: u64,
    pub rat_out_reward: i128,
    pub inactivity_reward: i128,
    pub slash_penalty: i128,
    pub paused: bool,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FillerRole {
    Seed,
    Normal,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundOutcome {
    Pending,
    Approved,
    Rejected,
}

/// One price feed. `price` is only ever written by an approved challenge
/// round; `quorum_size` tracks the currently-valid voter count and drives
/// the live majority threshold.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Oracle {
    pub price: i128,
    pub last_updated: u64,
    pub version: u32,
    pub only_seeders: bool,
    pub quorum_size: u32,
    pub pending_admissions: u32,
    pub round_count: u64,
    pub open_round: Option<u64>,
}

/// Global per-address feeder record. Per-feed role and admission state live
/// in the composite-keyed `Filler` / `Admission` entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Feeder {
    pub stake: i128,
    pub yellow_cards: u32,
    pub last_active_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeRound {
    pub id: u64,
    pub oracle_id: u64,
    pub proposed_price: i128,
    pub proposer: Address,
    pub approvals: u32,
    pub rejects: u32,
    pub outcome: RoundOutcome,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceReading {
    pub price: i128,
    pub last_updated: u64,
    pub version: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Admin(Address),
    Entered,
    OracleCount,
    SlashedPool,
    Oracle(u64),
    OracleAdmin(u64, Address),
    Filler(u64, Address),
    Admission(u64, Address),
    Feeder(Address),
    Round(u64, u64),
    Vote(u64, u64, Address),
    Disputed(u64, u64, Address),
}
