use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

pub const MAX_PARTICIPANTS: u16 = 200;
pub const FIXED_STAKE: u128 = 1_000_000_000;
/// 3% in basis points
pub const PLATFORM_FEE_BPS: u128 = 300;
pub const BPS_DENOMINATOR: u128 = 10_000;
pub const MAX_MATCH_ID_LEN: usize = 64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub owner: Addr,
    pub denom: String,
}
pub const CONFIG: Item<Config> = Item::new("config");

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PoolStatus {
    Open,
    Locked,
    Resolved,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub struct Outcome {
    pub runs: u16,
    pub wickets: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Pool {
    pub match_id: String,
    pub pool_index: u16,
    /// Only address allowed to lock, resolve and finalize this pool
    pub oracle: Addr,
    pub creator: Addr,
    pub status: PoolStatus,
    /// Set together with `PoolStatus::Resolved`, never before
    pub final_outcome: Option<Outcome>,
    pub participant_count: u16,
    pub winners_finalized: bool,
    pub has_winners: bool,
    pub winner_count: u16,
    pub platform_fee: Uint128,
    pub payout_per_winner: Uint128,
    /// Claims and refunds paid out so far
    pub settled_count: u16,
    pub created_at: u64,
}

impl Pool {
    pub fn total_value(&self) -> Uint128 {
        Uint128::from(self.participant_count as u128 * FIXED_STAKE)
    }
}

pub const POOLS: Map<&[u8], Pool> = Map::new("pools");

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Participant {
    pub pool_id: Binary,
    pub participant: Addr,
    pub predicted_runs: u16,
    pub predicted_wickets: u8,
    pub is_winner: bool,
    pub staked_at: u64,
}

impl Participant {
    pub fn predicted(&self) -> Outcome {
        Outcome {
            runs: self.predicted_runs,
            wickets: self.predicted_wickets,
        }
    }
}

/// Keyed by (pool id, canonical participant address). A record only exists
/// between a stake and its claim, so presence means "staked, not yet settled".
pub const PARTICIPANTS: Map<(&[u8], &[u8]), Participant> = Map::new("participants");

/// Per-pool share of the contract balance
pub const ESCROWS: Map<&[u8], Uint128> = Map::new("escrows");

/// Storage identity of a pool. The match id is length-prefixed so that no two
/// distinct (match_id, pool_index) pairs can produce the same bytes.
pub fn pool_id(match_id: &str, pool_index: u16) -> Vec<u8> {
    let raw = match_id.as_bytes();
    let mut id = Vec::with_capacity(raw.len() + 4);
    id.extend_from_slice(&(raw.len() as u16).to_be_bytes());
    id.extend_from_slice(raw);
    id.extend_from_slice(&pool_index.to_be_bytes());
    id
}
