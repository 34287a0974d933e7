use cosmwasm_std::{Addr, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Outcome, PoolStatus};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// Native denom every stake is paid in
    pub denom: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Open a new pool for a match, the sender funds the pool accounts
    InitializePool {
        match_id: String,
        pool_index: u16,
        oracle: String,
    },
    /// Stake the fixed amount on a (runs, wickets) prediction
    PlacePrediction {
        match_id: String,
        pool_index: u16,
        runs: u16,
        wickets: u8,
    },
    /// Oracle only: stop accepting predictions
    LockPool { match_id: String, pool_index: u16 },
    /// Oracle only: record the final outcome
    SubmitResult {
        match_id: String,
        pool_index: u16,
        final_runs: u16,
        final_wickets: u8,
    },
    /// Oracle only: mark the winners (or declare none) and collect the platform fee
    UpdateWinner {
        match_id: String,
        pool_index: u16,
        has_winners: bool,
        winners: Vec<String>,
        fee_receiver: String,
    },
    /// Collect a winner's share, or the stake back if nobody won
    ClaimOrRefund { match_id: String, pool_index: u16 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Retrieve the config
    Config {},
    /// Retrieve a pool
    Pool { match_id: String, pool_index: u16 },
    /// Retrieve the unsettled prediction of an address
    Participant {
        match_id: String,
        pool_index: u16,
        address: String,
    },
    /// List unsettled predictions of a pool
    Participants {
        match_id: String,
        pool_index: u16,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Retrieve the escrow balance of a pool
    Escrow { match_id: String, pool_index: u16 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ConfigResponse {
    pub owner: String,
    pub denom: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PoolResponse {
    pub match_id: String,
    pub pool_index: u16,
    pub oracle: String,
    pub creator: String,
    pub status: PoolStatus,
    pub final_outcome: Option<Outcome>,
    pub participant_count: u16,
    pub winners_finalized: bool,
    pub has_winners: bool,
    pub winner_count: u16,
    pub platform_fee: Uint128,
    pub payout_per_winner: Uint128,
    pub settled_count: u16,
    pub created_at: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ParticipantResponse {
    pub participant: Addr,
    pub predicted_runs: u16,
    pub predicted_wickets: u8,
    pub is_winner: bool,
    pub staked_at: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ParticipantsResponse {
    pub participants: Vec<ParticipantResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct EscrowResponse {
    pub balance: Uint128,
}
