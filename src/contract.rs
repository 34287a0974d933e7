#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::escrow;
use crate::msg::{
    ConfigResponse, EscrowResponse, ExecuteMsg, InstantiateMsg, ParticipantResponse,
    ParticipantsResponse, PoolResponse, QueryMsg,
};
use crate::settlement::{try_claim_or_refund, try_update_winner};
use crate::state::{
    pool_id, Config, Outcome, Participant, Pool, PoolStatus, CONFIG, FIXED_STAKE,
    MAX_MATCH_ID_LEN, MAX_PARTICIPANTS, PARTICIPANTS, POOLS,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:stake-my-score";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// settings for pagination
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.denom.is_empty() {
        return Err(ContractError::InvalidDenom {});
    }

    let config = Config {
        owner: info.sender.clone(),
        denom: msg.denom,
    };

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("denom", config.denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::InitializePool {
            match_id,
            pool_index,
            oracle,
        } => try_initialize_pool(deps, env, info, match_id, pool_index, oracle),
        ExecuteMsg::PlacePrediction {
            match_id,
            pool_index,
            runs,
            wickets,
        } => try_place_prediction(deps, env, info, match_id, pool_index, runs, wickets),
        ExecuteMsg::LockPool {
            match_id,
            pool_index,
        } => try_lock_pool(deps, info, match_id, pool_index),
        ExecuteMsg::SubmitResult {
            match_id,
            pool_index,
            final_runs,
            final_wickets,
        } => try_submit_result(deps, info, match_id, pool_index, final_runs, final_wickets),
        ExecuteMsg::UpdateWinner {
            match_id,
            pool_index,
            has_winners,
            winners,
            fee_receiver,
        } => try_update_winner(
            deps,
            info,
            match_id,
            pool_index,
            has_winners,
            winners,
            fee_receiver,
        ),
        ExecuteMsg::ClaimOrRefund {
            match_id,
            pool_index,
        } => try_claim_or_refund(deps, info, match_id, pool_index),
    }
}

pub fn try_initialize_pool(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    match_id: String,
    pool_index: u16,
    oracle: String,
) -> Result<Response, ContractError> {
    if match_id.is_empty() || match_id.len() > MAX_MATCH_ID_LEN {
        return Err(ContractError::InvalidMatchId {
            max: MAX_MATCH_ID_LEN,
        });
    }
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds {});
    }
    let oracle = deps.api.addr_validate(&oracle)?;

    let id = pool_id(&match_id, pool_index);
    if POOLS.may_load(deps.storage, &id)?.is_some() {
        return Err(ContractError::PoolAlreadyExists {});
    }

    let pool = Pool {
        match_id,
        pool_index,
        oracle,
        creator: info.sender,
        status: PoolStatus::Open,
        final_outcome: None,
        participant_count: 0,
        winners_finalized: false,
        has_winners: false,
        winner_count: 0,
        platform_fee: Uint128::zero(),
        payout_per_winner: Uint128::zero(),
        settled_count: 0,
        created_at: env.block.time.seconds(),
    };
    POOLS.save(deps.storage, &id, &pool)?;
    escrow::open(deps.storage, &id)?;

    Ok(Response::new()
        .add_attribute("action", "initialize_pool")
        .add_attribute("match_id", pool.match_id)
        .add_attribute("pool_index", pool_index.to_string())
        .add_attribute("oracle", pool.oracle)
        .add_attribute("creator", pool.creator))
}

pub fn try_place_prediction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    match_id: String,
    pool_index: u16,
    runs: u16,
    wickets: u8,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let id = pool_id(&match_id, pool_index);
    let mut pool = POOLS.load(deps.storage, &id)?;

    if pool.status != PoolStatus::Open {
        return Err(ContractError::PoolLocked {});
    }
    if pool.participant_count >= MAX_PARTICIPANTS {
        return Err(ContractError::PoolFull {});
    }

    let raw_sender = deps.api.addr_canonicalize(info.sender.as_str())?;
    let key = (id.as_slice(), raw_sender.as_slice());
    if PARTICIPANTS.may_load(deps.storage, key)?.is_some() {
        return Err(ContractError::AlreadyStaked {});
    }

    let sent = match info.funds.len() {
        0 => Err(ContractError::EmptyFunds {}),
        1 => {
            if info.funds[0].denom != config.denom {
                return Err(ContractError::WrongDenom {});
            }
            Ok(info.funds[0].amount)
        }
        _ => Err(ContractError::MultipleDenoms {}),
    }?;
    if sent != Uint128::from(FIXED_STAKE) {
        return Err(ContractError::InvalidStake {
            expected: Uint128::from(FIXED_STAKE),
            received: sent,
        });
    }

    escrow::deposit(deps.storage, &id, sent)?;
    PARTICIPANTS.save(
        deps.storage,
        key,
        &Participant {
            pool_id: Binary::from(id.clone()),
            participant: info.sender.clone(),
            predicted_runs: runs,
            predicted_wickets: wickets,
            is_winner: false,
            staked_at: env.block.time.seconds(),
        },
    )?;
    pool.participant_count += 1;
    POOLS.save(deps.storage, &id, &pool)?;

    Ok(Response::new()
        .add_attribute("action", "place_prediction")
        .add_attribute("match_id", match_id)
        .add_attribute("pool_index", pool_index.to_string())
        .add_attribute("participant", info.sender)
        .add_attribute("runs", runs.to_string())
        .add_attribute("wickets", wickets.to_string())
        .add_attribute("committed", sent.to_string())
        .add_attribute("participant_count", pool.participant_count.to_string()))
}

pub fn try_lock_pool(
    deps: DepsMut,
    info: MessageInfo,
    match_id: String,
    pool_index: u16,
) -> Result<Response, ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds {});
    }
    let id = pool_id(&match_id, pool_index);
    let mut pool = POOLS.load(deps.storage, &id)?;

    if info.sender != pool.oracle {
        return Err(ContractError::UnauthorizedOracle {});
    }
    if pool.status != PoolStatus::Open {
        return Err(ContractError::PoolNotOpen {});
    }

    pool.status = PoolStatus::Locked;
    POOLS.save(deps.storage, &id, &pool)?;

    Ok(Response::new()
        .add_attribute("action", "lock_pool")
        .add_attribute("match_id", match_id)
        .add_attribute("pool_index", pool_index.to_string())
        .add_attribute("participant_count", pool.participant_count.to_string()))
}

pub fn try_submit_result(
    deps: DepsMut,
    info: MessageInfo,
    match_id: String,
    pool_index: u16,
    final_runs: u16,
    final_wickets: u8,
) -> Result<Response, ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds {});
    }
    let id = pool_id(&match_id, pool_index);
    let mut pool = POOLS.load(deps.storage, &id)?;

    if info.sender != pool.oracle {
        return Err(ContractError::UnauthorizedOracle {});
    }
    if pool.status != PoolStatus::Locked {
        return Err(ContractError::PoolNotLocked {});
    }

    pool.status = PoolStatus::Resolved;
    pool.final_outcome = Some(Outcome {
        runs: final_runs,
        wickets: final_wickets,
    });
    POOLS.save(deps.storage, &id, &pool)?;

    Ok(Response::new()
        .add_attribute("action", "submit_result")
        .add_attribute("match_id", match_id)
        .add_attribute("pool_index", pool_index.to_string())
        .add_attribute("final_runs", final_runs.to_string())
        .add_attribute("final_wickets", final_wickets.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::Pool {
            match_id,
            pool_index,
        } => to_binary(&query_pool(deps, match_id, pool_index)?),
        QueryMsg::Participant {
            match_id,
            pool_index,
            address,
        } => to_binary(&query_participant(deps, match_id, pool_index, address)?),
        QueryMsg::Participants {
            match_id,
            pool_index,
            start_after,
            limit,
        } => to_binary(&query_participants(
            deps,
            match_id,
            pool_index,
            start_after,
            limit,
        )?),
        QueryMsg::Escrow {
            match_id,
            pool_index,
        } => to_binary(&query_escrow(deps, match_id, pool_index)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner.to_string(),
        denom: config.denom,
    })
}

fn query_pool(deps: Deps, match_id: String, pool_index: u16) -> StdResult<PoolResponse> {
    let pool = POOLS.load(deps.storage, &pool_id(&match_id, pool_index))?;
    Ok(PoolResponse {
        match_id: pool.match_id,
        pool_index: pool.pool_index,
        oracle: pool.oracle.to_string(),
        creator: pool.creator.to_string(),
        status: pool.status,
        final_outcome: pool.final_outcome,
        participant_count: pool.participant_count,
        winners_finalized: pool.winners_finalized,
        has_winners: pool.has_winners,
        winner_count: pool.winner_count,
        platform_fee: pool.platform_fee,
        payout_per_winner: pool.payout_per_winner,
        settled_count: pool.settled_count,
        created_at: pool.created_at,
    })
}

fn participant_response(participant: Participant) -> ParticipantResponse {
    ParticipantResponse {
        participant: participant.participant,
        predicted_runs: participant.predicted_runs,
        predicted_wickets: participant.predicted_wickets,
        is_winner: participant.is_winner,
        staked_at: participant.staked_at,
    }
}

fn query_participant(
    deps: Deps,
    match_id: String,
    pool_index: u16,
    address: String,
) -> StdResult<ParticipantResponse> {
    let raw = deps.api.addr_canonicalize(&address)?;
    let id = pool_id(&match_id, pool_index);
    let participant = PARTICIPANTS.load(deps.storage, (id.as_slice(), raw.as_slice()))?;
    Ok(participant_response(participant))
}

fn query_participants(
    deps: Deps,
    match_id: String,
    pool_index: u16,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<ParticipantsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = match start_after {
        Some(address) => {
            let raw = deps.api.addr_canonicalize(&address)?;
            Some(Bound::Exclusive(raw.as_slice().to_vec()))
        }
        None => None,
    };
    let id = pool_id(&match_id, pool_index);

    let participants = PARTICIPANTS
        .prefix(id.as_slice())
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, participant)| participant_response(participant)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ParticipantsResponse { participants })
}

fn query_escrow(deps: Deps, match_id: String, pool_index: u16) -> StdResult<EscrowResponse> {
    let balance = escrow::balance(deps.storage, &pool_id(&match_id, pool_index))?;
    Ok(EscrowResponse { balance })
}
