use std::collections::BTreeSet;

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::escrow;
use crate::state::{
    pool_id, Participant, Pool, PoolStatus, BPS_DENOMINATOR, CONFIG, FIXED_STAKE, PARTICIPANTS,
    PLATFORM_FEE_BPS, POOLS,
};

/// floor(total * fee_bps / 10_000)
pub fn platform_fee(total: Uint128) -> Uint128 {
    total.multiply_ratio(PLATFORM_FEE_BPS, BPS_DENOMINATOR)
}

/// Equal share of what is left after the fee. The division rounds down, the
/// remainder (< winner_count) stays in escrow.
pub fn payout_per_winner(
    total: Uint128,
    fee: Uint128,
    winner_count: u16,
) -> Result<Uint128, ContractError> {
    if winner_count == 0 {
        return Err(ContractError::NoWinnersProvided {});
    }
    let distributable = total.checked_sub(fee)?;
    Ok(Uint128::from(distributable.u128() / winner_count as u128))
}

/// What a participant is owed once winners are finalized.
pub fn claim_amount(pool: &Pool, participant: &Participant) -> Result<Uint128, ContractError> {
    if !pool.has_winners {
        return Ok(Uint128::from(FIXED_STAKE));
    }
    if !participant.is_winner {
        return Err(ContractError::NotAWinner {});
    }
    Ok(pool.payout_per_winner)
}

pub fn try_update_winner(
    deps: DepsMut,
    info: MessageInfo,
    match_id: String,
    pool_index: u16,
    has_winners: bool,
    winners: Vec<String>,
    fee_receiver: String,
) -> Result<Response, ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds {});
    }
    let config = CONFIG.load(deps.storage)?;
    let id = pool_id(&match_id, pool_index);
    let mut pool = POOLS.load(deps.storage, &id)?;

    if info.sender != pool.oracle {
        return Err(ContractError::UnauthorizedOracle {});
    }
    if pool.status != PoolStatus::Resolved {
        return Err(ContractError::PoolNotResolved {});
    }
    if pool.winners_finalized {
        return Err(ContractError::WinnersAlreadyFinalized {});
    }
    let outcome = pool.final_outcome.ok_or(ContractError::PoolNotResolved {})?;
    let fee_receiver = deps.api.addr_validate(&fee_receiver)?;

    let mut res = Response::new()
        .add_attribute("action", "update_winner")
        .add_attribute("match_id", match_id.as_str())
        .add_attribute("pool_index", pool_index.to_string())
        .add_attribute("has_winners", has_winners.to_string());

    if has_winners {
        if winners.is_empty() {
            return Err(ContractError::NoWinnersProvided {});
        }

        // Validate every listed winner before touching any record
        let mut seen = BTreeSet::new();
        let mut confirmed = Vec::with_capacity(winners.len());
        for address in winners.iter() {
            let addr = deps.api.addr_validate(address)?;
            let raw = deps.api.addr_canonicalize(addr.as_str())?;
            if !seen.insert(raw.as_slice().to_vec()) {
                return Err(ContractError::DuplicateWinner {
                    address: address.clone(),
                });
            }

            let participant = PARTICIPANTS
                .may_load(deps.storage, (id.as_slice(), raw.as_slice()))?
                .ok_or_else(|| ContractError::ParticipantNotFound {
                    address: address.clone(),
                })?;
            if participant.predicted() != outcome {
                return Err(ContractError::PredictionMismatch {
                    address: address.clone(),
                });
            }
            confirmed.push((raw, participant));
        }

        for (raw, mut participant) in confirmed {
            participant.is_winner = true;
            PARTICIPANTS.save(deps.storage, (id.as_slice(), raw.as_slice()), &participant)?;
        }

        let winner_count = seen.len() as u16;
        let total = pool.total_value();
        let fee = platform_fee(total);
        let payout = payout_per_winner(total, fee, winner_count)?;

        pool.has_winners = true;
        pool.winner_count = winner_count;
        pool.platform_fee = fee;
        pool.payout_per_winner = payout;

        if let Some(msg) =
            escrow::pay_out(deps.storage, &id, &fee_receiver, &config.denom, fee)?
        {
            res = res.add_message(msg);
        }
        res = res
            .add_attribute("winner_count", winner_count.to_string())
            .add_attribute("fee", fee.to_string())
            .add_attribute("fee_receiver", fee_receiver.as_str())
            .add_attribute("payout_per_winner", payout.to_string());
    } else {
        if !winners.is_empty() {
            return Err(ContractError::UnexpectedWinnerAccounts {});
        }
        pool.has_winners = false;
    }

    pool.winners_finalized = true;
    POOLS.save(deps.storage, &id, &pool)?;

    Ok(res)
}

pub fn try_claim_or_refund(
    deps: DepsMut,
    info: MessageInfo,
    match_id: String,
    pool_index: u16,
) -> Result<Response, ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds {});
    }
    let config = CONFIG.load(deps.storage)?;
    let id = pool_id(&match_id, pool_index);
    let mut pool = POOLS.load(deps.storage, &id)?;

    if pool.status != PoolStatus::Resolved {
        return Err(ContractError::PoolNotResolved {});
    }
    if !pool.winners_finalized {
        return Err(ContractError::WinnersNotFinalized {});
    }

    let raw_sender = deps.api.addr_canonicalize(info.sender.as_str())?;
    let key = (id.as_slice(), raw_sender.as_slice());
    let participant = PARTICIPANTS
        .may_load(deps.storage, key)?
        .ok_or(ContractError::NothingToClaim {})?;

    let amount = claim_amount(&pool, &participant)?;

    // Removing the record is what makes a second claim impossible
    PARTICIPANTS.remove(deps.storage, key);
    pool.settled_count += 1;
    POOLS.save(deps.storage, &id, &pool)?;

    let kind = match pool.has_winners {
        true => "payout",
        false => "refund",
    };
    let mut res = Response::new()
        .add_attribute("action", "claim_or_refund")
        .add_attribute("match_id", match_id.as_str())
        .add_attribute("pool_index", pool_index.to_string())
        .add_attribute("participant", info.sender.as_str())
        .add_attribute("kind", kind)
        .add_attribute("amount", amount.to_string());

    if let Some(msg) = escrow::pay_out(deps.storage, &id, &info.sender, &config.denom, amount)? {
        res = res.add_message(msg);
    }

    Ok(res)
}
