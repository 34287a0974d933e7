use cosmwasm_std::{coins, Addr, BankMsg, CosmosMsg, StdResult, Storage, Uint128};

use crate::state::ESCROWS;
use crate::ContractError;

pub fn open(storage: &mut dyn Storage, pool_id: &[u8]) -> StdResult<()> {
    ESCROWS.save(storage, pool_id, &Uint128::zero())
}

pub fn balance(storage: &dyn Storage, pool_id: &[u8]) -> StdResult<Uint128> {
    Ok(ESCROWS.may_load(storage, pool_id)?.unwrap_or_default())
}

pub fn deposit(
    storage: &mut dyn Storage,
    pool_id: &[u8],
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let updated = balance(storage, pool_id)?.checked_add(amount)?;
    ESCROWS.save(storage, pool_id, &updated)?;
    Ok(updated)
}

/// Debit the pool ledger. A shortfall means the pool accounting is broken,
/// the whole call must fail rather than pay out of another pool's funds.
pub fn withdraw(
    storage: &mut dyn Storage,
    pool_id: &[u8],
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let current = balance(storage, pool_id)?;
    let updated = current
        .checked_sub(amount)
        .map_err(|_| ContractError::EscrowInsolvent {
            balance: current,
            required: amount,
        })?;
    ESCROWS.save(storage, pool_id, &updated)?;
    Ok(updated)
}

/// Debit the pool and build the matching bank transfer to `recipient`.
pub fn pay_out(
    storage: &mut dyn Storage,
    pool_id: &[u8],
    recipient: &Addr,
    denom: &str,
    amount: Uint128,
) -> Result<Option<CosmosMsg>, ContractError> {
    withdraw(storage, pool_id, amount)?;
    if amount.is_zero() {
        return Ok(None);
    }
    Ok(Some(
        BankMsg::Send {
            to_address: recipient.to_string(),
            amount: coins(amount.u128(), denom),
        }
        .into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    #[test]
    fn deposit_and_withdraw_track_balance() {
        let mut storage = MockStorage::new();
        let id = b"pool".to_vec();
        open(&mut storage, &id).unwrap();
        assert_eq!(balance(&storage, &id).unwrap(), Uint128::zero());

        deposit(&mut storage, &id, Uint128::new(300)).unwrap();
        deposit(&mut storage, &id, Uint128::new(200)).unwrap();
        let left = withdraw(&mut storage, &id, Uint128::new(450)).unwrap();
        assert_eq!(left, Uint128::new(50));
        assert_eq!(balance(&storage, &id).unwrap(), Uint128::new(50));
    }

    #[test]
    fn overdraw_is_insolvent_and_keeps_balance() {
        let mut storage = MockStorage::new();
        let id = b"pool".to_vec();
        open(&mut storage, &id).unwrap();
        deposit(&mut storage, &id, Uint128::new(10)).unwrap();

        let err = withdraw(&mut storage, &id, Uint128::new(11)).unwrap_err();
        assert_eq!(
            err,
            ContractError::EscrowInsolvent {
                balance: Uint128::new(10),
                required: Uint128::new(11),
            }
        );
        assert_eq!(balance(&storage, &id).unwrap(), Uint128::new(10));
    }

    #[test]
    fn pools_do_not_share_balance() {
        let mut storage = MockStorage::new();
        let (a, b) = (b"a".to_vec(), b"b".to_vec());
        open(&mut storage, &a).unwrap();
        open(&mut storage, &b).unwrap();
        deposit(&mut storage, &a, Uint128::new(5)).unwrap();

        let err = withdraw(&mut storage, &b, Uint128::new(1)).unwrap_err();
        assert!(matches!(err, ContractError::EscrowInsolvent { .. }));
        assert_eq!(balance(&storage, &a).unwrap(), Uint128::new(5));
    }

    #[test]
    fn pay_out_builds_bank_send() {
        let mut storage = MockStorage::new();
        let id = b"pool".to_vec();
        open(&mut storage, &id).unwrap();
        deposit(&mut storage, &id, Uint128::new(100)).unwrap();

        let msg = pay_out(
            &mut storage,
            &id,
            &Addr::unchecked("winner"),
            "uusd",
            Uint128::new(60),
        )
        .unwrap();
        assert_eq!(
            msg,
            Some(CosmosMsg::Bank(BankMsg::Send {
                to_address: "winner".to_string(),
                amount: coins(60, "uusd"),
            }))
        );
        assert_eq!(balance(&storage, &id).unwrap(), Uint128::new(40));

        let none = pay_out(&mut storage, &id, &Addr::unchecked("w"), "uusd", Uint128::zero())
            .unwrap();
        assert_eq!(none, None);
    }
}
