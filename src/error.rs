use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Denom can not be empty")]
    InvalidDenom {},

    #[error("Match id must be 1 to {max} bytes")]
    InvalidMatchId { max: usize },

    #[error("Pool already exists")]
    PoolAlreadyExists {},

    #[error("Funds are not accepted for this action")]
    UnexpectedFunds {},

    #[error("Unauthorized oracle")]
    UnauthorizedOracle {},

    #[error("Pool is full")]
    PoolFull {},

    #[error("Pool is locked, no more predictions allowed")]
    PoolLocked {},

    #[error("Pool is not open, so it can't be locked")]
    PoolNotOpen {},

    #[error("Pool is not locked")]
    PoolNotLocked {},

    #[error("Pool is not resolved yet")]
    PoolNotResolved {},

    #[error("Participant already staked in this pool")]
    AlreadyStaked {},

    #[error("No funds detected")]
    EmptyFunds {},

    #[error("Multiple denom not allowed")]
    MultipleDenoms {},

    #[error("Wrong denom")]
    WrongDenom {},

    #[error("Stake must be exactly {expected}, received {received}")]
    InvalidStake {
        expected: Uint128,
        received: Uint128,
    },

    #[error("Winners are already finalized")]
    WinnersAlreadyFinalized {},

    #[error("Winners are not finalized yet")]
    WinnersNotFinalized {},

    #[error("Winners flagged but no winner accounts provided")]
    NoWinnersProvided {},

    #[error("If no winners, there shouldn't be any winner accounts")]
    UnexpectedWinnerAccounts {},

    #[error("Winner {address} is listed more than once")]
    DuplicateWinner { address: String },

    #[error("{address} has no prediction in this pool")]
    ParticipantNotFound { address: String },

    #[error("Prediction of {address} does not match the final outcome")]
    PredictionMismatch { address: String },

    #[error("Nothing to claim, prediction already settled or never placed")]
    NothingToClaim {},

    #[error("You didn't win")]
    NotAWinner {},

    #[error("Escrow balance {balance} can not cover {required}")]
    EscrowInsolvent {
        balance: Uint128,
        required: Uint128,
    },
}
