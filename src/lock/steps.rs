use crate::{TokenLike, core::token::InputAmount, errors::BalRsError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LockActionType {
    CreateLock,
    IncreaseLock,
    ExtendLock,
    Unlock,
}

/// The user's current lock position as read from the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockedInfo {
    pub has_existing_lock: bool,
    /// The lock end date has passed.
    pub is_expired: bool,
}

/// What the user asked for, relative to the current position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockIntent {
    /// Re-lock after withdrawing an expired lock.
    pub extend_expired: bool,
    pub is_increased_lock_amount: bool,
    pub is_extended_lock_end_date: bool,
}

/// Ordered on-chain actions for the given lock position and intent. The order is the
/// execution order: unlock precedes a re-lock, increase precedes extend.
pub fn select_lock_actions(locked: LockedInfo, intent: LockIntent) -> Vec<LockActionType> {
    use LockActionType::*;

    if locked.has_existing_lock {
        if locked.is_expired {
            return if intent.extend_expired {
                vec![Unlock, CreateLock]
            } else {
                vec![Unlock]
            };
        }

        match (intent.is_increased_lock_amount, intent.is_extended_lock_end_date) {
            (true, true) => return vec![IncreaseLock, ExtendLock],
            (false, true) => return vec![ExtendLock],
            (true, false) => return vec![IncreaseLock],
            (false, false) => {}
        }
    }

    vec![CreateLock]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockStep {
    pub action: LockActionType,
    pub lock_amount: InputAmount,
    /// Lock end date as passed to the voting escrow, `YYYY-MM-DD`.
    pub lock_end_date: String,
}

/// Resolves the lock actions and attaches the raw lock amount to each step.
pub fn build_lock_steps<T: TokenLike + ?Sized>(
    locked: LockedInfo,
    intent: LockIntent,
    total_amount: &str,
    lock_token: &T,
    lock_end_date: &str,
) -> Result<Vec<LockStep>, BalRsError> {
    let lock_amount = InputAmount::from_human(total_amount, lock_token)?;
    let actions = select_lock_actions(locked, intent);
    tracing::debug!(?locked, ?intent, ?actions, "Built lock steps");

    Ok(actions
        .into_iter()
        .map(|action| LockStep {
            action,
            lock_amount: lock_amount.clone(),
            lock_end_date: lock_end_date.to_string(),
        })
        .collect())
}
