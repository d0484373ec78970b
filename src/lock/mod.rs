pub mod steps;

pub use steps::{LockActionType, LockIntent, LockStep, LockedInfo, build_lock_steps, select_lock_actions};
