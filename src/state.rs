//! Lock session state machine.

use std::fmt;

use tracing::info;

/// States of one lock session.
///
/// ```text
/// Idle -> Locked -> WaitingForRelease -> Unlocked
/// Idle -> LockFailed
/// Locked | WaitingForRelease -> ForcedUnlock
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Idle,
    Locked,
    WaitingForRelease,
    /// Release token received, unlock attempted. Terminal.
    Unlocked,
    /// Preconditions or the lock statement failed; nothing is locked. Terminal.
    LockFailed,
    /// The wait ended without a release token, unlock attempted. Terminal.
    ForcedUnlock,
}

impl LockState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LockState::Unlocked | LockState::LockFailed | LockState::ForcedUnlock
        )
    }

    pub fn can_transition_to(self, next: LockState) -> bool {
        use LockState::*;
        matches!(
            (self, next),
            (Idle, Locked)
                | (Idle, LockFailed)
                | (Locked, WaitingForRelease)
                | (Locked, ForcedUnlock)
                | (WaitingForRelease, Unlocked)
                | (WaitingForRelease, ForcedUnlock)
        )
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LockState::Idle => "idle",
            LockState::Locked => "locked",
            LockState::WaitingForRelease => "waiting-for-release",
            LockState::Unlocked => "unlocked",
            LockState::LockFailed => "lock-failed",
            LockState::ForcedUnlock => "forced-unlock",
        };
        f.write_str(name)
    }
}

/// Tracks and logs transitions of a single session.
#[derive(Debug)]
pub(crate) struct StateTracker {
    current: LockState,
}

impl StateTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: LockState::Idle,
        }
    }

    pub(crate) fn current(&self) -> LockState {
        self.current
    }

    pub(crate) fn advance(&mut self, next: LockState) {
        debug_assert!(
            self.current.can_transition_to(next),
            "invalid lock state transition {} -> {}",
            self.current,
            next
        );
        info!(from = %self.current, to = %next, "lock state changed");
        self.current = next;
    }
}
