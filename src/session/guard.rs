//! Guard against overlapping or stale generation requests.
//!
//! One generation call may be outstanding per session context. Each attempt
//! gets a token; a result is applied only if its token is still current, so
//! a session closed mid-generation discards the late arrival instead of
//! mutating state (and a quiz can never be double-scored by overlapping
//! completions).

/// Opaque handle for one outstanding generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationToken(u64);

#[derive(Debug, Default)]
pub struct GenerationGuard {
    busy: bool,
    epoch: u64,
}

impl GenerationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Claim the guard for a new request. `None` while another request is
    /// outstanding; callers must refuse to issue a second call.
    pub fn try_begin(&mut self) -> Option<GenerationToken> {
        if self.busy {
            return None;
        }
        self.busy = true;
        self.epoch += 1;
        Some(GenerationToken(self.epoch))
    }

    /// Report a finished request. Returns whether its result may be applied;
    /// stale tokens (cancelled or superseded) are rejected.
    pub fn accept(&mut self, token: GenerationToken) -> bool {
        if self.busy && token.0 == self.epoch {
            self.busy = false;
            true
        } else {
            false
        }
    }

    /// Abandon the outstanding request, if any. Its token becomes stale.
    pub fn cancel(&mut self) {
        if self.busy {
            self.busy = false;
            self.epoch += 1;
        }
    }
}
