//! Scope guard that runs an action when it goes out of scope.

use crate::optional::Optional;

/// Runs `action` on drop unless dismissed.
///
/// ```
/// use safet_kernel::Finally;
///
/// let mut log = Vec::new();
/// {
///     let _guard = Finally::new(|| log.push("closed"));
/// }
/// assert_eq!(log, ["closed"]);
/// ```
#[must_use = "the action runs immediately if the guard is not bound"]
pub struct Finally<F: FnOnce()> {
    action: Optional<F>,
}

impl<F: FnOnce()> Finally<F> {
    /// Arms a guard.
    #[inline]
    pub fn new(action: F) -> Self {
        Self {
            action: Optional::Set(action),
        }
    }

    /// Returns `true` while the action is still pending.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.action.is_set()
    }

    /// Disarms the guard; the action will not run.
    pub fn dismiss(&mut self) {
        if self.action.take().is_set() {
            tracing::trace!("scope guard dismissed");
        }
    }
}

impl<F: FnOnce()> Drop for Finally<F> {
    fn drop(&mut self) {
        self.action.take().into_if_set(|action| action());
    }
}

impl<F: FnOnce()> std::fmt::Debug for Finally<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Finally")
            .field("armed", &self.is_armed())
            .finish()
    }
}
