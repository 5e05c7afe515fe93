//! Line counters.
//!
//! A printer can number its lines with a counter. A *local* counter belongs
//! to one printer. The *global* counter lives in a [`CounterRegistry`] and
//! is shared by every printer built from that registry in global mode.
//!
//! The global counter has two fields: the `active` value printed next, and
//! a `cursor` remembering where numbering reached. A global printer created
//! without a start value resumes from the cursor; one created with a start
//! value resets both fields.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

use crate::sync::lock_recover_debug;

static GLOBAL_REGISTRY: LazyLock<Arc<CounterRegistry>> =
    LazyLock::new(|| Arc::new(CounterRegistry::new()));

/// State of the shared counter. `None` means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlobalCounter {
    /// Value the next global print will show.
    pub active: Option<u64>,
    /// Last position reached, used by resuming printers.
    pub cursor: Option<u64>,
}

/// Owner of a global counter.
///
/// [`CounterRegistry::global`] is the process-wide instance used by the
/// default factory. Tests and embedding hosts can create isolated
/// registries with [`CounterRegistry::new`].
#[derive(Debug, Default)]
pub struct CounterRegistry {
    global: Mutex<GlobalCounter>,
}

impl CounterRegistry {
    /// Create a registry with an unset global counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Current state of the global counter.
    #[must_use]
    pub fn snapshot(&self) -> GlobalCounter {
        *lock_recover_debug(&self.global, "CounterRegistry::snapshot")
    }

    /// Continue numbering from the cursor. An unset cursor resumes at 0.
    ///
    /// Returns the value the next global print will show.
    pub fn resume(&self) -> u64 {
        let mut counter = lock_recover_debug(&self.global, "CounterRegistry::resume");
        let value = counter.cursor.unwrap_or(0);
        counter.active = Some(value);
        value
    }

    /// Restart numbering at `start`, moving the cursor with it.
    pub fn reset(&self, start: u64) {
        let mut counter = lock_recover_debug(&self.global, "CounterRegistry::reset");
        counter.active = Some(start);
        counter.cursor = Some(start);
    }

    /// Take the active value and advance both fields past it.
    pub fn next(&self) -> u64 {
        let mut counter = lock_recover_debug(&self.global, "CounterRegistry::next");
        let value = counter.active.unwrap_or(0);
        let advanced = value.saturating_add(1);
        counter.active = Some(advanced);
        counter.cursor = Some(advanced);
        value
    }

    /// Return the global counter to its unset state.
    pub fn clear(&self) {
        *lock_recover_debug(&self.global, "CounterRegistry::clear") = GlobalCounter::default();
    }
}

/// The counter a printer numbers its lines with.
#[derive(Debug)]
pub(crate) enum CounterBinding {
    None,
    Local(AtomicU64),
    Global(Arc<CounterRegistry>),
}

impl CounterBinding {
    /// Bind a counter for a new printer.
    ///
    /// | start    | global | binding                          |
    /// |----------|--------|----------------------------------|
    /// | `Some`   | no     | local counter at `start`         |
    /// | `None`   | yes    | global counter, resumed          |
    /// | `Some`   | yes    | global counter, reset to `start` |
    /// | `None`   | no     | no counter                       |
    pub(crate) fn resolve(start: Option<u64>, global: bool, registry: &Arc<CounterRegistry>) -> Self {
        match (start, global) {
            (Some(start), false) => {
                log::debug!("binding local counter at {start}");
                Self::Local(AtomicU64::new(start))
            }
            (None, true) => {
                let value = registry.resume();
                log::debug!("resuming global counter at {value}");
                Self::Global(Arc::clone(registry))
            }
            (Some(start), true) => {
                registry.reset(start);
                log::debug!("resetting global counter to {start}");
                Self::Global(Arc::clone(registry))
            }
            (None, false) => Self::None,
        }
    }

    /// Take the next number, if a counter is bound.
    pub(crate) fn next(&self) -> Option<u64> {
        match self {
            Self::None => None,
            Self::Local(value) => Some(
                value
                    .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                        Some(n.saturating_add(1))
                    })
                    .unwrap_or_else(|n| n),
            ),
            Self::Global(registry) => Some(registry.next()),
        }
    }

    /// Peek at the number the next print will show.
    pub(crate) fn current(&self) -> Option<u64> {
        match self {
            Self::None => None,
            Self::Local(value) => Some(value.load(Ordering::Relaxed)),
            Self::Global(registry) => Some(registry.snapshot().active.unwrap_or(0)),
        }
    }
}
