//! In-process hook implementation for tests and the sim binary.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use parking_lot::Mutex;

use crate::hook::{FocusChange, FocusHook, FocusSink, HookError, HookFilter, HookHandle, Pid};

/// One registered subscription.
struct Subscription {
    /// Delivery filter supplied at acquire time.
    filter: HookFilter,
    /// Callback to invoke for matching changes.
    sink: FocusSink,
}

/// Mutable registry state behind one lock.
struct Registry {
    /// Next handle value to hand out.
    next: u64,
    /// Live subscriptions keyed by raw handle.
    subs: HashMap<u64, Subscription>,
}

/// A fully in-process [`FocusHook`]: focus changes are injected with
/// [`focus`](Self::focus) instead of arriving from the OS. Delivery happens
/// synchronously on the injecting thread, which is exactly how a real hook
/// callback behaves from the watcher's point of view.
pub struct SimHook {
    /// Pid treated as "our own process" for `skip_own_process` filters.
    own_pid: Pid,
    /// Subscription registry.
    registry: Mutex<Registry>,
    /// When set, every `acquire` fails; models the OS denying all hooks.
    deny_all: AtomicBool,
    /// Filters for which `acquire` fails; models the OS denying one hook
    /// while granting the other.
    denied: Mutex<Vec<HookFilter>>,
}

impl SimHook {
    /// Create a hook that treats `own_pid` as the subscriber's own process.
    pub fn new(own_pid: Pid) -> Arc<Self> {
        Arc::new(Self {
            own_pid,
            registry: Mutex::new(Registry {
                next: 1,
                subs: HashMap::new(),
            }),
            deny_all: AtomicBool::new(false),
            denied: Mutex::new(Vec::new()),
        })
    }

    /// Make every subsequent `acquire` call fail (or succeed again).
    pub fn set_deny(&self, deny: bool) {
        self.deny_all.store(deny, Ordering::SeqCst);
    }

    /// Make subsequent `acquire` calls for exactly `filter` fail (or succeed
    /// again), leaving other filters unaffected.
    pub fn set_deny_filter(&self, filter: HookFilter, deny: bool) {
        let mut denied = self.denied.lock();
        if deny {
            if !denied.contains(&filter) {
                denied.push(filter);
            }
        } else {
            denied.retain(|f| *f != filter);
        }
    }

    /// Inject a foreground change: `pid`'s `window` gained focus. Dispatches
    /// synchronously to every matching subscription.
    pub fn focus(&self, pid: Pid, window: u64) {
        let change = FocusChange { pid, window };
        // Collect sinks first so none runs under the registry lock.
        let sinks: Vec<FocusSink> = {
            let registry = self.registry.lock();
            registry
                .subs
                .values()
                .filter(|sub| self.matches(sub.filter, pid))
                .map(|sub| sub.sink.clone())
                .collect()
        };
        for sink in sinks {
            sink(change);
        }
    }

    /// Number of live subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.registry.lock().subs.len()
    }

    /// Whether `filter` selects a change originating from `pid`.
    fn matches(&self, filter: HookFilter, pid: Pid) -> bool {
        if filter.skip_own_process && pid == self.own_pid {
            return false;
        }
        filter.pid.is_none_or(|want| want == pid)
    }
}

impl FocusHook for SimHook {
    fn acquire(&self, filter: HookFilter, sink: FocusSink) -> Result<HookHandle, HookError> {
        if self.deny_all.load(Ordering::SeqCst) || self.denied.lock().contains(&filter) {
            return Err(HookError::Denied {
                reason: "denied by sim".into(),
            });
        }
        let mut registry = self.registry.lock();
        let raw = registry.next;
        registry.next += 1;
        registry.subs.insert(raw, Subscription { filter, sink });
        Ok(HookHandle::new(raw))
    }

    fn release(&self, handle: HookHandle) {
        // Unknown handles are ignored; release is idempotent.
        self.registry.lock().subs.remove(&handle.raw());
    }
}
