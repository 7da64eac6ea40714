//! Adapter that routes focus changes into the engine.

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use blursave_engine::Engine;
use tracing::{debug, error, warn};

use crate::hook::{FocusChange, FocusHook, FocusSink, HookFilter, HookHandle, Pid};

/// Owns the two focus subscriptions and translates their callbacks into
/// plain method calls on [`Engine`].
pub struct FocusWatcher {
    /// Notification source the handles were acquired from.
    hook: Arc<dyn FocusHook>,
    /// Cross-process subscription, if registration succeeded.
    other: Option<HookHandle>,
    /// Own-process subscription, if registration succeeded.
    own: Option<HookHandle>,
}

impl FocusWatcher {
    /// Register both subscriptions and start feeding `engine`.
    ///
    /// `own_pid` is the host's process id; it parameterizes the own-process
    /// filter and the "skip own process" exclusion of the global one. A
    /// registration failure is logged and leaves that channel inactive; the
    /// watcher still starts so the other channel keeps working and teardown
    /// stays uniform.
    pub fn start(hook: Arc<dyn FocusHook>, own_pid: Pid, engine: Engine) -> Self {
        let other_engine = engine.clone();
        let other_sink: FocusSink = Arc::new(move |change: FocusChange| {
            debug!(pid = change.pid, window = change.window, "foreground moved to another process");
            guarded("other_process_focus_gained", || {
                other_engine.other_process_focus_gained();
            });
        });
        let other = match hook.acquire(HookFilter::other_processes(), other_sink) {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(error = %err, "global focus hook unavailable; focus-loss detection inactive");
                None
            }
        };

        let own_sink: FocusSink = Arc::new(move |change: FocusChange| {
            debug!(window = change.window, "host window gained focus");
            guarded("host_focus_gained", || {
                engine.host_focus_gained();
            });
        });
        let own = match hook.acquire(HookFilter::own_process(own_pid), own_sink) {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(error = %err, "own-process focus hook unavailable; focus-gain detection inactive");
                None
            }
        };

        Self { hook, other, own }
    }

    /// Release both subscription handles. Safe to call more than once and
    /// with partially acquired handles; each release happens exactly once.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.other.take() {
            self.hook.release(handle);
        }
        if let Some(handle) = self.own.take() {
            self.hook.release(handle);
        }
    }
}

impl Drop for FocusWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Run a handler, containing any panic. The sinks run inside OS or host
/// event dispatch; an unwind escaping there can destabilize the host's event
/// loop, so we log and drop the event instead.
fn guarded<F: FnOnce()>(handler: &str, f: F) {
    if catch_unwind(AssertUnwindSafe(f)).is_err() {
        error!(handler, "panic in focus handler; event dropped");
    }
}

#[cfg(test)]
mod tests {
    use blursave_engine::test_support::RecordingInvoker;

    use super::*;
    use crate::sim::SimHook;

    const HOST_PID: Pid = 7;

    #[test]
    fn routes_focus_changes_to_the_engine() {
        let invoker = RecordingInvoker::new();
        let engine = Engine::new(invoker.clone());
        engine.seed_workspace_open(true);
        let hook = SimHook::new(HOST_PID);
        let mut watcher = FocusWatcher::start(hook.clone(), HOST_PID, engine);

        hook.focus(HOST_PID, 1);
        hook.focus(99, 2);
        assert_eq!(invoker.calls(), 1);
        // Focus bouncing between two other processes: still one save.
        hook.focus(98, 3);
        assert_eq!(invoker.calls(), 1);
        watcher.shutdown();
    }

    #[test]
    fn shutdown_releases_both_handles_once() {
        let invoker = RecordingInvoker::new();
        let engine = Engine::new(invoker);
        let hook = SimHook::new(HOST_PID);
        let mut watcher = FocusWatcher::start(hook.clone(), HOST_PID, engine);
        assert_eq!(hook.active_subscriptions(), 2);
        watcher.shutdown();
        watcher.shutdown();
        assert_eq!(hook.active_subscriptions(), 0);
        // Drop after explicit shutdown must not double-release.
        drop(watcher);
        assert_eq!(hook.active_subscriptions(), 0);
    }

    #[test]
    fn drop_releases_handles() {
        let invoker = RecordingInvoker::new();
        let engine = Engine::new(invoker);
        let hook = SimHook::new(HOST_PID);
        let watcher = FocusWatcher::start(hook.clone(), HOST_PID, engine);
        drop(watcher);
        assert_eq!(hook.active_subscriptions(), 0);
    }

    #[test]
    fn denied_registration_degrades_instead_of_failing() {
        let invoker = RecordingInvoker::new();
        let engine = Engine::new(invoker.clone());
        engine.seed_workspace_open(true);
        let hook = SimHook::new(HOST_PID);
        hook.set_deny(true);
        let mut watcher = FocusWatcher::start(hook.clone(), HOST_PID, engine);
        assert_eq!(hook.active_subscriptions(), 0);
        // No channels, no saves, but shutdown is still clean.
        hook.set_deny(false);
        hook.focus(HOST_PID, 1);
        hook.focus(99, 2);
        assert_eq!(invoker.calls(), 0);
        watcher.shutdown();
    }

    #[test]
    fn denied_global_hook_leaves_own_channel_live() {
        let invoker = RecordingInvoker::new();
        let engine = Engine::new(invoker.clone());
        engine.seed_workspace_open(true);
        let hook = SimHook::new(HOST_PID);
        hook.set_deny_filter(HookFilter::other_processes(), true);
        let mut watcher = FocusWatcher::start(hook.clone(), HOST_PID, engine.clone());
        assert_eq!(hook.active_subscriptions(), 1);
        // Focus gain still flows through the surviving channel.
        hook.focus(HOST_PID, 1);
        assert!(engine.has_focus());
        // Loss is undetectable, so no save ever fires.
        hook.focus(99, 2);
        assert_eq!(invoker.calls(), 0);
        watcher.shutdown();
        assert_eq!(hook.active_subscriptions(), 0);
    }

    #[test]
    fn denied_own_hook_leaves_global_channel_live() {
        let invoker = RecordingInvoker::new();
        let engine = Engine::new(invoker.clone());
        engine.seed_workspace_open(true);
        let hook = SimHook::new(HOST_PID);
        hook.set_deny_filter(HookFilter::own_process(HOST_PID), true);
        let mut watcher = FocusWatcher::start(hook.clone(), HOST_PID, engine.clone());
        assert_eq!(hook.active_subscriptions(), 1);
        // Focus gain is never observed through the hook...
        hook.focus(HOST_PID, 1);
        assert!(!engine.has_focus());
        // ...but the global channel still drives the engine: arm the focus
        // bit directly and the next loss saves.
        engine.host_focus_gained();
        hook.focus(99, 2);
        assert_eq!(invoker.calls(), 1);
        watcher.shutdown();
        assert_eq!(hook.active_subscriptions(), 0);
    }

    #[test]
    fn panicking_invoker_does_not_unwind_into_the_hook() {
        let engine = Engine::new(Arc::new(
            blursave_engine::test_support::PanickingInvoker,
        ));
        engine.seed_workspace_open(true);
        let hook = SimHook::new(HOST_PID);
        let _watcher = FocusWatcher::start(hook.clone(), HOST_PID, engine.clone());
        hook.focus(HOST_PID, 1);
        // The panic is contained; the edge was still consumed.
        hook.focus(99, 2);
        assert!(!engine.has_focus());
    }
}
