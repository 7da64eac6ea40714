//! End-to-end wiring tests: sim hook + sim host + recording invoker.

use std::{sync::Arc, thread};

use blursave::{Pid, Session, SimHook, SimHost};
use blursave_engine::test_support::{PanickingInvoker, RecordingInvoker};

const HOST_PID: Pid = 7;
const OTHER_PID: Pid = 99;

struct Fixture {
    hook: Arc<SimHook>,
    host: Arc<SimHost>,
    invoker: Arc<RecordingInvoker>,
    session: Session,
}

fn fixture(workspace_open: bool) -> Fixture {
    let hook = SimHook::new(HOST_PID);
    let host = SimHost::new(workspace_open);
    let invoker = RecordingInvoker::new();
    let session = Session::activate(
        hook.clone(),
        host.clone(),
        invoker.clone(),
        HOST_PID,
    );
    Fixture {
        hook,
        host,
        invoker,
        session,
    }
}

#[test]
fn saves_once_per_focus_loss_while_workspace_open() {
    let mut f = fixture(false);
    f.host.open_workspace();
    f.hook.focus(HOST_PID, 1);
    f.hook.focus(OTHER_PID, 2);
    assert_eq!(f.invoker.calls(), 1);
    // Repeated other-process focus without regaining: no extra saves.
    f.hook.focus(OTHER_PID, 3);
    f.hook.focus(98, 4);
    assert_eq!(f.invoker.calls(), 1);
    // Regain and lose again: one more.
    f.hook.focus(HOST_PID, 1);
    f.hook.focus(OTHER_PID, 2);
    assert_eq!(f.invoker.calls(), 2);
    f.session.shutdown();
}

#[test]
fn never_saves_without_a_workspace() {
    let mut f = fixture(false);
    f.hook.focus(HOST_PID, 1);
    f.hook.focus(OTHER_PID, 2);
    assert_eq!(f.invoker.calls(), 0);
    f.session.shutdown();
}

#[test]
fn never_saves_before_first_host_focus() {
    let mut f = fixture(true);
    f.hook.focus(OTHER_PID, 2);
    assert_eq!(f.invoker.calls(), 0);
    f.session.shutdown();
}

#[test]
fn closing_workspace_disables_saving() {
    let mut f = fixture(false);
    f.host.open_workspace();
    f.hook.focus(HOST_PID, 1);
    f.host.close_workspace();
    f.hook.focus(OTHER_PID, 2);
    assert_eq!(f.invoker.calls(), 0);
    f.session.shutdown();
}

#[test]
fn preloaded_workspace_is_seeded_at_activation() {
    let mut f = fixture(true);
    assert!(f.session.engine().workspace_open());
    f.hook.focus(HOST_PID, 1);
    f.hook.focus(OTHER_PID, 2);
    assert_eq!(f.invoker.calls(), 1);
    f.session.shutdown();
}

#[test]
fn denied_hook_degrades_to_inactive() {
    let hook = SimHook::new(HOST_PID);
    hook.set_deny(true);
    let host = SimHost::new(true);
    let invoker = RecordingInvoker::new();
    let mut session = Session::activate(hook.clone(), host, invoker.clone(), HOST_PID);
    hook.set_deny(false);
    hook.focus(HOST_PID, 1);
    hook.focus(OTHER_PID, 2);
    assert_eq!(invoker.calls(), 0);
    // Teardown is still clean with nothing acquired.
    session.shutdown();
    session.shutdown();
}

#[test]
fn denied_global_hook_keeps_focus_gain_tracking() {
    let hook = SimHook::new(HOST_PID);
    hook.set_deny_filter(blursave::HookFilter::other_processes(), true);
    let host = SimHost::new(true);
    let invoker = RecordingInvoker::new();
    let mut session = Session::activate(hook.clone(), host, invoker.clone(), HOST_PID);
    assert_eq!(hook.active_subscriptions(), 1);
    hook.focus(HOST_PID, 1);
    assert!(session.engine().has_focus());
    hook.focus(OTHER_PID, 2);
    assert_eq!(invoker.calls(), 0);
    session.shutdown();
    assert_eq!(hook.active_subscriptions(), 0);
}

#[test]
fn shutdown_releases_everything_exactly_once() {
    let mut f = fixture(false);
    assert_eq!(f.hook.active_subscriptions(), 2);
    assert_eq!(f.host.active_subscriptions(), 1);
    f.session.shutdown();
    f.session.shutdown();
    assert_eq!(f.hook.active_subscriptions(), 0);
    assert_eq!(f.host.active_subscriptions(), 0);
    drop(f.session);
    assert_eq!(f.hook.active_subscriptions(), 0);
}

#[test]
fn drop_without_shutdown_releases_everything() {
    let f = fixture(false);
    drop(f.session);
    assert_eq!(f.hook.active_subscriptions(), 0);
    assert_eq!(f.host.active_subscriptions(), 0);
}

#[test]
fn events_from_foreign_threads_drive_the_machine() {
    let mut f = fixture(false);
    f.host.open_workspace();
    let hook = f.hook.clone();
    thread::spawn(move || {
        hook.focus(HOST_PID, 1);
        hook.focus(OTHER_PID, 2);
    })
    .join()
    .unwrap();
    assert_eq!(f.invoker.calls(), 1);
    assert!(!f.session.engine().has_focus());
    f.session.shutdown();
}

#[test]
fn panicking_invoker_is_contained() {
    let hook = SimHook::new(HOST_PID);
    let host = SimHost::new(true);
    let mut session = Session::activate(
        hook.clone(),
        host.clone(),
        Arc::new(PanickingInvoker),
        HOST_PID,
    );
    hook.focus(HOST_PID, 1);
    // The unwind stops at the adapter boundary; the machine stays usable.
    hook.focus(OTHER_PID, 2);
    assert!(!session.engine().has_focus());
    host.close_workspace();
    assert!(!session.engine().workspace_open());
    session.shutdown();
}
