//! Protected evaluation of a single check.
//!
//! A check is run under [`std::panic::catch_unwind`]. While it runs, the process panic
//! hook stays silent on the current thread so that a failing assertion shows up only
//! as the report's own diagnostic lines. Panics everywhere else go through the hook
//! that was installed before ours.

use std::{
    cell::Cell,
    panic::{self, AssertUnwindSafe, PanicHookInfo},
};

use once_cell::sync::OnceCell;

use crate::error::CheckFailure;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Hook that was active when the quiet hook got installed.
static PREVIOUS_HOOK: OnceCell<PanicHook> = OnceCell::new();

thread_local! {
    static QUIET_DEPTH: Cell<usize> = const { Cell::new(0) };
}

fn install_quiet_hook() {
    PREVIOUS_HOOK.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|info| {
            if is_quiet() {
                return;
            }
            if let Some(previous) = PREVIOUS_HOOK.get() {
                previous(info);
            }
        }));
        previous
    });
}

/// Whether a protected check is currently running on this thread.
pub fn is_quiet() -> bool {
    QUIET_DEPTH.with(Cell::get) > 0
}

struct QuietScope;

impl QuietScope {
    fn enter() -> Self {
        QUIET_DEPTH.with(|depth| depth.set(depth.get() + 1));
        QuietScope
    }
}

impl Drop for QuietScope {
    fn drop(&mut self) {
        QUIET_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Run `check`, turning any panic it raises into a [`CheckFailure`].
///
/// Nothing is counted or printed here; callers decide what a failure means.
/// Under `panic = "abort"` a failing check still aborts the process.
pub fn protect<F: FnOnce()>(check: F) -> Result<(), CheckFailure> {
    install_quiet_hook();
    let _quiet = QuietScope::enter();
    panic::catch_unwind(AssertUnwindSafe(check)).map_err(|payload| {
        let failure = CheckFailure::from_payload(payload.as_ref());
        log::debug!("check failed: {failure}");
        failure
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_check_is_ok() {
        assert_eq!(protect(|| assert_eq!(1 + 1, 2)), Ok(()));
    }

    #[test]
    fn failing_assertion_is_captured_with_its_message() {
        let failure = protect(|| assert!(1 == 2, "numbers differ")).unwrap_err();
        assert_eq!(failure.message, "numbers differ");
    }

    #[test]
    fn any_panic_counts_as_a_failure() {
        let values: Vec<u8> = Vec::new();
        let failure = protect(|| assert_eq!(values[3], 0)).unwrap_err();
        assert!(failure.message.contains("index out of bounds"));
    }

    #[test]
    fn quiet_flag_is_scoped_to_the_check() {
        assert!(!is_quiet());
        let mut seen = false;
        let _ = protect(|| seen = is_quiet());
        assert!(seen);
        assert!(!is_quiet());
    }

    #[test]
    fn quiet_flag_is_reset_after_a_panic() {
        let _ = protect(|| panic!("inner"));
        assert!(!is_quiet());
    }
}
