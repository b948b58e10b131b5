//! Panic hook that flushes the call trace
//!
//! Registering saves the process's current panic hook and installs a replacement that
//! flushes a tracer's buffer, then hands the panic to the saved hook so default
//! reporting still happens. Unregistering puts the saved hook back.
//!
//! The hook runs for every panic, including panics later caught with
//! `std::panic::catch_unwind`.

use super::call_tracer::CallTracer;
use crate::error::{Result, TracerError};
use std::panic::{self, PanicHookInfo};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

// Hook that was installed before the first registration.
static SAVED_HOOK: Mutex<Option<Arc<PanicHook>>> = Mutex::new(None);

/// Install the flushing hook for `tracer`
///
/// Registering again replaces the installed hook but keeps the hook saved by the
/// first registration, so unregistering always restores the pre-registration hook.
pub fn register(tracer: &CallTracer) {
    let mut slot = SAVED_HOOK.lock().unwrap_or_else(PoisonError::into_inner);

    let original = match slot.as_ref() {
        Some(original) => Arc::clone(original),
        None => {
            let original = Arc::new(panic::take_hook());
            *slot = Some(Arc::clone(&original));
            original
        }
    };

    let tracer = tracer.clone();
    panic::set_hook(Box::new(move |info| {
        tracer.flush_after_panic();
        (*original)(info);
    }));

    debug!("Registered as uncaught panic handler");
}

/// Restore the hook saved by [`register`]
///
/// Fails with [`TracerError::NotRegistered`] when nothing is registered.
pub fn unregister() -> Result<()> {
    let mut slot = SAVED_HOOK.lock().unwrap_or_else(PoisonError::into_inner);
    let original = slot.take().ok_or(TracerError::NotRegistered)?;

    // Dropping the installed replacement releases its handle on the saved hook.
    drop(panic::take_hook());

    match Arc::try_unwrap(original) {
        Ok(hook) => panic::set_hook(hook),
        Err(shared) => panic::set_hook(Box::new(move |info| (*shared)(info))),
    }

    debug!("Unregistered as uncaught panic handler");
    Ok(())
}

/// Whether a flushing hook is currently registered
pub fn is_registered() -> bool {
    SAVED_HOOK.lock().unwrap_or_else(PoisonError::into_inner).is_some()
}
