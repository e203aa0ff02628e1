//! Enabling and disabling user input around a running download.

use tracing::debug;

/// Input surface that must stay locked while a download is in progress.
pub trait InputControls {
    fn disable(&self);
    fn enable(&self);
}

/// Disables the controls on creation and re-enables them when dropped, so
/// every exit path (success, failure, early `?` return, panic) unlocks input.
pub struct ControlsGuard<'a, C: InputControls + ?Sized> {
    controls: &'a C,
}

impl<'a, C: InputControls + ?Sized> ControlsGuard<'a, C> {
    pub fn new(controls: &'a C) -> Self {
        controls.disable();
        Self { controls }
    }
}

impl<C: InputControls + ?Sized> Drop for ControlsGuard<'_, C> {
    fn drop(&mut self) {
        self.controls.enable();
    }
}

/// Controls for a run with nobody at the keyboard (one-shot command line use).
pub struct Unattended;

impl InputControls for Unattended {
    fn disable(&self) {
        debug!("input locked");
    }

    fn enable(&self) {
        debug!("input unlocked");
    }
}
