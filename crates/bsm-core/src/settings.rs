//! Global library settings.
//!
//! [`Settings`] holds the **pricing defaults**: the numerical parameters an
//! engine uses when it is built through `Default` rather than an explicit
//! constructor. It is a process-wide singleton accessed via a
//! `std::sync::OnceLock`.
//!
//! Thread safety: the defaults are stored behind a `Mutex` so that they can
//! be changed from any thread. Engines copy the values at construction, so a
//! change never affects an engine that already exists. Tests that change the
//! defaults should use [`ScopedPricingDefaults`], which restores the previous
//! values on drop.

use crate::{Real, Size};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Numerical parameters used by engines built with `Default`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingDefaults {
    /// Number of time steps of the binomial lattice.
    pub lattice_steps: Size,
    /// Number of paths of the plain Monte Carlo engine.
    pub mc_paths: Size,
    /// Number of time steps per path of the plain Monte Carlo engine.
    pub mc_steps: Size,
    /// Number of paths of the Longstaff-Schwartz engine.
    pub lsm_paths: Size,
    /// Number of exercise steps of the Longstaff-Schwartz engine.
    pub lsm_steps: Size,
    /// Relative bump used by the finite-difference Greeks.
    pub greeks_bump: Real,
    /// Seed of the random number generator of simulation engines.
    pub seed: u64,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            lattice_steps: 1000,
            mc_paths: 100_000,
            mc_steps: 100,
            lsm_paths: 10_000,
            lsm_steps: 50,
            greeks_bump: 1e-3,
            seed: 42,
        }
    }
}

/// Process-wide settings used by the bsm-rs library.
pub struct Settings {
    defaults: Mutex<PricingDefaults>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            defaults: Mutex::new(PricingDefaults::default()),
        })
    }

    fn lock(&self) -> MutexGuard<'_, PricingDefaults> {
        // The guarded value is plain data, so a poisoned lock still holds a
        // usable snapshot.
        self.defaults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the current pricing defaults.
    pub fn pricing_defaults(&self) -> PricingDefaults {
        *self.lock()
    }

    /// Replace the pricing defaults.
    pub fn set_pricing_defaults(&self, defaults: PricingDefaults) {
        *self.lock() = defaults;
    }

    /// Restore the built-in pricing defaults.
    pub fn reset_pricing_defaults(&self) {
        *self.lock() = PricingDefaults::default();
    }
}

/// Guard that installs pricing defaults and restores the previous ones when
/// dropped.
///
/// # Example
/// ```
/// use bsm_core::{PricingDefaults, ScopedPricingDefaults, Settings};
/// let before = Settings::instance().pricing_defaults();
/// {
///     let _guard = ScopedPricingDefaults::new(PricingDefaults {
///         lattice_steps: 50,
///         ..before
///     });
///     assert_eq!(Settings::instance().pricing_defaults().lattice_steps, 50);
/// }
/// assert_eq!(Settings::instance().pricing_defaults(), before);
/// ```
#[must_use = "the previous defaults are restored when the guard is dropped"]
pub struct ScopedPricingDefaults {
    previous: PricingDefaults,
}

impl ScopedPricingDefaults {
    /// Install `defaults` until the guard goes out of scope.
    pub fn new(defaults: PricingDefaults) -> Self {
        let settings = Settings::instance();
        let previous = settings.pricing_defaults();
        settings.set_pricing_defaults(defaults);
        Self { previous }
    }
}

impl Drop for ScopedPricingDefaults {
    fn drop(&mut self) {
        Settings::instance().set_pricing_defaults(self.previous);
    }
}
