//! Configuration bundled with the front end.
use once_cell::sync::Lazy;

use ventana_core::{LandingConfig, RevealConfig};

/// Reveal tunables from `static/config/reveal.json`, with the compile-time
/// `CHECKOUT_URL` override applied.
pub static REVEAL_CONFIG: Lazy<RevealConfig> = Lazy::new(|| {
    let mut cfg = RevealConfig::load_from_static();
    if let Some(url) = crate::paths::checkout_override() {
        log::debug!("checkout base overridden at build time");
        cfg.checkout.base_url = url.to_string();
    }
    cfg
});

pub static LANDING_CONFIG: Lazy<LandingConfig> = Lazy::new(LandingConfig::default);

#[must_use]
pub fn reveal() -> RevealConfig {
    REVEAL_CONFIG.clone()
}
