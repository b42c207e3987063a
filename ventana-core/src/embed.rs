//! Third-party video player embed as an idempotent "ensure present" step.
use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PLAYER_CONTAINER, DEFAULT_PLAYER_ID, DEFAULT_PLAYER_SCRIPT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedSpec {
    pub player_id: String,
    pub script_src: String,
    /// Selector of the placeholder the player is mounted into.
    pub container_selector: String,
}

impl Default for EmbedSpec {
    fn default() -> Self {
        Self {
            player_id: DEFAULT_PLAYER_ID.to_string(),
            script_src: DEFAULT_PLAYER_SCRIPT.to_string(),
            container_selector: DEFAULT_PLAYER_CONTAINER.to_string(),
        }
    }
}

impl EmbedSpec {
    /// Responsive 16:9 wrapper holding the player's custom element.
    #[must_use]
    pub fn player_markup(&self) -> String {
        format!(
            concat!(
                r#"<div style="position: relative; width: 100%; padding-bottom: 56.25%; background: #000; border-radius: 8px; overflow: hidden;">"#,
                r#"<vturb-smartplayer id="{}" style="display: block; margin: 0 auto; width: 100%; height: 100%; position: absolute; top: 0; left: 0;"></vturb-smartplayer>"#,
                "</div>"
            ),
            self.player_id
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("embed container {0} not found")]
    MissingContainer(String),
    #[error("could not create player element: {0}")]
    Dom(String),
    #[error("player script {0} failed to load")]
    ScriptLoad(String),
}

/// Document operations needed to mount the player.
/// Platform-specific implementations should provide this.
pub trait EmbedHost {
    fn has_script(&self, src: &str) -> bool;

    /// Append a script tag for `src`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be created or attached.
    fn append_script(&self, src: &str) -> Result<(), EmbedError>;

    fn has_player(&self, spec: &EmbedSpec) -> bool;

    /// Render the player markup into the container.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::MissingContainer`] when the placeholder is not in the document.
    fn mount_player(&self, spec: &EmbedSpec) -> Result<(), EmbedError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedOutcome {
    pub player_mounted: bool,
    pub script_appended: bool,
}

impl EmbedOutcome {
    #[must_use]
    pub const fn changed(self) -> bool {
        self.player_mounted || self.script_appended
    }
}

/// Check-then-create for both the player element and its script. Calling
/// this any number of times leaves exactly one of each in the document.
///
/// # Errors
///
/// Propagates host failures; the caller renders the inline reload prompt.
pub fn ensure_embed<H: EmbedHost + ?Sized>(
    host: &H,
    spec: &EmbedSpec,
) -> Result<EmbedOutcome, EmbedError> {
    let player_mounted = if host.has_player(spec) {
        false
    } else {
        host.mount_player(spec)?;
        true
    };
    let script_appended = if host.has_script(&spec.script_src) {
        false
    } else {
        host.append_script(&spec.script_src)?;
        true
    };
    let outcome = EmbedOutcome {
        player_mounted,
        script_appended,
    };
    if outcome.changed() {
        log::debug!("embed ensured for {}: {outcome:?}", spec.player_id);
    }
    Ok(outcome)
}

/// Document stand-in that records what was mounted.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmbedHost {
    scripts: Rc<RefCell<Vec<String>>>,
    players: Rc<RefCell<Vec<String>>>,
    missing_container: bool,
}

impl MemoryEmbedHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose document lacks the player placeholder.
    #[must_use]
    pub fn without_container() -> Self {
        Self {
            missing_container: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn script_count(&self) -> usize {
        self.scripts.borrow().len()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.borrow().len()
    }
}

impl EmbedHost for MemoryEmbedHost {
    fn has_script(&self, src: &str) -> bool {
        self.scripts.borrow().iter().any(|s| s == src)
    }

    fn append_script(&self, src: &str) -> Result<(), EmbedError> {
        self.scripts.borrow_mut().push(src.to_string());
        Ok(())
    }

    fn has_player(&self, spec: &EmbedSpec) -> bool {
        self.players.borrow().contains(&spec.player_id)
    }

    fn mount_player(&self, spec: &EmbedSpec) -> Result<(), EmbedError> {
        if self.missing_container {
            return Err(EmbedError::MissingContainer(spec.container_selector.clone()));
        }
        self.players.borrow_mut().push(spec.player_id.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_ensure_mounts_once() {
        let host = MemoryEmbedHost::new();
        let spec = EmbedSpec::default();
        let first = ensure_embed(&host, &spec).unwrap();
        assert!(first.player_mounted && first.script_appended);
        let second = ensure_embed(&host, &spec).unwrap();
        assert!(!second.changed());
        assert_eq!(host.script_count(), 1);
        assert_eq!(host.player_count(), 1);
    }

    #[test]
    fn missing_container_is_reported() {
        let host = MemoryEmbedHost::without_container();
        let err = ensure_embed(&host, &EmbedSpec::default()).unwrap_err();
        assert!(matches!(err, EmbedError::MissingContainer(ref sel) if sel == ".vsl-placeholder"));
        assert_eq!(host.script_count(), 0);
    }

    #[test]
    fn markup_names_the_player() {
        let markup = EmbedSpec::default().player_markup();
        assert!(markup.contains(r#"<vturb-smartplayer id="vid-6946ae0a8fd5231b631d81f0""#));
    }
}
