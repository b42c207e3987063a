//! Scenario catalogue: each scenario drives one [`SessionSim`] with seeded
//! jitter and checks the reveal's guarantees afterwards.
use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use url::Url;

use ventana_core::constants::DEADLINE_SECONDS;
use ventana_core::{
    EpochMillis, FunnelStore, MemoryStorage, Phase, RecordingSink, RevealConfig, SessionSim,
    capture_entry_attribution,
};

/// Start of every simulated session.
pub const T0: u64 = 1_700_000_000_000;

/// Long enough for every fallback to have fired.
const SETTLE: Duration = Duration::from_secs(400);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Violation {
    #[error("phase went back from {from:?} to {to:?}")]
    PhaseRegressed { from: Phase, to: Phase },
    #[error("{event} fired {count} times, expected {expected}")]
    EffectCount {
        event: &'static str,
        count: usize,
        expected: usize,
    },
    #[error("reveal stalled in {0:?}")]
    Stalled(Phase),
}

pub struct TestScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub run: fn(&mut ChaCha8Rng) -> Result<()>,
}

const CATALOGUE: [TestScenario; 7] = [
    TestScenario {
        name: "smoke",
        description: "Default config, jittered clock, reaches the offer",
        run: smoke,
    },
    TestScenario {
        name: "scroller",
        description: "Random scroll positions around the video section",
        run: scroller,
    },
    TestScenario {
        name: "clicker",
        description: "Continue and reveal buttons mashed at random moments",
        run: clicker,
    },
    TestScenario {
        name: "racing",
        description: "Leaky host timers racing every trigger",
        run: racing,
    },
    TestScenario {
        name: "reload",
        description: "Random reloads keep the countdown anchored",
        run: reload,
    },
    TestScenario {
        name: "expiry",
        description: "Session expires once and locks the checkout",
        run: expiry,
    },
    TestScenario {
        name: "attribution",
        description: "Captured campaign parameters reach the checkout link",
        run: attribution,
    },
];

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    CATALOGUE.iter().map(|s| (s.name, s.description))
}

pub fn get_scenario(name: &str) -> Option<&'static TestScenario> {
    CATALOGUE.iter().find(|s| s.name == name)
}

/// Replace `all` with the full catalogue, keeping any other names.
pub fn expand_scenarios(names: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = names.iter().filter(|n| *n != "all").cloned().collect();
    if names.iter().any(|n| n == "all") {
        for (name, _) in list_scenarios() {
            if !expanded.iter().any(|n| n == name) {
                expanded.push(name.to_string());
            }
        }
    }
    expanded
}

fn start() -> EpochMillis {
    EpochMillis::from_millis(T0)
}

fn session(cfg: RevealConfig) -> SessionSim {
    SessionSim::new(cfg, MemoryStorage::new(), RecordingSink::new(), start())
}

fn jitter(rng: &mut ChaCha8Rng, max_ms: u64) -> Duration {
    Duration::from_millis(rng.gen_range(1..=max_ms))
}

/// Advance in random steps, failing if the phase ever moves backwards.
fn walk(sim: &mut SessionSim, rng: &mut ChaCha8Rng, total: Duration, max_step_ms: u64) -> Result<()> {
    let until = sim.now().after(total);
    while sim.now() < until && !sim.is_expired() {
        let before = sim.phase();
        let left = until.saturating_since(sim.now());
        sim.advance_by(jitter(rng, max_step_ms).min(left));
        check_forward(before, sim.phase())?;
    }
    Ok(())
}

fn check_forward(from: Phase, to: Phase) -> Result<()> {
    if to < from {
        return Err(Violation::PhaseRegressed { from, to }.into());
    }
    Ok(())
}

fn expect_count(sim: &SessionSim, event: &'static str, expected: usize) -> Result<()> {
    let count = sim.sink().count(event);
    if count != expected {
        return Err(Violation::EffectCount {
            event,
            count,
            expected,
        }
        .into());
    }
    Ok(())
}

fn expect_offer_once(sim: &SessionSim) -> Result<()> {
    if sim.phase() != Phase::Offer {
        return Err(Violation::Stalled(sim.phase()).into());
    }
    expect_count(sim, "vsl_event", 1)?;
    expect_count(sim, "offer_revealed", 1)?;
    expect_count(sim, "revelation_viewed", 3)?;
    ensure!(sim.embed().player_count() == 1, "player mounted {} times", sim.embed().player_count());
    ensure!(sim.embed().script_count() == 1, "player script appended {} times", sim.embed().script_count());
    Ok(())
}

fn smoke(rng: &mut ChaCha8Rng) -> Result<()> {
    let mut sim = session(RevealConfig::default());
    walk(&mut sim, rng, SETTLE, 5_000)?;
    expect_offer_once(&sim)?;
    ensure!(sim.click_buy().is_some(), "checkout unavailable after the offer");
    Ok(())
}

fn scroller(rng: &mut ChaCha8Rng) -> Result<()> {
    let mut sim = session(RevealConfig::default());
    let until = sim.now().after(SETTLE);
    while sim.now() < until {
        let before = sim.phase();
        if rng.gen_bool(0.4) {
            sim.scroll_video_to(rng.gen_range(-600.0..900.0));
        } else {
            sim.advance_by(jitter(rng, 3_000));
        }
        check_forward(before, sim.phase())?;
    }
    expect_offer_once(&sim)
}

fn clicker(rng: &mut ChaCha8Rng) -> Result<()> {
    let mut cfg = RevealConfig::default();
    cfg.diagnosis.manual_continue = rng.gen_bool(0.5);
    let mut sim = session(cfg);
    let until = sim.now().after(SETTLE);
    while sim.now() < until {
        let before = sim.phase();
        match rng.gen_range(0..4) {
            0 => sim.click_continue(),
            1 => sim.click_reveal(),
            2 => {
                let _ = sim.click_buy();
            }
            _ => sim.advance_by(jitter(rng, 4_000)),
        }
        check_forward(before, sim.phase())?;
    }
    // A pending manual continue is the one state that legitimately waits.
    if sim.phase() == Phase::Diagnosis {
        sim.click_continue();
        walk(&mut sim, rng, SETTLE, 5_000)?;
    }
    expect_offer_once(&sim)
}

fn racing(rng: &mut ChaCha8Rng) -> Result<()> {
    let mut sim = session(RevealConfig::default()).with_leaky_timers();
    walk(&mut sim, rng, Duration::from_secs(12), 1_000)?;
    for _ in 0..rng.gen_range(1..6) {
        sim.scroll_video_to(rng.gen_range(-400.0..200.0));
        sim.click_reveal();
        sim.advance_by(jitter(rng, 200));
    }
    walk(&mut sim, rng, SETTLE, 5_000)?;
    expect_offer_once(&sim)?;
    ensure!(sim.pending_timers() == 0, "{} timers never fired", sim.pending_timers());
    Ok(())
}

fn reload(rng: &mut ChaCha8Rng) -> Result<()> {
    let mut sim = session(RevealConfig::default());
    for _ in 0..rng.gen_range(2..8) {
        sim.advance_by(Duration::from_millis(rng.gen_range(500..120_000)));
        sim = sim.reload();
        ensure!(sim.phase() == Phase::Loading, "reload resumed at {:?}", sim.phase());
        let elapsed = sim.now().saturating_since(start()).as_secs();
        let expected = DEADLINE_SECONDS.saturating_sub(elapsed);
        ensure!(
            sim.remaining_secs() == expected,
            "remaining {}s after reload, expected {expected}s",
            sim.remaining_secs()
        );
    }
    ensure!(
        sim.store().session_clock_start() == Some(start()),
        "session clock was re-anchored"
    );
    Ok(())
}

fn expiry(rng: &mut ChaCha8Rng) -> Result<()> {
    let storage = MemoryStorage::new();
    let mut sim = SessionSim::new(
        RevealConfig::default(),
        storage.clone(),
        RecordingSink::new(),
        start(),
    );
    let past_deadline = Duration::from_secs(DEADLINE_SECONDS + 120);
    walk(&mut sim, rng, past_deadline, 90_000)?;
    let expiry = sim.expiry().context("session never expired")?;
    ensure!(expiry.redirect_to == "/", "redirected to {}", expiry.redirect_to);
    expect_count(&sim, "session_expired", 1)?;
    ensure!(sim.click_buy().is_none(), "checkout opened after expiry");
    ensure!(
        FunnelStore::new(storage).session_clock_start().is_none(),
        "expired clock left in storage"
    );
    Ok(())
}

fn attribution(rng: &mut ChaCha8Rng) -> Result<()> {
    let storage = MemoryStorage::new();
    let store = FunnelStore::new(storage.clone());
    let source = format!("src{}", rng.gen_range(1..1_000));
    let click_id = format!("c{}", rng.r#gen::<u32>());
    capture_entry_attribution(
        &store,
        &format!("?utm_source={source}&gclid={click_id}&ref=ignored"),
    );

    let mut sim = SessionSim::new(RevealConfig::default(), storage, RecordingSink::new(), start());
    walk(&mut sim, rng, SETTLE, 5_000)?;
    let link = sim.click_buy().context("checkout unavailable")?;
    let link = Url::parse(&link).context("checkout link is not a URL")?;
    let pairs: BTreeMap<String, String> = link.query_pairs().into_owned().collect();
    ensure!(pairs.get("utm_source") == Some(&source), "utm_source lost: {link}");
    ensure!(pairs.get("gclid") == Some(&click_id), "gclid lost: {link}");
    ensure!(!pairs.contains_key("ref"), "unrecognised parameter forwarded: {link}");
    Ok(())
}
