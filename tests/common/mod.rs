use std::sync::Once;

use glicko2::{Competitor, GameOutcome};

static TRACING: Once = Once::new();

/// Routes solver and update logs to the test output. Set `RUST_LOG=trace`
/// to see every solver iteration.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Glickman's worked example: a 1500 player with deviation 200 beats a
/// 1400 player and loses to a 1550 and a 1700 player.
pub fn worked_example() -> (Competitor, Vec<GameOutcome>) {
    (
        Competitor::new(1500.0, 200.0, 0.06).unwrap(),
        vec![
            GameOutcome::win(1400.0, 30.0),
            GameOutcome::loss(1550.0, 100.0),
            GameOutcome::loss(1700.0, 300.0),
        ],
    )
}

pub fn state(competitor: &Competitor) -> (u64, u64, u64) {
    (
        competitor.rating().to_bits(),
        competitor.deviation().to_bits(),
        competitor.volatility().to_bits(),
    )
}
