//! The autoplay against a real runtime on a paused clock.

use std::sync::Arc;

use game_content::ContentFactory;
use game_core::{FixedRng, Mode};
use runtime::{OracleManager, Runtime, RuntimeConfig};
use trinity_client::{Autoplay, ClientConfig};

async fn runtime_with(rng: FixedRng) -> Runtime {
    let content = ContentFactory::builtin().expect("builtin content");
    Runtime::builder()
        .config(RuntimeConfig {
            seed: Some(11),
            ..RuntimeConfig::default()
        })
        .oracles(OracleManager::from_content(content).with_rng(Arc::new(rng)))
        .build()
        .await
        .expect("runtime")
}

#[tokio::test(start_paused = true)]
async fn countering_the_telegraph_wins_the_first_fight() {
    // Every roll is zero: each step starts a fight and the enemy plays its rock telegraph.
    let runtime = runtime_with(FixedRng(0)).await;
    let config = ClientConfig {
        max_actions: 30,
        ..ClientConfig::default()
    };

    let report = Autoplay::new(runtime.handle(), config)
        .run()
        .await
        .expect("autoplay");

    assert_eq!(report.actions, 30);
    assert!(report.encounters >= 1);
    assert!(report.victories >= 1);
    assert_eq!(report.defeats, 0);

    let state = runtime.handle().query_state().await.expect("state");
    assert!(!state.run.defeated.is_empty());
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn quiet_field_is_only_walked() {
    let runtime = runtime_with(FixedRng::at(0.9)).await;
    let config = ClientConfig {
        max_actions: 12,
        ..ClientConfig::default()
    };

    let report = Autoplay::new(runtime.handle(), config)
        .run()
        .await
        .expect("autoplay");

    assert_eq!(report.encounters, 0);
    assert_eq!(report.steps + report.rejections, 12);
    let state = runtime.handle().query_state().await.expect("state");
    assert_eq!(state.mode, Mode::Exploring);
}
