//! Statistics registry behavior, mirrored from the statistics service
//! contract: add/getCurrent round trip, globalLoad as wholesale
//! replacement, and isolation from protocol state.

use std::collections::HashMap;

use ngsi_agent::{Error, IotAgent};

#[tokio::test]
async fn added_statistic_appears_in_get_current() {
    let agent = IotAgent::new();

    agent.stats.add("fakeStat", 2).await;
    assert_eq!(agent.stats.get_current("fakeStat").await.unwrap(), 2);
}

#[tokio::test]
async fn global_load_seeds_all_statistics() {
    let agent = IotAgent::new();

    agent
        .stats
        .global_load(HashMap::from([
            ("stat1".to_string(), 82),
            ("stat2".to_string(), 38789),
        ]))
        .await;

    let stats = agent.stats.get_all().await;
    assert_eq!(stats.get("stat1"), Some(&82));
    assert_eq!(stats.get("stat2"), Some(&38789));
}

#[tokio::test]
async fn global_load_with_empty_map_resets_everything() {
    let agent = IotAgent::new();

    agent.stats.add("fakeStat", 2).await;
    agent.stats.global_load(HashMap::new()).await;

    assert!(agent.stats.get_all().await.is_empty());
    assert!(matches!(
        agent.stats.get_current("fakeStat").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn statistics_work_without_an_active_session() {
    // Counters are a side channel: no activation gating applies.
    let agent = IotAgent::new();
    assert!(!agent.is_active().await);

    agent.stats.add("devices.registered", 1).await;
    assert_eq!(
        agent.stats.get_current("devices.registered").await.unwrap(),
        1
    );
}
