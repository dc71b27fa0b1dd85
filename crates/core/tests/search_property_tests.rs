//! Property-based integration tests for the search pipeline building blocks.
//!
//! These tests check properties that must hold for any input sequence,
//! using the `proptest` crate for random test case generation.

use metafam_core::search::routes::see_all_path;
use metafam_core::search::{
    normalize_query, Guild, Player, QueryGate, ResultSnapshot, ResultStore, SearchCategory,
};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

/// One step applied to a result store.
#[derive(Debug, Clone)]
enum StoreOp {
    /// Hand out a new generation, as a dispatch does.
    Begin,
    /// Publish for a generation `back` steps behind the latest one.
    Publish { back: u64 },
    /// Clear the input.
    Reset,
}

fn arb_store_op() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        Just(StoreOp::Begin),
        (0u64..4).prop_map(|back| StoreOp::Publish { back }),
        Just(StoreOp::Reset),
    ]
}

fn arb_category() -> impl Strategy<Value = SearchCategory> {
    prop_oneof![
        Just(SearchCategory::Players),
        Just(SearchCategory::Guilds),
        Just(SearchCategory::Patrons),
        Just(SearchCategory::Quests),
    ]
}

fn arb_snapshot() -> impl Strategy<Value = ResultSnapshot> {
    (0usize..8, 0usize..8).prop_map(|(players, guilds)| ResultSnapshot {
        players: (0..players)
            .map(|i| Player {
                id: format!("p{}", i),
                ..Default::default()
            })
            .collect(),
        guilds: (0..guilds)
            .map(|i| Guild {
                id: format!("g{}", i),
                guildname: format!("guild-{}", i),
                name: format!("Guild {}", i),
                logo: None,
            })
            .collect(),
        ..Default::default()
    })
}

// =============================================================================
// Result store
// =============================================================================

proptest! {
    /// Only the latest generation is ever accepted and the displayed
    /// generation never goes backwards.
    #[test]
    fn prop_store_never_shows_stale_generation(ops in prop::collection::vec(arb_store_op(), 1..40)) {
        let store = ResultStore::new();
        let mut shown = store.current().generation;

        for op in ops {
            match op {
                StoreOp::Begin => {
                    store.begin_generation();
                }
                StoreOp::Publish { back } => {
                    let latest = store.latest_generation();
                    let generation = latest.saturating_sub(back);
                    let accepted =
                        store.publish(generation, store.epoch(), "q", ResultSnapshot::empty());
                    if accepted {
                        prop_assert_eq!(generation, latest);
                    }
                    if back > 0 && latest > 0 {
                        prop_assert!(!accepted);
                    }
                }
                StoreOp::Reset => {
                    store.reset();
                    prop_assert!(store.current().snapshot.is_empty());
                    prop_assert_eq!(store.current().query, None);
                }
            }

            let state = store.current();
            prop_assert!(state.generation >= shown);
            prop_assert!(state.generation <= store.latest_generation());
            shown = state.generation;
        }
    }
}

// =============================================================================
// Query gate and input filter
// =============================================================================

proptest! {
    /// A query is admitted exactly when it differs from the previous admitted one.
    #[test]
    fn prop_gate_admits_only_changes(queries in prop::collection::vec("[ab]{1,2}", 1..30)) {
        let mut gate = QueryGate::new();
        let mut previous: Option<String> = None;

        for query in queries {
            let expected = previous.as_deref() != Some(query.as_str());
            prop_assert_eq!(gate.admit(&query), expected);
            if expected {
                previous = Some(query);
            }
        }
    }

    /// Normalized queries are never blank and carry no outer whitespace.
    #[test]
    fn prop_normalize_query(raw in "[ \\ta-z]{0,12}") {
        match normalize_query(&raw) {
            None => prop_assert!(raw.trim().is_empty()),
            Some(query) => {
                prop_assert!(!query.is_empty());
                prop_assert_eq!(query, query.trim());
                prop_assert_eq!(query, raw.trim());
            }
        }
    }
}

// =============================================================================
// Bounds and "see all"
// =============================================================================

proptest! {
    /// Bounding keeps the leading results of every category and never more
    /// than the limit.
    #[test]
    fn prop_bounded_snapshot(snapshot in arb_snapshot(), limit in 1usize..6) {
        let bounded = snapshot.clone().bounded(limit);
        for category in SearchCategory::ALL {
            prop_assert!(bounded.count(category) <= limit);
            prop_assert_eq!(bounded.count(category), snapshot.count(category).min(limit));
        }
        prop_assert_eq!(&bounded.players[..], &snapshot.players[..bounded.players.len()]);
    }

    /// The "see all" link exists exactly when a category filled its limit.
    #[test]
    fn prop_see_all_threshold(category in arb_category(), count in 0usize..10, limit in 1usize..6) {
        let link = see_all_path(category, count, limit, "meta guild");
        prop_assert_eq!(link.is_some(), count >= limit);
        if let Some(href) = link {
            prop_assert_eq!(href, format!("/search/{}?q=meta%20guild", category.slug()));
        }
    }
}
