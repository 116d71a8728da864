use api_metadata_cli::{
    CommandMetadata, Example, ExampleRenderer, MetadataStore, ResolveError, VersionResolver,
    VersionToken, VersionedExamples,
};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

fn v(s: &str) -> VersionToken {
    s.parse().unwrap()
}

fn embedded() -> MetadataStore {
    MetadataStore::embedded().unwrap()
}

#[test]
fn test_every_command_resolves_with_parameters() {
    let store = embedded();
    let resolver = VersionResolver::new(&store);
    for id in store.ids() {
        let meta = store.lookup(id).unwrap();
        let resolved = resolver.resolve(id, None).unwrap();
        assert_eq!(resolved.command_id, id);
        assert_eq!(resolved.parameters, &meta.parameters);
    }
}

#[test]
fn test_create_group_cluster_falls_back_between_releases() {
    let store = embedded();
    let resolver = VersionResolver::new(&store);

    let resolved = resolver
        .resolve("createGroupCluster", Some(&v("2024-09-01")))
        .unwrap();
    assert!(!resolved.exact);
    assert_eq!(resolved.resolved_version, Some(v("2024-08-05")));
    assert_eq!(resolved.examples.len(), 1);
    assert_eq!(resolved.examples[0].source, "cluster_settings");
}

#[test]
fn test_create_group_cluster_exact_release() {
    let store = embedded();
    let resolver = VersionResolver::new(&store);

    let resolved = resolver
        .resolve("createGroupCluster", Some(&v("2024-10-23")))
        .unwrap();
    assert!(resolved.exact);
    let sources: Vec<&str> = resolved.examples.iter().map(|e| e.source.as_str()).collect();
    assert_eq!(sources, ["Cluster", "create_cluster"]);

    let sharded = resolved.examples[0].value.as_deref().unwrap();
    assert!(sharded.contains("SHARDED"));
    assert_eq!(
        resolved.examples[1].name.as_deref(),
        Some("Create a basic replica set")
    );
}

#[test]
fn test_latest_is_the_newest_dated_release() {
    let store = embedded();
    let resolver = VersionResolver::new(&store);

    let resolved = resolver.resolve("createGroupFlexCluster", None).unwrap();
    assert_eq!(resolved.resolved_version, Some(v("2024-11-13")));
    assert!(!resolved.exact);
}

#[test]
fn test_delete_federation_setting_renders_literal_flag() {
    let store = embedded();
    let resolved = VersionResolver::new(&store)
        .resolve("deleteFederationSetting", Some(&v("2023-01-01")))
        .unwrap();
    assert!(resolved.exact);

    let renderer = ExampleRenderer::new("atlas api deleteFederationSetting")
        .with_version(resolved.resolved_version);
    let text = renderer.render(&resolved.examples[0]);
    assert_eq!(
        text,
        "atlas api deleteFederationSetting --version 2023-01-01 --federationSettingsId 55fa922fb343282757d9554e\n"
    );
}

#[test]
fn test_private_preview_only_command_is_gated() {
    let store = embedded();
    let resolver = VersionResolver::new(&store);
    let id = "getGroupCollStatLatencyNamespaceMetrics";

    let err = resolver.resolve(id, Some(&v("2023-01-01"))).unwrap_err();
    assert!(matches!(err, ResolveError::GatedCommand { .. }));
    assert!(err.to_string().contains("private-preview"));

    let resolved = resolver.resolve(id, Some(&v("private preview"))).unwrap();
    assert!(resolved.exact);
    assert_eq!(resolved.examples.len(), 1);
}

#[test]
fn test_preview_does_not_borrow_dated_examples() {
    let store = embedded();
    let resolver = VersionResolver::new(&store);

    let resolved = resolver
        .resolve("createGroupCluster", Some(&VersionToken::Preview))
        .unwrap();
    assert!(resolved.examples.is_empty());
    assert_eq!(resolved.resolved_version, None);

    let resolved = resolver
        .resolve("createGroupFlexCluster", Some(&VersionToken::PrivatePreview))
        .unwrap();
    assert!(resolved.examples.is_empty());
}

#[test]
fn test_command_without_examples() {
    let store = embedded();
    let resolved = VersionResolver::new(&store)
        .resolve("listGroupPrivateNetworkEndpoints", Some(&v("2024-08-05")))
        .unwrap();
    assert!(resolved.examples.is_empty());
    assert!(!resolved.exact);
    assert!(!resolved.parameters.is_empty());
}

#[test]
fn test_rendering_is_idempotent_for_every_example() {
    let store = embedded();
    for (id, meta) in store.iter() {
        for (version, examples) in meta.examples.iter() {
            let renderer =
                ExampleRenderer::new(format!("atlas api {id}")).with_version(Some(version));
            for example in examples {
                assert_eq!(renderer.render(example), renderer.render(example));
            }
        }
    }
}

#[test]
fn test_concurrent_resolution_shares_one_store() {
    let store = Arc::new(embedded());
    let expected = VersionResolver::new(&store)
        .resolve("listGroupClusters", Some(&v("2024-01-01")))
        .unwrap()
        .resolved_version;

    thread::scope(|scope| {
        for _ in 0..8 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                let resolver = VersionResolver::new(&store);
                for _ in 0..100 {
                    let resolved = resolver
                        .resolve("listGroupClusters", Some(&v("2024-01-01")))
                        .unwrap();
                    assert_eq!(resolved.resolved_version, expected);
                }
            });
        }
    });
    assert_eq!(expected, Some(v("2023-01-01")));
}

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(u64::from(offset))
}

fn store_with_days(days: &std::collections::BTreeSet<u32>) -> MetadataStore {
    let examples = days.iter().fold(VersionedExamples::new(), |acc, d| {
        acc.with(
            VersionToken::Dated(day(*d)),
            vec![Example {
                source: d.to_string(),
                name: None,
                description: None,
                value: None,
                flags: BTreeMap::new(),
            }],
        )
    });
    MetadataStore::from_commands([(
        "thing".to_string(),
        CommandMetadata {
            examples,
            ..Default::default()
        },
    )])
}

proptest! {
    #[test]
    fn fallback_picks_greatest_version_not_after_request(
        days in prop::collection::btree_set(0u32..2000, 0..8),
        requested in 0u32..2000,
    ) {
        let store = store_with_days(&days);
        let resolved = VersionResolver::new(&store)
            .resolve("thing", Some(&VersionToken::Dated(day(requested))))
            .unwrap();

        let expected = days.range(..=requested).next_back().copied();
        prop_assert_eq!(resolved.resolved_version.and_then(|v| v.date()), expected.map(day));
        prop_assert_eq!(resolved.exact, days.contains(&requested));
        match expected {
            Some(d) => {
                prop_assert_eq!(resolved.examples.len(), 1);
                prop_assert_eq!(&resolved.examples[0].source, &d.to_string());
            }
            None => prop_assert!(resolved.examples.is_empty()),
        }
    }
}
