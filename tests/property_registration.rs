/// Property-based tests for registration and resolution
///
/// These tests use proptest to generate registration sequences and verify the
/// ordering and naming invariants of the container.
use ferrous_locator::{key_of, with_lifetime, with_name, Container, Lifetime, Resolver};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug)]
struct Item {
    id: u32,
}

proptest! {
    #[test]
    fn last_anonymous_registration_wins(ids in prop::collection::vec(0u32..1000, 1..10)) {
        let mut container = Container::new();
        for id in &ids {
            container.register_instance(Arc::new(Item { id: *id }), &[]);
        }

        let resolved = container.get::<Item>().unwrap();
        prop_assert_eq!(resolved.id, *ids.last().unwrap());
    }
}

proptest! {
    #[test]
    fn resolve_all_preserves_registration_order(ids in prop::collection::vec(0u32..1000, 1..20)) {
        let mut container = Container::new();
        for id in &ids {
            container.register_instance(Arc::new(Item { id: *id }), &[]);
        }

        let all: Vec<u32> = container.get_all::<Item>().unwrap().iter().map(|i| i.id).collect();
        prop_assert_eq!(all, ids);
    }
}

proptest! {
    #[test]
    fn named_registrations_are_unique_by_name(
        entries in prop::collection::vec(("[a-d]", 0u32..100), 1..20)
    ) {
        let mut container = Container::new();
        for (name, id) in &entries {
            container.register_instance(Arc::new(Item { id: *id }), &[with_name(name.clone())]);
        }

        let distinct: HashSet<&String> = entries.iter().map(|(name, _)| name).collect();
        let map = container.get_map::<Item>().unwrap();
        prop_assert_eq!(map.len(), distinct.len());
        prop_assert_eq!(container.registration_count(&key_of::<Item>()), distinct.len());

        // Each name resolves to the last value registered under it
        for (name, item) in &map {
            let last = entries.iter().rev().find(|(n, _)| n == name).map(|(_, id)| *id);
            prop_assert_eq!(Some(item.id), last);
        }
    }
}

proptest! {
    #[test]
    fn mixed_registrations_partition_into_map_and_all(
        entries in prop::collection::vec(prop::option::of("[a-c]"), 1..20)
    ) {
        let mut container = Container::new();
        for (index, name) in entries.iter().enumerate() {
            let options = match name {
                Some(name) => vec![with_name(name.clone())],
                None => vec![],
            };
            container.register_instance(Arc::new(Item { id: index as u32 }), &options);
        }

        let anonymous = entries.iter().filter(|n| n.is_none()).count();
        let named: HashSet<&String> = entries.iter().flatten().collect();
        let all = container.get_all::<Item>().unwrap();
        prop_assert_eq!(all.len(), anonymous + named.len());
        prop_assert_eq!(container.get_map::<Item>().unwrap().len(), named.len());

        // Anonymous entries come last, in registration order
        let anonymous_ids: Vec<u32> = entries
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_none())
            .map(|(i, _)| i as u32)
            .collect();
        let tail: Vec<u32> = all[named.len()..].iter().map(|i| i.id).collect();
        prop_assert_eq!(tail, anonymous_ids);
    }
}

proptest! {
    #[test]
    fn static_factory_is_deterministic(seed in 0u32..1000) {
        let mut container = Container::new();
        container.register_dynamic(
            move |_| Ok(Arc::new(Item { id: seed })),
            &[with_lifetime(Lifetime::Static)],
        );

        let first = container.get::<Item>().unwrap();
        let second = container.get::<Item>().unwrap();
        prop_assert!(Arc::ptr_eq(&first, &second));
        prop_assert_eq!(first.id, seed);
    }
}

proptest! {
    #[test]
    fn remove_all_always_empties(count in 1usize..10) {
        let mut container = Container::new();
        for id in 0..count {
            container.register_instance(Arc::new(Item { id: id as u32 }), &[]);
        }

        prop_assert!(container.remove_all::<Item>());
        prop_assert!(container.get::<Item>().is_err());
        prop_assert_eq!(container.registration_count(&key_of::<Item>()), 0);
    }
}
