use ferrous_locator::{
    key_of, with_name, Container, DiError, Instance, Resolver, ResolverCore, TypeKey,
};
use std::sync::Arc;

#[derive(Debug)]
struct Config {
    port: u16,
}

#[derive(Debug)]
struct Server {
    config: Arc<Config>,
    name: String,
}

#[test]
fn test_resolve_returns_registered_instance() {
    let config = Arc::new(Config { port: 8080 });
    let mut container = Container::new();
    container.register_instance(config.clone(), &[]);

    let resolved = container.get::<Config>().unwrap();
    assert!(Arc::ptr_eq(&resolved, &config));
    assert_eq!(resolved.port, 8080);
}

#[test]
fn test_last_anonymous_registration_wins() {
    let mut container = Container::new();
    container.register_instance(Arc::new(Config { port: 1 }), &[]);
    container.register_instance(Arc::new(Config { port: 2 }), &[]);

    assert_eq!(container.get::<Config>().unwrap().port, 2);

    let all = container.get_all::<Config>().unwrap();
    let ports: Vec<u16> = all.iter().map(|c| c.port).collect();
    assert_eq!(ports, vec![1, 2]);
}

#[test]
fn test_factory_resolves_dependencies() {
    let mut container = Container::new();
    container.register_instance(Arc::new(Config { port: 9000 }), &[]);
    container.register_dynamic(
        |resolver| {
            Ok(Arc::new(Server {
                config: resolver.get::<Config>()?,
                name: "api".to_string(),
            }))
        },
        &[],
    );

    let server = container.get::<Server>().unwrap();
    assert_eq!(server.config.port, 9000);
    assert_eq!(server.name, "api");
}

#[test]
fn test_factory_propagates_missing_dependency() {
    let mut container = Container::new();
    container.register_dynamic(
        |resolver| {
            Ok(Arc::new(Server {
                config: resolver.get::<Config>()?,
                name: "api".to_string(),
            }))
        },
        &[],
    );

    match container.get::<Server>() {
        Err(DiError::NotExist(name)) => assert!(name.ends_with("Config")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_unregistered_type_fails_everywhere() {
    let container = Container::new();
    let key = key_of::<Config>();

    assert!(matches!(container.resolve(&key), Err(DiError::NotExist(_))));
    assert!(matches!(container.resolve_all(&key), Err(DiError::NotExist(_))));
    assert!(matches!(container.resolve_map(&key), Err(DiError::NotExist(_))));
    assert!(matches!(
        container.resolve_by_name(&key, "a"),
        Err(DiError::NotExist(_))
    ));
}

#[test]
fn test_remove_all_clears_the_type() {
    let mut container = Container::new();
    container.register_instance(Arc::new(Config { port: 1 }), &[]);
    container.register_instance(Arc::new(Config { port: 2 }), &[with_name("named")]);

    assert!(container.remove_all::<Config>());
    assert!(!container.contains::<Config>());
    assert!(matches!(container.get::<Config>(), Err(DiError::NotExist(_))));
    assert!(matches!(container.get_all::<Config>(), Err(DiError::NotExist(_))));
    assert!(matches!(
        container.get_named::<Config>("named"),
        Err(DiError::NotExist(_))
    ));

    // Removing again is a no-op
    assert!(!container.remove_all::<Config>());
}

#[test]
fn test_replace_instance_leaves_single_registration() {
    let mut container = Container::new();
    container.register_instance(Arc::new(Config { port: 1 }), &[]);
    container.register_instance(Arc::new(Config { port: 2 }), &[]);
    container.register_instance(Arc::new(Config { port: 3 }), &[with_name("third")]);

    let replacement = Arc::new(Config { port: 4 });
    container.replace_instance(replacement.clone(), &[]);

    assert_eq!(container.registration_count(&key_of::<Config>()), 1);
    let all = container.get_all::<Config>().unwrap();
    assert_eq!(all.len(), 1);
    assert!(Arc::ptr_eq(&all[0], &replacement));
}

#[test]
fn test_replace_dynamic_swaps_factory() {
    let mut container = Container::new();
    container.register_instance(Arc::new(Config { port: 1 }), &[]);
    container.replace_dynamic(|_| Ok(Arc::new(Config { port: 2 })), &[]);

    assert_eq!(container.get::<Config>().unwrap().port, 2);
    assert_eq!(container.registration_count(&key_of::<Config>()), 1);
}

#[test]
fn test_trait_objects_are_keyed_by_trait() {
    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;
    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    let mut container = Container::new();
    container.register_instance::<dyn Greeter>(Arc::new(English), &[]);

    assert_eq!(container.get::<dyn Greeter>().unwrap().greet(), "hello");
    // The concrete type was never registered
    assert!(container.get::<English>().is_err());
}

#[test]
fn test_unsized_str_registration() {
    let mut container = Container::new();
    container.register_instance::<str>(Arc::from("text"), &[]);

    assert_eq!(&*container.get::<str>().unwrap(), "text");
}

#[test]
fn test_registration_by_key() {
    let key = TypeKey::of::<Config>();
    let mut container = Container::new();
    container.register_instance_by_key(key, Instance::new(Arc::new(Config { port: 7 })), &[]);
    container.register_dynamic_by_key(
        key,
        Arc::new(|_: &dyn ResolverCore| Ok(Instance::new(Arc::new(Config { port: 8 })))),
        &[with_name("eight")],
    );

    assert!(container.contains_key(&key));
    assert_eq!(container.registration_count(&key), 2);
    assert_eq!(container.get::<Config>().unwrap().port, 7);
    assert_eq!(container.get_named::<Config>("eight").unwrap().port, 8);

    container.replace_instance_by_key(key, Instance::new(Arc::new(Config { port: 9 })), &[]);
    assert_eq!(container.registration_count(&key), 1);
    assert_eq!(container.get::<Config>().unwrap().port, 9);

    assert!(container.remove_all_by_key(&key));
    assert!(container.is_empty());
}

#[test]
fn test_instance_under_wrong_key_reports_mismatch() {
    let mut container = Container::new();
    container.register_instance_by_key(key_of::<Config>(), Instance::new(Arc::new(5u8)), &[]);

    match container.get::<Config>() {
        Err(DiError::TypeMismatch { expected, found }) => {
            assert!(expected.ends_with("Config"));
            assert_eq!(found, "u8");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_try_get_distinguishes_missing() {
    let mut container = Container::new();
    assert!(container.try_get::<Config>().unwrap().is_none());

    container.register_instance(Arc::new(Config { port: 1 }), &[]);
    assert_eq!(container.try_get::<Config>().unwrap().unwrap().port, 1);
}

#[test]
#[should_panic(expected = "failed to resolve")]
fn test_get_required_panics_when_missing() {
    let container = Container::new();
    let _ = container.get_required::<Config>();
}

#[test]
fn test_registration_chaining() {
    let mut container = Container::new();
    container
        .register_instance(Arc::new(1u8), &[])
        .register_instance(Arc::new(2u16), &[])
        .register_instance(Arc::new(3u32), &[]);

    assert_eq!(container.len(), 3);
    assert_eq!(*container.get::<u16>().unwrap(), 2);
}
