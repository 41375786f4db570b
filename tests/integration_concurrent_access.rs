/// Concurrent access integration tests
///
/// Resolution goes through `&Container`, so a finished container is shared in
/// an `Arc` and resolved from several threads at once.
use ferrous_locator::{invoke, with_lifetime, with_name, Container, Lifetime, Resolver};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[derive(Debug)]
struct Expensive {
    id: u32,
}

#[test]
fn test_static_factory_runs_once_under_contention() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_in_factory = calls.clone();

    let mut container = Container::new();
    container.register_dynamic(
        move |_| {
            let id = calls_in_factory.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(10));
            Ok(Arc::new(Expensive { id }))
        },
        &[with_lifetime(Lifetime::Static)],
    );
    let container = Arc::new(container);

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let container = container.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                container.get::<Expensive>().unwrap()
            })
        })
        .collect();

    let results: Vec<Arc<Expensive>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    for result in &results {
        assert!(Arc::ptr_eq(result, &results[0]));
        assert_eq!(result.id, 0);
    }
}

#[test]
fn test_per_request_factory_runs_per_thread() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_in_factory = calls.clone();

    let mut container = Container::new();
    container.register_dynamic(
        move |_| Ok(Arc::new(Expensive { id: calls_in_factory.fetch_add(1, Ordering::SeqCst) })),
        &[],
    );
    let container = Arc::new(container);

    let threads = 4;
    let per_thread = 25;
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || {
                for _ in 0..per_thread {
                    container.get::<Expensive>().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), threads * per_thread);
}

#[test]
fn test_concurrent_named_and_invoke() {
    let mut container = Container::new();
    for (index, name) in ["a", "b", "c"].iter().enumerate() {
        container.register_instance(
            Arc::new(Expensive { id: index as u32 }),
            &[with_name(*name), with_lifetime(Lifetime::Static)],
        );
    }
    let container = Arc::new(container);

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || {
                let b = container.get_named::<Expensive>("b").unwrap();
                let total = invoke(&*container, |all: Vec<Arc<Expensive>>| {
                    Arc::new(all.iter().map(|e| e.id).sum::<u32>())
                })
                .unwrap();
                (b.id, *total)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (1, 3));
    }
}

#[test]
fn test_container_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Container>();
}
