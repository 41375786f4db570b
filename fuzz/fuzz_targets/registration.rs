#![no_main]

use ferrous_locator::{key_of, with_lifetime, with_name, Container, DiError, Lifetime, Resolver};
use libfuzzer_sys::fuzz_target;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug)]
struct Entry {
    id: u8,
}

// Each byte pair is one operation: register (anonymous or named, static or
// per-request), replace, or remove. A model of the expected contents is kept
// alongside and compared after every step.
fuzz_target!(|data: &[u8]| {
    let mut container = Container::new();
    let mut anonymous: Vec<u8> = Vec::new();
    let mut named: HashMap<String, u8> = HashMap::new();

    for chunk in data.chunks_exact(2) {
        let (op, id) = (chunk[0], chunk[1]);
        let lifetime = if op & 0x10 == 0 { Lifetime::PerRequest } else { Lifetime::Static };

        match op % 4 {
            0 => {
                container.register_dynamic(move |_| Ok(Arc::new(Entry { id })), &[with_lifetime(lifetime)]);
                anonymous.push(id);
            }
            1 => {
                let name = format!("n{}", op >> 5);
                container.register_instance(Arc::new(Entry { id }), &[with_name(name.clone())]);
                named.insert(name, id);
            }
            2 => {
                container.replace_instance(Arc::new(Entry { id }), &[]);
                anonymous = vec![id];
                named.clear();
            }
            _ => {
                container.remove_all::<Entry>();
                anonymous.clear();
                named.clear();
            }
        }

        let expected = anonymous.len() + named.len();
        assert_eq!(container.registration_count(&key_of::<Entry>()), expected);

        if expected == 0 {
            assert!(matches!(container.get::<Entry>(), Err(DiError::NotExist(_))));
            continue;
        }

        let all = container.get_all::<Entry>().unwrap();
        assert_eq!(all.len(), expected);

        let map = container.get_map::<Entry>().unwrap();
        let keys: HashSet<&String> = map.keys().collect();
        assert_eq!(keys, named.keys().collect::<HashSet<_>>());
        for (name, entry) in &map {
            assert_eq!(Some(&entry.id), named.get(name));
        }

        if let Some(last) = anonymous.last() {
            assert_eq!(container.get::<Entry>().unwrap().id, *last);
        }
    }
});
