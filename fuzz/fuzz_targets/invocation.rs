#![no_main]

use ferrous_locator::{invoke, with_name, Container, DiError, Rest};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, values)) = data.split_first() else {
        return;
    };

    let mut container = Container::new();
    let mut named = 0usize;
    for (index, value) in values.iter().enumerate() {
        if value & 1 == 0 {
            container.register_instance(Arc::new(*value), &[]);
        } else {
            container.register_instance(Arc::new(*value), &[with_name(format!("v{index}"))]);
            named += 1;
        }
    }

    match selector % 4 {
        0 => match invoke(&container, |all: Vec<Arc<u8>>| Arc::new(all.len())) {
            Ok(len) => assert_eq!(*len, values.len()),
            Err(err) => assert!(values.is_empty() && matches!(err, DiError::NotExist(_))),
        },
        1 => match invoke(&container, |rest: Rest<u8>| Arc::new(rest.len())) {
            Ok(len) => assert_eq!(*len, values.len()),
            Err(err) => assert!(values.is_empty() && matches!(err, DiError::NotExist(_))),
        },
        2 => match invoke(&container, |map: HashMap<String, Arc<u8>>| Arc::new(map.len())) {
            Ok(len) => assert_eq!(*len, named),
            Err(err) => assert!(values.is_empty() && matches!(err, DiError::NotExist(_))),
        },
        _ => {
            let result = invoke(&container, |[a, b]: [Arc<u8>; 2]| Arc::new(*a as u16 + *b as u16));
            match values.len() {
                0 => assert!(matches!(result, Err(DiError::NotExist(_)))),
                2 => assert!(result.is_ok()),
                _ => assert!(matches!(result, Err(DiError::Validation(_)))),
            }
        }
    }
});
