#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use probemap::{CapacityPolicy, OpenAddressedMap};

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Insert { key: i8, value: i64 },
    InsertWide { key: i64, value: i64 },
    Remove { key: i8 },
    Search { key: i8 },
    Resize,
    Clear,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    capacity: u8,
    load_factor_pct: u8,
    exact: bool,
    ops: Vec<FuzzOp>,
}

fuzz_target!(|input: FuzzInput| {
    let policy = if input.exact {
        CapacityPolicy::Exact
    } else {
        CapacityPolicy::Prime
    };
    let load_factor = f64::from(input.load_factor_pct) / 256.0;

    // Некорректная конфигурация должна отклоняться, а не паниковать.
    let Ok(mut map) = OpenAddressedMap::with_policy(input.capacity as usize, load_factor, policy)
    else {
        assert!(input.capacity == 0 || input.load_factor_pct == 0);
        return;
    };
    let mut model: HashMap<i64, i64> = HashMap::new();

    for op in input.ops.into_iter().take(512) {
        match op {
            FuzzOp::Insert { key, value } => insert(&mut map, &mut model, key.into(), value),
            FuzzOp::InsertWide { key, value } => {
                // При удвоении ключи, кратные большой степени двойки, делят
                // домашнюю ячейку вплоть до огромных ёмкостей.
                let key = if input.exact {
                    i64::from(key as i16)
                } else {
                    key
                };
                insert(&mut map, &mut model, key, value);
            }
            FuzzOp::Remove { key } => {
                let key = i64::from(key);
                assert_eq!(map.remove(key).ok(), model.remove(&key));
            }
            FuzzOp::Search { key } => {
                let key = i64::from(key);
                assert_eq!(map.get(key), model.get(&key).copied());
            }
            FuzzOp::Resize => {
                let before = map.capacity();
                if map.resize().is_ok() {
                    assert!(map.capacity() > before);
                    assert_eq!(map.tombstones(), 0);
                }
            }
            FuzzOp::Clear => {
                map.clear();
                model.clear();
            }
        }

        assert_eq!(map.len(), model.len());
        assert!(map.validate_invariants().is_ok());
    }
});

fn insert(
    map: &mut OpenAddressedMap,
    model: &mut HashMap<i64, i64>,
    key: i64,
    value: i64,
) {
    let before = map.capacity();

    match map.insert(key, value) {
        Ok(created) => {
            assert_eq!(created, model.insert(key, value).is_none());
            assert!(map.capacity() >= before);
            assert!(map.current_load() <= map.load_factor());
        }
        Err(e) => panic!("insert({key}, {value}) failed: {e}"),
    }
}
