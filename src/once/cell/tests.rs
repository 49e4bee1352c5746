#![cfg(test)]

use std::collections::HashSet;
use std::sync::{Barrier, Mutex};
use std::thread;

use super::*;
use crate::util::count::{DropCounter, InitCounter, ZeroSizedType};

#[test]
fn test_empty_cell() {
    let mut cell: OnceCell<u8> = OnceCell::new();
    assert_eq!(cell.get(), None, "A fresh cell should be empty.");
    assert_eq!(cell.get_mut(), None);
    assert_eq!(cell.take(), None);
    assert_eq!(OnceCell::<u8>::new().into_inner(), None);
}

#[test]
fn test_all_threads_observe_one_identity() {
    const THREADS: usize = 100;

    let cell: OnceCell<u64> = OnceCell::new();
    let constructions = InitCounter::new();
    let barrier = Barrier::new(THREADS);
    let identities = Mutex::new(HashSet::new());

    thread::scope(|scope| {
        for i in 0..THREADS {
            let (cell, barrier) = (&cell, &barrier);
            let (constructions, identities) = (&constructions, &identities);
            scope.spawn(move || {
                barrier.wait();
                let value = cell.get_or_init(|| {
                    constructions.record();
                    i as u64
                });
                identities
                    .lock()
                    .expect("no recording thread panics")
                    .insert(std::ptr::from_ref(value) as usize);
            });
        }
    });

    assert_eq!(
        identities
            .into_inner()
            .expect("all recording threads have joined")
            .len(),
        1,
        "All 100 threads should record the identical instance identity."
    );
    assert_eq!(
        constructions.count(),
        1,
        "100 racing callers should construct exactly once."
    );
}

#[test]
fn test_stress_many_callers_construct_once() {
    const THREADS: usize = 100;
    const CALLS: usize = 100;

    let cell: OnceCell<usize> = OnceCell::new();
    let constructions = InitCounter::new();
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                for _ in 0..CALLS {
                    let value = *cell.get_or_init(|| {
                        constructions.record();
                        42
                    });
                    assert_eq!(value, 42, "No caller should see a missing or partial value.");
                }
            });
        }
    });

    assert_eq!(
        constructions.count(),
        1,
        "10,000 calls across 100 threads should construct exactly once."
    );
}

#[test]
fn test_failed_construction_is_retryable() {
    let cell: OnceCell<u8> = OnceCell::new();

    let result = cell.get_or_try_init(|| "not a number".parse::<u8>());
    assert!(result.is_err(), "The constructing caller should see the error.");
    assert_eq!(cell.get(), None, "A failed construction should leave the cell empty.");

    let result = cell.get_or_try_init(|| "7".parse::<u8>());
    assert_eq!(result, Ok(&7), "A later call should retry and succeed.");
    assert_eq!(cell.get(), Some(&7));
}

#[test]
fn test_set_first_wins() {
    let cell = OnceCell::new();
    assert!(cell.set("first").is_ok(), "Setting an empty cell should succeed.");

    let error = match cell.set("second") {
        Err(error) => error,
        Ok(()) => panic!("setting a full cell should fail"),
    };
    assert_eq!(
        error.rejected, "second",
        "The rejected value should be handed back to the caller."
    );
    assert_eq!(error.to_string(), "Cell has already been initialized!");
    assert_eq!(cell.get(), Some(&"first"));
}

#[test]
fn test_take_resets_the_cell() {
    let mut cell = OnceCell::new();
    cell.set(1).ok();

    assert_eq!(cell.take(), Some(1), "take should return the stored value.");
    assert_eq!(cell.get(), None, "take should leave the cell empty.");

    assert_eq!(
        *cell.get_or_init(|| 2),
        2,
        "A taken cell should support a fresh construction."
    );
}

#[test]
fn test_drop_semantics() {
    let drops = DropCounter::new();
    let cell = OnceCell::new();
    cell.set(drops.token()).ok();
    drop(cell);
    assert_eq!(drops.count(), 1, "Dropping a full cell should drop its value.");

    let drops = DropCounter::new();
    let mut cell = OnceCell::new();
    cell.get_or_init(|| drops.token());
    drop(cell.take());
    drop(cell);
    assert_eq!(
        drops.count(),
        1,
        "A taken value should be dropped by its new owner, and only there."
    );

    let drops = DropCounter::new();
    let cell = OnceCell::from(drops.token());
    drop(cell.set(drops.token()));
    assert_eq!(
        drops.count(),
        1,
        "Rejecting a duplicate should drop only the duplicate."
    );
    drop(cell);
    assert_eq!(drops.count(), 2, "The stored original should drop with the cell.");
}

#[test]
fn test_zst_support() {
    let cell: OnceCell<ZeroSizedType> = OnceCell::new();
    assert_eq!(
        cell.get_or_init(|| ZeroSizedType),
        &ZeroSizedType,
        "Zero-sized instances should be constructible."
    );
    assert_eq!(cell.get(), Some(&ZeroSizedType));
}

#[test]
fn test_equality_and_clone() {
    let full: OnceCell<u8> = OnceCell::from(9);
    let empty: OnceCell<u8> = OnceCell::new();

    assert_ne!(full, empty);
    assert_eq!(
        full,
        full.clone(),
        "A clone of a full cell should contain an equal value."
    );
    assert_eq!(
        empty,
        empty.clone(),
        "A clone of an empty cell should be empty."
    );
    assert_eq!(full.clone().get(), Some(&9));
}

#[test]
fn test_debug_representation() {
    let cell: OnceCell<u8> = OnceCell::new();
    assert_eq!(format!("{cell:?}"), "OnceCell(Uninitialized)");
    cell.set(3).ok();
    assert_eq!(format!("{cell:?}"), "OnceCell(3)");
}
