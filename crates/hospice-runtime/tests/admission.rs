//! Admission selector integration tests — durable reinforcement and
//! concurrent admissions against both store backends.

use hospice_runtime::prelude::*;
use std::sync::Arc;
use std::thread;

fn icu(n: usize) -> Arc<InMemoryBedProvider> {
    Arc::new(InMemoryBedProvider::new(
        (0..n)
            .map(|i| {
                Bed::new(format!("icu-{i}"), "ICU", Position::new(i as f64 * 70.0, 40.0))
                    .with_hospital("st-mary")
            })
            .collect(),
    ))
}

fn hammer(store: DynPheromoneStore) {
    let selector = Arc::new(
        AdmissionSelector::new(icu(1), store.clone(), AdmissionConfig::default()).unwrap(),
    );
    let hospital = HospitalId::from("st-mary");
    let bed = BedId::from("icu-0");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let selector = selector.clone();
            let (hospital, bed) = (hospital.clone(), bed.clone());
            thread::spawn(move || {
                for _ in 0..25 {
                    selector.reinforce(&hospital, &bed, true).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // Replay 200 serial successes; any lost update would diverge.
    let mut expected = reinforced_level(None, true, 0.1);
    for _ in 1..200 {
        expected = reinforced_level(Some(expected), true, 0.1);
    }
    let stored = selector.pheromone(&hospital, &bed).unwrap();
    assert!((stored - expected).abs() < 1e-9, "stored {stored}, expected {expected}");
    assert_eq!(store.scalar_count().unwrap(), 1);
}

#[test]
fn concurrent_reinforcement_in_memory_loses_no_updates() {
    hammer(create_store(&StoreConfig::in_memory()).unwrap());
}

#[test]
fn concurrent_reinforcement_sqlite_loses_no_updates() {
    let dir = tempfile::tempdir().unwrap();
    hammer(create_store(&StoreConfig::sqlite(dir.path().join("admission.db"))).unwrap());
}

fn hyphenated_ids_stay_distinct(store: DynPheromoneStore) {
    let provider = Arc::new(InMemoryBedProvider::new(vec![
        Bed::new("b1", "ICU", Position::new(0.0, 0.0)).with_hospital("ward-a"),
        Bed::new("a-b1", "ICU", Position::new(0.0, 0.0)).with_hospital("ward"),
    ]));
    let selector = AdmissionSelector::new(provider, store.clone(), AdmissionConfig::default()).unwrap();
    let (first_h, first_b) = (HospitalId::from("ward-a"), BedId::from("b1"));
    let (second_h, second_b) = (HospitalId::from("ward"), BedId::from("a-b1"));

    assert_eq!(selector.reinforce(&first_h, &first_b, true).unwrap(), 1.5);
    assert_eq!(selector.pheromone(&second_h, &second_b).unwrap(), 1.0);
    assert_eq!(selector.reinforce(&second_h, &second_b, false).unwrap(), 0.5);

    assert_eq!(selector.pheromone(&first_h, &first_b).unwrap(), 1.5);
    let ward = store.scalars_for(&second_h).unwrap();
    assert_eq!(ward.get(&second_b), Some(&0.5));
    assert_eq!(ward.len(), 1);
}

#[test]
fn hyphenated_ids_stay_distinct_in_memory() {
    hyphenated_ids_stay_distinct(create_store(&StoreConfig::in_memory()).unwrap());
}

#[test]
fn hyphenated_ids_stay_distinct_in_sqlite() {
    hyphenated_ids_stay_distinct(create_store(&StoreConfig::sqlite_in_memory()).unwrap());
}

#[test]
fn reinforcement_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admission.db");
    let hospital = HospitalId::from("st-mary");

    {
        let store = create_store(&StoreConfig::sqlite(&path)).unwrap();
        let selector = AdmissionSelector::new(icu(2), store, AdmissionConfig::default()).unwrap();
        selector.reinforce(&hospital, &"icu-0".into(), true).unwrap();
        selector.reinforce(&hospital, &"icu-1".into(), false).unwrap();
    }

    let store = SqlitePheromoneStore::open(&path).unwrap();
    let levels = store.scalars_for(&hospital).unwrap();
    assert_eq!(levels.get(&BedId::from("icu-0")), Some(&1.5));
    assert_eq!(levels.get(&BedId::from("icu-1")), Some(&0.5));
}

#[test]
fn rewarded_bed_is_preferred() {
    let store: DynPheromoneStore = Arc::new(InMemoryPheromoneStore::new());
    let hospital = HospitalId::from("st-mary");
    let selector = AdmissionSelector::new(
        icu(2),
        store,
        AdmissionConfig::default().with_seed(99),
    )
    .unwrap();

    for _ in 0..5 {
        selector.reinforce(&hospital, &"icu-0".into(), true).unwrap();
        selector.reinforce(&hospital, &"icu-1".into(), false).unwrap();
    }

    let picks = (0..2_000)
        .filter(|_| selector.select_bed(&hospital, "ICU", 3).unwrap() == Some("icu-0".into()))
        .count();
    assert!(picks > 1_800, "rewarded bed picked only {picks} times");
}

#[test]
fn ward_fills_then_reports_no_bed() {
    let provider = icu(3);
    let selector = AdmissionSelector::new(
        provider.clone(),
        Arc::new(InMemoryPheromoneStore::new()),
        AdmissionConfig::default().with_seed(5),
    )
    .unwrap();
    let hospital = HospitalId::from("st-mary");

    for _ in 0..3 {
        assert!(matches!(
            selector.admit(&hospital, "ICU", 5).unwrap(),
            AdmissionOutcome::Admitted { .. }
        ));
    }
    assert_eq!(selector.admit(&hospital, "ICU", 5).unwrap(), AdmissionOutcome::NoAvailableBed);
    assert!(provider
        .snapshot()
        .unwrap()
        .iter()
        .all(|b| b.status == BedStatus::Occupied));
}
