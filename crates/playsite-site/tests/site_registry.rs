//! Integration tests for the site registry through its public API.

use std::collections::HashSet;
use std::sync::Arc;

use playsite_protocol::{
    EquipmentKind, EquipmentRequest, KidRequest, KidStatus, PlaySiteRequest, TicketNumber,
};
use playsite_site::{
    Calculator, CoinFlip, EnqueuePolicy, EnqueuePolicyConfig, ErrorKind, PlaySite,
    SiteConfig, SiteError, SiteRegistry,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =========================================================================
// Helpers
// =========================================================================

struct NeverAccept;

impl EnqueuePolicy for NeverAccept {
    fn should_accept(&self, _site: &PlaySite) -> bool {
        false
    }
}

/// Registry whose enqueue policy accepts everything.
fn registry() -> SiteRegistry {
    SiteRegistry::new(SiteConfig {
        enqueue_policy: EnqueuePolicyConfig::AlwaysAccept,
        ..SiteConfig::default()
    })
}

fn request(equipments: &[(EquipmentKind, u32)]) -> PlaySiteRequest {
    PlaySiteRequest {
        name: "play-site-0001".into(),
        age_restriction: 10,
        equipments: equipments
            .iter()
            .map(|&(kind, capacity)| EquipmentRequest {
                id: playsite_catalog::id_of(kind),
                capacity,
            })
            .collect(),
    }
}

fn kid(name: &str) -> KidRequest {
    KidRequest::new(name, 5)
}

// =========================================================================
// create / get / list
// =========================================================================

#[test]
fn test_create_and_get_site() {
    let reg = registry();
    let id = reg.create(&request(&[(EquipmentKind::DoubleSwings, 1)])).unwrap();

    let site = reg.get(id).unwrap();

    assert_eq!(site.id, id);
    assert_eq!(site.name, "play-site-0001");
    assert_eq!(site.age_restriction, 10);
    assert_eq!(site.capacity, 1);
    assert_eq!(site.equipments[0].kind, EquipmentKind::DoubleSwings);
}

#[test]
fn test_create_unknown_equipment_creates_nothing() {
    let reg = registry();
    let mut req = request(&[(EquipmentKind::Slide, 2)]);
    req.equipments.push(EquipmentRequest {
        id: playsite_protocol::EquipmentId(uuid::Uuid::nil()),
        capacity: 1,
    });

    let err = reg.create(&req).unwrap_err();

    assert!(matches!(err, SiteError::Catalog(_)));
    assert!(err.is_not_found());
    assert_eq!(reg.site_count(), 0);
}

#[test]
fn test_get_unknown_site_not_found() {
    let reg = registry();
    let id = playsite_protocol::SiteId::random();
    assert_eq!(reg.get(id), Err(SiteError::NotFound(id)));
    assert!(reg.admit(id, kid("K")).unwrap_err().is_not_found());
    assert!(reg.remove(id, TicketNumber::random()).unwrap_err().is_not_found());
    assert!(reg.utilization(id).unwrap_err().is_not_found());
}

#[test]
fn test_list_returns_every_site() {
    let reg = registry();
    let a = reg.create(&request(&[(EquipmentKind::Slide, 1)])).unwrap();
    let b = reg.create(&request(&[(EquipmentKind::Carousel, 2)])).unwrap();

    let ids: HashSet<_> = reg.list().into_iter().map(|s| s.id).collect();

    assert_eq!(ids, HashSet::from([a, b]));
}

#[test]
fn test_find_equipment_delegates_to_catalog() {
    let reg = registry();
    let id = playsite_catalog::id_of(EquipmentKind::BallPit);
    assert_eq!(reg.find_equipment(id).unwrap().display_name, "Ball Pit");
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_single_slot_admit_queue_promote_scenario() {
    let reg = registry();
    let site = reg.create(&request(&[(EquipmentKind::DoubleSwings, 1)])).unwrap();

    let k1 = reg.admit(site, kid("K1")).unwrap();
    let snapshot = reg.get(site).unwrap();
    assert_eq!(snapshot.occupied_capacity, 1);
    assert!(snapshot.is_play_site_full);

    let err = reg.admit(site, kid("K2")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PlaySiteFull);

    let k2 = reg.enqueue(site, kid("K2")).unwrap();
    assert_eq!(k2.status, KidStatus::Waiting);

    assert!(reg.remove(site, k1.ticket_number).unwrap());

    let promoted = reg.find_onsite(site, k2.ticket_number).unwrap();
    assert_eq!(promoted.status, KidStatus::Playing);
    assert!(reg.get(site).unwrap().kid_queue.is_empty());
}

#[test]
fn test_zero_equipment_site_refuses_admission() {
    let reg = registry();
    let site = reg.create(&request(&[])).unwrap();
    let err = reg.admit(site, kid("K1")).unwrap_err();
    assert_eq!(err, SiteError::NoEquipmentFound(site));
}

#[test]
fn test_fifo_promotion_of_three() {
    let reg = registry();
    let site = reg.create(&request(&[(EquipmentKind::Slide, 1)])).unwrap();
    reg.admit(site, kid("K0")).unwrap();
    let queued: Vec<_> = ["A", "B", "C"]
        .into_iter()
        .map(|n| reg.enqueue(site, kid(n)).unwrap())
        .collect();

    for expected in &queued {
        let onsite = reg.get(site).unwrap().kids_on_site[0].ticket_number;
        assert!(reg.remove(site, onsite).unwrap());
        let now = reg.get(site).unwrap();
        assert_eq!(now.kids_on_site.len(), 1);
        assert_eq!(now.kids_on_site[0].id, expected.id);
    }
}

#[test]
fn test_double_removal_true_then_false() {
    let reg = registry();
    let site = reg.create(&request(&[(EquipmentKind::Slide, 2)])).unwrap();
    let k = reg.admit(site, kid("K")).unwrap();
    assert!(reg.remove(site, k.ticket_number).unwrap());
    assert!(!reg.remove(site, k.ticket_number).unwrap());
}

#[test]
fn test_dequeue_and_queue_lookups() {
    let reg = registry();
    let site = reg.create(&request(&[(EquipmentKind::Slide, 1)])).unwrap();
    reg.admit(site, kid("K0")).unwrap();
    let q = reg.enqueue(site, kid("Q")).unwrap();

    assert_eq!(reg.find_queued(site, q.ticket_number).unwrap().id, q.id);
    assert!(reg.find_onsite(site, q.ticket_number).unwrap_err().is_not_found());

    assert!(reg.dequeue(site, q.ticket_number).unwrap());
    assert!(!reg.dequeue(site, q.ticket_number).unwrap());
    assert!(reg.find_queued(site, q.ticket_number).unwrap_err().is_not_found());
    assert_eq!(reg.all_kids(site).unwrap().len(), 1);
}

// =========================================================================
// Utilization
// =========================================================================

#[test]
fn test_utilization_step_function_for_double_swings() {
    let reg = registry();
    let site = reg.create(&request(&[(EquipmentKind::DoubleSwings, 2)])).unwrap();
    reg.admit(site, kid("A")).unwrap();
    assert_eq!(reg.utilization(site).unwrap(), 0.0);
    reg.admit(site, kid("B")).unwrap();
    assert_eq!(reg.utilization(site).unwrap(), 100.0);
}

#[test]
fn test_utilization_default_one_of_three() {
    let reg = registry();
    let site = reg.create(&request(&[(EquipmentKind::BallPit, 3)])).unwrap();
    reg.admit(site, kid("A")).unwrap();
    let u = reg.utilization(site).unwrap();
    assert!((u - 33.333_333).abs() < 1e-3, "got {u}");
}

#[test]
fn test_utilization_mixed_equipment_prefers_specialized() {
    let reg = registry();
    let site = reg
        .create(&request(&[(EquipmentKind::Slide, 2), (EquipmentKind::DoubleSwings, 2)]))
        .unwrap();
    let snapshot = reg.get(site).unwrap();
    assert_eq!(Calculator::select(&snapshot.equipments), Calculator::DoubleSwings);
}

#[test]
fn test_utilization_zero_capacity_undefined() {
    let reg = registry();
    let site = reg.create(&request(&[])).unwrap();
    assert_eq!(reg.utilization(site), Err(SiteError::DivisionUndefined(site)));
}

// =========================================================================
// Visitor counter
// =========================================================================

#[test]
fn test_counter_counts_only_successes() {
    let reg = SiteRegistry::with_policy(SiteConfig::default(), Arc::new(NeverAccept));
    let site = reg.create(&request(&[(EquipmentKind::Slide, 1)])).unwrap();

    let k = reg.admit(site, kid("A")).unwrap();
    assert!(reg.admit(site, kid("B")).is_err());
    assert!(reg.enqueue(site, kid("C")).is_err());
    assert!(reg.admit(site, KidRequest::new("Old", 40)).is_err());
    assert_eq!(reg.total_visitors(), 1);

    reg.remove(site, k.ticket_number).unwrap();
    assert_eq!(reg.total_visitors(), 1);
}

#[test]
fn test_counter_includes_enqueues() {
    let reg = registry();
    let site = reg.create(&request(&[(EquipmentKind::Slide, 1)])).unwrap();
    reg.admit(site, kid("A")).unwrap();
    reg.enqueue(site, kid("B")).unwrap();
    reg.enqueue(site, kid("C")).unwrap();
    assert_eq!(reg.total_visitors(), 3);
}

// =========================================================================
// Tickets
// =========================================================================

#[test]
fn test_caller_ticket_ignored_when_disabled() {
    let reg = SiteRegistry::new(SiteConfig {
        enqueue_policy: EnqueuePolicyConfig::AlwaysAccept,
        caller_tickets: false,
    });
    let site = reg.create(&request(&[(EquipmentKind::Slide, 2)])).unwrap();
    let ticket = TicketNumber::random();

    let a = reg.admit(site, kid("A").with_ticket(ticket)).unwrap();
    let b = reg.admit(site, kid("B").with_ticket(ticket)).unwrap();

    assert_ne!(a.ticket_number, ticket);
    assert_ne!(a.ticket_number, b.ticket_number);
}

// =========================================================================
// Invariants under random operation sequences
// =========================================================================

#[test]
fn test_random_sequences_hold_invariants() {
    for seed in 0..20 {
        let reg = SiteRegistry::with_policy(
            SiteConfig::default(),
            Arc::new(CoinFlip::seeded(seed, 0.5)),
        );
        let site = reg
            .create(&request(&[(EquipmentKind::Slide, 2), (EquipmentKind::Carousel, 1)]))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut issued: Vec<TicketNumber> = Vec::new();
        let mut successes = 0u64;
        let mut last_total = 0u64;

        for step in 0..200 {
            match rng.random_range(0..4) {
                0 => {
                    if let Ok(k) = reg.admit(site, kid(&format!("a{step}"))) {
                        issued.push(k.ticket_number);
                        successes += 1;
                    }
                }
                1 => {
                    if let Ok(k) = reg.enqueue(site, kid(&format!("q{step}"))) {
                        issued.push(k.ticket_number);
                        successes += 1;
                    }
                }
                2 if !issued.is_empty() => {
                    let t = issued[rng.random_range(0..issued.len())];
                    reg.remove(site, t).unwrap();
                }
                _ if !issued.is_empty() => {
                    let t = issued[rng.random_range(0..issued.len())];
                    reg.dequeue(site, t).unwrap();
                }
                _ => {}
            }

            let snapshot = reg.get(site).unwrap();
            assert!(snapshot.occupied_capacity <= snapshot.capacity);
            let onsite: HashSet<_> =
                snapshot.kids_on_site.iter().map(|k| k.ticket_number).collect();
            let queued: HashSet<_> =
                snapshot.kid_queue.iter().map(|k| k.ticket_number).collect();
            assert_eq!(onsite.len(), snapshot.kids_on_site.len());
            assert_eq!(queued.len(), snapshot.kid_queue.len());
            assert!(onsite.is_disjoint(&queued));
            assert!(snapshot.kids_on_site.iter().all(|k| k.status == KidStatus::Playing));
            assert!(snapshot.kid_queue.iter().all(|k| k.status == KidStatus::Waiting));
            let total = reg.total_visitors();
            assert!(total >= last_total);
            last_total = total;
        }
        assert_eq!(reg.total_visitors(), successes);
    }
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_admits_never_exceed_capacity() {
    let reg = Arc::new(registry());
    let site = reg.create(&request(&[(EquipmentKind::Slide, 5)])).unwrap();

    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let reg = Arc::clone(&reg);
            tokio::spawn(async move { reg.admit(site, kid(&format!("k{i}"))).is_ok() })
        })
        .collect();

    let mut admitted = 0;
    for task in tasks {
        if task.await.unwrap() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 5);
    assert_eq!(reg.get(site).unwrap().occupied_capacity, 5);
    assert_eq!(reg.total_visitors(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_remove_and_admit_keep_invariants() {
    let reg = Arc::new(registry());
    let site = reg.create(&request(&[(EquipmentKind::Slide, 3)])).unwrap();
    let mut onsite = Vec::new();
    for i in 0..3 {
        onsite.push(reg.admit(site, kid(&format!("k{i}"))).unwrap().ticket_number);
    }
    for i in 0..10 {
        reg.enqueue(site, kid(&format!("q{i}"))).unwrap();
    }

    let mut tasks = Vec::new();
    for ticket in onsite {
        let reg = Arc::clone(&reg);
        tasks.push(tokio::spawn(async move {
            reg.remove(site, ticket).unwrap();
        }));
    }
    for i in 0..10 {
        let reg = Arc::clone(&reg);
        tasks.push(tokio::spawn(async move {
            let _ = reg.admit(site, kid(&format!("late{i}")));
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let snapshot = reg.get(site).unwrap();
    // Every removal promoted a queued kid, so the site stays full and
    // late arrivals were all refused.
    assert_eq!(snapshot.occupied_capacity, 3);
    assert_eq!(snapshot.kid_queue.len(), 7);
    assert_eq!(reg.total_visitors(), 13);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sites_are_independent() {
    let reg = Arc::new(registry());
    let a = reg.create(&request(&[(EquipmentKind::Slide, 1)])).unwrap();
    let b = reg.create(&request(&[(EquipmentKind::Slide, 1)])).unwrap();

    let handle = reg.handle(a).unwrap();
    let _guard = handle.read();

    // A read lock on site A does not block admission on site B.
    let reg_b = Arc::clone(&reg);
    let admitted = tokio::task::spawn_blocking(move || reg_b.admit(b, kid("B")))
        .await
        .unwrap();
    assert!(admitted.is_ok());
}

#[test]
fn test_concurrent_reads_never_see_half_promotion() {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    let reg = registry();
    let site = reg.create(&request(&[(EquipmentKind::Slide, 3)])).unwrap();
    for i in 0..3 {
        reg.admit(site, kid(&format!("k{i}"))).unwrap();
    }
    for i in 0..500 {
        reg.enqueue(site, kid(&format!("q{i}"))).unwrap();
    }

    let done = AtomicBool::new(false);
    let snapshots = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let snapshot = reg.get(site).unwrap();
                    if !snapshot.kid_queue.is_empty() {
                        assert_eq!(snapshot.occupied_capacity, snapshot.capacity);
                    }
                    let kids = reg.all_kids(site).unwrap();
                    let playing = kids.iter().filter(|k| k.is_playing()).count();
                    if playing < kids.len() {
                        assert_eq!(playing, 3);
                    }
                    snapshots.fetch_add(1, Ordering::Relaxed);
                }
            });
        }

        while snapshots.load(Ordering::Relaxed) == 0 {
            std::thread::yield_now();
        }

        // Each removal frees a slot that is refilled from the queue under
        // the same lock, until the queue runs dry.
        loop {
            let snapshot = reg.get(site).unwrap();
            let Some(onsite) = snapshot.kids_on_site.first() else {
                break;
            };
            assert!(reg.remove(site, onsite.ticket_number).unwrap());
        }
        done.store(true, Ordering::Relaxed);
    });

    assert!(snapshots.load(Ordering::Relaxed) > 0);
    let snapshot = reg.get(site).unwrap();
    assert_eq!(snapshot.occupied_capacity, 0);
    assert!(snapshot.kid_queue.is_empty());
}
