use std::time::Duration;

use playsite::prelude::*;
use rand::Rng;

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

const VISITORS: usize = 60;
const PROMOTION_WAIT: Duration = Duration::from_secs(2);

/// Reads `PLAYSITE_CONFIG` as JSON, falling back to defaults when unset.
fn load_config() -> Result<PlaygroundConfig, serde_json::Error> {
    match std::env::var("PLAYSITE_CONFIG") {
        Ok(raw) => serde_json::from_str(&raw),
        Err(_) => Ok(PlaygroundConfig::default()),
    }
}

fn equipment(kind: EquipmentKind, capacity: u32) -> EquipmentRequest {
    EquipmentRequest {
        id: playsite::catalog::id_of(kind),
        capacity,
    }
}

fn create_sites(playground: &Playground) -> Result<Vec<SiteId>, PlaygroundError> {
    let requests = [
        PlaySiteRequest {
            name: "swing-corner".into(),
            age_restriction: 8,
            equipments: vec![equipment(EquipmentKind::DoubleSwings, 4)],
        },
        PlaySiteRequest {
            name: "adventure-hill".into(),
            age_restriction: 12,
            equipments: vec![
                equipment(EquipmentKind::Slide, 3),
                equipment(EquipmentKind::Carousel, 5),
            ],
        },
        PlaySiteRequest {
            name: "toddler-pit".into(),
            age_restriction: 4,
            equipments: vec![equipment(EquipmentKind::BallPit, 6)],
        },
    ];

    requests
        .iter()
        .map(|request| playground.create_play_site(request))
        .collect()
}

// ---------------------------------------------------------------------------
// Visitors
// ---------------------------------------------------------------------------

/// Polls until the kid is onsite. Returns `false` if the kid left the
/// queue some other way.
async fn wait_for_promotion(playground: &Playground, site: SiteId, ticket: TicketNumber) -> bool {
    loop {
        if playground.get_onsite_kid(site, ticket).is_ok() {
            return true;
        }
        if playground.get_queued_kid(site, ticket).is_err() {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Waits up to `limit` for a queued kid to be promoted.
///
/// A kid queued on a site that emptied in the meantime is never promoted,
/// so on timeout the kid leaves the queue. Returns whether the kid ended
/// up onsite.
async fn wait_or_leave(playground: &Playground, site: SiteId, kid: &Kid, limit: Duration) -> bool {
    let waited =
        tokio::time::timeout(limit, wait_for_promotion(playground, site, kid.ticket_number)).await;
    match waited {
        Ok(promoted) => promoted,
        Err(_) => match playground.remove_kid_from_queue(site, kid.ticket_number) {
            Ok(true) => {
                tracing::info!(%site, kid = %kid.name, "gave up waiting");
                false
            }
            // Promoted between the timeout and the dequeue.
            Ok(false) => playground.get_onsite_kid(site, kid.ticket_number).is_ok(),
            Err(e) => {
                tracing::warn!(%site, error = %e, "could not leave queue");
                false
            }
        },
    }
}

/// One kid's visit: try to get in, wait in line if full, play, leave.
async fn visit(playground: Playground, site: SiteId, name: String, age: u32) {
    let request = KidRequest::new(name, age);
    let kid = match playground.admit_kid(site, request.clone()) {
        Ok(kid) => kid,
        Err(e) if e.kind() == ErrorKind::PlaySiteFull => {
            match playground.enqueue_kid(site, request) {
                Ok(kid) => kid,
                Err(e) => {
                    tracing::info!(%site, error = %e, "visitor turned away");
                    return;
                }
            }
        }
        Err(e) => {
            tracing::info!(%site, error = %e, "visitor refused");
            return;
        }
    };

    if !wait_or_leave(&playground, site, &kid, PROMOTION_WAIT).await {
        return;
    }

    let play_ms = rand::rng().random_range(20..120);
    tokio::time::sleep(Duration::from_millis(play_ms)).await;

    if let Err(e) = playground.remove_kid_onsite(site, kid.ticket_number) {
        tracing::warn!(%site, error = %e, "could not remove kid");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    playsite::init_tracing("playsite_site=info,visitor_day=info");

    let playground = Playground::builder().config(load_config()?).build();
    let sites = create_sites(&playground)?;

    let mut tasks = Vec::with_capacity(VISITORS);
    for i in 0..VISITORS {
        let (site, age) = {
            let mut rng = rand::rng();
            (sites[rng.random_range(0..sites.len())], rng.random_range(2..14))
        };
        tasks.push(tokio::spawn(visit(
            playground.clone(),
            site,
            format!("kid-{i:03}"),
            age,
        )));

        if i % 10 == 9 {
            for site in &sites {
                match playground.get_utilization(*site) {
                    Ok(u) => tracing::info!(%site, utilization = u, "midday check"),
                    Err(e) => tracing::warn!(%site, error = %e, "utilization unavailable"),
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    for task in tasks {
        task.await?;
    }

    for summary in playground.list_play_sites() {
        let site = &summary.play_site;
        println!(
            "{:<16} capacity {:>2}  onsite {:>2}  queued {:>2}",
            site.name,
            site.capacity,
            site.occupied_capacity,
            site.queue_len()
        );
    }
    println!("total visitors: {}", playground.total_visitor_count());
    Ok(())
}
