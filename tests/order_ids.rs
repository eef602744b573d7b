use std::collections::HashSet;
use std::thread;

use rainbow_toys::domain::order::Order;
use rainbow_toys::domain::types::OrderId;
use rainbow_toys::forms::orders::{SubmitOrderForm, SubmitOrderPayload};
use rainbow_toys::notifier::{NotifyError, OrderNotifier};
use rainbow_toys::repository::{DieselRepository, OrderReader};
use rainbow_toys::services::orders::submit_order;

mod common;

const THREADS: usize = 8;
const PER_THREAD: usize = 125;

struct SilentNotifier;

impl OrderNotifier for SilentNotifier {
    async fn notify(&self, _order: &Order) -> Result<(), NotifyError> {
        Ok(())
    }
}

fn star_bear() -> SubmitOrderPayload {
    let form: SubmitOrderForm = serde_json::from_value(serde_json::json!({
        "items": [{"toyId": "star-bear", "toyName": "Star Bear Buddy", "colors": ["Pink"]}],
        "buyerName": "Alex",
        "buyerContact": "alex@example.com",
        "total": 5
    }))
    .expect("valid order form");
    form.try_into().expect("valid order payload")
}

/// Ids are only probabilistically unique: two orders in the same millisecond
/// share the time part and rely on the random suffix. The observed collision
/// rate is reported and must stay small.
#[test]
fn parallel_order_ids_rarely_collide() {
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            thread::spawn(|| {
                (0..PER_THREAD)
                    .map(|_| OrderId::generate().into_inner())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("generator thread panicked"))
        .collect();
    let total = ids.len();
    let unique = ids.iter().collect::<HashSet<_>>().len();
    let rate = (total - unique) as f64 / total as f64;
    println!("generated {total} order ids, {} collisions ({rate:.4})", total - unique);

    assert_eq!(total, THREADS * PER_THREAD);
    assert!(rate < 0.01, "collision rate too high: {rate}");
    assert!(ids.iter().all(|id| id.starts_with("order-")));
}

/// Parallel submissions against SQLite: a colliding id is refused by the
/// primary key, so every accepted order is stored exactly once.
#[test]
fn parallel_submissions_never_overwrite_orders() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let accepted: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let repo = &repo;
                scope.spawn(move || {
                    actix_web::rt::System::new().block_on(async move {
                        let mut accepted = 0;
                        for _ in 0..PER_THREAD {
                            if submit_order(star_bear(), repo, &SilentNotifier).await.is_ok() {
                                accepted += 1;
                            }
                        }
                        accepted
                    })
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("submission thread panicked"))
            .sum()
    });

    let total = THREADS * PER_THREAD;
    let rejected = total - accepted;
    let rate = rejected as f64 / total as f64;
    println!("submitted {total} orders, {rejected} rejected ({rate:.4})");

    let stored = repo.list_orders().expect("should list orders");
    assert_eq!(stored.len(), accepted);
    let unique = stored.iter().map(|o| o.id.as_str()).collect::<HashSet<_>>();
    assert_eq!(unique.len(), accepted);
    assert!(rate < 0.01, "rejection rate too high: {rate}");
}
