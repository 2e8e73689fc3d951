// ── Concurrent fan-out ──
//
// Multiplexes independent gateway calls with a concurrency ceiling.
// Results arrive in completion order, not submission order, so every
// request carries its correlation key through to the result tuple.
// Retries live in the gateway; a failing request never cancels siblings.

use futures_util::stream::{Stream, StreamExt, iter};

use crate::error::CallError;

/// Default ceiling on simultaneously in-flight requests. Keeps a large
/// batch from overwhelming the dashboard's own rate limiter.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Issue a batch of keyed requests with at most `limit` in flight.
///
/// Yields `(key, result)` tuples in completion order; the stream is
/// finite and ends once every request has resolved. `limit` is clamped
/// to >= 1.
pub fn run_all<K, T, Fut>(
    requests: Vec<(K, Fut)>,
    limit: usize,
) -> impl Stream<Item = (K, Result<T, CallError>)>
where
    Fut: Future<Output = Result<T, CallError>>,
{
    iter(
        requests
            .into_iter()
            .map(|(key, fut)| async move { (key, fut.await) }),
    )
    .buffer_unordered(limit.max(1))
}

/// Await a full batch, collecting every result. Used at phase barriers
/// where the next phase must not start until the batch completes.
pub async fn collect_all<K, T, Fut>(
    requests: Vec<(K, Fut)>,
    limit: usize,
) -> Vec<(K, Result<T, CallError>)>
where
    Fut: Future<Output = Result<T, CallError>>,
{
    run_all(requests, limit).collect().await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn all_results_arrive_with_their_keys() {
        // Six requests, two of which fail; completion order is scrambled
        // by staggered delays.
        let requests: Vec<(String, _)> = (0..6u64)
            .map(|i| {
                let key = format!("net-{i}");
                let fut = async move {
                    tokio::time::sleep(Duration::from_millis(100 - i * 10)).await;
                    if i % 3 == 0 {
                        Err(CallError::Transport {
                            message: "connection reset".into(),
                        })
                    } else {
                        Ok(i)
                    }
                };
                (key, fut)
            })
            .collect();

        let results = collect_all(requests, 4).await;

        assert_eq!(results.len(), 6);
        let keys: HashSet<&str> = results.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys.len(), 6, "every key present exactly once");
        for (key, result) in &results {
            let i: u64 = key.trim_start_matches("net-").parse().unwrap();
            match result {
                Ok(v) => assert_eq!(*v, i),
                Err(_) => assert_eq!(i % 3, 0, "only every third request fails"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn completion_order_is_not_submission_order() {
        let requests = vec![
            ("slow", slow_ok(100, 1)),
            ("fast", slow_ok(10, 2)),
        ];

        let results = collect_all(requests, 2).await;
        assert_eq!(results[0].0, "fast");
        assert_eq!(results[1].0, "slow");
    }

    #[tokio::test(start_paused = true)]
    async fn concurrency_ceiling_is_respected() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let requests: Vec<(usize, _)> = (0..10)
            .map(|i| {
                let in_flight = Arc::clone(&in_flight);
                let peak = Arc::clone(&peak);
                let fut = async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, CallError>(i)
                };
                (i, fut)
            })
            .collect();

        let results = collect_all(requests, 3).await;

        assert_eq!(results.len(), 10);
        assert!(
            peak.load(Ordering::SeqCst) <= 3,
            "no more than 3 requests in flight, saw {}",
            peak.load(Ordering::SeqCst)
        );
    }

    fn slow_ok(ms: u64, value: u32) -> impl Future<Output = Result<u32, CallError>> {
        async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(value)
        }
    }
}
