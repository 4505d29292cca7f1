use crate::series::{HistogramBucket, HistogramSeries};

/// Spread `total` over `bucket_count` buckets ending at `now_ms`.
///
/// Bucket `i` (0-based, oldest first) gets `round(total * 2(i+1) / (N(N+1)))`
/// so later buckets weigh more. Rounding drift is reconciled on the newest
/// bucket (or, on overshoot, walking back from it) so the counts always sum
/// to `total`. Keys are `now_ms - (N-1-i) * interval_ms`.
pub fn synthesize(total: u64, bucket_count: usize, interval_ms: i64, now_ms: i64) -> HistogramSeries {
    if bucket_count == 0 {
        return HistogramSeries {
            buckets: Vec::new(),
            total,
        };
    }

    let mut counts = weighted_shares(total, bucket_count);
    reconcile(&mut counts, total);

    let last = bucket_count - 1;
    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, doc_count)| HistogramBucket {
            key: bucket_key(now_ms, interval_ms, last - i),
            doc_count,
        })
        .collect();

    HistogramSeries { buckets, total }
}

fn weighted_shares(total: u64, n: usize) -> Vec<u64> {
    let n = n as u128;
    // Sum of weights 1..=n.
    let den = n * (n + 1) / 2;
    (1..=n)
        .map(|w| {
            let num = total as u128 * w;
            // Round half up: floor((num + den/2) / den).
            let share = (2 * num + den) / (2 * den);
            u64::try_from(share).unwrap_or(u64::MAX)
        })
        .collect()
}

fn reconcile(counts: &mut [u64], total: u64) {
    let sum: u128 = counts.iter().map(|&c| c as u128).sum();
    let target = total as u128;
    if sum < target {
        if let Some(last) = counts.last_mut() {
            *last = last.saturating_add((target - sum) as u64);
        }
    } else if sum > target {
        let mut excess = sum - target;
        for count in counts.iter_mut().rev() {
            if excess == 0 {
                break;
            }
            let take = excess.min(*count as u128);
            *count -= take as u64;
            excess -= take;
        }
    }
}

fn bucket_key(now_ms: i64, interval_ms: i64, steps_back: usize) -> i64 {
    let steps = i64::try_from(steps_back).unwrap_or(i64::MAX);
    now_ms.saturating_sub(interval_ms.saturating_mul(steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3_600_000;
    const NOW: i64 = 1_700_000_000_000;

    fn counts(series: &HistogramSeries) -> Vec<u64> {
        series.buckets.iter().map(|b| b.doc_count).collect()
    }

    #[test]
    fn twelve_buckets_sum_to_total() {
        let series = synthesize(47, 12, HOUR, NOW);
        assert_eq!(series.buckets.len(), 12);
        assert_eq!(series.total, 47);
        assert_eq!(series.bucket_sum(), 47);
    }

    #[test]
    fn keys_step_back_from_now() {
        let series = synthesize(47, 12, HOUR, NOW);
        assert_eq!(series.buckets.last().map(|b| b.key), Some(NOW));
        assert_eq!(series.buckets[0].key, NOW - 11 * HOUR);
        for pair in series.buckets.windows(2) {
            assert_eq!(pair[1].key - pair[0].key, HOUR);
        }
    }

    #[test]
    fn weights_rise_toward_now() {
        // den = 10, shares 10,20,30,40 exactly.
        let series = synthesize(100, 4, HOUR, NOW);
        assert_eq!(counts(&series), vec![10, 20, 30, 40]);
    }

    #[test]
    fn zero_total() {
        let series = synthesize(0, 12, HOUR, NOW);
        assert_eq!(series.buckets.len(), 12);
        assert!(counts(&series).iter().all(|&c| c == 0));
        assert_eq!(series.total, 0);
    }

    #[test]
    fn small_totals_still_sum() {
        for total in [1, 2, 3, 7, 11, 13] {
            let series = synthesize(total, 12, HOUR, NOW);
            assert_eq!(series.bucket_sum(), total, "total={total}");
        }
    }

    #[test]
    fn total_of_one_lands_on_newest_bucket() {
        let series = synthesize(1, 12, HOUR, NOW);
        assert_eq!(counts(&series)[11], 1);
        assert_eq!(series.bucket_sum(), 1);
    }

    #[test]
    fn overshoot_trimmed_from_the_end() {
        // Shares round to 1,1,2 -> sum 4 > 3.
        let mut c = vec![1, 1, 2];
        reconcile(&mut c, 3);
        assert_eq!(c, vec![1, 1, 1]);

        let mut c = vec![1, 0, 0];
        reconcile(&mut c, 0);
        assert_eq!(c, vec![0, 0, 0]);
    }

    #[test]
    fn no_buckets() {
        let series = synthesize(9, 0, HOUR, NOW);
        assert!(series.buckets.is_empty());
        assert_eq!(series.total, 9);
    }

    #[test]
    fn single_bucket_takes_everything() {
        let series = synthesize(9, 1, HOUR, NOW);
        assert_eq!(
            series.buckets,
            vec![HistogramBucket {
                key: NOW,
                doc_count: 9
            }]
        );
    }

    #[test]
    fn keys_saturate() {
        let series = synthesize(1, 3, i64::MAX, 0);
        assert_eq!(series.buckets[0].key, i64::MIN + 1);
        assert_eq!(series.buckets[2].key, 0);
    }
}
