//! Batch plan arithmetic holds for arbitrary totals and batch sizes

use kondate::generation::BatchPlan;
use proptest::prelude::*;

/// batch count is ceil(total / batch_size) and nominal sizes sum to the total
#[test]
fn test_batch_plan_covers_total_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(1usize..500, 1usize..50), |(total, batch_size)| {
            let plan = BatchPlan::new(total, batch_size).unwrap();
            let sizes = plan.nominal_sizes();

            prop_assert_eq!(plan.batch_count(), (total + batch_size - 1) / batch_size);
            prop_assert_eq!(sizes.len(), plan.batch_count());
            prop_assert_eq!(sizes.iter().sum::<usize>(), total);
            prop_assert!(sizes.iter().all(|&s| s >= 1 && s <= batch_size));
            // only the last batch may be short
            prop_assert!(sizes[..sizes.len() - 1].iter().all(|&s| s == batch_size));
            Ok(())
        })
        .unwrap();
}

/// the next request never exceeds the batch size or the remaining gap
#[test]
fn test_request_size_bounded_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(1usize..200, 1usize..20, 0usize..400), |(total, batch_size, collected)| {
            let plan = BatchPlan::new(total, batch_size).unwrap();
            let size = plan.request_size(collected);

            prop_assert!(size <= batch_size);
            prop_assert_eq!(size, batch_size.min(total.saturating_sub(collected)));
            if collected >= total {
                prop_assert_eq!(size, 0);
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_zero_inputs_rejected() {
    assert!(BatchPlan::new(0, 5).is_err());
    assert!(BatchPlan::new(5, 0).is_err());
}
