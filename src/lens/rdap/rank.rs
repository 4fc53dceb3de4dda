//! Selection and ordering of temporal samples
//!
//! Smaller elapsed-days means closer to the reference, i.e. more recent.
//! Every tie is broken by the entity's original position.

use super::types::{Entity, TemporalSample};
use crate::error::{GripError, Result};

/// The entity with the fewest elapsed days; first in record order on ties
pub fn most_recent<'a>(samples: &[TemporalSample<'a>]) -> Result<Entity<'a>> {
    samples
        .iter()
        .min_by_key(|s| (s.elapsed_days, s.entity.index()))
        .map(|s| s.entity)
        .ok_or(GripError::EmptyInput)
}

/// The entity with the most elapsed days; first in record order on ties
pub fn oldest<'a>(samples: &[TemporalSample<'a>]) -> Result<Entity<'a>> {
    samples
        .iter()
        .min_by_key(|s| (std::cmp::Reverse(s.elapsed_days), s.entity.index()))
        .map(|s| s.entity)
        .ok_or(GripError::EmptyInput)
}

/// Every entity exactly once, ordered by `(elapsed_days, index)`.
///
/// Ascending puts the most recent first; `descending` is the exact reverse.
pub fn enumerate<'a>(samples: &[TemporalSample<'a>], descending: bool) -> Result<Vec<Entity<'a>>> {
    if samples.is_empty() {
        return Err(GripError::EmptyInput);
    }

    let mut ordered = samples.to_vec();
    ordered.sort_by_key(|s| (s.elapsed_days, s.entity.index()));
    if descending {
        ordered.reverse();
    }
    Ok(ordered.into_iter().map(|s| s.entity).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn entities(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({ "handle": format!("E{i}") })).collect()
    }

    fn make_samples<'a>(values: &'a [Value], days: &[i64]) -> Vec<TemporalSample<'a>> {
        values
            .iter()
            .zip(days)
            .enumerate()
            .map(|(i, (v, d))| TemporalSample::new(Entity::new(i, v), *d))
            .collect()
    }

    fn indices(entities: &[Entity<'_>]) -> Vec<usize> {
        entities.iter().map(Entity::index).collect()
    }

    #[test]
    fn test_distinct_values() {
        let values = entities(3);
        let samples = make_samples(&values, &[10, 3, 50]);

        assert_eq!(most_recent(&samples).unwrap().index(), 1);
        assert_eq!(oldest(&samples).unwrap().index(), 2);
        assert_eq!(indices(&enumerate(&samples, false).unwrap()), vec![1, 0, 2]);
        assert_eq!(indices(&enumerate(&samples, true).unwrap()), vec![2, 0, 1]);
    }

    #[test]
    fn test_ties_follow_original_order() {
        let values = entities(3);
        let samples = make_samples(&values, &[5, 5, 2]);
        assert_eq!(indices(&enumerate(&samples, false).unwrap()), vec![2, 0, 1]);
        assert_eq!(oldest(&samples).unwrap().index(), 0);

        let samples = make_samples(&values, &[7, 7, 7]);
        assert_eq!(most_recent(&samples).unwrap().index(), 0);
        assert_eq!(oldest(&samples).unwrap().index(), 0);
        assert_eq!(indices(&enumerate(&samples, false).unwrap()), vec![0, 1, 2]);
        assert_eq!(indices(&enumerate(&samples, true).unwrap()), vec![2, 1, 0]);
    }

    #[test]
    fn test_single_sample() {
        let values = entities(1);
        let samples = make_samples(&values, &[7]);
        assert_eq!(most_recent(&samples).unwrap().handle(), Some("E0"));
        assert_eq!(oldest(&samples).unwrap().handle(), Some("E0"));
        assert_eq!(indices(&enumerate(&samples, false).unwrap()), vec![0]);
        assert_eq!(indices(&enumerate(&samples, true).unwrap()), vec![0]);
    }

    #[test]
    fn test_empty_input() {
        let samples: Vec<TemporalSample<'_>> = vec![];
        assert!(matches!(most_recent(&samples), Err(GripError::EmptyInput)));
        assert!(matches!(oldest(&samples), Err(GripError::EmptyInput)));
        assert!(matches!(enumerate(&samples, false), Err(GripError::EmptyInput)));
        assert!(matches!(enumerate(&samples, true), Err(GripError::EmptyInput)));
    }

    #[test]
    fn test_properties_over_many_inputs() {
        let days_sets: [&[i64]; 6] = [
            &[0],
            &[1, 1],
            &[3, 1, 2],
            &[4, 4, 1, 1, 9],
            &[-2, 5, -2, 0, 5, 5],
            &[100, 30, 30, 2, 2, 2, 77],
        ];

        for days in days_sets {
            let values = entities(days.len());
            let samples = make_samples(&values, days);

            let min = *days.iter().min().unwrap();
            let max = *days.iter().max().unwrap();
            assert_eq!(days[most_recent(&samples).unwrap().index()], min);
            assert_eq!(days[oldest(&samples).unwrap().index()], max);

            let asc = indices(&enumerate(&samples, false).unwrap());
            let mut desc = indices(&enumerate(&samples, true).unwrap());
            desc.reverse();
            assert_eq!(asc, desc);

            // bijection
            let mut seen = asc.clone();
            seen.sort_unstable();
            assert_eq!(seen, (0..days.len()).collect::<Vec<_>>());

            // non-decreasing elapsed days
            assert!(asc.windows(2).all(|w| days[w[0]] <= days[w[1]]));

            // idempotent
            assert_eq!(indices(&enumerate(&samples, false).unwrap()), asc);
        }
    }
}
