//! Scalar and grouped reductions over a filtered record set.
//!
//! Group reduction has one uniform contract: the key extractor yields zero or
//! more keys per record, and the record's value is added to every yielded
//! key's bucket. A record yielding no keys is simply absent from the buckets
//! while still counting toward the scalar reductions. Buckets are keyed in a
//! [BTreeMap] so iteration order, and therefore every downstream series, is
//! deterministic.

use std::collections::BTreeMap;

use time::Date;

/// Sums a numeric field over a record set.
pub fn sum_of<R>(records: &[R], value: impl Fn(&R) -> f64) -> f64 {
    records.iter().map(value).sum()
}

/// The largest value of a numeric field over a record set, or `0.0` when the
/// set is empty.
pub fn max_of<R>(records: &[R], value: impl Fn(&R) -> f64) -> f64 {
    records.iter().map(value).fold(0.0, f64::max)
}

/// Sums a numeric field over the records whose normalized date equals `day`.
///
/// Records without a parseable date never match.
pub fn sum_on_day<R>(
    records: &[R],
    day: Date,
    date_of: impl Fn(&R) -> Option<Date>,
    value: impl Fn(&R) -> f64,
) -> f64 {
    records
        .iter()
        .filter(|record| date_of(record) == Some(day))
        .map(value)
        .sum()
}

/// Groups records by extracted keys and sums a numeric field per key.
///
/// # Arguments
/// * `keys` - Extractor yielding zero or more group keys for a record
/// * `value` - The numeric field to sum into each yielded key's bucket
///
/// # Returns
/// Key-ordered buckets mapping each group key to its summed value.
pub fn sum_by_keys<R, I>(
    records: &[R],
    keys: impl Fn(&R) -> I,
    value: impl Fn(&R) -> f64,
) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = String>,
{
    let mut buckets = BTreeMap::new();

    for record in records {
        let amount = value(record);
        for key in keys(record) {
            *buckets.entry(key).or_insert(0.0) += amount;
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{max_of, sum_by_keys, sum_of, sum_on_day};

    struct Entry {
        amount: f64,
        date: Option<time::Date>,
        tags: Vec<String>,
    }

    fn entry(amount: f64, date: Option<time::Date>, tags: &[&str]) -> Entry {
        Entry {
            amount,
            date,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    #[test]
    fn sums_a_numeric_field() {
        let entries = vec![
            entry(100.0, None, &[]),
            entry(50.0, None, &[]),
            entry(25.0, None, &[]),
        ];

        assert_eq!(sum_of(&entries, |e| e.amount), 175.0);
    }

    #[test]
    fn empty_set_sums_to_zero() {
        let entries: Vec<Entry> = vec![];

        assert_eq!(sum_of(&entries, |e| e.amount), 0.0);
        assert_eq!(max_of(&entries, |e| e.amount), 0.0);
    }

    #[test]
    fn max_finds_the_largest_amount() {
        let entries = vec![entry(100.0, None, &[]), entry(350.0, None, &[])];

        assert_eq!(max_of(&entries, |e| e.amount), 350.0);
    }

    #[test]
    fn sum_on_day_only_counts_matching_dates() {
        let day = date!(2024 - 01 - 05);
        let entries = vec![
            entry(100.0, Some(day), &[]),
            entry(50.0, Some(date!(2024 - 01 - 06)), &[]),
            entry(25.0, None, &[]),
        ];

        assert_eq!(sum_on_day(&entries, day, |e| e.date, |e| e.amount), 100.0);
    }

    #[test]
    fn multi_tag_records_contribute_to_every_bucket() {
        let entries = vec![
            entry(100.0, None, &["North", "West"]),
            entry(50.0, None, &["North"]),
        ];

        let buckets = sum_by_keys(&entries, |e| e.tags.clone(), |e| e.amount);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets["North"], 150.0);
        assert_eq!(buckets["West"], 100.0);
    }

    #[test]
    fn records_with_no_keys_are_omitted_from_buckets() {
        let entries = vec![entry(100.0, None, &[]), entry(50.0, None, &["South"])];

        let buckets = sum_by_keys(&entries, |e| e.tags.clone(), |e| e.amount);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets["South"], 50.0);
        // The untagged record still counts toward the scalar total.
        assert_eq!(sum_of(&entries, |e| e.amount), 150.0);
    }

    #[test]
    fn single_key_bucket_totals_equal_the_scalar_total() {
        let entries = vec![
            entry(100.0, None, &["North"]),
            entry(50.0, None, &["South"]),
            entry(25.0, None, &["North"]),
        ];

        let buckets = sum_by_keys(&entries, |e| e.tags.clone(), |e| e.amount);

        let bucket_total: f64 = buckets.values().sum();
        assert_eq!(bucket_total, sum_of(&entries, |e| e.amount));
    }

    #[test]
    fn buckets_iterate_in_key_order() {
        let entries = vec![
            entry(1.0, None, &["Zebra"]),
            entry(2.0, None, &["Alpha"]),
            entry(3.0, None, &["Mango"]),
        ];

        let buckets = sum_by_keys(&entries, |e| e.tags.clone(), |e| e.amount);

        let keys: Vec<&String> = buckets.keys().collect();
        assert_eq!(keys, ["Alpha", "Mango", "Zebra"]);
    }
}
