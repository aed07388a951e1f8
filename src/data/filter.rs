use std::collections::HashSet;

use super::model::{KeyField, Record};

// ---------------------------------------------------------------------------
// Year range
// ---------------------------------------------------------------------------

/// Keep records whose year lies in `[min_year, max_year]`.
///
/// Records without a parseable year never pass. An inverted range
/// (`min_year > max_year`) simply matches nothing.
pub fn filter_by_year<'a, I>(records: I, min_year: i32, max_year: i32) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| matches!(r.year, Some(y) if min_year <= y && y <= max_year))
        .collect()
}

// ---------------------------------------------------------------------------
// Category membership
// ---------------------------------------------------------------------------

/// Keep records whose `key_field` value is one of `allowed_keys`.
///
/// Records with an empty key never pass.
pub fn filter_by_membership<'a, I>(
    records: I,
    key_field: KeyField,
    allowed_keys: &HashSet<&str>,
) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| r.key(key_field).is_some_and(|k| allowed_keys.contains(k)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: Option<i32>, location: &str, port: &str) -> Record {
        Record::new(year, location, port, None, None)
    }

    fn sample() -> Vec<Record> {
        vec![
            rec(Some(1840), "Miami", "Boston"),
            rec(Some(1850), "Key West", "Boston"),
            rec(None, "Miami", "Havana"),
            rec(Some(1900), "Nantucket", "Havana"),
            rec(Some(1950), "Miami", "New York"),
            rec(Some(1951), "Miami", "New York"),
        ]
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let records = sample();
        let kept = filter_by_year(&records, 1850, 1950);
        let years: Vec<_> = kept.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![Some(1850), Some(1900), Some(1950)]);
    }

    #[test]
    fn year_filter_returns_references_into_input() {
        let records = sample();
        let kept = filter_by_year(&records, 1800, 2000);
        assert_eq!(kept.len(), 5);
        for r in &kept {
            assert!(records.iter().any(|orig| std::ptr::eq(orig, *r)));
            let y = r.year.unwrap();
            assert!((1800..=2000).contains(&y));
        }
    }

    #[test]
    fn inverted_or_disjoint_range_is_empty() {
        let records = sample();
        assert!(filter_by_year(&records, 1950, 1850).is_empty());
        assert!(filter_by_year(&records, 2000, 2100).is_empty());
    }

    #[test]
    fn filters_chain_over_references() {
        let records = sample();
        let in_range = filter_by_year(&records, 1840, 1950);
        let allowed: HashSet<&str> = ["Miami"].into_iter().collect();
        let kept = filter_by_membership(in_range.iter().copied(), KeyField::LocationLost, &allowed);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.location_lost_key == "Miami"));
    }

    #[test]
    fn membership_on_departure_port() {
        let records = sample();
        let allowed: HashSet<&str> = ["Havana", "Nowhere"].into_iter().collect();
        let kept = filter_by_membership(&records, KeyField::DeparturePort, &allowed);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.departure_port == "Havana"));
    }

    #[test]
    fn empty_allowed_set_keeps_nothing() {
        let records = sample();
        let kept = filter_by_membership(&records, KeyField::LocationLost, &HashSet::new());
        assert!(kept.is_empty());
    }
}
