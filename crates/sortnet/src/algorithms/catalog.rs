use crate::error::SortError;

use super::network::{MAX_NETWORK_SIZE, Network};

/// One generated network per size in `0..=MAX_NETWORK_SIZE`.
#[derive(Clone, Debug)]
pub struct Catalog {
    networks: [Network; MAX_NETWORK_SIZE + 1],
}

impl Catalog {
    pub const fn generate() -> Self {
        let mut networks = [Network::shortest(0); MAX_NETWORK_SIZE + 1];
        let mut size = 1;
        while size <= MAX_NETWORK_SIZE {
            networks[size] = Network::shortest(size);
            size += 1;
        }
        Self { networks }
    }

    /// The admitted network for `size`, for `2..=MAX_NETWORK_SIZE`.
    pub fn get(&self, size: usize) -> Option<&Network> {
        if (2..=MAX_NETWORK_SIZE).contains(&size) {
            Some(&self.networks[size])
        } else {
            None
        }
    }

    /// Like `get`, but also returns the empty networks for 0 and 1 and
    /// panics above `MAX_NETWORK_SIZE`.
    #[inline]
    pub(crate) fn network(&self, size: usize) -> &Network {
        &self.networks[size]
    }

    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        self.networks[2..].iter()
    }

    pub fn comparator_count(&self, size: usize) -> Option<usize> {
        self.get(size).map(Network::len)
    }
}

const GENERATED: Catalog = Catalog::generate();

const _: () = {
    let mut size = 0;
    while size <= MAX_NETWORK_SIZE {
        let net = &GENERATED.networks[size];
        assert!(net.size() == size, "catalog entry stored under the wrong size");
        assert!(net.indices_in_range(), "catalog entry references an out-of-range index");
        size += 1;
    }
};

pub static CATALOG: Catalog = GENERATED;

/// Sorts the whole slice with the catalog network for its length.
pub fn sort_network(values: &mut [f64]) -> Result<(), SortError> {
    let size = values.len();
    if size <= 1 {
        return Ok(());
    }
    let net = CATALOG.get(size).ok_or(SortError::NoNetwork { size })?;
    net.apply(values);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn catalog_covers_every_networked_size() {
        for size in 0..=MAX_NETWORK_SIZE + 2 {
            let entry = CATALOG.get(size);
            if (2..=MAX_NETWORK_SIZE).contains(&size) {
                let net = entry.unwrap_or_else(|| panic!("missing network for {size}"));
                assert_eq!(net.size(), size);
                assert!(!net.is_empty());
            } else {
                assert!(entry.is_none(), "size={size}");
            }
        }
        assert_eq!(CATALOG.networks().count(), MAX_NETWORK_SIZE - 1);
    }

    #[test]
    fn comparator_counts_are_shortest_generated() {
        assert_eq!(CATALOG.comparator_count(9), Some(27));
        assert_eq!(CATALOG.comparator_count(25), Some(140));
        assert_eq!(CATALOG.comparator_count(27), Some(156));
        assert_eq!(CATALOG.comparator_count(32), Some(191));
        assert_eq!(CATALOG.comparator_count(33), None);
    }

    #[test]
    fn sort_network_reports_missing_sizes() {
        let mut data = vec![0.0; 40];
        assert_eq!(
            sort_network(&mut data),
            Err(SortError::NoNetwork { size: 40 })
        );
        let mut empty: [f64; 0] = [];
        assert_eq!(sort_network(&mut empty), Ok(()));
        let mut one = [3.5];
        assert_eq!(sort_network(&mut one), Ok(()));
    }

    #[test]
    fn eleven_element_regression() {
        let mut data = [3.0, 0.0, 1.0, 2.0, 9.0, 8.0, 10.0, 4.0, 7.0, 5.0, 6.0];
        sort_network(&mut data).expect("size 11 is networked");
        let expected: Vec<f64> = (0..11).map(f64::from).collect();
        assert_eq!(data.to_vec(), expected);
    }

    #[test]
    fn every_network_sorts_random_permutations() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for net in CATALOG.networks() {
            let size = net.size();
            let mut ranks: Vec<f64> = (0..size).map(|i| i as f64).collect();
            for _ in 0..200 {
                ranks.shuffle(&mut rng);
                let mut data = ranks.clone();
                net.apply(&mut data);
                for (i, &v) in data.iter().enumerate() {
                    assert_eq!(v, i as f64, "size={size}");
                }
            }

            let mut data: Vec<f64> = (0..size).map(|_| rng.random_range(-5.0..5.0)).collect();
            let mut expected = data.clone();
            expected.sort_unstable_by(f64::total_cmp);
            net.apply(&mut data);
            assert_eq!(data, expected, "size={size}");
        }
    }
}
