//! Uniform selection from a caller-supplied set.

use rand::Rng;

/// Pick one value uniformly at random. Returns `None` for an empty set.
pub fn choose_uniform<'a, R: Rng + ?Sized>(rng: &mut R, values: &'a [String]) -> Option<&'a str> {
    if values.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..values.len());
    Some(values[idx].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn set(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_set() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_uniform(&mut rng, &[]), None);
    }

    #[test]
    fn test_single_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let values = set(&["only"]);
        for _ in 0..10 {
            assert_eq!(choose_uniform(&mut rng, &values), Some("only"));
        }
    }

    #[test]
    fn test_every_value_reachable() {
        let mut rng = StdRng::seed_from_u64(3);
        let values = set(&["a", "b", "c", "d", "e", "f"]);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(choose_uniform(&mut rng, &values).unwrap());
        }
        assert_eq!(seen.len(), values.len());
    }
}
