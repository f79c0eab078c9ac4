//! Walkthrough of the map operations, printed step by step

use std::{fmt::Display, io::Write};

use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{ChainedHashMap, config::DemoConfig};

/// Generates a string of `len` random lowercase ASCII letters
pub fn random_value<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
}

/// Renders a lookup result, using `<absent>` for missing keys
fn describe<V: Display>(value: Option<&V>) -> String {
    value.map_or_else(|| "<absent>".to_string(), ToString::to_string)
}

/// Runs the walkthrough described by `config`, writing the transcript to `out`.
///
/// The generator is seeded from the config, so equal configs yield equal transcripts.
///
/// # Errors
///
/// Returns any I/O error raised while writing to `out`.
pub fn run<W: Write>(
    config: &DemoConfig,
    out: &mut W,
) -> std::io::Result<ChainedHashMap<usize, String>> {
    info!(
        "running demo with seed {} ({} entries, values of length {})",
        config.seed, config.entries, config.value_len
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut map = ChainedHashMap::new();

    writeln!(out, "Empty map:")?;
    writeln!(out, "{map}")?;

    for key in 0..config.entries {
        map.put(key, random_value(&mut rng, config.value_len));
    }
    writeln!(out, "Generated map:")?;
    writeln!(out, "{map}")?;
    writeln!(out, "key = 1: {}", describe(map.get(&1)))?;
    writeln!(out, "key = 10: {}", describe(map.get(&10)))?;

    writeln!(out, "Update element with key = 1:")?;
    let previous = map.put(1, "test".to_string());
    writeln!(out, "previous value: {}", describe(previous.as_ref()))?;
    writeln!(out, "key = 1: {}", describe(map.get(&1)))?;
    writeln!(out, "{map}")?;

    writeln!(out, "Add new elements to map:")?;
    for key in [10, 11] {
        let previous = map.put(key, random_value(&mut rng, config.value_len));
        writeln!(out, "key = {key}, previous value: {}", describe(previous.as_ref()))?;
        writeln!(out, "{map}")?;
    }

    for key in [3, 12] {
        writeln!(out, "Remove element with key = {key}:")?;
        let removed = map.remove(&key);
        writeln!(out, "removed value: {}", describe(removed.as_ref()))?;
        writeln!(out, "key = {key}: {}", describe(map.get(&key)))?;
        writeln!(out, "{map}")?;
    }

    info!("demo finished with {} entries in {} slots", map.size(), map.capacity());
    Ok(map)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn transcript(config: &DemoConfig) -> (String, ChainedHashMap<usize, String>) {
        let mut out = Vec::new();
        let map = run(config, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), map)
    }

    #[test]
    fn test_random_value_alphabet_and_length() {
        let mut rng = StdRng::seed_from_u64(1);
        for len in [1, 5, 32] {
            let value = random_value(&mut rng, len);
            assert_eq!(value.len(), len);
            assert!(value.chars().all(|c| c.is_ascii_lowercase()));
        }
        assert_eq!(random_value(&mut rng, 0), "");
    }

    #[test]
    fn test_random_value_is_reproducible() {
        let first = random_value(&mut StdRng::seed_from_u64(9), 12);
        let second = random_value(&mut StdRng::seed_from_u64(9), 12);
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_walkthrough() {
        let (text, map) = transcript(&DemoConfig::default());

        assert!(text.starts_with("Empty map:\n{}\nGenerated map:\n"));
        assert!(text.contains("key = 10: <absent>"));
        assert!(text.contains("key = 1: test"));
        assert!(text.contains("key = 3: <absent>"));
        assert!(text.contains("key = 12: <absent>"));

        // Inserting a fresh key and removing a missing one report no value
        assert!(text.contains("key = 10, previous value: <absent>"));
        assert!(text.contains("key = 11, previous value: <absent>"));
        assert!(text.contains("Remove element with key = 12:\nremoved value: <absent>"));

        // 0..10 plus 10 and 11, minus 3; the twelfth key doubled the table
        assert_eq!(map.size(), 11);
        assert_eq!(map.capacity(), 32);
        assert_eq!(map.get(&1), Some(&"test".to_string()));
        assert_eq!(map.get(&3), None);
        assert!(map.get(&11).is_some());
    }

    #[test]
    fn test_transcript_reports_replaced_and_removed_values() {
        let config = DemoConfig::default();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let generated: Vec<String> =
            (0..config.entries).map(|_| random_value(&mut rng, config.value_len)).collect();

        let (text, _) = transcript(&config);

        let replaced = format!(
            "Update element with key = 1:\nprevious value: {}\nkey = 1: test",
            generated[1]
        );
        assert!(text.contains(&replaced));

        let removed = format!("Remove element with key = 3:\nremoved value: {}", generated[3]);
        assert!(text.contains(&removed));
    }

    #[test]
    fn test_same_seed_same_transcript() {
        let config = DemoConfig { seed: 5, entries: 20, value_len: 6 };
        let (first, _) = transcript(&config);
        let (second, _) = transcript(&config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_larger_run_grows_table() {
        let (_, map) = transcript(&DemoConfig { seed: 3, entries: 40, value_len: 3 });
        // 10 and 11 already exist, 3 and 12 are removed
        assert_eq!(map.size(), 38);
        assert_eq!(map.capacity(), 64);
    }
}
