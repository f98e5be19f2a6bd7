use std::collections::HashMap;
use std::fs::File;
use std::hash::Hash;
use std::io::Read;

use log::warn;
use serde::de::DeserializeOwned;

pub trait WithPrimaryKey<K> {
    fn primary_key(&self) -> K;
}

pub trait PrimaryKeyTable<K, V>
where
    V: WithPrimaryKey<K>,
{
    fn get(&self, key: &K) -> Option<&V>;
    fn get_all(&self) -> Vec<&V>;
    fn insert(&mut self, value: V);
}

pub struct InMemoryPrimaryKeyTable<K, V> {
    map: HashMap<K, V>,
}

impl<K, V> InMemoryPrimaryKeyTable<K, V>
where
    K: Eq + Hash,
    V: WithPrimaryKey<K>,
{
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<K, V> Default for InMemoryPrimaryKeyTable<K, V>
where
    K: Eq + Hash,
    V: WithPrimaryKey<K>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PrimaryKeyTable<K, V> for InMemoryPrimaryKeyTable<K, V>
where
    K: Eq + Hash,
    V: WithPrimaryKey<K>,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn get_all(&self) -> Vec<&V> {
        self.map.values().collect()
    }

    fn insert(&mut self, value: V) {
        self.map.insert(value.primary_key(), value);
    }
}

/// Reads a tabular file into `table`, skipping rows that fail to
/// deserialize and logging a warning for each (§4.1's "malformed row →
/// skipped with logged warning" contract). Returns the number of rows
/// skipped.
pub fn read_csv<T, K, V, R>(table: &mut T, file_name: &str, reader: R) -> std::io::Result<usize>
where
    T: PrimaryKeyTable<K, V>,
    V: WithPrimaryKey<K>,
    V: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut skipped = 0;
    for (row_index, row) in csv_reader.deserialize::<V>().enumerate() {
        match row {
            Ok(value) => table.insert(value),
            Err(error) => {
                warn!("{file_name}: skipping malformed row {row_index}: {error}");
                skipped += 1;
            }
        }
    }
    Ok(skipped)
}

/// Opens `file_path` and loads it via [`read_csv`]. Returns `Ok(None)` if
/// the file does not exist (some tabular files, like `calendar_dates.txt`,
/// are optional per GTFS and per §4.1's "optional transfers" wording).
pub fn read_csv_file<T, K, V>(table: &mut T, file_path: &std::path::Path) -> std::io::Result<Option<usize>>
where
    T: PrimaryKeyTable<K, V>,
    V: WithPrimaryKey<K>,
    V: DeserializeOwned,
{
    match File::open(file_path) {
        Ok(file) => {
            let file_name = file_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            read_csv(table, &file_name, file).map(Some)
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}
