use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Value slot of an [`IndexMultiMap`] key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<V> {
    /// Key set exactly once
    One(V),
    /// Key set two or more times, values in insertion order
    Many(Vec<V>),
}

impl<V> Slot<V> {
    /// All values of the slot as a slice
    pub fn as_slice(&self) -> &[V] {
        match self {
            Slot::One(v) => std::slice::from_ref(v),
            Slot::Many(vs) => vs,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// A slot always holds at least one value
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First value set for the key
    pub fn first(&self) -> &V {
        match self {
            Slot::One(v) => v,
            Slot::Many(vs) => &vs[0],
        }
    }

    fn push(&mut self, value: V) {
        let values = match std::mem::replace(self, Slot::Many(Vec::new())) {
            Slot::One(first) => vec![first, value],
            Slot::Many(mut values) => {
                values.push(value);
                values
            }
        };
        *self = Slot::Many(values);
    }
}

/// Map whose keys can own several values.
///
/// Setting a key once stores a bare value; setting it again promotes the
/// slot to an ordered list. Keys iterate in first-insertion order.
#[derive(Debug, Clone)]
pub struct IndexMultiMap<K, V> {
    positions: HashMap<K, usize>,
    entries: Vec<(K, Slot<V>)>,
}

impl<K, V> Default for IndexMultiMap<K, V> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> IndexMultiMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` under `key`, keeping any values already there.
    pub fn set(&mut self, key: K, value: V) {
        match self.positions.get(&key) {
            Some(&index) => self.entries[index].1.push(value),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, Slot::One(value)));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Slot<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(key).map(|&index| &self.entries[index].1)
    }

    /// All values under `key`; empty if the key is absent.
    pub fn values_of<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).map(Slot::as_slice).unwrap_or(&[])
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(key)
    }

    /// Remove a key and all of its values. Remaining keys keep their order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Slot<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.positions.remove(key)?;
        let (_, slot) = self.entries.remove(index);
        for position in self.positions.values_mut() {
            if *position > index {
                *position -= 1;
            }
        }
        Some(slot)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Slot<V>)> {
        self.entries.iter().map(|(k, slot)| (k, slot))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.entries.clear();
    }
}

impl<K: Eq + Hash + Clone, V> Extend<(K, V)> for IndexMultiMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for IndexMultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
