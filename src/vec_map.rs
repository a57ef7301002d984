use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// The trait that must be implemented by keys in an `VecMap`
pub trait NumericId: Copy {
    fn to_index(self) -> usize;
    fn from_index(index: usize) -> Self;
}

/// A dense map from (numeric id) keys to values
///
/// Every key below `len()` is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecMap<K: NumericId, V> {
    _marker: PhantomData<fn(K)>,
    inner: Vec<V>,
}

impl<K: NumericId, V> Index<K> for VecMap<K, V> {
    type Output = V;

    #[inline]
    fn index(&self, index: K) -> &Self::Output {
        &self.inner[index.to_index()]
    }
}

impl<K: NumericId, V> IndexMut<K> for VecMap<K, V> {
    #[inline]
    fn index_mut(&mut self, index: K) -> &mut Self::Output {
        &mut self.inner[index.to_index()]
    }
}

impl<K: NumericId, V> VecMap<K, V> {
    pub fn new(inner: Vec<V>) -> Self {
        Self {
            _marker: PhantomData,
            inner,
        }
    }

    /// A map with `len` keys, all mapped to `value`
    pub fn filled(len: usize, value: V) -> Self
    where
        V: Clone,
    {
        Self::new(vec![value; len])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Checked lookup, for keys that may not be in range
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.inner.get(key.to_index())
    }

    /// The values, in key order
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        &self.inner
    }
}
