use ordered_float::OrderedFloat;
use tracing::trace;

/// Runtime metrics exposed by the chart's derived-value caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-entry cache: holds the value for the last key it was asked about.
#[derive(Debug)]
pub(crate) struct Memo<K, V> {
    name: &'static str,
    entry: Option<(K, V)>,
    hits: u64,
    misses: u64,
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            entry: None,
            hits: 0,
            misses: 0,
        }
    }

    pub(crate) fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some((cached_key, value)) = &self.entry {
            if *cached_key == key {
                self.hits = self.hits.saturating_add(1);
                trace!(memo = self.name, hits = self.hits, "memo hit");
                return value.clone();
            }
        }
        self.misses = self.misses.saturating_add(1);
        trace!(memo = self.name, misses = self.misses, "memo miss");
        let value = compute();
        self.entry = Some((key, value.clone()));
        value
    }

    pub(crate) fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Inputs the layout depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LayoutMemoKey {
    pub(crate) converter_generation: u64,
    pub(crate) settings_generation: u64,
    pub(crate) width: OrderedFloat<f64>,
    pub(crate) height: OrderedFloat<f64>,
}

/// Inputs the axis descriptors depend on.
///
/// `layout_stamp` changes whenever the layout memo produces a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct AxisMemoKey {
    pub(crate) converter_generation: u64,
    pub(crate) layout_stamp: u64,
    pub(crate) theme_generation: u64,
}
