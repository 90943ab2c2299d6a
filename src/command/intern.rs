use indexmap::IndexSet;

/// An insertion-ordered, deduplicating string pool.
///
/// Backs the enum-value pool and postfix pool the command catalog encoder
/// builds (§4.4.5, §9.3). `IndexSet` rather than a bare `HashSet` is
/// load-bearing here: iteration order must match insertion order exactly so
/// that two independent encoders given the same catalog produce
/// byte-identical pools (P6) — a plain hash set's iteration order is an
/// implementation detail, not a contract.
#[derive(Default)]
pub struct InternTable {
    values: IndexSet<String>,
}

impl InternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `value`, returning its index. Returns the existing index if
    /// this value was already interned.
    pub fn intern(&mut self, value: &str) -> u32 {
        if let Some(index) = self.values.get_index_of(value) {
            return index as u32;
        }
        let (index, _) = self.values.insert_full(value.to_owned());
        index as u32
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index_of(&self, value: &str) -> Option<u32> {
        self.values.get_index_of(value).map(|i| i as u32)
    }

    /// The pool's final contents, in insertion order — exactly what gets
    /// written to the wire.
    pub fn into_values(self) -> Vec<String> {
        self.values.into_iter().collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// The width an index into a pool occupies on the wire, determined by the
/// pool's *final* size — both encoder and decoder compute this from the
/// same quantity (§4.4.1).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    pub fn for_pool_size(pool_len: usize) -> Self {
        if pool_len < 256 {
            Self::U8
        } else if pool_len < 65536 {
            Self::U16
        } else {
            Self::U32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_boundaries() {
        assert_eq!(IndexWidth::for_pool_size(255), IndexWidth::U8);
        assert_eq!(IndexWidth::for_pool_size(256), IndexWidth::U16);
        assert_eq!(IndexWidth::for_pool_size(65535), IndexWidth::U16);
        assert_eq!(IndexWidth::for_pool_size(65536), IndexWidth::U32);
    }

    #[test]
    fn intern_deduplicates_and_preserves_first_occurrence_order() {
        let mut table = InternTable::new();
        assert_eq!(table.intern("a"), 0);
        assert_eq!(table.intern("b"), 1);
        assert_eq!(table.intern("a"), 0);
        assert_eq!(table.into_values(), vec!["a".to_string(), "b".to_string()]);
    }
}
