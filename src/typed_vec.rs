// Declares a vector that can only be indexed by one particular newtype index.
//
// The index must be a tuple struct wrapping a `usize`, declared separately so
// that it can carry its own docs and visibility. Its `Debug` output is the
// given prefix followed by the raw index, like `p_3`.
macro_rules! typed_vec {
    ($vis:vis struct $vec_name:ident[$idx_name:ident] as $dbg_prefix:literal) => {
        #[derive(Clone, Hash, PartialEq, Eq)]
        $vis struct $vec_name<T> {
            inner: Vec<T>,
        }

        impl std::fmt::Debug for $idx_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($dbg_prefix, "_{}"), self.0)
            }
        }

        // Not every vector uses every method.
        #[allow(dead_code)]
        impl<T> $vec_name<T> {
            fn with_capacity(cap: usize) -> Self {
                Self {
                    inner: Vec::with_capacity(cap),
                }
            }

            fn indices(&self) -> impl Iterator<Item = $idx_name> {
                (0..self.inner.len()).map($idx_name)
            }

            fn len(&self) -> usize {
                self.inner.len()
            }

            /// Adds a new element, returning its index.
            fn push(&mut self, elt: T) -> $idx_name {
                self.inner.push(elt);
                $idx_name(self.inner.len() - 1)
            }

            fn iter(&self) -> impl Iterator<Item = ($idx_name, &T)> + '_ {
                self.inner
                    .iter()
                    .enumerate()
                    .map(|(idx, t)| ($idx_name(idx), t))
            }
        }

        impl<T: Clone> $vec_name<T> {
            /// `size` copies of `elt`, one for each of the first `size` indices.
            fn filled(elt: T, size: usize) -> Self {
                Self {
                    inner: vec![elt; size],
                }
            }
        }

        impl<T> std::ops::Index<$idx_name> for $vec_name<T> {
            type Output = T;

            fn index(&self, index: $idx_name) -> &T {
                &self.inner[index.0]
            }
        }

        impl<T> std::ops::IndexMut<$idx_name> for $vec_name<T> {
            fn index_mut(&mut self, index: $idx_name) -> &mut T {
                &mut self.inner[index.0]
            }
        }

        impl<T: std::fmt::Debug> std::fmt::Debug for $vec_name<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_map().entries(self.iter()).finish()
            }
        }
    };
}
