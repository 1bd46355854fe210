/// Parallel or sequential row iteration, chosen by the `parallel` feature.
///
/// With the feature on this is rayon's prelude. Without it, `into_par_iter()`
/// is provided for every `IntoIterator` and simply calls `into_iter()`, so
/// the `flat_map(..).collect()` chains in the index engine run unchanged.
#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Sequential stand-in for rayon's `IntoParallelIterator`
    pub trait IntoParallelIterator {
        type Iter;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
