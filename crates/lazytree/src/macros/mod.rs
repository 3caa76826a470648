#[doc(hidden)]
macro_rules! cfg_profiler {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "profiler")]
            $item
        )*
    }
}
