//! Zero-Cost Safety Macros
//!
//! The water solver and the light sweeps index flat buffers in tight loops
//! where every index is derived from `x + y * width` of a grid whose size was
//! checked once at construction.
//!
//! In Debug mode: Normal bounds-checked access (panics with useful errors)
//! In Release mode: Unsafe unchecked access (zero overhead)
//!
//! Usage:
//! ```rust
//! use cellflow_engine::fast;
//!
//! let liquid = vec![0i16, 512, 300];
//! // Read: fast!(slice, [index])
//! let below = *fast!(liquid, [1]);
//! assert_eq!(below, 512);
//!
//! let mut field = vec![0u8; 3];
//! // Write: fast!(slice, [index] = value)
//! fast!(field, [2] = 200);
//! assert_eq!(field[2], 200);
//! ```

/// Bounds-checked in debug, unchecked in release.
///
/// Only use on indices that are in range by construction (grid index math
/// over a buffer whose length was asserted against `width * height`).
#[macro_export]
macro_rules! fast {
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}
