//! Graded internal consistency checks.
//!
//! Every check has a level; it is only evaluated when [`GOURD_ASSERT_LEVEL_DEFINITION`] is at
//! least that level. Release builds keep the cheap checks, tests and the `debug-checks` feature
//! turn on the more expensive ones.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const GOURD_ASSERT_LEVEL_DEFINITION: u8 = GOURD_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const GOURD_ASSERT_LEVEL_DEFINITION: u8 = GOURD_ASSERT_MODERATE;

pub const GOURD_ASSERT_SIMPLE: u8 = 1;
pub const GOURD_ASSERT_MODERATE: u8 = 2;
pub const GOURD_ASSERT_ADVANCED: u8 = 3;
pub const GOURD_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! gourd_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::GOURD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GOURD_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gourd_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::GOURD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GOURD_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gourd_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::GOURD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GOURD_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gourd_assert_eq_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::GOURD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GOURD_ASSERT_MODERATE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gourd_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::GOURD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GOURD_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gourd_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::GOURD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GOURD_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
