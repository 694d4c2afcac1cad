macro_rules! hidden_item {
    ( $( $item:item )* ) => {
        $(
            #[doc(hidden)]
            $item
        )*
    };
}

/// Build a [`Test`](crate::Test) from a test function.
///
/// The function may return `()` or `Result<(), E>` where `E: Into<anyhow::Error>`.
/// The test is named after the path used to refer to it.
///
/// ```
/// fn adds_up() {
///     assert_eq!(1 + 1, 2);
/// }
///
/// fn later() -> anyhow::Result<()> {
///     Ok(())
/// }
///
/// static TESTS: &[suitcase::Test] = &[
///     suitcase::test!(adds_up),
///     suitcase::test!(#[ignore = "not implemented"] later),
/// ];
/// # fn main() {
/// # assert_eq!(TESTS[0].name, "adds_up");
/// # assert!(TESTS[1].ignored);
/// # }
/// ```
#[macro_export]
macro_rules! test {
    ( #[ignore = $reason:literal] $path:path ) => {
        $crate::__test!($path, true, $crate::_test_reexports::Some($reason))
    };
    ( #[ignore] $path:path ) => {
        $crate::__test!($path, true, $crate::_test_reexports::None)
    };
    ( $path:path ) => {
        $crate::__test!($path, false, $crate::_test_reexports::None)
    };
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __test {
    ( $path:path, $ignored:expr, $reason:expr ) => {
        $crate::_test_reexports::Test {
            name: $crate::_test_reexports::stringify!($path),
            ignored: $ignored,
            ignore_reason: $reason,
            run: {
                fn __suitcase_test() -> $crate::_test_reexports::Result<()> {
                    $crate::_test_reexports::Termination::into_result($path())
                }
                __suitcase_test
            },
        }
    };
}

/// Declare a named test suite.
///
/// The suite is a unit struct implementing [`SuiteRegistry`](crate::SuiteRegistry).
/// Members are test case names, listed in the order they are run and reported.
/// At least one member is required.
///
/// ```
/// suitcase::test_suite! {
///     /// Everything about orders.
///     pub struct OrderSuite: "Order Test Suite" {
///         OrderTest,
///         InvoiceTest,
///     }
/// }
///
/// # fn main() {
/// use suitcase::SuiteRegistry as _;
/// let desc = OrderSuite.describe();
/// assert_eq!(desc.display_name(), "Order Test Suite");
/// assert_eq!(desc.members().len(), 2);
/// # }
/// ```
#[macro_export]
macro_rules! test_suite {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident : $display_name:literal {
            $first:ident $(, $rest:ident)* $(,)?
        }
    ) => {
        $crate::test_suite! {
            $(#[$attr])*
            $vis struct $name : $display_name {
                $crate::_test_reexports::stringify!($first)
                $(, $crate::_test_reexports::stringify!($rest))*
            }
        }
    };

    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident : $display_name:literal {
            $first:expr $(, $rest:expr)* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::SuiteRegistry for $name {
            fn describe(&self) -> $crate::SuiteDescriptor {
                $crate::SuiteDescriptor::__declare($display_name, &[$first $(, $rest)*])
            }
        }
    };
}

/// Generate the `main` function of a test binary built with `harness = false`.
///
/// ```ignore
/// suitcase::test_main! {
///     suites: [ProductStockTestSuite],
///     cases: [PRODUCT_STOCK_TEST],
/// }
/// ```
#[macro_export]
macro_rules! test_main {
    (
        suites: [ $($suite:path),+ $(,)? ],
        cases: [ $($case:path),* $(,)? ] $(,)?
    ) => {
        fn main() {
            let status = $crate::test_main(&[$(&$suite),+], &[$(&$case),*]);
            status.exit();
        }
    };
}
