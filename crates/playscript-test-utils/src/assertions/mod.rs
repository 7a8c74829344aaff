//! Common assertion macros for PlayScript validation tests

/// Assert that a result contains an error with the given category
#[macro_export]
macro_rules! assert_has_error_code {
    ($result:expr, $category:expr) => {
        assert!(
            $result.errors.iter().any(|e| e.category == $category),
            "Expected error with category '{}', but got: {:?}",
            $category,
            $result.errors.iter().map(|e| e.category.as_str()).collect::<Vec<_>>()
        );
    };
}

/// Assert that a result contains a warning with the given category
#[macro_export]
macro_rules! assert_has_warning_code {
    ($result:expr, $category:expr) => {
        assert!(
            $result.warnings.iter().any(|w| w.category == $category),
            "Expected warning with category '{}', but got: {:?}",
            $category,
            $result.warnings.iter().map(|w| w.category.as_str()).collect::<Vec<_>>()
        );
    };
}

/// Assert that there are no diagnostics (errors or warnings) with the given category
#[macro_export]
macro_rules! assert_no_violations {
    ($result:expr, $category:expr) => {
        let violations: Vec<_> = $result.iter().filter(|d| d.category == $category).collect();
        assert!(
            violations.is_empty(),
            "Expected no diagnostics with category '{}', but found: {:?}",
            $category,
            violations.iter().map(|d| &d.message).collect::<Vec<_>>()
        );
    };
}

/// Assert that there are exactly N diagnostics with the given category
#[macro_export]
macro_rules! assert_violation_count {
    ($result:expr, $category:expr, $count:expr) => {
        let found = $result.count_of($category);
        assert_eq!(
            found,
            $count,
            "Expected {} diagnostics with category '{}', found {}: {:?}",
            $count,
            $category,
            found,
            $result.iter().map(|d| d.to_string()).collect::<Vec<_>>()
        );
    };
}

/// Assert that a result holds neither errors nor warnings
#[macro_export]
macro_rules! assert_clean {
    ($result:expr) => {
        assert!(
            $result.is_empty(),
            "Expected no diagnostics, but got: {:?}",
            $result.iter().map(|d| d.to_string()).collect::<Vec<_>>()
        );
    };
}
