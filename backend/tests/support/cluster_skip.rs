//! `SKIP_TEST_CLUSTER` policy for suites that need embedded PostgreSQL.

const SKIP_VALUES: [&str; 3] = ["1", "true", "yes"];

/// Whether `SKIP_TEST_CLUSTER` asks for cluster-backed suites to be skipped.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER").is_ok_and(|value| {
        SKIP_VALUES
            .iter()
            .any(|accepted| value.trim().eq_ignore_ascii_case(accepted))
    })
}

/// Turn a cluster setup failure into a skipped test, or fail loudly when
/// skipping has not been requested.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    assert!(
        should_skip_test_cluster(),
        "embedded PostgreSQL unavailable ({reason}); export SKIP_TEST_CLUSTER=1 to skip"
    );
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
