//! Property tests for hostname canonicalization.

use debloat::host::normalize_host;
use proptest::prelude::*;

/// Plausible registrable host names: lowercase-ish labels joined by dots.
fn host_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z0-9]{1,12}", 1..4).prop_map(|labels| labels.join("."))
}

proptest! {
    #[test]
    fn normalization_is_idempotent(host in host_strategy()) {
        let once = normalize_host(&host);
        prop_assert_eq!(normalize_host(&once), once);
    }

    #[test]
    fn output_is_lowercase(host in host_strategy()) {
        let normalized = normalize_host(&host);
        prop_assert_eq!(normalized.to_lowercase(), normalized);
    }

    #[test]
    fn www_prefix_and_trailing_dot_are_equivalent(host in host_strategy()) {
        prop_assume!(!host.to_lowercase().starts_with("www."));
        let base = normalize_host(&host);
        prop_assert_eq!(normalize_host(&format!("www.{}", host)), base.clone());
        prop_assert_eq!(normalize_host(&format!("{}.", host)), base.clone());
        prop_assert_eq!(normalize_host(&format!("https://www.{}/path", host)), base);
    }

    #[test]
    fn explicit_port_is_stripped(host in host_strategy(), port in 1u16..u16::MAX) {
        prop_assert_eq!(
            normalize_host(&format!("{}:{}", host, port)),
            normalize_host(&host)
        );
    }

    #[test]
    fn subdomains_stay_distinct(host in host_strategy(), label in "[a-z0-9]{1,12}") {
        prop_assume!(label != "www");
        let sub = format!("{}.{}", label, host);
        prop_assert_ne!(normalize_host(&sub), normalize_host(&host));
    }

    #[test]
    fn never_panics_on_arbitrary_input(input in ".{0,64}") {
        let _ = normalize_host(&input);
    }
}
