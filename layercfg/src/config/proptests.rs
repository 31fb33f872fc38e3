//! Property-based tests for the loading passes.

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::defaults::fill_defaults;
use super::environment::{apply_env, EnvSnapshot};
use super::sections::reconstruct;
use crate::duration::{format_duration, parse_duration, Duration};
use crate::field::{Field, FieldValue, Settings};

#[derive(Debug, Clone, Default, PartialEq)]
struct Payload {
    addr: String,
    timeout: Duration,
    retries: u32,
}

impl Settings for Payload {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::value("addr", &mut self.addr).env("ADDR").default("0.0.0.0"),
            Field::value("timeout", &mut self.timeout).env("TIMEOUT").default("30s"),
            Field::value("retries", &mut self.retries).env("RETRIES").default("3"),
        ]
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Formatting a duration and parsing it back is lossless
    #[test]
    fn duration_text_round_trip(nanos in any::<i64>()) {
        let text = format_duration(nanos);
        prop_assert_eq!(parse_duration(&text).unwrap(), nanos);
    }

    // JSON encoding of a duration is a string that decodes to the same value
    #[test]
    fn duration_json_round_trip(nanos in any::<i64>()) {
        let duration = Duration::from_nanos(nanos);
        let json = serde_json::to_string(&duration).unwrap();
        prop_assert!(json.starts_with('"'));
        let decoded: Duration = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, duration);
    }

    // A bare number is never a valid JSON duration
    #[test]
    fn duration_json_rejects_numbers(nanos in any::<i64>()) {
        prop_assert!(serde_json::from_str::<Duration>(&nanos.to_string()).is_err());
    }

    // Only "1" and "true" in any case are true
    #[test]
    fn bool_coercion(raw in "\\PC{0,8}") {
        let mut value = false;
        value.coerce(&raw).unwrap();
        prop_assert_eq!(value, raw == "1" || raw.eq_ignore_ascii_case("true"));
    }

    // Signed integers coerce from their own decimal form
    #[test]
    fn integer_coercion(n in any::<i64>()) {
        let mut value = 0i64;
        value.coerce(&n.to_string()).unwrap();
        prop_assert_eq!(value, n);
    }

    // Environment overrides defaults for every set variable
    #[test]
    fn env_overrides_default(addr in "[a-z0-9.]{1,16}", retries in any::<u32>()) {
        let env = EnvSnapshot::new()
            .with("APP_0_ADDR", addr.clone())
            .with("APP_0_RETRIES", retries.to_string());
        let rebuilt = reconstruct::<Payload>("APP", None, &env).unwrap().unwrap();
        prop_assert_eq!(&rebuilt[0].addr, &addr);
        prop_assert_eq!(rebuilt[0].retries, retries);
        prop_assert_eq!(rebuilt[0].timeout, Duration::from_secs(30));
    }

    // Filling defaults twice changes nothing
    #[test]
    fn defaults_idempotent(addr in "[a-z]{0,8}", retries in 0u32..10) {
        let mut payload = Payload {
            addr,
            retries,
            ..Payload::default()
        };
        fill_defaults(&mut payload).unwrap();
        let once = payload.clone();
        fill_defaults(&mut payload).unwrap();
        apply_env(&mut payload, &EnvSnapshot::new()).unwrap();
        prop_assert_eq!(payload, once);
    }

    // The rebuilt list has one element per distinct index, in ascending order
    #[test]
    fn sections_one_element_per_index(indices in prop::collection::vec(0usize..64, 1..16)) {
        let env: EnvSnapshot = indices
            .iter()
            .map(|index| (format!("APP_{index}_ADDR"), format!("host{index}")))
            .collect();
        let rebuilt = reconstruct::<Payload>("APP", None, &env).unwrap().unwrap();

        let distinct: BTreeSet<usize> = indices.into_iter().collect();
        let expected: Vec<String> = distinct.iter().map(|index| format!("host{index}")).collect();
        let actual: Vec<String> = rebuilt.into_iter().map(|payload| payload.addr).collect();
        prop_assert_eq!(actual, expected);
    }
}
