//! Environment-driven case counts for property suites.
//!
//! Local runs keep the default case count; CI can raise it without touching
//! the suites by exporting `PERCOLATE_PBT_CASES`.

use std::env::{self, VarError};

/// Environment variable overriding the number of proptest cases.
pub const PBT_CASES_ENV_KEY: &str = "PERCOLATE_PBT_CASES";

/// Resolves the case count for a property suite.
///
/// Invalid, zero or non-Unicode overrides are logged and ignored.
///
/// # Examples
/// ```
/// use percolate_test_support::proptest_profile::case_count;
///
/// assert!(case_count(64) > 0);
/// ```
#[must_use]
pub fn case_count(default_cases: u32) -> u32 {
    resolve_cases(env::var(PBT_CASES_ENV_KEY), default_cases)
}

fn resolve_cases(raw: Result<String, VarError>, default_cases: u32) -> u32 {
    let reason = match raw {
        Ok(raw) => match parse_cases(&raw) {
            Ok(cases) => return cases,
            Err(reason) => format!("{reason} (got `{raw}`)"),
        },
        Err(VarError::NotPresent) => return default_cases,
        Err(VarError::NotUnicode(raw)) => format!("not valid unicode (got {raw:?})"),
    };
    ::tracing::warn!(
        env = PBT_CASES_ENV_KEY,
        reason = %reason,
        "invalid property-test case override; using default",
    );
    default_cases
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}
