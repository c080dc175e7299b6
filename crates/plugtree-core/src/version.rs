//! Plugin version specs and shorthand resolution.
//!
//! A spec is either an exact version (`v1.2.3`, pre-release allowed) or a
//! shorthand (`v1.2`, `v1`) that resolves to the highest matching candidate.

use crate::error::{PluginError, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// PluginVersionSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PluginVersionSpec {
    Exact(Version),
    Minor { major: u64, minor: u64 },
    Major { major: u64 },
}

impl PluginVersionSpec {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || PluginError::InvalidVersionSpec(raw.to_string());
        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(invalid());
        }

        let core = body.split(['-', '+']).next().unwrap_or(body);
        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() == 3 || core.len() != body.len() {
            return Version::parse(body)
                .map(PluginVersionSpec::Exact)
                .map_err(|_| invalid());
        }

        let numbers = parts
            .iter()
            .map(|p| {
                let leading_zero = p.len() > 1 && p.starts_with('0');
                if p.is_empty() || leading_zero || !p.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                p.parse::<u64>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<u64>>>()?;

        match numbers.as_slice() {
            [major] => Ok(PluginVersionSpec::Major { major: *major }),
            [major, minor] => Ok(PluginVersionSpec::Minor {
                major: *major,
                minor: *minor,
            }),
            _ => Err(invalid()),
        }
    }

    pub fn is_shorthand(&self) -> bool {
        !matches!(self, PluginVersionSpec::Exact(_))
    }

    fn covers(&self, candidate: &Version) -> bool {
        match self {
            PluginVersionSpec::Exact(v) => {
                v.major == candidate.major
                    && v.minor == candidate.minor
                    && v.patch == candidate.patch
                    && v.pre == candidate.pre
            }
            PluginVersionSpec::Minor { major, minor } => {
                candidate.major == *major && candidate.minor == *minor
            }
            PluginVersionSpec::Major { major } => candidate.major == *major,
        }
    }
}

impl fmt::Display for PluginVersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginVersionSpec::Exact(v) => write!(f, "v{v}"),
            PluginVersionSpec::Minor { major, minor } => write!(f, "v{major}.{minor}"),
            PluginVersionSpec::Major { major } => write!(f, "v{major}"),
        }
    }
}

impl std::str::FromStr for PluginVersionSpec {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PluginVersionSpec {
    type Error = PluginError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PluginVersionSpec> for String {
    fn from(spec: PluginVersionSpec) -> Self {
        spec.to_string()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Let shorthand specs select pre-release versions.
    #[serde(default)]
    pub include_prerelease: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no candidate version matches '{spec}'")]
pub struct VersionNotFound {
    pub spec: PluginVersionSpec,
}

/// Pick the concrete version `spec` refers to among `candidates`.
///
/// Exact specs must match a candidate (build metadata ignored). Shorthand
/// specs select the highest matching candidate by semver precedence;
/// pre-releases only qualify when `options.include_prerelease` is set.
pub fn resolve(
    spec: &PluginVersionSpec,
    candidates: &[Version],
    options: ResolveOptions,
) -> std::result::Result<Version, VersionNotFound> {
    let not_found = || VersionNotFound { spec: spec.clone() };

    if let PluginVersionSpec::Exact(_) = spec {
        return candidates
            .iter()
            .find(|c| spec.covers(c))
            .cloned()
            .ok_or_else(not_found);
    }

    candidates
        .iter()
        .filter(|c| spec.covers(c))
        .filter(|c| options.include_prerelease || c.pre.is_empty())
        .max_by(|a, b| a.cmp_precedence(b))
        .cloned()
        .ok_or_else(not_found)
}

/// The highest candidate, honouring the same pre-release rule as shorthand specs.
pub fn latest(candidates: &[Version], options: ResolveOptions) -> Option<Version> {
    candidates
        .iter()
        .filter(|c| options.include_prerelease || c.pre.is_empty())
        .max_by(|a, b| a.cmp_precedence(b))
        .cloned()
}

/// Parse a concrete version, accepting an optional leading `v`.
pub fn parse_version(raw: &str) -> Result<Version> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Ok(Version::parse(body)?)
}

pub fn display_version(version: &Version) -> String {
    format!("v{version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(raw: &[&str]) -> Vec<Version> {
        raw.iter().map(|r| parse_version(r).unwrap()).collect()
    }

    fn spec(raw: &str) -> PluginVersionSpec {
        PluginVersionSpec::parse(raw).unwrap()
    }

    #[test]
    fn parse_forms() {
        assert_eq!(spec("v1"), PluginVersionSpec::Major { major: 1 });
        assert_eq!(spec("v1.2"), PluginVersionSpec::Minor { major: 1, minor: 2 });
        assert_eq!(
            spec("v1.2.3"),
            PluginVersionSpec::Exact(Version::new(1, 2, 3))
        );
        assert_eq!(spec("2.0"), PluginVersionSpec::Minor { major: 2, minor: 0 });
        assert!(!spec("v1.2.3").is_shorthand());
        assert!(spec("v1.2").is_shorthand());
    }

    #[test]
    fn parse_prerelease_is_exact() {
        let parsed = spec("v1.2.3-rc.1");
        match parsed {
            PluginVersionSpec::Exact(v) => assert_eq!(v.pre.as_str(), "rc.1"),
            other => panic!("expected exact, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_malformed() {
        for raw in ["", "v", "latest", "v1.", "v1.x", "v1.2.3.4", "v-1", "v1.2-rc"] {
            assert!(
                PluginVersionSpec::parse(raw).is_err(),
                "expected invalid: {raw}"
            );
        }
    }

    #[test]
    fn leading_zeros_rejected_in_every_form() {
        for raw in ["v01", "v1.02", "v00.1", "v1.02.0"] {
            assert!(
                PluginVersionSpec::parse(raw).is_err(),
                "expected invalid: {raw}"
            );
        }
        assert_eq!(spec("v0"), PluginVersionSpec::Major { major: 0 });
        assert_eq!(spec("v1.0"), PluginVersionSpec::Minor { major: 1, minor: 0 });
    }

    #[test]
    fn display_restores_v_prefix() {
        assert_eq!(spec("1.2").to_string(), "v1.2");
        assert_eq!(spec("v3").to_string(), "v3");
        assert_eq!(spec("1.0.0-beta.2").to_string(), "v1.0.0-beta.2");
    }

    #[test]
    fn exact_spec_resolves_to_itself() {
        let candidates = versions(&["v1.0.0", "v1.2.3", "v2.0.0"]);
        for c in &candidates {
            let s = PluginVersionSpec::Exact(c.clone());
            assert_eq!(&resolve(&s, &candidates, ResolveOptions::default()).unwrap(), c);
        }
    }

    #[test]
    fn exact_spec_ignores_build_metadata() {
        let candidates = versions(&["v1.2.3+build.7"]);
        let got = resolve(&spec("v1.2.3"), &candidates, ResolveOptions::default()).unwrap();
        assert_eq!(got.build.as_str(), "build.7");
    }

    #[test]
    fn exact_spec_missing_fails() {
        let candidates = versions(&["v1.2.3"]);
        let err = resolve(&spec("v1.2.4"), &candidates, ResolveOptions::default()).unwrap_err();
        assert_eq!(err.spec, spec("v1.2.4"));
    }

    #[test]
    fn minor_shorthand_picks_highest_patch() {
        let candidates = versions(&["v1.2.0", "v1.2.10", "v1.2.9", "v1.3.0", "v0.2.99"]);
        let got = resolve(&spec("v1.2"), &candidates, ResolveOptions::default()).unwrap();
        assert_eq!(got, Version::new(1, 2, 10));
    }

    #[test]
    fn major_shorthand_picks_highest_minor_then_patch() {
        let candidates = versions(&["v1.9.1", "v1.10.0", "v1.10.2", "v2.0.0"]);
        let got = resolve(&spec("v1"), &candidates, ResolveOptions::default()).unwrap();
        assert_eq!(got, Version::new(1, 10, 2));
    }

    #[test]
    fn shorthand_skips_prerelease_by_default() {
        let candidates = versions(&["v1.2.0", "v1.2.1-rc.1"]);
        let got = resolve(&spec("v1.2"), &candidates, ResolveOptions::default()).unwrap();
        assert_eq!(got, Version::new(1, 2, 0));

        let opts = ResolveOptions {
            include_prerelease: true,
        };
        let got = resolve(&spec("v1.2"), &candidates, opts).unwrap();
        assert_eq!(got.to_string(), "1.2.1-rc.1");
    }

    #[test]
    fn shorthand_with_only_prereleases_fails() {
        let candidates = versions(&["v2.0.0-alpha.1"]);
        assert!(resolve(&spec("v2"), &candidates, ResolveOptions::default()).is_err());
    }

    #[test]
    fn empty_or_non_matching_candidates_fail() {
        for raw in ["v1", "v1.2", "v1.2.3"] {
            assert!(resolve(&spec(raw), &[], ResolveOptions::default()).is_err());
            let other = versions(&["v5.0.0"]);
            assert!(resolve(&spec(raw), &other, ResolveOptions::default()).is_err());
        }
    }

    #[test]
    fn latest_prefers_stable() {
        let candidates = versions(&["v1.0.0", "v1.1.0", "v2.0.0-rc.1"]);
        assert_eq!(
            latest(&candidates, ResolveOptions::default()),
            Some(Version::new(1, 1, 0))
        );
        assert!(latest(&[], ResolveOptions::default()).is_none());
    }

    #[test]
    fn spec_yaml_is_a_string() {
        let parsed: PluginVersionSpec = serde_yaml::from_str("v1.4").unwrap();
        assert_eq!(parsed, PluginVersionSpec::Minor { major: 1, minor: 4 });
        assert!(serde_yaml::from_str::<PluginVersionSpec>("nope").is_err());
    }
}
