//! Server version detection.
//!
//! Firebird reports its version as a build tag followed by a dotted
//! number and a product name:
//!
//! ```text
//! LI-V4.0.1.2692 Firebird 4.0
//! ─┬── ───┬──── ─────┬──────
//!  │      │          └── product
//!  │      └── major.minor.patch.build
//!  └── platform + build type marker
//! ```
//!
//! Only the leading `major.minor.patch` matters for dialect selection.

use nom::{
    character::complete::{char, digit1},
    combinator::map_res,
    sequence::tuple,
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::error::{DialectError, DialectResult};

/// Build-tag markers that precede the version number. The first letter is
/// the platform (Linux, Windows).
const BUILD_MARKERS: &[&str] = &["LI-V", "WI-V"];

/// A parsed `major.minor.patch` engine version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EngineVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl EngineVersion {
    /// First release with `offset ... rows` / `fetch first ... rows only`.
    pub const MODERN_PAGING: EngineVersion = EngineVersion::new(3, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a vendor version string such as `LI-V2.5.9.27139 Firebird 2.5`.
    ///
    /// The text between the first build marker and the next space must
    /// start with `major.minor.patch`. A string without a marker is taken
    /// as a whole, so a bare `4.0.1` also parses.
    pub fn parse_server_version(raw: &str) -> DialectResult<Self> {
        let segment = version_segment(raw);
        match parse_triple(segment) {
            Ok((_, version)) => Ok(version),
            Err(_) => Err(DialectError::unparseable(raw)),
        }
    }
}

impl std::fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl std::str::FromStr for EngineVersion {
    type Err = DialectError;

    /// Accepts a plain `major.minor.patch` or a full vendor string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match parse_triple(trimmed) {
            Ok(("", version)) => Ok(version),
            _ => EngineVersion::parse_server_version(trimmed),
        }
    }
}

/// Ask the connection for its version and parse it.
///
/// An error or empty answer from the connection is `VersionUnavailable`;
/// a string in the wrong shape is `VersionUnparseable`.
pub fn resolve_version<C: Connection + ?Sized>(conn: &C) -> DialectResult<EngineVersion> {
    let raw = conn
        .server_version_string()
        .map_err(|e| DialectError::VersionUnavailable(e.to_string()))?;
    if raw.trim().is_empty() {
        return Err(DialectError::VersionUnavailable(
            "server returned an empty version string".to_string(),
        ));
    }
    EngineVersion::parse_server_version(&raw)
}

/// The text between the first build marker and the next space.
fn version_segment(raw: &str) -> &str {
    let after = BUILD_MARKERS
        .iter()
        .filter_map(|marker| raw.find(marker).map(|at| at + marker.len()))
        .min()
        .map(|start| &raw[start..])
        .unwrap_or(raw);
    match after.find(' ') {
        Some(end) => &after[..end],
        None => after,
    }
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

/// Parse a leading `major.minor.patch`.
fn parse_triple(input: &str) -> IResult<&str, EngineVersion> {
    let (input, (major, _, minor, _, patch)) =
        tuple((number, char('.'), number, char('.'), number))(input)?;
    Ok((input, EngineVersion::new(major, minor, patch)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_linux_build() {
        let v = EngineVersion::parse_server_version("LI-V3.0.0.33348 Firebird 3.0").unwrap();
        assert_eq!(v, EngineVersion::new(3, 0, 0));
    }

    #[test]
    fn test_parse_legacy_build() {
        let v = EngineVersion::parse_server_version("LI-V2.5.9.27139 Firebird 2.5").unwrap();
        assert_eq!(v, EngineVersion::new(2, 5, 9));
        assert!(v < EngineVersion::MODERN_PAGING);
    }

    #[test]
    fn test_parse_marker_mid_string() {
        let v = EngineVersion::parse_server_version("build LI-V2.5.9 more").unwrap();
        assert_eq!(v, EngineVersion::new(2, 5, 9));
    }

    #[test]
    fn test_parse_windows_build() {
        let v = EngineVersion::parse_server_version("WI-V4.0.2.2816 Firebird 4.0").unwrap();
        assert_eq!(v, EngineVersion::new(4, 0, 2));
    }

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(
            EngineVersion::parse_server_version("5.0.1").unwrap(),
            EngineVersion::new(5, 0, 1)
        );
    }

    #[test]
    fn test_parse_without_trailing_space() {
        assert_eq!(
            EngineVersion::parse_server_version("LI-V4.0.1.2692").unwrap(),
            EngineVersion::new(4, 0, 1)
        );
    }

    #[test]
    fn test_unparseable_keeps_raw() {
        for raw in ["LI-V2.5 Firebird", "LI-Vx.y.z", "Firebird"] {
            match EngineVersion::parse_server_version(raw) {
                Err(DialectError::VersionUnparseable { raw: kept }) => assert_eq!(kept, raw),
                other => panic!("expected VersionUnparseable for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_ordering() {
        assert!(EngineVersion::new(2, 5, 9) < EngineVersion::new(3, 0, 0));
        assert!(EngineVersion::new(3, 0, 0) >= EngineVersion::MODERN_PAGING);
        assert!(EngineVersion::new(3, 0, 10) > EngineVersion::new(3, 0, 9));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("4.0.1".parse::<EngineVersion>().unwrap(), EngineVersion::new(4, 0, 1));
        assert_eq!(
            "LI-V2.5.9.1 Firebird 2.5".parse::<EngineVersion>().unwrap(),
            EngineVersion::new(2, 5, 9)
        );
        assert!("four".parse::<EngineVersion>().is_err());
    }
}
