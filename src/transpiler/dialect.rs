use crate::version::EngineVersion;

/// Paging syntax, chosen once per connection from the engine version.
///
/// * `Legacy` (before 3.0): `select first <n> skip <m> ...`
/// * `Modern` (3.0 and later): `... offset <m> rows fetch first <n> rows only`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Paging {
    Legacy,
    #[default]
    Modern,
}

impl Paging {
    /// Pick the paging syntax a server of this version understands.
    pub fn for_version(version: &EngineVersion) -> Self {
        if *version < EngineVersion::MODERN_PAGING {
            Paging::Legacy
        } else {
            Paging::Modern
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Paging::Legacy)
    }

    /// Tokens placed directly after `select`, before `distinct` and the
    /// column list.
    pub fn leading(&self, limit: Option<i64>, offset: Option<i64>) -> Option<String> {
        if !self.is_legacy() {
            return None;
        }
        let mut tokens = Vec::new();
        if let Some(n) = limit {
            tokens.push(format!("first {}", n));
        }
        if let Some(n) = offset {
            tokens.push(format!("skip {}", n));
        }
        (!tokens.is_empty()).then(|| tokens.join(" "))
    }

    /// Clauses appended after `order by`.
    pub fn trailing(&self, limit: Option<i64>, offset: Option<i64>) -> Option<String> {
        if self.is_legacy() {
            return None;
        }
        let mut clauses = Vec::new();
        if let Some(n) = offset {
            clauses.push(format!("offset {} rows", n));
        }
        if let Some(n) = limit {
            clauses.push(format!("fetch first {} rows only", n));
        }
        (!clauses.is_empty()).then(|| clauses.join(" "))
    }
}

impl std::fmt::Display for Paging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Paging::Legacy => write!(f, "legacy (first/skip)"),
            Paging::Modern => write!(f, "modern (offset/fetch)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_boundary() {
        assert_eq!(Paging::for_version(&EngineVersion::new(2, 5, 9)), Paging::Legacy);
        assert_eq!(Paging::for_version(&EngineVersion::new(3, 0, 0)), Paging::Modern);
        assert_eq!(Paging::for_version(&EngineVersion::new(4, 0, 1)), Paging::Modern);
    }

    #[test]
    fn test_forms_are_exclusive() {
        assert_eq!(Paging::Legacy.trailing(Some(1), Some(2)), None);
        assert_eq!(Paging::Modern.leading(Some(1), Some(2)), None);
    }

    #[test]
    fn test_token_order() {
        assert_eq!(
            Paging::Legacy.leading(Some(10), Some(5)).as_deref(),
            Some("first 10 skip 5")
        );
        assert_eq!(
            Paging::Modern.trailing(Some(10), Some(5)).as_deref(),
            Some("offset 5 rows fetch first 10 rows only")
        );
        assert_eq!(Paging::Modern.trailing(None, None), None);
    }
}
