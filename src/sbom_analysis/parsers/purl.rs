/// Ecosystem assumed for CycloneDX and SPDX components without a usable package-URL
pub const DEFAULT_ECOSYSTEM: &str = "npm";

/// Extracts the type segment of a package-URL (`pkg:<type>/...`), lowercased
///
/// Returns `None` when the string is not a package-URL or the type is empty.
pub fn ecosystem_from_purl(purl: &str) -> Option<String> {
    let purl = purl.trim();
    let scheme = purl.get(..4)?;
    if !scheme.eq_ignore_ascii_case("pkg:") {
        return None;
    }

    // Tolerate the non-canonical `pkg://type/...` spelling.
    let rest = purl[4..].trim_start_matches('/');
    let (ty, _) = rest.split_once('/')?;
    if ty.is_empty() {
        return None;
    }
    Some(ty.to_ascii_lowercase())
}

/// Ecosystem of a component: purl type when available, otherwise [`DEFAULT_ECOSYSTEM`]
pub fn ecosystem_or_default(purl: Option<&str>) -> String {
    purl.and_then(ecosystem_from_purl)
        .unwrap_or_else(|| DEFAULT_ECOSYSTEM.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecosystem_from_purl() {
        assert_eq!(
            ecosystem_from_purl("pkg:npm/lodash@4.17.21"),
            Some("npm".to_string())
        );
        assert_eq!(
            ecosystem_from_purl("pkg:pypi/requests@2.31.0"),
            Some("pypi".to_string())
        );
        assert_eq!(
            ecosystem_from_purl("pkg:maven/org.apache.logging.log4j/log4j-core@2.14.1"),
            Some("maven".to_string())
        );
        assert_eq!(
            ecosystem_from_purl("PKG:Cargo/serde@1.0.0"),
            Some("cargo".to_string())
        );
    }

    #[test]
    fn test_ecosystem_from_scoped_npm_purl() {
        assert_eq!(
            ecosystem_from_purl("pkg:npm/%40angular/core@17.0.0"),
            Some("npm".to_string())
        );
    }

    #[test]
    fn test_invalid_purls() {
        assert_eq!(ecosystem_from_purl(""), None);
        assert_eq!(ecosystem_from_purl("npm/lodash"), None);
        assert_eq!(ecosystem_from_purl("pkg:lodash"), None);
        assert_eq!(ecosystem_from_purl("pkg:/lodash"), None);
        assert_eq!(ecosystem_from_purl("pk"), None);
    }

    #[test]
    fn test_ecosystem_or_default() {
        assert_eq!(ecosystem_or_default(Some("pkg:golang/github.com/x/y@v1")), "golang");
        assert_eq!(ecosystem_or_default(Some("not-a-purl")), DEFAULT_ECOSYSTEM);
        assert_eq!(ecosystem_or_default(None), DEFAULT_ECOSYSTEM);
    }
}
