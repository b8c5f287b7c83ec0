use crate::sbom_analysis::domain::{Component, Vulnerability};
use crate::sbom_analysis::policies::PolicyFlags;
use chrono::{DateTime, Datelike, NaiveDate, Utc};

const BASE_SCORE: i32 = 100;
const KNOWN_EXPLOITED_PENALTY: i32 = 30;
const LOW_POPULARITY_THRESHOLD: u64 = 100;
const LOW_POPULARITY_PENALTY: i32 = 5;
const UNAPPROVED_LICENSE_PENALTY: i32 = 10;
const INACTIVE_MAINTAINER_PENALTY: i32 = 5;

/// Minimum score of a component with no vulnerabilities and no exploit signal
pub const CLEAN_COMPONENT_FLOOR: u8 = 80;

/// RiskScorer computes deterministic 0..=100 risk scores (higher is safer)
///
/// Starting from 100, penalties are subtracted in this order:
/// 1. Highest CVSS score across vulnerabilities (banded, up to -50)
/// 2. Any known-exploited vulnerability (-30)
/// 3. Highest exploit-prediction score (-20 above 0.5, -10 above 0.2)
/// 4. Release age (-15 over 60 months, -10 over 36, -5 over 24)
/// 5. Popularity below 100 (-5)
/// 6. Policy flags when supplied (-10 unapproved license, -5 inactive maintainer)
///
/// The result is clamped to 0..=100. A component without vulnerabilities
/// and without exploit signals never drops below [`CLEAN_COMPONENT_FLOOR`].
pub struct RiskScorer;

impl RiskScorer {
    pub fn score(
        vulnerabilities: &[Vulnerability],
        component: &Component,
        policy_flags: Option<PolicyFlags>,
    ) -> u8 {
        Self::score_at(vulnerabilities, component, policy_flags, Utc::now())
    }

    /// Same as [`RiskScorer::score`] with an explicit "now" for release-age bands
    pub fn score_at(
        vulnerabilities: &[Vulnerability],
        component: &Component,
        policy_flags: Option<PolicyFlags>,
        now: DateTime<Utc>,
    ) -> u8 {
        let mut score = BASE_SCORE;

        if !vulnerabilities.is_empty() {
            let cvss_max = vulnerabilities
                .iter()
                .map(Vulnerability::cvss_max)
                .fold(0.0_f32, f32::max);
            score -= Self::cvss_penalty(cvss_max);
        }

        let known_exploited = vulnerabilities.iter().any(Vulnerability::known_exploited);
        if known_exploited {
            score -= KNOWN_EXPLOITED_PENALTY;
        }

        let max_epss = vulnerabilities
            .iter()
            .filter_map(Vulnerability::epss_score)
            .reduce(f32::max);
        if let Some(epss) = max_epss {
            score -= Self::epss_penalty(epss);
        }

        if let Some(months) = component
            .release_date()
            .and_then(parse_release_date)
            .map(|released| months_between(released, now.date_naive()))
        {
            score -= Self::age_penalty(months);
        }

        if component
            .popularity()
            .is_some_and(|p| p < LOW_POPULARITY_THRESHOLD)
        {
            score -= LOW_POPULARITY_PENALTY;
        }

        if let Some(flags) = policy_flags {
            if !flags.license_approved {
                score -= UNAPPROVED_LICENSE_PENALTY;
            }
            if !flags.maintainer_active {
                score -= INACTIVE_MAINTAINER_PENALTY;
            }
        }

        let mut score = score.clamp(0, 100) as u8;

        let exploit_signal = known_exploited || max_epss.is_some_and(|e| e > 0.0);
        if vulnerabilities.is_empty() && !exploit_signal {
            score = score.max(CLEAN_COMPONENT_FLOOR);
        }

        score
    }

    /// Document score: rounded mean of component scores, 100 for no components
    pub fn aggregate<I>(scores: I) -> u8
    where
        I: IntoIterator<Item = u8>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((0u64, 0u64), |(sum, count), s| (sum + s as u64, count + 1));
        if count == 0 {
            return 100;
        }
        (sum as f64 / count as f64).round() as u8
    }

    fn cvss_penalty(cvss_max: f32) -> i32 {
        if cvss_max >= 9.0 {
            50
        } else if cvss_max >= 7.0 {
            40
        } else if cvss_max >= 5.0 {
            30
        } else if cvss_max >= 3.0 {
            20
        } else if cvss_max > 0.0 {
            10
        } else {
            0
        }
    }

    fn epss_penalty(epss: f32) -> i32 {
        if epss > 0.5 {
            20
        } else if epss > 0.2 {
            10
        } else {
            0
        }
    }

    fn age_penalty(months: i64) -> i32 {
        if months > 60 {
            15
        } else if months > 36 {
            10
        } else if months > 24 {
            5
        } else {
            0
        }
    }
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates
fn parse_release_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    value
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
}

/// Whole calendar months from `from` to `to`; negative when `to` is earlier
fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = (to.year() as i64 - from.year() as i64) * 12
        + (to.month() as i64 - from.month() as i64);
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_analysis::domain::Severity;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn component() -> Component {
        Component::builder("c1", "pkg").build()
    }

    fn vuln(cvss: f32) -> Vulnerability {
        Vulnerability::new(
            "OSV-1".to_string(),
            "CVE-2024-1".to_string(),
            Severity::from_cvss_score(cvss),
            String::new(),
        )
        .with_cvss(None, Some(cvss))
    }

    fn released(date: &str) -> Component {
        Component::builder("c1", "pkg")
            .release_date(Some(date.to_string()))
            .build()
    }

    #[test]
    fn test_clean_component_scores_100() {
        assert_eq!(RiskScorer::score_at(&[], &component(), None, now()), 100);
    }

    #[test]
    fn test_cvss_bands() {
        let cases = [
            (9.5, 50),
            (9.0, 50),
            (8.1, 60),
            (7.0, 60),
            (6.5, 70),
            (5.0, 70),
            (4.9, 80),
            (3.0, 80),
            (2.0, 90),
            (0.0, 100),
        ];
        for (cvss, expected) in cases {
            assert_eq!(
                RiskScorer::score_at(&[vuln(cvss)], &component(), None, now()),
                expected,
                "cvss {cvss}"
            );
        }
    }

    #[test]
    fn test_uses_highest_cvss() {
        let vulns = vec![vuln(3.1), vuln(9.8), vuln(5.0)];
        assert_eq!(RiskScorer::score_at(&vulns, &component(), None, now()), 50);
    }

    #[test]
    fn test_critical_known_exploited() {
        let vulns = vec![vuln(9.5).with_known_exploited(true)];
        assert_eq!(RiskScorer::score_at(&vulns, &component(), None, now()), 20);
    }

    #[test]
    fn test_epss_bands() {
        let high = vec![vuln(2.0).with_epss_score(Some(0.7))];
        assert_eq!(RiskScorer::score_at(&high, &component(), None, now()), 70);

        let mid = vec![vuln(2.0).with_epss_score(Some(0.5))];
        assert_eq!(RiskScorer::score_at(&mid, &component(), None, now()), 80);

        let low = vec![vuln(2.0).with_epss_score(Some(0.2))];
        assert_eq!(RiskScorer::score_at(&low, &component(), None, now()), 90);
    }

    #[test]
    fn test_score_is_clamped_at_zero() {
        let vulns = vec![vuln(10.0)
            .with_known_exploited(true)
            .with_epss_score(Some(0.9))];
        let component = Component::builder("c1", "pkg")
            .release_date(Some("2010-01-01".to_string()))
            .popularity(Some(3))
            .build();
        let flags = PolicyFlags {
            license_approved: false,
            maintainer_active: false,
        };
        // 100 - 50 - 30 - 20 - 15 - 5 - 10 - 5 = -35
        assert_eq!(
            RiskScorer::score_at(&vulns, &component, Some(flags), now()),
            0
        );
    }

    #[test]
    fn test_age_bands_apply_with_vulnerabilities() {
        let vulns = vec![vuln(2.0)];
        // 90 before age penalties
        assert_eq!(
            RiskScorer::score_at(&vulns, &released("2020-05-14"), None, now()),
            75
        );
        assert_eq!(
            RiskScorer::score_at(&vulns, &released("2022-01-01T00:00:00Z"), None, now()),
            80
        );
        assert_eq!(
            RiskScorer::score_at(&vulns, &released("2023-01-01"), None, now()),
            85
        );
        assert_eq!(
            RiskScorer::score_at(&vulns, &released("2024-01-01"), None, now()),
            90
        );
    }

    #[test]
    fn test_age_band_boundaries_use_calendar_months() {
        let vulns = vec![vuln(2.0)];
        // Exactly 24 months: not over 24
        assert_eq!(
            RiskScorer::score_at(&vulns, &released("2023-06-15"), None, now()),
            90
        );
        // 24 months and a day short of 25: still 24 whole months
        assert_eq!(
            RiskScorer::score_at(&vulns, &released("2023-05-16"), None, now()),
            90
        );
        assert_eq!(
            RiskScorer::score_at(&vulns, &released("2023-05-15"), None, now()),
            85
        );
    }

    #[test]
    fn test_unparseable_or_future_release_date_is_ignored() {
        let vulns = vec![vuln(2.0)];
        assert_eq!(
            RiskScorer::score_at(&vulns, &released("last tuesday"), None, now()),
            90
        );
        assert_eq!(
            RiskScorer::score_at(&vulns, &released("2030-01-01"), None, now()),
            90
        );
    }

    #[test]
    fn test_low_popularity() {
        let vulns = vec![vuln(2.0)];
        let unpopular = Component::builder("c1", "pkg").popularity(Some(99)).build();
        let popular = Component::builder("c1", "pkg").popularity(Some(100)).build();
        assert_eq!(RiskScorer::score_at(&vulns, &unpopular, None, now()), 85);
        assert_eq!(RiskScorer::score_at(&vulns, &popular, None, now()), 90);
    }

    #[test]
    fn test_policy_flags_only_apply_when_supplied() {
        let vulns = vec![vuln(2.0)];
        let flags = PolicyFlags {
            license_approved: false,
            maintainer_active: false,
        };
        assert_eq!(
            RiskScorer::score_at(&vulns, &component(), Some(flags), now()),
            75
        );
        assert_eq!(RiskScorer::score_at(&vulns, &component(), None, now()), 90);
    }

    #[test]
    fn test_clean_component_floor() {
        let component = Component::builder("c1", "pkg")
            .release_date(Some("2001-01-01".to_string()))
            .popularity(Some(1))
            .build();
        let flags = PolicyFlags {
            license_approved: false,
            maintainer_active: false,
        };
        // 100 - 15 - 5 - 10 - 5 = 65, floored
        assert_eq!(
            RiskScorer::score_at(&[], &component, Some(flags), now()),
            CLEAN_COMPONENT_FLOOR
        );
    }

    #[test]
    fn test_aggregate() {
        assert_eq!(RiskScorer::aggregate(Vec::<u8>::new()), 100);
        assert_eq!(RiskScorer::aggregate([100, 20]), 60);
        assert_eq!(RiskScorer::aggregate([100, 90, 85]), 92);
        assert_eq!(RiskScorer::aggregate([0, 1]), 1);
    }

    #[test]
    fn test_months_between() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(months_between(d(2024, 1, 31), d(2024, 2, 29)), 0);
        assert_eq!(months_between(d(2024, 1, 15), d(2024, 2, 15)), 1);
        assert_eq!(months_between(d(2020, 6, 15), d(2025, 6, 15)), 60);
        assert_eq!(months_between(d(2025, 7, 1), d(2025, 6, 15)), -1);
    }
}
