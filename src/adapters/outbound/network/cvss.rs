//! CVSS base score calculation from vector strings
//!
//! OSV publishes severities as vectors (`CVSS:3.1/AV:N/...` or the bare v2
//! form `AV:N/AC:L/Au:N/...`); only the base metric group is evaluated.

use std::collections::HashMap;

fn parse_metrics(vector: &str) -> HashMap<&str, &str> {
    vector
        .split('/')
        .filter_map(|part| part.split_once(':'))
        .collect()
}

/// Computes the CVSS v3.0 / v3.1 base score of `vector`
///
/// Example: `"CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"` -> `Some(9.8)`
pub fn cvss_v3_base_score(vector: &str) -> Option<f32> {
    if !vector.starts_with("CVSS:3") {
        return None;
    }
    let metrics = parse_metrics(vector);

    let scope_changed = match *metrics.get("S")? {
        "U" => false,
        "C" => true,
        _ => return None,
    };

    let av = match *metrics.get("AV")? {
        "N" => 0.85,
        "A" => 0.62,
        "L" => 0.55,
        "P" => 0.2,
        _ => return None,
    };
    let ac = match *metrics.get("AC")? {
        "L" => 0.77,
        "H" => 0.44,
        _ => return None,
    };
    let pr = match (*metrics.get("PR")?, scope_changed) {
        ("N", _) => 0.85,
        ("L", false) => 0.62,
        ("L", true) => 0.68,
        ("H", false) => 0.27,
        ("H", true) => 0.5,
        _ => return None,
    };
    let ui = match *metrics.get("UI")? {
        "N" => 0.85,
        "R" => 0.62,
        _ => return None,
    };
    let cia = |key: &str| -> Option<f64> {
        match *metrics.get(key)? {
            "N" => Some(0.0),
            "L" => Some(0.22),
            "H" => Some(0.56),
            _ => None,
        }
    };
    let (c, i, a) = (cia("C")?, cia("I")?, cia("A")?);

    let iss = 1.0 - ((1.0 - c) * (1.0 - i) * (1.0 - a));
    let impact = if scope_changed {
        7.52 * (iss - 0.029) - 3.25 * (iss - 0.02_f64).powi(15)
    } else {
        6.42 * iss
    };
    let exploitability = 8.22 * av * ac * pr * ui;

    let base = if impact <= 0.0 {
        0.0
    } else if scope_changed {
        round_up(f64::min(1.08 * (impact + exploitability), 10.0))
    } else {
        round_up(f64::min(impact + exploitability, 10.0))
    };
    Some(base as f32)
}

/// Computes the CVSS v2 base score of `vector`
///
/// Example: `"AV:N/AC:L/Au:N/C:P/I:P/A:P"` -> `Some(7.5)`
pub fn cvss_v2_base_score(vector: &str) -> Option<f32> {
    let metrics = parse_metrics(vector.trim_start_matches('(').trim_end_matches(')'));

    let av = match *metrics.get("AV")? {
        "L" => 0.395,
        "A" => 0.646,
        "N" => 1.0,
        _ => return None,
    };
    let ac = match *metrics.get("AC")? {
        "H" => 0.35,
        "M" => 0.61,
        "L" => 0.71,
        _ => return None,
    };
    let au = match *metrics.get("Au")? {
        "M" => 0.45,
        "S" => 0.56,
        "N" => 0.704,
        _ => return None,
    };
    let cia = |key: &str| -> Option<f64> {
        match *metrics.get(key)? {
            "N" => Some(0.0),
            "P" => Some(0.275),
            "C" => Some(0.660),
            _ => None,
        }
    };
    let (c, i, a) = (cia("C")?, cia("I")?, cia("A")?);

    let impact = 10.41 * (1.0 - (1.0 - c) * (1.0 - i) * (1.0 - a));
    let exploitability = 20.0 * av * ac * au;
    let f_impact = if impact == 0.0 { 0.0 } else { 1.176 };
    let base = ((0.6 * impact) + (0.4 * exploitability) - 1.5) * f_impact;

    Some(((base * 10.0).round() / 10.0).clamp(0.0, 10.0) as f32)
}

/// CVSS v3.1 "Roundup": smallest one-decimal number >= `value`, robust
/// against floating point noise such as `4.000000000001`
fn round_up(value: f64) -> f64 {
    let int_input = (value * 100_000.0).round() as i64;
    if int_input % 10_000 == 0 {
        int_input as f64 / 100_000.0
    } else {
        ((int_input / 10_000) + 1) as f64 / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v3_critical() {
        assert_eq!(
            cvss_v3_base_score("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"),
            Some(9.8)
        );
    }

    #[test]
    fn test_v3_high() {
        assert_eq!(
            cvss_v3_base_score("CVSS:3.1/AV:N/AC:L/PR:L/UI:N/S:U/C:H/I:H/A:H"),
            Some(8.8)
        );
    }

    #[test]
    fn test_v3_scope_changed() {
        assert_eq!(
            cvss_v3_base_score("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:C/C:H/I:H/A:H"),
            Some(10.0)
        );
        assert_eq!(
            cvss_v3_base_score("CVSS:3.0/AV:N/AC:L/PR:N/UI:R/S:C/C:L/I:L/A:N"),
            Some(6.1)
        );
    }

    #[test]
    fn test_v3_low_and_none() {
        let low = cvss_v3_base_score("CVSS:3.1/AV:L/AC:H/PR:H/UI:R/S:U/C:L/I:N/A:N").unwrap();
        assert!(low > 0.0 && low < 4.0);
        assert_eq!(
            cvss_v3_base_score("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N"),
            Some(0.0)
        );
    }

    #[test]
    fn test_v3_invalid() {
        assert_eq!(cvss_v3_base_score("invalid vector"), None);
        assert_eq!(cvss_v3_base_score("CVSS:3.1/AV:X/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"), None);
        assert_eq!(cvss_v3_base_score("CVSS:3.1/AV:N/AC:L"), None);
        assert_eq!(cvss_v3_base_score("AV:N/AC:L/Au:N/C:P/I:P/A:P"), None);
    }

    #[test]
    fn test_v2_scores() {
        assert_eq!(cvss_v2_base_score("AV:N/AC:L/Au:N/C:P/I:P/A:P"), Some(7.5));
        assert_eq!(cvss_v2_base_score("AV:N/AC:L/Au:N/C:C/I:C/A:C"), Some(10.0));
        assert_eq!(cvss_v2_base_score("AV:N/AC:M/Au:N/C:N/I:P/A:N"), Some(4.3));
        assert_eq!(cvss_v2_base_score("AV:N/AC:L/Au:N/C:N/I:N/A:N"), Some(0.0));
    }

    #[test]
    fn test_v2_invalid() {
        assert_eq!(cvss_v2_base_score("AV:N/AC:L"), None);
        assert_eq!(cvss_v2_base_score("garbage"), None);
    }
}
