//! Clash rule list -> AdGuard Home filter list.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

const TITLE: &str = "Cloudflare Converted List";
const DESCRIPTION: &str = "Converted from Clash format to AdGuard Home format";

/// Clash rule types that have an AdGuard Home counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    DomainSuffix,
    DomainKeyword,
    Domain,
}

impl RuleType {
    /// Parse a rule type token (case-insensitive). Unknown tokens give `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DOMAIN-SUFFIX" => Some(RuleType::DomainSuffix),
            "DOMAIN-KEYWORD" => Some(RuleType::DomainKeyword),
            "DOMAIN" => Some(RuleType::Domain),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::DomainSuffix => "DOMAIN-SUFFIX",
            RuleType::DomainKeyword => "DOMAIN-KEYWORD",
            RuleType::Domain => "DOMAIN",
        }
    }

    /// Render `value` as an AdGuard Home filter rule.
    pub fn to_adguard(&self, value: &str) -> String {
        match self {
            RuleType::DomainSuffix | RuleType::Domain => format!("||{}^", value),
            RuleType::DomainKeyword => format!("||*{}*^", value),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `TYPE,VALUE[,POLICY]` line of a Clash rule list.
///
/// The policy and any further fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRule<'a> {
    pub rule_type: RuleType,
    pub value: &'a str,
}

impl<'a> SourceRule<'a> {
    /// Parse a single line. Blank lines, `#`/`;` comments, lines with fewer
    /// than two fields and unknown rule types all yield `None`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            return None;
        }

        let mut parts = line.split(',');
        let rule_type = parts.next()?;
        let value = parts.next()?;

        Some(SourceRule {
            rule_type: RuleType::parse(rule_type)?,
            value: value.trim(),
        })
    }

    pub fn to_adguard(&self) -> String {
        self.rule_type.to_adguard(self.value)
    }
}

/// Convert one Clash line, or `None` if it carries no convertible rule.
pub fn convert_line(line: &str) -> Option<String> {
    SourceRule::parse(line).map(|rule| rule.to_adguard())
}

/// Provenance comment block written at the top of every converted list.
#[derive(Debug, Clone)]
pub struct Header<'a> {
    pub source_url: &'a str,
    pub generated_at: DateTime<Utc>,
}

impl<'a> Header<'a> {
    pub fn new(source_url: &'a str, generated_at: DateTime<Utc>) -> Self {
        Self {
            source_url,
            generated_at,
        }
    }

    /// Header lines, ending with the blank separator line.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("! Title: {}", TITLE),
            format!("! Original Source: {}", self.source_url),
            format!(
                "! Date: {}",
                self.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            format!("! Description: {}", DESCRIPTION),
            String::new(),
        ]
    }
}

/// Convert a whole Clash rule list into an AdGuard Home filter list.
///
/// Never fails: lines that cannot be converted are dropped. Output rules keep
/// the order of their source lines.
pub fn transcode(source: &str, source_url: &str, generated_at: DateTime<Utc>) -> String {
    let mut out = Header::new(source_url, generated_at).lines();
    out.extend(source.split('\n').filter_map(convert_line));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_rule_type_parse() {
        assert_eq!(RuleType::parse("DOMAIN-SUFFIX"), Some(RuleType::DomainSuffix));
        assert_eq!(RuleType::parse("domain-keyword"), Some(RuleType::DomainKeyword));
        assert_eq!(RuleType::parse(" Domain "), Some(RuleType::Domain));
        assert_eq!(RuleType::parse("IP-CIDR"), None);
        assert_eq!(RuleType::parse(""), None);
    }

    #[test]
    fn test_rule_type_display() {
        assert_eq!(RuleType::DomainSuffix.to_string(), "DOMAIN-SUFFIX");
        assert_eq!(RuleType::DomainKeyword.to_string(), "DOMAIN-KEYWORD");
        assert_eq!(RuleType::Domain.to_string(), "DOMAIN");
    }

    #[test]
    fn test_convert_line() {
        assert_eq!(convert_line("DOMAIN-SUFFIX,09mk.cn"), Some("||09mk.cn^".to_string()));
        assert_eq!(convert_line("DOMAIN-KEYWORD,admarvel"), Some("||*admarvel*^".to_string()));
        assert_eq!(convert_line("DOMAIN,example.com"), Some("||example.com^".to_string()));
        assert_eq!(
            convert_line("  domain-suffix , ads.example.com , REJECT\r"),
            Some("||ads.example.com^".to_string())
        );
    }

    #[test]
    fn test_convert_line_skips() {
        assert_eq!(convert_line(""), None);
        assert_eq!(convert_line("   "), None);
        assert_eq!(convert_line("# DOMAIN-SUFFIX,foo.com"), None);
        assert_eq!(convert_line("; DOMAIN-SUFFIX,foo.com"), None);
        assert_eq!(convert_line("DOMAIN"), None);
        assert_eq!(convert_line("IP-CIDR,10.0.0.0/8,DIRECT"), None);
        assert_eq!(convert_line(",foo.com"), None);
    }

    #[test]
    fn test_convert_line_strips_bom() {
        assert_eq!(
            convert_line("\u{feff}DOMAIN-SUFFIX,bom.example.com"),
            Some("||bom.example.com^".to_string())
        );
    }

    #[test]
    fn test_source_rule_ignores_policy() {
        let rule = SourceRule::parse("DOMAIN-SUFFIX,google.com,PROXY,no-resolve").unwrap();
        assert_eq!(rule.rule_type, RuleType::DomainSuffix);
        assert_eq!(rule.value, "google.com");
    }

    #[test]
    fn test_header_lines() {
        let lines = Header::new("https://example.com/list", at()).lines();
        assert_eq!(
            lines,
            vec![
                "! Title: Cloudflare Converted List",
                "! Original Source: https://example.com/list",
                "! Date: 2024-05-01T08:30:00.000Z",
                "! Description: Converted from Clash format to AdGuard Home format",
                "",
            ]
        );
    }

    #[test]
    fn test_transcode_empty() {
        let out = transcode("", "https://example.com/list", at());
        assert_eq!(
            out,
            "! Title: Cloudflare Converted List\n\
             ! Original Source: https://example.com/list\n\
             ! Date: 2024-05-01T08:30:00.000Z\n\
             ! Description: Converted from Clash format to AdGuard Home format\n"
        );
    }
}
