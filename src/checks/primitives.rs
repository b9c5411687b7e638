//! Format-independent analyzers shared by the checks.
//!
//! Everything here is a pure function over small inputs. The lookup tables
//! (zero-width characters, confusables, macro keywords) are immutable
//! process-wide statics.

use crate::model::Color;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// ==================== Color / size ====================

/// Minimum value of every RGB channel for a color to count as white.
pub const WHITE_THRESHOLD: u8 = 250;

/// Font sizes below this many points count as unreadable.
pub const TINY_FONT_THRESHOLD: f32 = 2.0;

/// Maximum value of every RGB channel for a fill to count as dark.
pub const DARK_FILL_THRESHOLD: u8 = 50;

/// Check if a color is white or near-white (every channel >= 250).
///
/// Normalized 0-1 colors are rescaled to 0-255 first.
pub fn is_near_white(color: &Color) -> bool {
    color.to_rgb8().iter().all(|c| *c >= WHITE_THRESHOLD)
}

/// Check if a font size is too small to read.
///
/// Negative sizes come from mirrored text matrices and are measured by
/// magnitude.
pub fn is_tiny_font(size: f32) -> bool {
    size.abs() < TINY_FONT_THRESHOLD
}

/// Check if a fill color is near-black (every channel <= 50).
pub fn is_dark_fill(color: &Color) -> bool {
    color.to_rgb8().iter().all(|c| *c <= DARK_FILL_THRESHOLD)
}

// ==================== Zero-width characters ====================

/// Invisible code points that can smuggle data through text.
pub const ZERO_WIDTH_CHARS: [(char, &str); 5] = [
    ('\u{200B}', "ZERO WIDTH SPACE"),
    ('\u{200C}', "ZERO WIDTH NON-JOINER"),
    ('\u{200D}', "ZERO WIDTH JOINER"),
    ('\u{2060}', "WORD JOINER"),
    ('\u{FEFF}', "ZERO WIDTH NO-BREAK SPACE"),
];

/// One zero-width character found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroWidthHit {
    /// The character itself
    pub ch: char,
    /// Unicode name of the character
    pub name: &'static str,
    /// Number of occurrences
    pub count: usize,
}

impl ZeroWidthHit {
    /// Code point label such as `U+200B`.
    pub fn code_point(&self) -> String {
        format!("U+{:04X}", self.ch as u32)
    }
}

/// Report each zero-width character present in `text`, in table order.
pub fn scan_zero_width(text: &str) -> Vec<ZeroWidthHit> {
    ZERO_WIDTH_CHARS
        .iter()
        .filter_map(|&(ch, name)| {
            let count = text.chars().filter(|c| *c == ch).count();
            (count > 0).then_some(ZeroWidthHit { ch, name, count })
        })
        .collect()
}

/// Remove zero-width characters, leaving the visible text.
pub fn strip_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| !ZERO_WIDTH_CHARS.iter().any(|(zw, _)| zw == c))
        .collect()
}

// ==================== Links ====================

/// Non-Latin characters that render like a Latin letter.
pub static CONFUSABLES: &[(char, char)] = &[
    // Cyrillic
    ('а', 'a'),
    ('е', 'e'),
    ('о', 'o'),
    ('р', 'p'),
    ('с', 'c'),
    ('х', 'x'),
    ('у', 'y'),
    ('ѕ', 's'),
    ('і', 'i'),
    ('ј', 'j'),
    ('һ', 'h'),
    ('ԁ', 'd'),
    ('ԛ', 'q'),
    ('ԝ', 'w'),
    ('ӏ', 'l'),
    // Greek
    ('α', 'a'),
    ('ο', 'o'),
    ('ι', 'i'),
    ('ν', 'v'),
];

/// Look up the Latin lookalike of a confusable character.
pub fn confusable_latin(ch: char) -> Option<char> {
    CONFUSABLES
        .iter()
        .find(|(confusable, _)| *confusable == ch)
        .map(|(_, latin)| *latin)
}

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap());

static BARE_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[\p{L}\p{N}](?:[\p{L}\p{N}\-]*[\p{L}\p{N}])?\.)+\p{L}{2,63}(?::\d+)?(?:[/?#]\S*)?$",
    )
    .unwrap()
});

/// File extensions that read as a TLD but label a file, not a host.
const FILE_EXTENSIONS: [&str; 24] = [
    "pdf", "doc", "docx", "docm", "dot", "dotx", "xls", "xlsx", "xlsm", "ppt", "pptx", "odt",
    "rtf", "txt", "csv", "md", "exe", "dll", "bat", "zip", "rar", "jpg", "png", "gif",
];

/// Check if display text reads as a URL or a bare domain.
///
/// Without a scheme, `name.ext` with a document or executable extension is
/// a file name. It is only read as a domain with a `www.` prefix, a port or
/// a path.
pub fn looks_like_url(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }
    if SCHEME_RE.is_match(text) {
        return url::Url::parse(text).is_ok();
    }
    if !BARE_DOMAIN_RE.is_match(text) {
        return false;
    }
    !looks_like_file_name(text)
}

fn looks_like_file_name(text: &str) -> bool {
    if text.contains(['/', '?', '#', ':']) || text.to_lowercase().starts_with("www.") {
        return false;
    }
    text.rsplit_once('.').is_some_and(|(_, ext)| {
        FILE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    })
}

/// Normalize a URL for comparison.
///
/// Applies NFC, drops the scheme and trailing slashes, and lowercases the
/// authority. Path, query and fragment keep their case; nothing else is
/// considered equivalent.
pub fn normalize_url(text: &str) -> String {
    let nfc: String = text.trim().nfc().collect();
    let without_scheme = SCHEME_RE.replace(&nfc, "");
    let (authority, rest) = match without_scheme.find(['/', '?', '#']) {
        Some(i) => without_scheme.split_at(i),
        None => (&without_scheme[..], ""),
    };
    let normalized = format!("{}{}", authority.to_lowercase(), rest);
    normalized.trim_end_matches('/').to_string()
}

/// Extract the host of a URL, decoding punycode labels.
///
/// Accepts scheme-less targets such as `example.com/path`. Returns `None`
/// for relative references and IPv6 literals.
pub fn extract_host(target: &str) -> Option<String> {
    let target = target.trim();
    let rest = match target.find("://") {
        Some(i) => &target[i + 3..],
        None if target.starts_with("mailto:") => target.rsplit('@').next().unwrap_or(""),
        None => target,
    };

    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host_port = authority.rsplit('@').next().unwrap_or("");
    if host_port.starts_with('[') {
        return None;
    }
    let host = match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host_port,
    };

    let host = host.trim_end_matches('.').to_lowercase();
    if host.is_empty() {
        return None;
    }
    if host.split('.').any(|label| label.starts_with("xn--")) {
        return Some(url::quirks::domain_to_unicode(&host));
    }
    Some(host)
}

/// A confusable character found in a host, with its Latin lookalike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confusable {
    pub found: char,
    pub looks_like: char,
}

/// List the confusable characters of a host, in order of appearance.
pub fn find_confusables(host: &str) -> Vec<Confusable> {
    host.chars()
        .filter_map(|ch| {
            confusable_latin(ch).map(|looks_like| Confusable {
                found: ch,
                looks_like,
            })
        })
        .collect()
}

/// Outcome of comparing one link's display text with its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkVerdict {
    /// Display text is a URL that points somewhere other than the target.
    DisplayMismatch { shown: String, actual: String },
    /// Target host mixes Latin letters with lookalikes from another script.
    Homograph {
        host: String,
        confusables: Vec<Confusable>,
    },
}

/// Check if a host impersonates a Latin name.
///
/// The TLD is ignored. A label is spoofed when it mixes confusables with
/// ASCII letters, or when every letter in it is a confusable and the host is
/// otherwise Latin (`аррӏе.com`). Native-script names such as `пример.com`
/// are left alone.
fn is_spoofed_host(host: &str) -> bool {
    let labels: Vec<&str> = host.split('.').collect();
    let names = match labels.split_last() {
        Some((_, names)) if !names.is_empty() => names,
        _ => &labels[..],
    };
    let latin_host = host.chars().any(|c| c.is_ascii_alphabetic());

    names.iter().any(|label| {
        let letters: Vec<char> = label.chars().filter(|c| c.is_alphabetic()).collect();
        let confusables = letters
            .iter()
            .filter(|c| confusable_latin(**c).is_some())
            .count();
        if confusables == 0 {
            return false;
        }
        let has_latin = letters.iter().any(char::is_ascii_alphabetic);
        has_latin || (confusables == letters.len() && latin_host)
    })
}

/// Compare a link's display text with its target URL.
///
/// Both conditions are tested independently; a link can yield a display
/// mismatch and a homograph verdict at once.
pub fn compare_link(display: &str, target: &str) -> Vec<LinkVerdict> {
    let mut verdicts = Vec::new();

    if looks_like_url(display) && normalize_url(display) != normalize_url(target) {
        verdicts.push(LinkVerdict::DisplayMismatch {
            shown: display.trim().to_string(),
            actual: target.trim().to_string(),
        });
    }

    if let Some(host) = extract_host(target) {
        if is_spoofed_host(&host) {
            let confusables = find_confusables(&host);
            verdicts.push(LinkVerdict::Homograph { host, confusables });
        }
    }

    verdicts
}

// ==================== Macros ====================

/// Identifiers that signal auto-execution, process launch, object creation,
/// environment access or remote download in VBA source.
pub const MACRO_KEYWORDS: [&str; 9] = [
    "AutoOpen",
    "AutoExec",
    "Document_Open",
    "Shell",
    "PowerShell",
    "WScript",
    "CreateObject",
    "Environ",
    "DownloadFile",
];

/// Distinct keywords present in `source` (case-sensitive), in table order.
pub fn match_keywords(source: &str) -> Vec<&'static str> {
    MACRO_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| source.contains(keyword))
        .collect()
}

// ==================== Metadata ====================

static FILE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^file:|(?:^|[\s"'(])[A-Za-z]:[\\/]|^\\\\[^\\\s]+\\|[^\\\s]+\\[^\\\s]+|(?:^|[\s"'(])~?/[^/\s]+/"#,
    )
    .unwrap()
});

/// Check if a value looks like a filesystem path (drive letters, UNC shares,
/// backslash-separated segments, absolute or home-relative POSIX paths).
pub fn looks_like_file_path(value: &str) -> bool {
    FILE_PATH_RE.is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_threshold_inclusive() {
        assert!(is_near_white(&Color::rgb(255, 255, 255)));
        assert!(is_near_white(&Color::rgb(250, 250, 250)));
        assert!(!is_near_white(&Color::rgb(249, 249, 249)));
        assert!(!is_near_white(&Color::rgb(255, 255, 249)));
    }

    #[test]
    fn test_white_normalized_floats() {
        assert!(is_near_white(&Color::normalized(1.0, 1.0, 1.0)));
        assert!(is_near_white(&Color::normalized(0.99, 0.99, 0.99)));
        assert!(!is_near_white(&Color::normalized(0.5, 1.0, 1.0)));
    }

    #[test]
    fn test_tiny_font() {
        assert!(is_tiny_font(1.0));
        assert!(is_tiny_font(0.0));
        assert!(is_tiny_font(-1.5));
        assert!(!is_tiny_font(2.0));
        assert!(!is_tiny_font(12.0));
    }

    #[test]
    fn test_dark_fill() {
        assert!(is_dark_fill(&Color::BLACK));
        assert!(is_dark_fill(&Color::rgb(50, 50, 50)));
        assert!(!is_dark_fill(&Color::rgb(51, 0, 0)));
        assert!(is_dark_fill(&Color::normalized(0.1, 0.1, 0.1)));
    }

    #[test]
    fn test_zero_width_single_hit() {
        let hits = scan_zero_width("hello\u{200B}world");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].ch, '\u{200B}');
        assert_eq!(hits[0].name, "ZERO WIDTH SPACE");
        assert_eq!(hits[0].code_point(), "U+200B");
        assert_eq!(hits[0].count, 1);
    }

    #[test]
    fn test_zero_width_clean_text() {
        assert!(scan_zero_width("plain ascii text").is_empty());
    }

    #[test]
    fn test_zero_width_counts_and_order() {
        let hits = scan_zero_width("\u{FEFF}a\u{200D}b\u{200D}");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].ch, '\u{200D}');
        assert_eq!(hits[0].count, 2);
        assert_eq!(hits[1].ch, '\u{FEFF}');
        assert_eq!(strip_zero_width("\u{FEFF}a\u{200D}b"), "ab");
    }

    #[test]
    fn test_homograph_mixed_script() {
        // Cyrillic а and р mixed with Latin l, e, c, o, m
        let verdicts = compare_link("Apple", "http://аррle.com");
        assert_eq!(verdicts.len(), 1);
        match &verdicts[0] {
            LinkVerdict::Homograph { host, confusables } => {
                assert_eq!(host, "аррle.com");
                assert_eq!(confusables.len(), 3);
                assert_eq!(confusables[0].looks_like, 'a');
            }
            other => panic!("unexpected verdict {:?}", other),
        }
    }

    #[test]
    fn test_homograph_pure_cyrillic_not_flagged() {
        assert!(compare_link("Пример", "http://пример.рф").is_empty());
    }

    #[test]
    fn test_homograph_punycode_decoded() {
        // xn--80ak6aa92e.com is the punycode form of аррӏе.com
        let host = extract_host("https://xn--80ak6aa92e.com/login").unwrap();
        assert!(!host.starts_with("xn--"));
        assert!(host.ends_with(".com"));
        assert!(!find_confusables(&host).is_empty());
    }

    #[test]
    fn test_display_match() {
        assert!(compare_link("apple.com", "apple.com").is_empty());
        assert!(compare_link("apple.com", "https://apple.com/").is_empty());
        assert!(compare_link("https://Apple.com", "http://apple.com").is_empty());
    }

    #[test]
    fn test_display_mismatch() {
        let verdicts = compare_link("apple.com", "evil.example");
        assert_eq!(
            verdicts,
            vec![LinkVerdict::DisplayMismatch {
                shown: "apple.com".into(),
                actual: "evil.example".into(),
            }]
        );
    }

    #[test]
    fn test_non_url_display_text_ignored() {
        assert!(compare_link("Click here", "https://evil.example").is_empty());
        assert!(compare_link("", "https://evil.example").is_empty());
    }

    #[test]
    fn test_mismatch_and_homograph_both_reported() {
        let verdicts = compare_link("apple.com", "http://аррle.com");
        assert_eq!(verdicts.len(), 2);
        assert!(matches!(verdicts[0], LinkVerdict::DisplayMismatch { .. }));
        assert!(matches!(verdicts[1], LinkVerdict::Homograph { .. }));
    }

    #[test]
    fn test_file_name_display_not_url() {
        assert!(compare_link("invoice.pdf", "https://cdn.example/files/invoice.pdf").is_empty());
        assert!(compare_link("report.docx", "https://cdn.example/r").is_empty());
        assert!(compare_link("Setup.EXE", "https://downloads.example/setup").is_empty());
        assert!(!looks_like_url("invoice.pdf"));
        assert!(looks_like_url("www.invoice.pdf"));
        assert!(looks_like_url("invoice.pdf/download"));
    }

    #[test]
    fn test_path_case_is_significant() {
        let verdicts = compare_link("example.com/Reports/Q3", "https://example.com/reports/q3");
        assert_eq!(verdicts.len(), 1);
        assert!(matches!(verdicts[0], LinkVerdict::DisplayMismatch { .. }));

        assert!(compare_link("EXAMPLE.com/Reports/Q3", "https://example.com/Reports/Q3/").is_empty());
        assert_eq!(normalize_url("HTTPS://Example.COM/A?B=C#D"), "example.com/A?B=C#D");
    }

    #[test]
    fn test_native_script_under_latin_tld_not_flagged() {
        assert!(compare_link("Пример", "http://пример.com").is_empty());
        assert!(!is_spoofed_host("пример.com"));
    }

    #[test]
    fn test_whole_script_spoof_flagged() {
        // аррӏе is all Cyrillic lookalikes
        assert!(is_spoofed_host("аррӏе.com"));
        let host = extract_host("https://xn--80ak6aa92e.com/login").unwrap();
        let verdicts = compare_link("Sign in", "https://xn--80ak6aa92e.com/login");
        assert_eq!(
            verdicts,
            vec![LinkVerdict::Homograph {
                confusables: find_confusables(&host),
                host,
            }]
        );
    }

    #[test]
    fn test_extract_host() {
        assert_eq!(extract_host("https://user@Example.com:8443/x?y").as_deref(), Some("example.com"));
        assert_eq!(extract_host("example.com/path").as_deref(), Some("example.com"));
        assert_eq!(extract_host("mailto:bob@example.org").as_deref(), Some("example.org"));
        assert_eq!(extract_host("/relative/path"), None);
        assert_eq!(extract_host("http://[::1]/"), None);
    }

    #[test]
    fn test_looks_like_url() {
        assert!(looks_like_url("apple.com"));
        assert!(looks_like_url("https://apple.com/store"));
        assert!(looks_like_url("www.example.co.uk/path"));
        assert!(!looks_like_url("Click here"));
        assert!(!looks_like_url("version 1.2"));
        assert!(!looks_like_url("report.2024"));
    }

    #[test]
    fn test_keywords_distinct() {
        let source = "Sub AutoOpen()\n  Shell \"calc.exe\"\n  Shell \"cmd.exe\"\nEnd Sub";
        assert_eq!(match_keywords(source), vec!["AutoOpen", "Shell"]);
    }

    #[test]
    fn test_keywords_case_sensitive() {
        assert!(match_keywords("sub autoopen()\n shell x").is_empty());
    }

    #[test]
    fn test_looks_like_file_path() {
        assert!(looks_like_file_path(r"C:\Users\jdoe\Documents\report.docx"));
        assert!(looks_like_file_path(r"\\fileserver\share\plan.docx"));
        assert!(looks_like_file_path("/Users/jdoe/Desktop/draft.pdf"));
        assert!(looks_like_file_path("~/projects/x.docx"));
        assert!(looks_like_file_path("file:///home/jdoe/x.pdf"));
        assert!(!looks_like_file_path("J. Doe"));
        assert!(!looks_like_file_path("Acrobat Distiller 10.0 (Windows)"));
        assert!(!looks_like_file_path("D:20240101120000+01'00'"));
        assert!(!looks_like_file_path("2024/01/01"));
    }
}
