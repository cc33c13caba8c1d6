//! 登录时使用的 User-Agent 解析
//!
//! 名称沿用前端展示的 ua-parser 写法（"Chrome"、"Mac OS"、"mobile" 等），无法识别的字段为 `None`

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUserAgent {
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub device_type: Option<String>,
}

struct Rule {
    pattern: LazyLock<Regex>,
    name: &'static str,
}

macro_rules! rule {
    ($re:expr, $name:expr) => {
        Rule {
            pattern: LazyLock::new(|| Regex::new($re).expect("user agent pattern")),
            name: $name,
        }
    };
}

// 顺序敏感：Chromium 系浏览器都带 "Chrome"，WebKit 浏览器都带 "Safari"
static BROWSERS: [Rule; 8] = [
    rule!(r"Edg(?:e|A|iOS)?/([\d.]+)", "Edge"),
    rule!(r"(?:OPR|Opera)/([\d.]+)", "Opera"),
    rule!(r"SamsungBrowser/([\d.]+)", "Samsung Internet"),
    rule!(r"(?:Firefox|FxiOS)/([\d.]+)", "Firefox"),
    rule!(r"(?:Chrome|CriOS)/([\d.]+)", "Chrome"),
    rule!(r"Version/([\d.]+).*Mobile.*Safari/", "Mobile Safari"),
    rule!(r"Version/([\d.]+).*Safari/", "Safari"),
    rule!(r"(?:MSIE |Trident/.*rv:)([\d.]+)", "IE"),
];

static WINDOWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Windows NT ([\d.]+)").expect("windows pattern"));
static IOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:iPhone|iPad|iPod).*? OS ([\d_]+)").expect("ios pattern")
});
static MAC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Mac OS X ?([\d_.]+)?").expect("mac pattern"));
static ANDROID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Android ?([\d.]+)?").expect("android pattern"));
static WIN11_KERNEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Windows NT 10\.0").expect("win11 pattern"));

pub fn parse(user_agent: &str) -> ParsedUserAgent {
    let (browser_name, browser_version) = parse_browser(user_agent);
    let (os_name, os_version) = parse_os(user_agent);

    ParsedUserAgent {
        browser_name,
        browser_version,
        os_name,
        os_version,
        device_type: parse_device(user_agent),
    }
}

/// Windows 11 仍上报 NT 10.0，64 位的 Windows 10 标识按 Windows 11 处理
pub fn looks_like_windows_11(user_agent: &str) -> bool {
    WIN11_KERNEL.is_match(user_agent) && user_agent.contains("Win64")
}

fn parse_browser(ua: &str) -> (Option<String>, Option<String>) {
    BROWSERS
        .iter()
        .find_map(|rule| {
            rule.pattern.captures(ua).map(|caps| {
                (
                    Some(rule.name.to_string()),
                    caps.get(1).map(|m| m.as_str().to_string()),
                )
            })
        })
        .unwrap_or((None, None))
}

fn windows_release(nt_version: &str) -> &str {
    match nt_version {
        "10.0" => "10",
        "6.3" => "8.1",
        "6.2" => "8",
        "6.1" => "7",
        "6.0" => "Vista",
        "5.1" | "5.2" => "XP",
        other => other,
    }
}

fn parse_os(ua: &str) -> (Option<String>, Option<String>) {
    if let Some(caps) = WINDOWS.captures(ua) {
        let version = caps.get(1).map(|m| windows_release(m.as_str()).to_string());
        return (Some("Windows".to_string()), version);
    }
    if let Some(caps) = IOS.captures(ua) {
        let version = caps.get(1).map(|m| m.as_str().replace('_', "."));
        return (Some("iOS".to_string()), version);
    }
    if let Some(caps) = ANDROID.captures(ua) {
        let version = caps.get(1).map(|m| m.as_str().to_string());
        return (Some("Android".to_string()), version);
    }
    if let Some(caps) = MAC.captures(ua) {
        let version = caps.get(1).map(|m| m.as_str().replace('_', "."));
        return (Some("Mac OS".to_string()), version);
    }
    if ua.contains("CrOS") {
        return (Some("Chromium OS".to_string()), None);
    }
    if ua.contains("Linux") {
        return (Some("Linux".to_string()), None);
    }
    (None, None)
}

fn parse_device(ua: &str) -> Option<String> {
    let android_tablet = ua.contains("Android") && !ua.contains("Mobile");
    let device = if ua.contains("iPad") || ua.contains("Tablet") || android_tablet {
        "tablet"
    } else if ua.contains("Mobi") || ua.contains("iPhone") || ua.contains("iPod") {
        "mobile"
    } else {
        return None;
    };
    Some(device.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";
    const FIREFOX_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0";
    const EDGE_WIN32: &str = "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
    const CHROME_ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36";

    #[test]
    fn test_parse_chrome_on_windows() {
        let ua = parse(CHROME_WIN);
        assert_eq!(ua.browser_name.as_deref(), Some("Chrome"));
        assert_eq!(ua.browser_version.as_deref(), Some("120.0.0.0"));
        assert_eq!(ua.os_name.as_deref(), Some("Windows"));
        assert_eq!(ua.os_version.as_deref(), Some("10"));
        assert_eq!(ua.device_type, None);
    }

    #[test]
    fn test_parse_mobile_safari_on_iphone() {
        let ua = parse(SAFARI_IPHONE);
        assert_eq!(ua.browser_name.as_deref(), Some("Mobile Safari"));
        assert_eq!(ua.browser_version.as_deref(), Some("17.1"));
        assert_eq!(ua.os_name.as_deref(), Some("iOS"));
        assert_eq!(ua.os_version.as_deref(), Some("17.1"));
        assert_eq!(ua.device_type.as_deref(), Some("mobile"));
    }

    #[test]
    fn test_parse_firefox_on_mac() {
        let ua = parse(FIREFOX_MAC);
        assert_eq!(ua.browser_name.as_deref(), Some("Firefox"));
        assert_eq!(ua.browser_version.as_deref(), Some("121.0"));
        assert_eq!(ua.os_name.as_deref(), Some("Mac OS"));
        assert_eq!(ua.os_version.as_deref(), Some("10.15"));
    }

    #[test]
    fn test_edge_wins_over_chrome() {
        let ua = parse(EDGE_WIN32);
        assert_eq!(ua.browser_name.as_deref(), Some("Edge"));
        assert_eq!(ua.browser_version.as_deref(), Some("120.0.2210.91"));
    }

    #[test]
    fn test_parse_chrome_on_android_phone() {
        let ua = parse(CHROME_ANDROID);
        assert_eq!(ua.browser_name.as_deref(), Some("Chrome"));
        assert_eq!(ua.os_name.as_deref(), Some("Android"));
        assert_eq!(ua.os_version.as_deref(), Some("14"));
        assert_eq!(ua.device_type.as_deref(), Some("mobile"));
    }

    #[test]
    fn test_windows_11_heuristic() {
        assert!(looks_like_windows_11(CHROME_WIN));
        assert!(!looks_like_windows_11(EDGE_WIN32));
        assert!(!looks_like_windows_11(FIREFOX_MAC));
    }

    #[test]
    fn test_parse_less_common_agents() {
        let cases = [
            (
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 OPR/106.0.0.0",
                ("Opera", "106.0.0.0", "Windows", Some("10"), None),
            ),
            (
                "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 (KHTML, like Gecko) SamsungBrowser/23.0 Chrome/115.0.0.0 Safari/537.36",
                ("Samsung Internet", "23.0", "Android", Some("13"), Some("tablet")),
            ),
            (
                "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko",
                ("IE", "11.0", "Windows", Some("7"), None),
            ),
            (
                "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/120.0.6099.119 Mobile/15E148 Safari/604.1",
                ("Chrome", "120.0.6099.119", "iOS", Some("16.6"), Some("tablet")),
            ),
            (
                "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
                ("Firefox", "121.0", "Linux", None, None),
            ),
            (
                "Mozilla/5.0 (X11; CrOS x86_64 14541.0.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
                ("Chrome", "120.0.0.0", "Chromium OS", None, None),
            ),
        ];

        for (raw, (browser, version, os, os_version, device)) in cases {
            let ua = parse(raw);
            assert_eq!(ua.browser_name.as_deref(), Some(browser), "{raw}");
            assert_eq!(ua.browser_version.as_deref(), Some(version), "{raw}");
            assert_eq!(ua.os_name.as_deref(), Some(os), "{raw}");
            assert_eq!(ua.os_version.as_deref(), os_version, "{raw}");
            assert_eq!(ua.device_type.as_deref(), device, "{raw}");
        }
    }

    #[test]
    fn test_unknown_agent_is_empty() {
        assert_eq!(parse("curl/8.4.0"), ParsedUserAgent::default());
        assert_eq!(parse(""), ParsedUserAgent::default());
    }
}
