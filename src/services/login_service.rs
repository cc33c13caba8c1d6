use crate::models::LoginInfo;
use crate::utils::user_agent;

/// 根据请求信息生成登录记录
///
/// `forwarded_for` 为原始 `X-Forwarded-For` 值，取第一跳作为客户端 IP，缺失时使用 `peer_addr`
pub fn derive_login_info(
    user_agent_header: &str,
    forwarded_for: Option<&str>,
    peer_addr: Option<String>,
) -> LoginInfo {
    let parsed = user_agent::parse(user_agent_header);

    let (os_name, os_version) = if user_agent::looks_like_windows_11(user_agent_header) {
        (Some("Windows 11".to_string()), Some("11.0".to_string()))
    } else {
        (parsed.os_name, parsed.os_version)
    };

    let os = [os_name, os_version]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    let ip = forwarded_for
        .and_then(|header| header.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or(peer_addr);

    LoginInfo {
        browser: parsed.browser_name,
        version: parsed.browser_version,
        os: if os.is_empty() { "Unknown".to_string() } else { os },
        device: parsed
            .device_type
            .unwrap_or_else(|| "Desktop".to_string()),
        ip,
    }
}
