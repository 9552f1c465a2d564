//! Device metadata captured alongside refresh credentials.

use serde::{Deserialize, Serialize};

/// Coarse device class inferred from the user-agent string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
    Unknown,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile",
            DeviceClass::Tablet => "tablet",
            DeviceClass::Desktop => "desktop",
            DeviceClass::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Device descriptor stored on each refresh credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Raw user-agent string as presented by the client
    pub user_agent: String,

    /// Client IP address, when known
    pub ip: Option<String>,

    /// Coarse device class
    pub device_class: DeviceClass,
}

impl DeviceInfo {
    /// Builds a descriptor from a user-agent string, classifying the device
    pub fn from_user_agent(user_agent: impl Into<String>, ip: Option<String>) -> Self {
        let user_agent = user_agent.into();
        let device_class = classify_device(&user_agent);

        Self {
            user_agent,
            ip,
            device_class,
        }
    }

    /// Descriptor for clients that supplied no user-agent
    pub fn unknown() -> Self {
        Self {
            user_agent: String::new(),
            ip: None,
            device_class: DeviceClass::Unknown,
        }
    }
}

/// Best-effort device classification from a user-agent string.
///
/// Never correctness-critical: a wrong class only mislabels a session in
/// device listings.
pub fn classify_device(user_agent: &str) -> DeviceClass {
    let ua = user_agent.to_lowercase();

    if ua.is_empty() {
        return DeviceClass::Unknown;
    }
    // Tablet checks must run first: tablet user agents often also contain
    // mobile markers.
    if ua.contains("ipad") || ua.contains("tablet") || (ua.contains("android") && !ua.contains("mobile")) {
        return DeviceClass::Tablet;
    }
    if ua.contains("mobi") || ua.contains("iphone") || ua.contains("android") {
        return DeviceClass::Mobile;
    }

    DeviceClass::Desktop
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_desktop() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
        assert_eq!(classify_device(ua), DeviceClass::Desktop);
    }

    #[test]
    fn test_classify_mobile() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
        assert_eq!(classify_device(ua), DeviceClass::Mobile);

        let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36";
        assert_eq!(classify_device(ua), DeviceClass::Mobile);
    }

    #[test]
    fn test_classify_tablet() {
        let ua = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
        assert_eq!(classify_device(ua), DeviceClass::Tablet);

        // Android without the mobile marker is a tablet
        let ua = "Mozilla/5.0 (Linux; Android 14; SM-X910) Safari/537.36";
        assert_eq!(classify_device(ua), DeviceClass::Tablet);
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify_device(""), DeviceClass::Unknown);
    }

    #[test]
    fn test_device_info_from_user_agent() {
        let info = DeviceInfo::from_user_agent(
            "Mozilla/5.0 (iPhone) Mobile",
            Some("203.0.113.7".to_string()),
        );
        assert_eq!(info.device_class, DeviceClass::Mobile);
        assert_eq!(info.ip.as_deref(), Some("203.0.113.7"));
    }
}
