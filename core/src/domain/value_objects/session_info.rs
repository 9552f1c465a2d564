//! Session listing value object for device-management surfaces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::device::DeviceClass;
use crate::domain::entities::token::RefreshCredential;

/// A user-visible view of one active refresh credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub device_class: DeviceClass,
    pub user_agent: String,
    pub ip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

impl From<&RefreshCredential> for SessionInfo {
    fn from(credential: &RefreshCredential) -> Self {
        Self {
            id: credential.id,
            device_class: credential.device.device_class,
            user_agent: credential.device.user_agent.clone(),
            ip: credential.device.ip.clone(),
            created_at: credential.created_at,
            last_used_at: credential.last_used_at,
            expires_at: credential.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::device::DeviceInfo;
    use chrono::Duration;

    #[test]
    fn test_session_info_projection() {
        let credential = RefreshCredential::new(
            Uuid::new_v4(),
            "hash".to_string(),
            DeviceInfo::from_user_agent("Mozilla/5.0 (iPhone) Mobile", None),
            Duration::days(30),
        );

        let info = SessionInfo::from(&credential);
        assert_eq!(info.id, credential.id);
        assert_eq!(info.device_class, DeviceClass::Mobile);
        assert!(info.last_used_at.is_none());
    }
}
