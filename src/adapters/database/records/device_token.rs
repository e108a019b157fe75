use crate::domain::device_token::DeviceTokenRecord;
use time::OffsetDateTime;

#[derive(Debug, sqlx::FromRow)]
pub struct DeviceTokenRow {
    pub(crate) user_id: String,
    pub(crate) token: String,
    pub(crate) device: Option<String>,
    pub(crate) last_used: OffsetDateTime,
}

impl From<DeviceTokenRow> for DeviceTokenRecord {
    fn from(row: DeviceTokenRow) -> Self {
        Self { token: row.token, device: row.device, last_used: row.last_used }
    }
}
