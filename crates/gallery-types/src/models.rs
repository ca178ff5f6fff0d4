use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// `0001-01-01T00:00:00Z`, which older clients send for a timestamp they never set.
const LEGACY_ZERO_UNIX: i64 = -62_135_596_800;

/// An image stored on disk, plus the metadata the gallery keeps about it.
///
/// `id == 0` means the picture has not been persisted yet. The capitalised
/// aliases keep payloads from the older gallery clients readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    #[serde(default, alias = "ID")]
    pub id: i64,
    #[serde(alias = "Path")]
    pub path: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(default, alias = "CreatedAt", deserialize_with = "unset_if_zero")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        alias = "UpdatedAt",
        deserialize_with = "unset_if_zero",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

fn unset_if_zero<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ts = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(ts.filter(|ts| !(ts.timestamp() == LEGACY_ZERO_UNIX && ts.timestamp_subsec_nanos() == 0)))
}

impl Picture {
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}
