use serde::{Deserialize, Serialize};

use crate::Preferences;

pub const CURRENT_VERSION: &str = "v1";

/// Preferences file in any supported version.
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "version")]
pub enum AnyVersion {
    #[serde(rename = "v1")]
    V1(Box<Preferences>),
}
impl AnyVersion {
    pub fn into_current(self) -> Preferences {
        match self {
            AnyVersion::V1(p) => *p,
            // for future versions, migrate past versions one step forward
        }
    }
}
impl From<Preferences> for AnyVersion {
    fn from(prefs: Preferences) -> Self {
        AnyVersion::V1(Box::new(prefs))
    }
}
