use serde::{Deserialize, Serialize};

/// Profile of a user as served by the remote user-info API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Envelope wrapping every payload of the user-info API.
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}
