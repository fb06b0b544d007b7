use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub display_name: Option<String>,
    pub shop_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct OAuthStartQuery {
    pub redirect: Option<String>,
}

#[derive(Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Codes arrive either as `"P0301, P0171"` or as `["P0301", "P0171"]`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum CodesInput {
    List(Vec<String>),
    Text(String),
}

impl CodesInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            CodesInput::List(codes) => codes,
            CodesInput::Text(raw) => raw.split(',').map(str::to_string).collect(),
        }
    }
}

#[derive(Deserialize)]
pub struct GenerateReportRequest {
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub mileage: Option<i32>,
    pub codes: Option<CodesInput>,
    pub complaint: Option<String>,
    pub notes: Option<String>,
    pub mode: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct HistoryQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub code: Option<String>,
    pub q: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub mine: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShopSettingsRequest {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub default_report_mode: Option<String>,
    pub default_report_tone: Option<String>,
    pub default_include_maint: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserSettingsRequest {
    pub display_name: Option<String>,
}
