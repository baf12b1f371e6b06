use serde::Deserialize;

/// 作業ログの作成者（表示名のみ使う）
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(rename = "displayName")]
    pub display_name: String,
}
