/// Microsoft Graph endpoint used for the remote workbook
pub const DEFAULT_MIRROR_BASE_URL: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_WORKBOOK_NAME: &str = "inventory.xlsx";

/// Settings for the remote workbook mirror
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorConfig {
    pub base_url: String,
    /// Bearer token of the signed-in session; `None` means signed out
    pub access_token: Option<String>,
    pub workbook_name: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MIRROR_BASE_URL.to_string(),
            access_token: None,
            workbook_name: DEFAULT_WORKBOOK_NAME.to_string(),
        }
    }
}

impl MirrorConfig {
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.trim().is_empty()).then_some(token);
        self
    }
}
