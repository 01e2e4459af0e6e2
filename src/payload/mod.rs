use crate::runner::RunnerError;

/// Checkout functions restored into the "call Santa" landing page.
pub const RESTORED_CHECKOUT: &str = include_str!("../../payload/restored_checkout.js");

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PayloadSource {
    #[default]
    Embedded,
    FilePath(String),
    Inline(String),
}

impl PayloadSource {
    pub fn label(&self) -> String {
        match self {
            PayloadSource::Embedded => "embedded (restored checkout)".to_string(),
            PayloadSource::FilePath(path) => path.clone(),
            PayloadSource::Inline(_) => "inline".to_string(),
        }
    }
}

pub fn load_payload(source: &PayloadSource) -> Result<String, RunnerError> {
    match source {
        PayloadSource::Embedded => Ok(RESTORED_CHECKOUT.to_string()),
        PayloadSource::Inline(text) => Ok(text.clone()),
        PayloadSource::FilePath(path) => {
            std::fs::read_to_string(path).map_err(|e| RunnerError::FileRead {
                kind: "payload",
                path: path.clone(),
                source: e,
            })
        }
    }
}
