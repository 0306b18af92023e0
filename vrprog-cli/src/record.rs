//! CLEVR question files.
//!
//! A question file is a JSON object with a `questions` array. Only the fields used by the
//! preprocessing commands are modeled; unknown fields are ignored. Test splits ship without
//! programs or answers, hence the options.
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use vrprog::program::ProgramList;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionFile {
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub image_index: Option<u64>,
    #[serde(default)]
    pub question_family_index: Option<i64>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub program: Option<ProgramList>,
}

impl QuestionFile {
    pub fn from_json_str(source: &str, origin: &str) -> CliResult<Self> {
        serde_json::from_str(source).map_err(|e| CliError::Json {
            path: origin.to_string(),
            source: e,
        })
    }

    pub fn load(path: &Path) -> CliResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| CliError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let file = Self::from_json_str(&source, &path.display().to_string())?;
        info!(
            "Loaded {} question(s) from `{}`",
            file.questions.len(),
            path.display()
        );
        Ok(file)
    }
}
