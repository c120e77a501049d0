//! Output writer: a JSON object keyed by hash, plus one human-readable
//! console line per hash.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::jobs::JobResult;

#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    pub cracked_password: Option<String>,
    pub status: String,
    pub job_id: Uuid,
}

impl OutputRecord {
    pub fn from_result(job_id: Uuid, result: &JobResult) -> Self {
        match result {
            JobResult::Found(password) => Self {
                cracked_password: Some(password.clone()),
                status: "FOUND".to_string(),
                job_id,
            },
            JobResult::NotFound => Self {
                cracked_password: None,
                status: "NOT_FOUND".to_string(),
                job_id,
            },
            JobResult::Failed => Self {
                cracked_password: None,
                status: "FAILED".to_string(),
                job_id,
            },
            JobResult::InvalidInput => Self {
                cracked_password: None,
                status: "INVALID_INPUT".to_string(),
                job_id,
            },
        }
    }

    pub fn console_line(&self, hash: &str) -> String {
        let value = self.cracked_password.as_deref().unwrap_or(&self.status);
        format!("{hash} {value} {job_id}", job_id = self.job_id)
    }
}

pub fn write_output_file(path: &Path, records: &BTreeMap<String, OutputRecord>) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_line_shows_password_when_found() {
        let record = OutputRecord::from_result(Uuid::nil(), &JobResult::Found("secret".into()));
        assert_eq!(
            record.console_line("5f4dcc3b5aa765d61d8327deb882cf99"),
            format!(
                "5f4dcc3b5aa765d61d8327deb882cf99 secret {}",
                Uuid::nil()
            )
        );
    }

    #[test]
    fn console_line_shows_status_otherwise() {
        let record = OutputRecord::from_result(Uuid::nil(), &JobResult::NotFound);
        assert!(record.console_line("hash").ends_with("NOT_FOUND 00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn writes_valid_json_keyed_by_hash() {
        let mut records = BTreeMap::new();
        records.insert(
            "5f4dcc3b5aa765d61d8327deb882cf99".to_string(),
            OutputRecord::from_result(Uuid::nil(), &JobResult::Found("password".into())),
        );
        let file = tempfile::NamedTempFile::new().unwrap();
        write_output_file(file.path(), &records).unwrap();
        let contents = std::fs::read_to_string(file.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(
            parsed["5f4dcc3b5aa765d61d8327deb882cf99"]["cracked_password"],
            "password"
        );
    }
}
