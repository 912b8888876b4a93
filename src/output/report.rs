// JSON reports for `--json`.
//
// Every command wraps its results in the same envelope so scripts can tell
// which measure and which relations produced a number.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use crate::ontology::Relations;
use crate::similarity::Measure;

#[derive(Debug, Serialize)]
pub struct Report<T: Serialize> {
    pub generated_at: String,
    pub command: &'static str,
    pub measure: Measure,
    pub relations: Relations,
    pub results: T,
}

impl<T: Serialize> Report<T> {
    pub fn new(
        command: &'static str,
        measure: Measure,
        relations: Relations,
        results: T,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            command,
            measure,
            relations,
            results,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Print the report to stdout.
    pub fn print(&self) -> Result<()> {
        println!("{}", self.to_json()?);
        Ok(())
    }
}
