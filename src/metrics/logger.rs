use super::report::ComparisonRow;
use anyhow::Result;
use csv::Writer;
use std::fs::File;
use std::path::Path;

pub struct ReportLogger {
    writer: Writer<File>,
}

impl ReportLogger {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log(&mut self, row: &ComparisonRow) -> Result<()> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn log_batch(&mut self, rows: &[ComparisonRow]) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
