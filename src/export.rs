use crate::model::Student;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Some(Self::Excel),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excel => "Excel",
            Self::Pdf => "PDF",
        }
    }
}

/// Turns the currently filtered student rows into a file. The students page
/// only hands rows over; what a format produces is this collaborator's
/// business.
pub trait Exporter {
    fn export(&self, format: ExportFormat, rows: &[Student]) -> anyhow::Result<()>;
}

/// Placeholder shipped with the sidecar: accepts every export and writes
/// nothing. The page still emits its "export started" toast.
pub struct StubExporter;

impl Exporter for StubExporter {
    fn export(&self, _format: ExportFormat, _rows: &[Student]) -> anyhow::Result<()> {
        Ok(())
    }
}
