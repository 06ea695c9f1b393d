//! User-facing reports.
//!
//! Reports never steer control flow; they only surface what happened.
//! [`ReportList`] keeps them for the caller and mirrors each one to the
//! `log` facade.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ReportSeverity {
    Info,
    Warning,
    Error,
}

impl ReportSeverity {
    fn log_level(self) -> log::Level {
        match self {
            ReportSeverity::Info => log::Level::Info,
            ReportSeverity::Warning => log::Level::Warn,
            ReportSeverity::Error => log::Level::Error,
        }
    }
}

pub trait Reporter {
    fn report(&mut self, severity: ReportSeverity, message: &str);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub severity: ReportSeverity,
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReportList {
    reports: Vec<Report>,
}

impl ReportList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn count(&self, severity: ReportSeverity) -> usize {
        self.reports
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl Reporter for ReportList {
    fn report(&mut self, severity: ReportSeverity, message: &str) {
        log::log!(target: "vizij_action_core::report", severity.log_level(), "{message}");
        self.reports.push(Report {
            severity,
            message: message.to_string(),
        });
    }
}
