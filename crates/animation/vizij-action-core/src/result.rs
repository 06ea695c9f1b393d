//! Keying outcomes and their aggregation.
//!
//! Every attempted write of one array component produces exactly one
//! [`SingleKeyingResult`]. A commit call returns the histogram of those
//! outcomes as a [`CombinedKeyingResult`]; it never fails past its own
//! boundary, however many components were rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::report::{ReportSeverity, Reporter};

/// Outcome of keying a single array component of a single property.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SingleKeyingResult {
    Success = 0,
    UnknownFailure,
    CannotCreateCurve,
    /// The curve is locked, sampled, or has modifiers that block keying.
    CurveNotKeyframeable,
    /// "Only insert needed" found the value already in place.
    NoKeyNeeded,
    /// The NLA stack could not map the value into action space.
    UnableToRemap,
    IdNotEditable,
    IdNotAnimatable,
    CannotResolvePath,
    NoValidLayer,
    NoValidStrip,
    NoValidBinding,
}

impl SingleKeyingResult {
    pub const COUNT: usize = 12;

    pub const ALL: [SingleKeyingResult; Self::COUNT] = [
        SingleKeyingResult::Success,
        SingleKeyingResult::UnknownFailure,
        SingleKeyingResult::CannotCreateCurve,
        SingleKeyingResult::CurveNotKeyframeable,
        SingleKeyingResult::NoKeyNeeded,
        SingleKeyingResult::UnableToRemap,
        SingleKeyingResult::IdNotEditable,
        SingleKeyingResult::IdNotAnimatable,
        SingleKeyingResult::CannotResolvePath,
        SingleKeyingResult::NoValidLayer,
        SingleKeyingResult::NoValidStrip,
        SingleKeyingResult::NoValidBinding,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Human-readable explanation of `count` occurrences of this outcome.
    /// `None` for [`SingleKeyingResult::Success`].
    fn describe(self, count: usize) -> Option<String> {
        let msg = match self {
            SingleKeyingResult::Success => return None,
            SingleKeyingResult::UnknownFailure => {
                format!("There were {count} keying failures for unknown reasons.")
            }
            SingleKeyingResult::CannotCreateCurve => format!(
                "Could not create {count} F-Curve(s). This can happen when only inserting to \
                 available F-Curves."
            ),
            SingleKeyingResult::CurveNotKeyframeable => format!(
                "{count} F-Curve(s) are not keyframeable. They might be locked or sampled."
            ),
            SingleKeyingResult::NoKeyNeeded => format!(
                "Due to the setting 'Only Insert Needed', {count} keyframe(s) have not been \
                 inserted."
            ),
            SingleKeyingResult::UnableToRemap => format!(
                "Due to the NLA stack setup, {count} keyframe(s) have not been inserted."
            ),
            SingleKeyingResult::IdNotEditable => format!(
                "Inserting keys on {count} data-block(s) has been skipped because they are not \
                 editable."
            ),
            SingleKeyingResult::IdNotAnimatable => format!(
                "Inserting keys on {count} data-block(s) has been skipped because they cannot be \
                 animated."
            ),
            SingleKeyingResult::CannotResolvePath => format!(
                "Inserting keys on {count} data-block(s) has been skipped because the property \
                 path wasn't valid for them."
            ),
            SingleKeyingResult::NoValidLayer => format!(
                "Inserting keys on {count} data-block(s) has been skipped because there were no \
                 layers that could accept the keys."
            ),
            SingleKeyingResult::NoValidStrip => format!(
                "Inserting keys on {count} data-block(s) has been skipped because there were no \
                 strips that could accept the keys."
            ),
            SingleKeyingResult::NoValidBinding => format!(
                "Inserting keys on {count} data-block(s) has been skipped because of missing \
                 animation bindings."
            ),
        };
        Some(msg)
    }
}

/// Fixed-size histogram of keying outcomes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedKeyingResult {
    counts: [usize; SingleKeyingResult::COUNT],
}

impl CombinedKeyingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Histogram holding a single outcome, used for whole-call failures.
    pub fn single(result: SingleKeyingResult) -> Self {
        let mut combined = Self::new();
        combined.add(result);
        combined
    }

    #[inline]
    pub fn add(&mut self, result: SingleKeyingResult) {
        self.add_count(result, 1);
    }

    #[inline]
    pub fn add_count(&mut self, result: SingleKeyingResult, count: usize) {
        self.counts[result.index()] += count;
    }

    pub fn merge(&mut self, other: &CombinedKeyingResult) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += *theirs;
        }
    }

    #[inline]
    pub fn get_count(&self, result: SingleKeyingResult) -> usize {
        self.counts[result.index()]
    }

    /// Total number of recorded outcomes, successes included.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Whether any outcome other than `Success` was recorded.
    pub fn has_errors(&self) -> bool {
        self.counts[1..].iter().any(|&c| c > 0)
    }

    /// Nothing was written and nothing went wrong either.
    pub fn is_anomalous(&self) -> bool {
        !self.has_errors() && self.get_count(SingleKeyingResult::Success) == 0
    }

    /// Turn the histogram into user-facing reports.
    ///
    /// Successful-only results report nothing. A result with neither
    /// successes nor errors is reported as a warning of its own.
    pub fn generate_reports(&self, reports: &mut dyn Reporter) {
        if self.is_anomalous() {
            reports.report(
                ReportSeverity::Warning,
                "No keys have been inserted and no errors have been reported.",
            );
            return;
        }

        let errors: Vec<String> = SingleKeyingResult::ALL
            .iter()
            .filter_map(|&r| match self.get_count(r) {
                0 => None,
                n => r.describe(n),
            })
            .collect();

        match errors.len() {
            0 => {}
            1 => reports.report(ReportSeverity::Error, &errors[0]),
            _ => {
                let mut message = String::from("Inserting keyframes failed:");
                for error in &errors {
                    message.push_str("\n- ");
                    message.push_str(error);
                }
                reports.report(ReportSeverity::Error, &message);
            }
        }
    }
}

impl fmt::Display for CombinedKeyingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for r in SingleKeyingResult::ALL {
            let n = self.get_count(r);
            if n == 0 {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{r:?}={n}")?;
            first = false;
        }
        if first {
            f.write_str("(empty)")?;
        }
        Ok(())
    }
}
