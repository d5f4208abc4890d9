//! Option exercise styles.
//!
//! An [`Exercise`] defines *when* an option can be exercised, or for Asian
//! contracts, when the underlying is sampled for the average. Times are
//! year fractions measured from the valuation time.

use bsm_core::{ensure, errors::Result, Time};
use std::fmt;

/// Tag of an [`Exercise`], without its time set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseType {
    /// Can only be exercised at expiry.
    European,
    /// Can be exercised at any time up to expiry.
    American,
    /// Can be exercised at specific times.
    Bermudan,
    /// Exercised at expiry on the average of sampled prices.
    Asian,
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExerciseType::European => "European",
            ExerciseType::American => "American",
            ExerciseType::Bermudan => "Bermudan",
            ExerciseType::Asian => "Asian",
        };
        f.write_str(name)
    }
}

/// Exercise specification for an option.
///
/// The variant is fixed at construction. Bermudan and Asian time sets are
/// kept sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Exercise {
    /// Exercise at expiry only.
    European,
    /// Exercise at any time up to expiry.
    American,
    /// Exercise at the listed times (and at expiry).
    Bermudan(Vec<Time>),
    /// Payoff on the arithmetic mean of prices at the listed times.
    Asian(Vec<Time>),
}

fn normalize_times(kind: ExerciseType, mut times: Vec<Time>) -> Result<Vec<Time>> {
    ensure!(!times.is_empty(), "{kind} exercise needs at least one time");
    ensure!(
        times.iter().all(|t| t.is_finite() && *t >= 0.0),
        "{kind} times must be finite and non-negative, got {times:?}"
    );
    times.sort_by(|a, b| a.total_cmp(b));
    times.dedup();
    Ok(times)
}

impl Exercise {
    /// Create a Bermudan exercise from a set of exercise times.
    pub fn bermudan(times: Vec<Time>) -> Result<Self> {
        normalize_times(ExerciseType::Bermudan, times).map(Exercise::Bermudan)
    }

    /// Create an Asian averaging schedule from a set of sampling times.
    pub fn asian(times: Vec<Time>) -> Result<Self> {
        normalize_times(ExerciseType::Asian, times).map(Exercise::Asian)
    }

    /// The type of exercise.
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            Exercise::European => ExerciseType::European,
            Exercise::American => ExerciseType::American,
            Exercise::Bermudan(_) => ExerciseType::Bermudan,
            Exercise::Asian(_) => ExerciseType::Asian,
        }
    }

    /// Bermudan exercise or Asian averaging times; empty otherwise.
    pub fn times(&self) -> &[Time] {
        match self {
            Exercise::Bermudan(t) | Exercise::Asian(t) => t,
            Exercise::European | Exercise::American => &[],
        }
    }

    /// Whether the holder may exercise before expiry.
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, Exercise::American | Exercise::Bermudan(_))
    }

    /// Latest time in the set, if any.
    pub fn last_time(&self) -> Option<Time> {
        self.times().last().copied()
    }

    /// Copy of `self` with every time later than `expiry` moved onto it.
    pub(crate) fn truncated(&self, expiry: Time) -> Self {
        let clip = |times: &[Time]| {
            let mut out: Vec<Time> = times.iter().map(|t| t.min(expiry)).collect();
            out.dedup();
            out
        };
        match self {
            Exercise::Bermudan(t) => Exercise::Bermudan(clip(t)),
            Exercise::Asian(t) => Exercise::Asian(clip(t)),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exercise::European | Exercise::American => write!(f, "{}", self.exercise_type()),
            Exercise::Bermudan(t) | Exercise::Asian(t) => {
                write!(f, "{}({} times)", self.exercise_type(), t.len())
            }
        }
    }
}
