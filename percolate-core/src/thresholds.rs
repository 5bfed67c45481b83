//! Threshold sequences that drive a sweep.

use std::sync::Arc;

use crate::{Result, error::SweepError, source::GraphSource, sweep::read_numeric};

/// Upper bound on the length of a generated threshold sequence.
pub const MAX_GENERATED_THRESHOLDS: usize = 1_000_000;

/// A finite, ordered sequence of threshold values.
///
/// Values are kept exactly as supplied: duplicates are preserved and no
/// sorting takes place. Every value is guaranteed to be finite.
///
/// # Examples
/// ```
/// use percolate_core::Thresholds;
///
/// let thresholds = Thresholds::integers_through(3.7)?;
/// assert_eq!(thresholds.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
///
/// let stepped = Thresholds::stepped(0.0, 1.0, 0.25)?;
/// assert_eq!(stepped.len(), 5);
/// # Ok::<(), percolate_core::SweepError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Thresholds(Vec<f64>);

impl Thresholds {
    /// Wraps an explicit sequence of thresholds.
    ///
    /// # Errors
    /// Returns [`SweepError::InvalidThreshold`] when a value is NaN or
    /// infinite.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Result<Self> {
        let values: Vec<f64> = values.into_iter().collect();
        if let Some(&value) = values.iter().find(|value| !value.is_finite()) {
            return Err(SweepError::InvalidThreshold { value });
        }
        Ok(Self(values))
    }

    /// Consecutive integers from `0` up to `floor(max)`, inclusive.
    ///
    /// A negative `max` yields an empty sequence.
    ///
    /// # Errors
    /// Returns [`SweepError::InvalidThreshold`] for a non-finite `max` and
    /// [`SweepError::TooManyThresholds`] when the sequence would exceed
    /// [`MAX_GENERATED_THRESHOLDS`].
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "the value is floored, non-negative and bounded by the limit check"
    )]
    pub fn integers_through(max: f64) -> Result<Self> {
        if !max.is_finite() {
            return Err(SweepError::InvalidThreshold { value: max });
        }
        if max < 0.0 {
            return Ok(Self::default());
        }
        let last = max.floor();
        if last >= MAX_GENERATED_THRESHOLDS as f64 {
            return Err(SweepError::TooManyThresholds {
                requested: (last as u64).saturating_add(1),
                limit: MAX_GENERATED_THRESHOLDS,
            });
        }
        let last = last as u64;
        Ok(Self((0..=last).map(|value| value as f64).collect()))
    }

    /// Inclusive arithmetic sequence `start, start + step, ...` up to `stop`.
    ///
    /// A `stop` below `start` yields an empty sequence. A tolerance of one
    /// part in a billion of `step` keeps `stop` itself in the sequence when
    /// floating-point accumulation would otherwise drop it.
    ///
    /// # Errors
    /// Returns [`SweepError::InvalidThreshold`] for non-finite bounds,
    /// [`SweepError::InvalidStep`] unless `step` is finite and positive, and
    /// [`SweepError::TooManyThresholds`] when the sequence would be too long.
    #[expect(clippy::float_arithmetic, reason = "sequence generation")]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "the count is floored, non-negative and bounded by the limit check"
    )]
    pub fn stepped(start: f64, stop: f64, step: f64) -> Result<Self> {
        for value in [start, stop] {
            if !value.is_finite() {
                return Err(SweepError::InvalidThreshold { value });
            }
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(SweepError::InvalidStep { step });
        }
        if stop < start {
            return Ok(Self::default());
        }
        let intervals = ((stop - start) / step + 1e-9).floor();
        if !intervals.is_finite() || intervals >= MAX_GENERATED_THRESHOLDS as f64 {
            return Err(SweepError::TooManyThresholds {
                requested: if intervals.is_finite() {
                    (intervals as u64).saturating_add(1)
                } else {
                    u64::MAX
                },
                limit: MAX_GENERATED_THRESHOLDS,
            });
        }
        let count = intervals as u64;
        Ok(Self(
            (0..=count)
                .map(|index| start + step * index as f64)
                .collect(),
        ))
    }

    /// Integers from `0` through the largest value of the edge attribute
    /// `name`, mirroring a sweep that walks every whole unit of the
    /// criterion.
    ///
    /// A graph without edges yields an empty sequence.
    ///
    /// # Errors
    /// Returns the attribute validation errors of
    /// [`crate::PercolationSweep::run`] when an edge lacks the attribute or
    /// holds a non-numeric or non-finite value, plus the errors of
    /// [`Thresholds::integers_through`].
    pub fn for_attribute<G: GraphSource + ?Sized>(graph: &G, name: &str) -> Result<Self> {
        let attribute: Arc<str> = Arc::from(name);
        let mut max: Option<f64> = None;
        for edge in 0..graph.edge_count() {
            let value = read_numeric(graph, edge, &attribute)?;
            max = Some(max.map_or(value, |current| current.max(value)));
        }
        max.map_or_else(|| Ok(Self::default()), Self::integers_through)
    }

    /// Returns the thresholds as a slice.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[f64] { &self.0 }

    /// Returns the number of thresholds.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.0.len() }

    /// Returns `true` when there are no thresholds.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl AsRef<[f64]> for Thresholds {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
