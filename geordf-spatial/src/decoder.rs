//! Lazy result sequence for topological queries.
//!
//! # State machine
//!
//! ```text
//!   Unopened ──first has_next/next──▶ Open ──cursor drained──▶ Exhausted
//!       │                              │                          │
//!       └──────────── close ───────────┴────────── close ─────────┴──▶ Closed
//! ```
//!
//! The backend read is issued exactly once, on the first pull. The cursor
//! is released on `close`, when it is drained, and when the decoder is
//! dropped.

use crate::error::{GeoIndexError, Result};
use crate::feature::{Feature, FeatureType};
use crate::provider::{FeatureCursor, GeoBackend};
use crate::query::FilterExpr;
use geordf_graph_ir::Statement;
use std::sync::Arc;

enum DecoderState<C> {
    Unopened,
    Open { cursor: C, peeked: Option<Feature> },
    Exhausted,
    Closed,
}

/// Forward-only, single-use sequence of statements matching a filter.
pub struct ResultDecoder<B: GeoBackend> {
    backend: Arc<B>,
    feature_type: Arc<FeatureType>,
    filter: FilterExpr,
    state: DecoderState<B::Cursor>,
}

impl<B: GeoBackend> ResultDecoder<B> {
    pub(crate) fn new(backend: Arc<B>, feature_type: Arc<FeatureType>, filter: FilterExpr) -> Self {
        Self {
            backend,
            feature_type,
            filter,
            state: DecoderState::Unopened,
        }
    }

    pub fn filter(&self) -> &FilterExpr {
        &self.filter
    }

    /// True until the first pull opens the backend cursor.
    pub fn is_unopened(&self) -> bool {
        matches!(self.state, DecoderState::Unopened)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, DecoderState::Closed)
    }

    /// Whether another statement is available. Opens the cursor on first
    /// call.
    pub fn has_next(&mut self) -> Result<bool> {
        loop {
            match &mut self.state {
                DecoderState::Unopened => self.open()?,
                DecoderState::Open { peeked: Some(_), .. } => return Ok(true),
                DecoderState::Open { cursor, peeked } => match cursor.next_feature()? {
                    Some(feature) => {
                        *peeked = Some(feature);
                        return Ok(true);
                    }
                    None => {
                        self.release(DecoderState::Exhausted)?;
                        return Ok(false);
                    }
                },
                DecoderState::Exhausted => return Ok(false),
                DecoderState::Closed => return Err(GeoIndexError::UsedAfterClose),
            }
        }
    }

    /// Decode the next statement.
    ///
    /// Fails with `Exhausted` once the sequence is drained and with
    /// `UsedAfterClose` after `close`.
    pub fn next_statement(&mut self) -> Result<Statement> {
        if !self.has_next()? {
            return Err(GeoIndexError::Exhausted);
        }
        let feature = match &mut self.state {
            DecoderState::Open { peeked, .. } => peeked.take(),
            _ => None,
        }
        .ok_or(GeoIndexError::Exhausted)?;

        tracing::trace!(id = %feature.id, "Decoding feature");
        Ok(feature.to_statement()?)
    }

    /// Release the backend cursor. Valid in any state; idempotent.
    pub fn close(&mut self) -> Result<()> {
        self.release(DecoderState::Closed)
    }

    fn open(&mut self) -> Result<()> {
        tracing::debug!(filter = %self.filter, "Performing geo query");
        match self.backend.read_features(&self.feature_type, &self.filter) {
            Ok(cursor) => {
                self.state = DecoderState::Open {
                    cursor,
                    peeked: None,
                };
                Ok(())
            }
            Err(e) => {
                tracing::error!(filter = %self.filter, error = %e, "Error performing query");
                self.state = DecoderState::Exhausted;
                Err(e)
            }
        }
    }

    fn release(&mut self, next: DecoderState<B::Cursor>) -> Result<()> {
        match std::mem::replace(&mut self.state, next) {
            DecoderState::Open { mut cursor, .. } => cursor.close(),
            _ => Ok(()),
        }
    }
}

impl<B: GeoBackend> Iterator for ResultDecoder<B> {
    type Item = Result<Statement>;

    /// Yields `None` once drained or closed.
    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => Some(self.next_statement()),
            Ok(false) | Err(GeoIndexError::UsedAfterClose) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<B: GeoBackend> Drop for ResultDecoder<B> {
    fn drop(&mut self) {
        if let Err(e) = self.release(DecoderState::Closed) {
            tracing::debug!(error = %e, "Error releasing cursor on drop");
        }
    }
}
