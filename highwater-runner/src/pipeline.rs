//! Two-provider pipeline.
//!
//! For each provider: fetch → gap check → signal. Then join the two signal
//! series into a comparison report. Any failure aborts the whole run; there
//! is no partial report and no retry. Both providers must report closes on
//! the same adjustment basis, checked before anything is fetched.

use crate::config::SignalConfig;
use crate::reconcile::ComparisonReport;
use highwater_core::data::{fetch_close_series, DataError, DataProvider, FetchWindow};
use highwater_core::{compute_signal, Clock, GapError, PriceBasis, ProviderId, SignalSeries};
use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data unavailable from {provider}: {source}")]
    DataUnavailable {
        provider: ProviderId,
        #[source]
        source: DataError,
    },

    #[error("{provider} data failed the gap check: {source}")]
    Validation {
        provider: ProviderId,
        #[source]
        source: GapError,
    },

    #[error("{primary} reports {primary_basis} closes but {secondary} reports {secondary_basis}")]
    BasisMismatch {
        primary: ProviderId,
        primary_basis: PriceBasis,
        secondary: ProviderId,
        secondary_basis: PriceBasis,
    },

    #[error("{primary} and {secondary} have no dates in common")]
    NoCommonDates {
        primary: ProviderId,
        secondary: ProviderId,
    },
}

/// Fetch, validate and compute the signal for a single provider.
pub fn run_provider(
    provider: &dyn DataProvider,
    config: &SignalConfig,
    window: FetchWindow,
) -> Result<SignalSeries, PipelineError> {
    let id = provider.id();

    let series = fetch_close_series(provider, &config.symbol, window).map_err(|source| {
        PipelineError::DataUnavailable {
            provider: id,
            source,
        }
    })?;

    config
        .gap_validator()
        .validate(&series)
        .map_err(|source| PipelineError::Validation {
            provider: id,
            source,
        })?;

    let signals = compute_signal(&series, config.window);
    tracing::info!(
        provider = %id,
        rows = signals.len(),
        window = config.window,
        "computed rolling-max signal"
    );
    Ok(signals)
}

/// Run both providers over the same window and reconcile them.
pub fn run_pipeline(
    primary: &dyn DataProvider,
    secondary: &dyn DataProvider,
    config: &SignalConfig,
    clock: &dyn Clock,
) -> Result<ComparisonReport, PipelineError> {
    if primary.basis() != secondary.basis() {
        return Err(PipelineError::BasisMismatch {
            primary: primary.id(),
            primary_basis: primary.basis(),
            secondary: secondary.id(),
            secondary_basis: secondary.basis(),
        });
    }

    let window = config.fetch_window(clock);

    let primary_signals = run_provider(primary, config, window)?;
    let secondary_signals = run_provider(secondary, config, window)?;

    let report = ComparisonReport::join(&primary_signals, &secondary_signals, config.tolerance);
    if report.is_empty() {
        return Err(PipelineError::NoCommonDates {
            primary: primary.id(),
            secondary: secondary.id(),
        });
    }

    let disagreements = report.disagreements(config.validity_window);
    if disagreements > 0 {
        tracing::warn!(
            primary = %report.primary,
            secondary = %report.secondary,
            disagreements,
            window = config.validity_window,
            "providers disagree on recent closes"
        );
    }

    Ok(report)
}
