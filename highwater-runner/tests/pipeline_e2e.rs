//! End-to-end pipeline tests with in-memory providers and a fixed clock.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use highwater_core::data::{DataError, DataProvider, InMemoryProvider};
use highwater_core::{
    compute_signal, FixedClock, GapError, PriceBasis, PricePoint, PriceSeries, ProviderId, Signal,
};
use std::cell::Cell;
use highwater_runner::{run_pipeline, PipelineError, SignalConfig, SignalReport, Validity};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn evening(date: NaiveDate) -> FixedClock {
    FixedClock(date.and_hms_opt(18, 30, 0).unwrap())
}

fn weekdays(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days()
        .take_while(|&date| date <= to)
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

fn trending(dates: &[NaiveDate], source: ProviderId) -> PriceSeries {
    let points = dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let close = 320.0 + (i as f64 * 0.12).sin() * 15.0 + i as f64 * 0.05;
            PricePoint::new(date, (close * 100.0).round() / 100.0)
        })
        .collect();
    PriceSeries::new("SPY", source, points).unwrap()
}

/// Wraps a provider and counts fetches.
struct Counting {
    inner: InMemoryProvider,
    calls: Cell<usize>,
}

impl Counting {
    fn new(inner: InMemoryProvider) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }
}

impl DataProvider for Counting {
    fn id(&self) -> ProviderId {
        self.inner.id()
    }

    fn fetch_daily_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.fetch_daily_close(symbol, start, end)
    }
}

fn every_other_weekday_of(year: i32, dates: &[NaiveDate]) -> Vec<NaiveDate> {
    dates
        .iter()
        .enumerate()
        .filter(|(i, date)| date.year() != year || i % 2 == 0)
        .map(|(_, &date)| date)
        .collect()
}

fn providers(dates: &[NaiveDate]) -> (InMemoryProvider, InMemoryProvider) {
    (
        InMemoryProvider::new(ProviderId::Yahoo, trending(dates, ProviderId::Yahoo)),
        InMemoryProvider::new(ProviderId::Nasdaq, trending(dates, ProviderId::Nasdaq)),
    )
}

#[test]
fn full_run_produces_report() {
    // GIVEN two providers with identical 2020 weekday closes
    let dates = weekdays(d(2020, 1, 1), d(2020, 12, 31));
    let (yahoo, nasdaq) = providers(&dates);
    let config = SignalConfig::default();

    // WHEN the pipeline runs on the evening of 2020-12-31
    let report = run_pipeline(&yahoo, &nasdaq, &config, &evening(d(2020, 12, 31))).unwrap();
    let summary = SignalReport::from_comparison(&report, &config).unwrap();

    // THEN the summary matches the primary provider's own signal series
    let expected = compute_signal(&trending(&dates, ProviderId::Yahoo), config.window);
    let last = expected.last().unwrap();
    assert_eq!(summary.date, d(2020, 12, 31));
    assert_eq!(summary.close, last.close);
    assert_eq!(Some(summary.signal), last.signal);
    assert_eq!(summary.validity, Validity::Yes);

    // AND the table lists at most ten actionable dates, oldest first
    assert!(!summary.recent.is_empty());
    assert!(summary.recent.len() <= 10);
    assert!(summary.recent.windows(2).all(|w| w[0].date < w[1].date));
    assert!(summary.recent.iter().all(|l| l.signal != Signal::DoNothing));

    let text = summary.render();
    assert!(text.starts_with("Date: 2020-12-31\nClose: "));
    assert!(text.contains("\nValid: YES\n"));
    assert!(text.contains("Max 99"));
}

#[test]
fn morning_run_excludes_today() {
    let dates = weekdays(d(2020, 1, 1), d(2020, 12, 31));
    let (yahoo, nasdaq) = providers(&dates);
    let morning = FixedClock(
        NaiveDateTime::new(d(2020, 12, 31), chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
    );

    let report = run_pipeline(&yahoo, &nasdaq, &SignalConfig::default(), &morning).unwrap();
    assert_eq!(report.latest().unwrap().date, d(2020, 12, 30));
}

#[test]
fn sparse_secondary_aborts_with_gap_error() {
    // GIVEN the secondary provider is missing every other weekday of 2019
    let dates = weekdays(d(2019, 1, 1), d(2020, 6, 30));
    let sparse = every_other_weekday_of(2019, &dates);
    let yahoo = InMemoryProvider::new(ProviderId::Yahoo, trending(&dates, ProviderId::Yahoo));
    let nasdaq = InMemoryProvider::new(ProviderId::Nasdaq, trending(&sparse, ProviderId::Nasdaq));

    // WHEN the pipeline runs
    let err = run_pipeline(&yahoo, &nasdaq, &SignalConfig::default(), &evening(d(2020, 6, 30)))
        .unwrap_err();

    // THEN the run aborts, naming the provider and the year
    match err {
        PipelineError::Validation {
            provider,
            source: GapError::TooManySkippedDays { year, skipped, .. },
        } => {
            assert_eq!(provider, ProviderId::Nasdaq);
            assert_eq!(year, 2019);
            assert!(skipped > 13);
        }
        other => panic!("expected gap failure, got {other:?}"),
    }
}

#[test]
fn sparse_primary_aborts_before_secondary_is_fetched() {
    // GIVEN the primary provider is missing every other weekday of 2019
    let dates = weekdays(d(2019, 1, 1), d(2020, 6, 30));
    let sparse = every_other_weekday_of(2019, &dates);
    let yahoo = InMemoryProvider::new(ProviderId::Yahoo, trending(&sparse, ProviderId::Yahoo));
    let nasdaq = Counting::new(InMemoryProvider::new(
        ProviderId::Nasdaq,
        trending(&dates, ProviderId::Nasdaq),
    ));

    // WHEN the pipeline runs
    let err = run_pipeline(&yahoo, &nasdaq, &SignalConfig::default(), &evening(d(2020, 6, 30)))
        .unwrap_err();

    // THEN the run aborts on the primary and never touches the secondary
    match err {
        PipelineError::Validation {
            provider,
            source: GapError::TooManySkippedDays { year, .. },
        } => {
            assert_eq!(provider, ProviderId::Yahoo);
            assert_eq!(year, 2019);
        }
        other => panic!("expected gap failure, got {other:?}"),
    }
    assert_eq!(nasdaq.calls.get(), 0);
}

#[test]
fn mixed_price_bases_are_refused_before_fetching() {
    // GIVEN a printed-close primary and a dividend-adjusted secondary
    let dates = weekdays(d(2020, 1, 1), d(2020, 12, 31));
    let yahoo = Counting::new(InMemoryProvider::new(
        ProviderId::Yahoo,
        trending(&dates, ProviderId::Yahoo),
    ));
    let stooq = Counting::new(InMemoryProvider::new(
        ProviderId::Stooq,
        trending(&dates, ProviderId::Stooq),
    ));

    // WHEN the pipeline runs
    let err = run_pipeline(&yahoo, &stooq, &SignalConfig::default(), &evening(d(2020, 12, 31)))
        .unwrap_err();

    // THEN it refuses to reconcile and neither provider is called
    assert!(matches!(
        err,
        PipelineError::BasisMismatch {
            primary_basis: PriceBasis::SplitAdjusted,
            secondary_basis: PriceBasis::DividendAdjusted,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "yahoo reports split-adjusted closes but stooq reports dividend-adjusted"
    );
    assert_eq!(yahoo.calls.get(), 0);
    assert_eq!(stooq.calls.get(), 0);
}

#[test]
fn missing_data_aborts_as_unavailable() {
    // Primary serves data that ends before the fetch window starts.
    let old = weekdays(d(2000, 1, 3), d(2000, 3, 31));
    let dates = weekdays(d(2020, 1, 1), d(2020, 12, 31));
    let yahoo = InMemoryProvider::new(ProviderId::Yahoo, trending(&old, ProviderId::Yahoo));
    let nasdaq = InMemoryProvider::new(ProviderId::Nasdaq, trending(&dates, ProviderId::Nasdaq));

    let err = run_pipeline(&yahoo, &nasdaq, &SignalConfig::default(), &evening(d(2020, 12, 31)))
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::DataUnavailable {
            provider: ProviderId::Yahoo,
            source: DataError::NoData { .. },
        }
    ));
    assert!(err.to_string().starts_with("data unavailable from yahoo"));
}

#[test]
fn disjoint_providers_have_no_common_dates() {
    let yahoo_dates = weekdays(d(2020, 1, 1), d(2020, 6, 30));
    let nasdaq_dates = weekdays(d(2020, 7, 1), d(2020, 12, 31));
    let yahoo = InMemoryProvider::new(ProviderId::Yahoo, trending(&yahoo_dates, ProviderId::Yahoo));
    let nasdaq = InMemoryProvider::new(ProviderId::Nasdaq, trending(&nasdaq_dates, ProviderId::Nasdaq));

    let err = run_pipeline(&yahoo, &nasdaq, &SignalConfig::default(), &evening(d(2020, 12, 31)))
        .unwrap_err();
    assert!(matches!(err, PipelineError::NoCommonDates { .. }));
}
