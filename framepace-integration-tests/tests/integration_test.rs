use framepace_cli::analyze;
use framepace_cli::input::{CaptureFile, CaptureRun};
use framepace_common::{AnalysisConfig, Metric, PacingError};
use framepace_stats::{FrameMetrics, RunSamples, SampleSet};
use rand::{rngs::StdRng, Rng, SeedableRng};

const FRAMES: usize = 5_000;

/// A 60 Hz-ish capture: small jitter around `base_ms`, plus `stutters` hitches.
fn capture(rng: &mut StdRng, base_ms: f64, jitter_ms: f64, stutters: usize) -> Vec<f64> {
    let mut samples: Vec<f64> = (0..FRAMES)
        .map(|_| base_ms + rng.gen_range(-jitter_ms..=jitter_ms))
        .collect();
    for _ in 0..stutters {
        let at = rng.gen_range(0..FRAMES);
        samples[at] = base_ms * rng.gen_range(3.0..6.0);
    }
    samples
}

fn affinity_session() -> Vec<RunSamples> {
    let mut rng = StdRng::seed_from_u64(2024);
    // CPU 2 is the well-behaved core; CPU 0 shares its interrupts with everything else.
    [(0, 0.8, 60), (1, 0.4, 20), (2, 0.1, 2), (3, 0.5, 25)]
        .into_iter()
        .map(|(cpu, jitter, stutters)| RunSamples {
            run_id: cpu.to_string(),
            samples: SampleSet::new(capture(&mut rng, 16.6, jitter, stutters)).unwrap(),
        })
        .collect()
}

#[test]
fn test_full_session_ranks_the_smooth_core_first() {
    let runs = affinity_session();
    let table = analyze(&runs, &AnalysisConfig::default()).unwrap();

    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.header.len(), 1 + Metric::default_set().len());

    for metric in [Metric::Stdev, Metric::Percentile(1.0), Metric::Lows(1.0)] {
        let column = table.column(&metric).unwrap();
        assert_eq!(column.best_runs(), vec!["2"], "{metric:?}");
    }
    // The noisiest core earns no highlight on consistency metrics
    for metric in [Metric::Stdev, Metric::Percentile(1.0)] {
        assert_eq!(table.column(&metric).unwrap().cells[0].1.tier, None, "{metric:?}");
    }
}

#[test]
fn test_every_row_respects_metric_bounds() {
    for run in affinity_session() {
        let m = FrameMetrics::new(&run.samples);
        let (min, max) = (m.minimum(), m.maximum());
        assert!(min <= m.average() && m.average() <= max);
        for p in [1.0, 0.1, 0.01, 0.005] {
            let percentile = m.percentile(p).unwrap();
            let lows = m.lows(p).unwrap();
            assert!(min <= percentile && percentile <= max);
            assert!(min <= lows && lows <= max);
        }
    }
}

#[test]
fn test_rows_align_with_columns() {
    let runs = affinity_session();
    let table = analyze(&runs, &AnalysisConfig::default()).unwrap();

    for (col_idx, column) in table.columns.iter().enumerate() {
        for (row_idx, (run_id, cell)) in column.cells.iter().enumerate() {
            assert_eq!(&table.rows[row_idx].run_id, run_id);
            assert_eq!(&table.rows[row_idx].cells[col_idx], cell);
        }
    }
    let rows = table.to_rows();
    assert_eq!(rows[0][0], "CPU");
    assert_eq!(rows[1][0], "0");
}

#[test]
fn test_analysis_is_deterministic() {
    let runs = affinity_session();
    let config = AnalysisConfig::default();
    assert_eq!(analyze(&runs, &config).unwrap(), analyze(&runs, &config).unwrap());
}

#[test]
fn test_capture_file_pipeline() {
    let json = serde_json::to_string(&CaptureFile {
        runs: vec![
            CaptureRun { id: "0".to_string(), samples: vec![10.0, 20.0, 30.0, 40.0], trials: vec![] },
            CaptureRun {
                id: "1".to_string(),
                samples: vec![],
                trials: vec![vec![10.0, 20.0], vec![30.0, 30.0]],
            },
        ],
    })
    .unwrap();

    let capture: CaptureFile = serde_json::from_str(&json).unwrap();
    let runs = capture.into_runs().unwrap();
    let config = AnalysisConfig {
        metrics: vec![Metric::Average, Metric::Maximum, Metric::Percentile(25.0), Metric::Lows(50.0)],
        ..Default::default()
    };
    let table = analyze(&runs, &config).unwrap();

    let rows = table.to_rows();
    assert_eq!(rows[0], vec!["CPU", "Avg", "Max", "25 %ile", "50% Low"]);
    assert_eq!(rows[1], vec!["0", "40.00", "100.00", "25.00", "33.33"]);
    assert_eq!(rows[2], vec!["1", "44.44", "100.00", "33.33", "33.33"]);

    assert_eq!(table.column(&Metric::Average).unwrap().best_runs(), vec!["1"]);
    assert_eq!(table.column(&Metric::Maximum).unwrap().best_runs(), vec!["0", "1"]);
    assert_eq!(table.column(&Metric::Lows(50.0)).unwrap().best_runs(), vec!["0", "1"]);
}

#[test]
fn test_one_bad_run_fails_the_batch() {
    let mut runs = affinity_session();
    runs.push(RunSamples { run_id: "4".to_string(), samples: SampleSet::new(vec![16.6]).unwrap() });

    let err = analyze(&runs, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, PacingError::RunFailed { ref run, .. } if run == "4"), "{err:?}");
}
