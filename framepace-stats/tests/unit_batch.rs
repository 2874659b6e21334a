use framepace_common::{Metric, PacingError};
use framepace_stats::{compute_records, compute_run, RunSamples, SampleSet};

fn run(id: &str, samples: &[f64]) -> RunSamples {
    RunSamples { run_id: id.to_string(), samples: SampleSet::new(samples.to_vec()).unwrap() }
}

#[test]
fn test_records_keep_input_order() {
    let runs: Vec<RunSamples> = (0..8)
        .map(|cpu| run(&cpu.to_string(), &[10.0 + cpu as f64, 20.0, 30.0]))
        .collect();
    let metrics = Metric::default_set();

    let records = compute_records(&runs, &metrics).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.run_id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5", "6", "7"]);

    // Threaded results match the sequential path exactly
    for (run, record) in runs.iter().zip(&records) {
        assert_eq!(&compute_run(run, &metrics).unwrap(), record);
    }
}

#[test]
fn test_failure_names_the_run() {
    let runs = vec![run("0", &[16.0, 17.0]), run("1", &[16.0]), run("2", &[15.0])];
    let err = compute_records(&runs, &[Metric::Average, Metric::Stdev]).unwrap_err();
    assert_eq!(
        err,
        PacingError::RunFailed {
            run: "1".to_string(),
            source: Box::new(PacingError::InsufficientSamples { required: 2, actual: 1 }),
        }
    );
}

#[test]
fn test_no_runs_yields_no_records() {
    assert!(compute_records(&[], &[Metric::Maximum]).unwrap().is_empty());
}
