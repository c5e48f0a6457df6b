use quantum::{
    expected_energy, AnsatzParams, MpsSimulator, NoiseConfig, QuantumError, StatePrep,
};
use vqe::{mean_absolute_error, shot_scaling, write_scaling_csv, ScalingConfig, VqeError};

#[test]
fn default_sweep_on_singlet_is_exact() {
    let config = ScalingConfig::default();
    let mut sim = MpsSimulator::from_seed("sweep");

    let points = shot_scaling(&mut sim, &config).unwrap();

    let shots: Vec<usize> = points.iter().map(|p| p.shots).collect();
    assert_eq!(shots, [256, 512, 1024, 2048, 4096, 8192]);
    for p in &points {
        // The singlet is an eigenstate of XX, YY and ZZ: no sampling variance.
        assert!(p.error < 1e-9, "{:?}", p);
        assert!((p.energy + 3.2).abs() < 1e-9, "{:?}", p);
    }
}

#[test]
fn fixed_mode_error_does_not_grow_with_shots() {
    let config = ScalingConfig::default();
    let exact = config.hamiltonian.ground_energy();

    let errors: Vec<f64> = [256, 1024, 8192]
        .iter()
        .map(|&s| mean_absolute_error(&config, s, exact, 8, "fixed").unwrap())
        .collect();

    for (s, e) in [256usize, 1024, 8192].iter().zip(&errors) {
        assert!(*e <= 3.0 / (*s as f64).sqrt(), "shots = {}: error = {}", s, e);
    }
    assert!(errors[1] <= errors[0] && errors[2] <= errors[1], "{:?}", errors);
}

#[test]
fn ansatz_error_shrinks_with_shots() {
    let prep = StatePrep::Ansatz(AnsatzParams::new(vec![0.9, 2.1]).unwrap());
    let config = ScalingConfig::default().with_prep(prep.clone());
    let reference = expected_energy(&config.hamiltonian, &prep).unwrap();

    let errors: Vec<f64> = [256, 1024, 8192]
        .iter()
        .map(|&s| mean_absolute_error(&config, s, reference, 24, "ansatz").unwrap())
        .collect();

    assert!(errors[0] > errors[1] && errors[1] > errors[2], "{:?}", errors);
}

#[test]
fn noise_adds_bias_that_shots_cannot_remove() {
    let config = ScalingConfig::default()
        .with_shots(vec![8192])
        .with_noise(Some(NoiseConfig::new(0.05, 0.1).unwrap()));
    let mut sim = MpsSimulator::from_seed("biased");

    let points = shot_scaling(&mut sim, &config).unwrap();
    assert!(points[0].error > 0.2, "{:?}", points[0]);
    assert!(points[0].energy > -3.2);
}

#[test]
fn empty_shot_list_is_rejected() {
    let config = ScalingConfig::default().with_shots(Vec::new());
    let mut sim = MpsSimulator::from_seed("empty");
    let err = shot_scaling(&mut sim, &config).unwrap_err();
    assert!(matches!(err, VqeError::Quantum(QuantumError::EmptyShotList)));
}

#[test]
fn zero_in_shot_list_fails() {
    let config = ScalingConfig::default().with_shots(vec![256, 0]);
    let mut sim = MpsSimulator::from_seed("zero");
    let err = shot_scaling(&mut sim, &config).unwrap_err();
    assert!(matches!(err, VqeError::Quantum(QuantumError::ZeroShots)));
}

#[test]
fn scaling_csv_layout() {
    let config = ScalingConfig::default().with_shots(vec![256, 512]);
    let mut sim = MpsSimulator::from_seed("csv");
    let points = shot_scaling(&mut sim, &config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scaling.csv");
    write_scaling_csv(&path, &points).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "shots,energy,error");
    assert!(lines[1].starts_with("256,"));
    assert!(lines[2].starts_with("512,"));
}

#[test]
fn csv_to_missing_directory_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("scaling.csv");
    let err = write_scaling_csv(&path, &[]).unwrap_err();
    assert!(matches!(err, VqeError::Output { .. }));
    assert!(err.to_string().contains("scaling.csv"));
}
