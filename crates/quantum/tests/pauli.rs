use proptest::prelude::*;
use quantum::{
    backend::prepare_state, estimate_expectation, AnsatzParams, Backend, BellState, Circuit,
    MpsSimulator, NoiseConfig, NoiseModel, PauliTerm, QuantumError, QuantumResult, ShotCounts,
    StatePrep,
};
use tn::truncation::Truncation;

/// Returns canned counts and records the circuit it was asked to run.
struct Canned {
    counts: ShotCounts,
    seen: Vec<Circuit>,
}

impl Backend for Canned {
    fn run(&mut self, circuit: &Circuit, _shots: usize, _noise: Option<&NoiseModel>) -> QuantumResult<ShotCounts> {
        self.seen.push(circuit.clone());
        Ok(self.counts.clone())
    }
}

#[test]
fn estimator_measures_rotated_circuit() {
    let mut backend = Canned {
        counts: [("00", 3), ("01", 1)].into_iter().collect(),
        seen: Vec::new(),
    };
    let prepared = StatePrep::Fixed(BellState::PhiPlus).circuit().unwrap();

    let e = estimate_expectation(&mut backend, PauliTerm::YY, &prepared, 4, None).unwrap();
    assert!((e - 0.5).abs() < 1e-12);

    let run = &backend.seen[0];
    assert!(run.is_measured());
    assert_eq!(run.gates().len(), prepared.gates().len() + 4);
    assert!(!prepared.is_measured(), "prepared circuit must not be mutated");
}

#[test]
fn estimator_rejects_short_counts() {
    let mut backend = Canned {
        counts: [("00", 3)].into_iter().collect(),
        seen: Vec::new(),
    };
    let prepared = StatePrep::Fixed(BellState::PhiPlus).circuit().unwrap();
    let err = estimate_expectation(&mut backend, PauliTerm::ZZ, &prepared, 4, None).unwrap_err();
    assert_eq!(err, QuantumError::CountsMismatch { expected: 4, got: 3 });
}

#[test]
fn zero_shots_never_reaches_backend() {
    let mut backend = Canned {
        counts: ShotCounts::new(),
        seen: Vec::new(),
    };
    let prepared = StatePrep::Fixed(BellState::PhiPlus).circuit().unwrap();
    let err = estimate_expectation(&mut backend, PauliTerm::XX, &prepared, 0, None).unwrap_err();
    assert_eq!(err, QuantumError::ZeroShots);
    assert!(backend.seen.is_empty());
}

#[test]
fn noise_contracts_singlet_expectations() {
    let prepared = StatePrep::Fixed(BellState::PsiMinus).circuit().unwrap();
    let noise = NoiseConfig::new(0.05, 0.1).unwrap().basis_rotation_model().unwrap();
    let mut sim = MpsSimulator::from_seed("contract");

    for term in PauliTerm::ALL {
        let ideal = estimate_expectation(&mut sim, term, &prepared, 4096, None).unwrap();
        let noisy = estimate_expectation(&mut sim, term, &prepared, 4096, Some(&noise)).unwrap();
        assert_eq!(ideal, -1.0, "{} ideal = {}", term, ideal);
        assert!(noisy.abs() < ideal.abs(), "{}: ideal = {}, noisy = {}", term, ideal, noisy);
        assert!(noisy < 0.0, "{}: noise should shrink, not flip: {}", term, noisy);
    }
}

#[test]
fn noise_contracts_ansatz_expectations() {
    let prep = StatePrep::Ansatz(AnsatzParams::new(vec![1.1, 2.4]).unwrap());
    let prepared = prep.circuit().unwrap();
    let psi = prepare_state(&prepared, Truncation::exact());
    let noise = NoiseConfig::new(0.1, 0.2).unwrap().basis_rotation_model().unwrap();
    let mut sim = MpsSimulator::from_seed("contract-ansatz");

    let shots = 8192;
    let slack = 3.0 / (shots as f64).sqrt();
    for term in PauliTerm::ALL {
        let exact = term.exact_expectation(&psi);
        let noisy = estimate_expectation(&mut sim, term, &prepared, shots, Some(&noise)).unwrap();
        assert!(
            noisy.abs() <= exact.abs() + slack,
            "{}: exact = {}, noisy = {}",
            term,
            exact,
            noisy
        );
    }
}

fn arb_term() -> impl Strategy<Value = PauliTerm> {
    prop_oneof![Just(PauliTerm::XX), Just(PauliTerm::YY), Just(PauliTerm::ZZ)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn expectation_in_unit_interval(
        term in arb_term(),
        a in -3.2f64..3.2,
        b in -3.2f64..3.2,
        shots in 1usize..128,
        p1 in 0.0f64..=1.0,
        p2 in 0.0f64..=1.0,
        noisy in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let prepared = StatePrep::Ansatz(AnsatzParams::new(vec![a, b]).unwrap()).circuit().unwrap();
        let model = NoiseConfig::new(p1, p2).unwrap().basis_rotation_model().unwrap();
        let mut sim = MpsSimulator::from_seed(&seed.to_string());

        let e = estimate_expectation(&mut sim, term, &prepared, shots, noisy.then_some(&model)).unwrap();
        prop_assert!((-1.0..=1.0).contains(&e), "e = {}", e);
    }
}
