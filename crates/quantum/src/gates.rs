use num_complex::Complex64;

pub type C64 = Complex64;

pub fn hadamard() -> [[C64; 2]; 2] {
    let s = 1.0 / 2.0_f64.sqrt();
    [
        [C64::new(s, 0.0), C64::new(s, 0.0)],
        [C64::new(s, 0.0), C64::new(-s, 0.0)],
    ]
}

pub fn identity() -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    [[o, z], [z, o]]
}

pub fn pauli_x() -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    [[z, o], [o, z]]
}

pub fn pauli_y() -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    let i = C64::new(0.0, 1.0);
    let ni = C64::new(0.0, -1.0);
    [[z, ni], [i, z]]
}

pub fn pauli_z() -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    let m = C64::new(-1.0, 0.0);
    [[o, z], [z, m]]
}

/// S† = diag(1, -i)
pub fn s_dagger() -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    [[o, z], [z, C64::new(0.0, -1.0)]]
}

pub fn ry(theta: f64) -> [[C64; 2]; 2] {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    [
        [C64::new(c, 0.0), C64::new(-s, 0.0)],
        [C64::new(s, 0.0), C64::new(c, 0.0)],
    ]
}

/// Control on the first (lower-index) site.
/// |00>→|00>, |01>→|01>, |10>→|11>, |11>→|10>
pub fn cnot() -> [[C64; 4]; 4] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    [
        [o, z, z, z],
        [z, o, z, z],
        [z, z, z, o],
        [z, z, o, z],
    ]
}

/// Control on the second (higher-index) site.
/// |00>→|00>, |01>→|11>, |10>→|10>, |11>→|01>
pub fn cnot_reversed() -> [[C64; 4]; 4] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    [
        [o, z, z, z],
        [z, z, z, o],
        [z, z, o, z],
        [z, o, z, z],
    ]
}

/// a ⊗ b, with `a` acting on the first site.
pub fn kron(a: [[C64; 2]; 2], b: [[C64; 2]; 2]) -> [[C64; 4]; 4] {
    let mut out = [[C64::new(0.0, 0.0); 4]; 4];
    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                for l in 0..2 {
                    out[i * 2 + k][j * 2 + l] = a[i][j] * b[k][l];
                }
            }
        }
    }
    out
}
