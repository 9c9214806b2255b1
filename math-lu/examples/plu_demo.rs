//! Factor a couple of small matrices and print P, L and U
//!
//! Run with:
//!   cargo run -p math-audio-lu --example plu_demo
//!   cargo run -p math-audio-lu --example plu_demo -- config.json

use math_audio_lu::{LuConfig, decompose_with_config};
use ndarray::{Array2, array};

fn print_matrix(name: &str, m: &Array2<f64>) {
    println!("{}:", name);
    for row in m.rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{:8.4}", v)).collect();
        println!("  {}", line.join(" "));
    }
}

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match LuConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => LuConfig::default(),
    };
    println!("Configuration: {:?}\n", config);

    let matrices = [
        array![[2.0, 3.0, -1.0], [4.0, 1.0, 2.0], [-2.0, 7.0, 2.0]],
        array![[2.0, -1.0, -2.0], [-4.0, 6.0, 3.0], [-4.0, -2.0, 8.0]],
    ];

    for a in &matrices {
        print_matrix("A", a);
        match decompose_with_config(a, &config) {
            Ok(d) => {
                if let Some(p) = d.permutation() {
                    println!("P: {:?}", p.as_slice());
                }
                print_matrix("L", d.l());
                print_matrix("U", d.u());
                println!("det(A) = {:.4}", d.determinant());
                let err = (d.reconstruct() - a).iter().fold(0.0_f64, |m, e| m.max(e.abs()));
                println!("max |A - reconstruct| = {:.3e}\n", err);
            }
            Err(e) => println!("Factorization failed: {}\n", e),
        }
    }
}
