use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kornia_linalg::{inverse, pseudoinverse, qr_decompose, Matrix};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    let data = (0..rows * cols)
        .map(|_| rng.random_range(-1.0..1.0))
        .collect();
    Matrix::from_shape_vec(rows, cols, data).unwrap()
}

fn to_faer(a: &Matrix) -> faer::Mat<f64> {
    faer::Mat::from_fn(a.rows(), a.cols(), |i, j| a[(i, j)])
}

fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");
    let mut rng = StdRng::seed_from_u64(42);

    for n in [4, 16, 64] {
        // diagonally dominant so the inverse always exists
        let mut a = random_matrix(&mut rng, n, n);
        for i in 0..n {
            a[(i, i)] += n as f64;
        }
        let a_faer = to_faer(&a);

        group.bench_with_input(BenchmarkId::new("gauss_jordan", n), &a, |b, a| {
            b.iter(|| black_box(inverse(a).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("faer_lu", n), &a_faer, |b, a| {
            b.iter(|| black_box(a.partial_piv_lu().inverse()))
        });
    }
    group.finish();
}

fn bench_qr(c: &mut Criterion) {
    let mut group = c.benchmark_group("qr");
    let mut rng = StdRng::seed_from_u64(7);

    for (m, n) in [(4, 4), (32, 8), (64, 64)] {
        let a = random_matrix(&mut rng, m, n);
        let a_faer = to_faer(&a);
        let id = format!("{m}x{n}");

        group.bench_with_input(BenchmarkId::new("householder", &id), &a, |b, a| {
            b.iter(|| black_box(qr_decompose(a).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("faer", &id), &a_faer, |b, a| {
            b.iter(|| black_box(a.qr()))
        });
    }
    group.finish();
}

fn bench_pseudoinverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("pseudoinverse");
    let mut rng = StdRng::seed_from_u64(3);

    for (m, n) in [(8, 3), (3, 8), (64, 16)] {
        let a = random_matrix(&mut rng, m, n);
        group.bench_with_input(
            BenchmarkId::new("normal_equations", format!("{m}x{n}")),
            &a,
            |b, a| b.iter(|| black_box(pseudoinverse(a).unwrap())),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_inverse, bench_qr, bench_pseudoinverse);
criterion_main!(benches);
