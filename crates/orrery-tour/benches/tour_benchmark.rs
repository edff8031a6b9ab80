// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Benchmarks the stepwise tour solver on seeded random instances.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use orrery_engine::engine::StepwiseEngine;
use orrery_model::cities::{CityIndex, DistanceMatrix};
use orrery_tour::solver::HeuristicTourSolver;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_tour_to_local_optimum(c: &mut Criterion) {
    let mut group = c.benchmark_group("tour_to_local_optimum");

    for &num_cities in &[25usize, 50, 100] {
        let mut rng = ChaCha8Rng::seed_from_u64(0xC0FFEE);
        let matrix = DistanceMatrix::random_euclidean(num_cities, 1_000.0, &mut rng);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_cities),
            &matrix,
            |b, matrix| {
                b.iter(|| {
                    let mut solver =
                        HeuristicTourSolver::new(matrix.clone(), CityIndex::new(0), None);
                    solver
                        .run_to_completion(u64::MAX)
                        .expect("benchmark instance must terminate");
                    solver.tour_length()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_tour_to_local_optimum);
criterion_main!(benches);
