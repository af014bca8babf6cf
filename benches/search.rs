//! 搜索基准测试
//!
//! `cargo bench --bench search`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use psqt_ai::test_positions::{MIDDLEGAME, START};
use psqt_ai::{alpha_beta_search, score_moves, AIEngine, Board, SearchRequest};

fn bench_score_moves(c: &mut Criterion) {
    let board = Board::from_fen(MIDDLEGAME).unwrap();
    c.bench_function("score_moves/middlegame", |b| {
        b.iter(|| score_moves(black_box(&board)))
    });
}

fn bench_heuristic(c: &mut Criterion) {
    let request = SearchRequest::default();
    let mut group = c.benchmark_group("heuristic");
    for (name, fen) in [("start", START), ("middlegame", MIDDLEGAME)] {
        let mut board = Board::from_fen(fen).unwrap();
        let mut engine = AIEngine::heuristic();
        group.bench_function(name, |b| {
            b.iter(|| engine.search(black_box(&mut board), &request).unwrap())
        });
    }
    group.finish();
}

fn bench_alpha_beta(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta");
    group.sample_size(10);
    for (name, fen) in [("start", START), ("middlegame", MIDDLEGAME)] {
        for depth in [1u32, 2] {
            let mut board = Board::from_fen(fen).unwrap();
            group.bench_with_input(BenchmarkId::new(name, depth), &depth, |b, &depth| {
                b.iter(|| alpha_beta_search(black_box(&mut board), depth))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_score_moves, bench_heuristic, bench_alpha_beta);
criterion_main!(benches);
