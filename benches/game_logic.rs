use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_match3::core::{
    detect_matches, valid_moves, Alphabet, Cascade, Grid, RandomTiles, Session,
};

fn dealt_grid(seed: u32) -> Grid {
    Session::new(8, 8, Alphabet::fruits(), seed)
        .unwrap()
        .grid()
        .clone()
}

fn bench_detect_matches(c: &mut Criterion) {
    let grid = dealt_grid(12345);

    c.bench_function("detect_matches_8x8", |b| {
        b.iter(|| detect_matches(black_box(&grid)))
    });
}

fn bench_valid_moves(c: &mut Criterion) {
    let grid = dealt_grid(12345);

    c.bench_function("valid_moves_8x8", |b| {
        b.iter(|| valid_moves(black_box(&grid)))
    });
}

fn bench_cascade(c: &mut Criterion) {
    // Stripes of three: every row matches at once.
    let rows: Vec<String> = (0..8)
        .map(|r| if r % 2 == 0 { "aaabbbaa" } else { "cccdddcc" }.to_string())
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let board = Grid::parse(&rows).unwrap();

    c.bench_function("cascade_full_board", |b| {
        b.iter(|| {
            let mut grid = board.clone();
            let mut tiles = RandomTiles::new(Alphabet::fruits(), 7);
            Cascade::new().run(&mut grid, &mut tiles, |_| {});
            grid
        })
    });
}

fn bench_deal(c: &mut Criterion) {
    c.bench_function("deal_8x8", |b| {
        let mut seed = 0u32;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            Session::new(8, 8, Alphabet::fruits(), black_box(seed))
        })
    });
}

criterion_group!(
    benches,
    bench_detect_matches,
    bench_valid_moves,
    bench_cascade,
    bench_deal
);
criterion_main!(benches);
