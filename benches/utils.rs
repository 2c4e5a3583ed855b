use chess_engine::core::utils::count_positions;
use chess_engine::{Board, Color, MatchInterface, Square};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn all_moves(board: &Board) -> usize {
    board
        .iter_pieces()
        .map(|(square, piece)| piece.valid_moves(board.grid(), square).len())
        .sum()
}

fn all_hints(board: &Board) -> usize {
    Square::all()
        .filter_map(|square| board.compute_hints(square).ok())
        .map(|hints| hints.len())
        .sum()
}

fn open_game() -> Board {
    let mut board = Board::new();
    for (from, to, color) in [
        ("e2", "e4", Color::White),
        ("e7", "e5", Color::Black),
        ("g1", "f3", Color::White),
        ("b8", "c6", Color::Black),
        ("f1", "c4", Color::White),
    ] {
        let (from, to) = (
            from.parse::<Square>().expect("opening squares are valid"),
            to.parse::<Square>().expect("opening squares are valid"),
        );
        board
            .move_piece(from, to, color)
            .expect("opening line is legal");
    }
    board
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("initial all moves", |b| {
        b.iter(|| all_moves(black_box(&Board::default())))
    });
    c.bench_function("open game all moves", |b| {
        let board = open_game();
        b.iter(|| all_moves(black_box(&board)))
    });
    c.bench_function("open game hints", |b| {
        let board = open_game();
        b.iter(|| all_hints(black_box(&board)))
    });
    c.bench_function("move/undo depth 2", |b| {
        let mut board = Board::default();
        b.iter(|| count_positions(black_box(&mut board), 2))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
