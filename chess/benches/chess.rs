use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chesst::{engine::Engine, movegen, Board, Color, Coord};

const BOARDS: [(&'static str, &'static str); 10] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R w kq - 0 11",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21",
    ),
    (
        "open_position",
        "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3 w - - 4 43",
    ),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8 w - - 0 1"),
    ("pawn_move", "4k3/pppppppp/8/8/8/8/PPPPPPPP/4K3 w - - 0 1"),
    ("pawn_attack", "4k3/8/8/pppppppp/PPPPPPPP/8/8/4K3 w - - 0 1"),
    (
        "pawn_last_rank",
        "8/PPPPPPPP/8/2k1K3/8/8/pppppppp/8 w - - 0 1",
    ),
    (
        "cydonia",
        "5K2/1N1N1N2/8/1N1N1N2/1n1n1n2/8/1n1n1n2/5k2 w - - 0 1",
    ),
    (
        "max",
        "3Q4/1Q4Q1/4Q3/2Q4R/Q4Q2/3Q4/NR4Q1/kN1BB1K1 w - - 0 1",
    ),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, fen)| (name, Board::from_fen(fen).unwrap()))
}

fn bench_gen_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::gen_all(&board).len()))
        });
    }
}

fn bench_moves_for(c: &mut Criterion) {
    let mut group = c.benchmark_group("moves_for");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for coord in Coord::iter() {
                    black_box(movegen::moves_for(&board, coord));
                }
            })
        });
    }
}

fn bench_make_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_move");
    for (name, board) in boards() {
        let moves = movegen::gen_all(&board);
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in moves.iter() {
                    black_box(board.make_move_cloned(mv.src, mv.dst).is_ok());
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for coord in Coord::iter() {
                        black_box(movegen::is_cell_attacked(&board, coord, color));
                    }
                }
            })
        });
    }
}

fn bench_engine(c: &mut Criterion) {
    c.bench_function("engine_select_and_move", |b| {
        b.iter(|| {
            let mut engine = Engine::initial();
            for (src, dst) in [("E2", "E4"), ("E7", "E5"), ("G1", "F3"), ("B8", "C6")] {
                engine.select_piece(src).unwrap();
                engine.move_piece(src, dst).unwrap();
            }
            black_box(engine.take_changes().len())
        })
    });
}

criterion_group!(
    chess,
    bench_gen_moves,
    bench_moves_for,
    bench_make_move,
    bench_is_attacked,
    bench_engine,
);

criterion_main!(chess);
