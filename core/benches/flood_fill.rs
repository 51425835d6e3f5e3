use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use popquest_core::{Board, Coord, MineLayout};
use std::hint::black_box;

/// Open field with a single mine in the far corner, so one reveal floods everything.
fn open_board(side: Coord) -> Board {
    let layout = MineLayout::from_mine_coords((side, side), &[(side - 1, side - 1)])
        .expect("corner is in bounds");
    Board::with_layout(layout).expect("one mine always fits")
}

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for side in [16, 64, 255] {
        group.bench_function(format!("{side}x{side}"), |b| {
            b.iter_batched(
                || open_board(side),
                |mut board| black_box(board.reveal((0, 0))),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, flood_fill);
criterion_main!(benches);
