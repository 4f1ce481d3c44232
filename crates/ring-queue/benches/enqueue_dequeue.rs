use std::{collections::VecDeque, hint::black_box};

use criterion::{Bencher, Criterion, criterion_group, criterion_main};
use ring_queue::RingBuffer;

const CAPACITY: usize = 1024;
const OPS: usize = 10_000;

fn ring_fill_drain(bencher: &mut Bencher<'_>) {
    let mut ring = RingBuffer::new(CAPACITY).unwrap();
    bencher.iter(|| {
        while ring.enqueue(black_box(1_u64)).is_ok() {}
        while let Ok(item) = ring.dequeue() {
            black_box(item);
        }
    });
}

fn vec_deque_fill_drain(bencher: &mut Bencher<'_>) {
    let mut deque = VecDeque::with_capacity(CAPACITY - 1);
    bencher.iter(|| {
        while deque.len() < CAPACITY - 1 {
            deque.push_back(black_box(1_u64));
        }
        while let Some(item) = deque.pop_front() {
            black_box(item);
        }
    });
}

fn ring_random_ops(bencher: &mut Bencher<'_>) {
    fastrand::seed(7);
    let decisions: Vec<bool> = (0..OPS).map(|_| fastrand::bool()).collect();

    let mut ring = RingBuffer::new(CAPACITY).unwrap();
    bencher.iter(|| {
        for &enqueue in &decisions {
            if enqueue {
                black_box(ring.enqueue(1_u64).is_ok());
            } else {
                black_box(ring.dequeue().ok());
            }
        }
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("ring_fill_drain", ring_fill_drain);
    c.bench_function("vec_deque_fill_drain", vec_deque_fill_drain);
    c.bench_function("ring_random_ops", ring_random_ops);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
