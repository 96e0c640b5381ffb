use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use sturdy_queue::{
    queue::Queue,
    store::{memory::MemoryStore, Store},
};

fn push_drain<S: Store>(queue: &Queue<S>, value: &[u8], num: usize) {
    for _ in 0..num {
        queue.push(value).unwrap();
    }
    for _ in 0..num {
        let entry = queue.peek().unwrap();
        queue.delete(black_box(&entry)).unwrap();
    }
}

fn benchmarks(c: &mut Criterion) {
    let num_entries = 100;

    let mut group = c.benchmark_group("queue::disk::push_drain");
    group.sample_size(10);
    for vsize in [32, 128, 512].iter() {
        group.throughput(Throughput::Bytes((*vsize * num_entries) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(vsize), vsize, |b, &vsize| {
            let dir = tempfile::tempdir().unwrap();
            let queue = Queue::open(dir.path()).unwrap();
            let value = vec![0u8; vsize];
            b.iter(|| push_drain(&queue, &value, num_entries));
            queue.close().unwrap();
        });
    }
    group.finish();

    let mut group = c.benchmark_group("queue::memory::push_drain");
    for vsize in [32, 128, 512].iter() {
        group.throughput(Throughput::Bytes((*vsize * num_entries) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(vsize), vsize, |b, &vsize| {
            let value = vec![0u8; vsize];
            b.iter_batched(
                || Queue::with_store(MemoryStore::new()).unwrap(),
                |queue| push_drain(&queue, &value, num_entries),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
