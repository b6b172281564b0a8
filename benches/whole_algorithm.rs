use std::hint;

use criterion::{Criterion, criterion_group, criterion_main};
use gsaca_drum::GsacaBuilder;
use rand::{RngCore, SeedableRng};

fn large_random_text_vs_divsufsort(c: &mut Criterion) {
    let mut group = c.benchmark_group("vs-divsufsort");
    group.sample_size(10);

    let text = create_random_text(10_000_000);

    group.bench_with_input("gsaca-drum-sequential-large-random", &text, |b, text| {
        b.iter(|| {
            let suffix_array = GsacaBuilder::<_>::new()
                .with_threads(1)
                .construct_suffix_array(text)
                .unwrap();
            hint::black_box(suffix_array);
        })
    });

    group.bench_with_input("gsaca-drum-parallel-large-random", &text, |b, text| {
        b.iter(|| {
            let suffix_array = GsacaBuilder::<_>::new().construct_suffix_array(text).unwrap();
            hint::black_box(suffix_array);
        })
    });

    group.bench_with_input("divsufsort-large-random", &text, |b, text| {
        b.iter(|| {
            let suffix_array = divsufsort::sort(text);
            hint::black_box(suffix_array);
        })
    });

    group.finish();
}

fn large_random_text_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread-scaling");
    group.sample_size(10);

    let text = create_random_text(10_000_000);

    for threads in [1, 2, 4, 8] {
        group.bench_with_input(format!("gsaca-drum-{threads}-threads"), &text, |b, text| {
            b.iter(|| {
                let suffix_array = GsacaBuilder::<_>::new()
                    .with_threads(threads)
                    .construct_suffix_array(text)
                    .unwrap();
                hint::black_box(suffix_array);
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    large_random_text_vs_divsufsort,
    large_random_text_thread_scaling
);

criterion_main!(benches);

fn create_random_text(len: usize) -> Vec<u8> {
    let mut text = vec![42u8; len];
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0x0DDB1A5E5BAD5EEDu64);

    rng.fill_bytes(&mut text);

    text
}
