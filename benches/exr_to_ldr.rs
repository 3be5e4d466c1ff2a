use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use exr_ldr_rs::image_pipeline::{
    ConversionSettings, DecodedChannel, DecodedImage, ExrFile, ExrToLdrPipeline, ExrsReader,
    MemoryLayerSink, SampleBuffer,
};
use half::f16;

fn generate_mock_image(width: usize, height: usize, names: &[&str], half: bool) -> ExrFile {
    let channels = names
        .iter()
        .enumerate()
        .map(|(c, name)| {
            let values = (0..width * height).map(|i| ((i + c * 31) % 512) as f32 / 256.0);
            let samples = if half {
                SampleBuffer::Half16(values.map(f16::from_f32).collect())
            } else {
                SampleBuffer::Float32(values.collect())
            };
            DecodedChannel {
                name: name.to_string(),
                samples,
            }
        })
        .collect();

    let mut file = ExrFile::new("bench.exr");
    file.load_decoded(DecodedImage { width, height, channels })
        .expect("mock image is valid");
    file
}

fn memory_pipeline() -> ExrToLdrPipeline<ExrsReader, MemoryLayerSink> {
    ExrToLdrPipeline::with_custom(ExrsReader, MemoryLayerSink, ConversionSettings::default())
}

fn benchmark_conversion_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgba_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];

    for (width, height, label) in sizes {
        let file = generate_mock_image(width, height, &["R", "G", "B", "A"], false);
        let pipeline = memory_pipeline();

        group.bench_with_input(BenchmarkId::from_parameter(label), &file, |b, file| {
            b.iter(|| {
                let _ = pipeline.convert(black_box(file));
            });
        });
    }

    group.finish();
}

fn benchmark_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("layouts");
    let pipeline = memory_pipeline();

    let layouts: Vec<(&str, &[&str])> = vec![
        ("y", &["Y"][..]),
        ("rgb", &["R", "G", "B"][..]),
        ("yc", &["Y", "RY", "BY"][..]),
        ("yca", &["Y", "RY", "BY", "A"][..]),
    ];

    for (label, names) in layouts {
        let file = generate_mock_image(500, 500, names, true);
        group.bench_with_input(BenchmarkId::from_parameter(label), &file, |b, file| {
            b.iter(|| {
                let _ = pipeline.convert(black_box(file));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_conversion_sizes, benchmark_layouts);
criterion_main!(benches);
