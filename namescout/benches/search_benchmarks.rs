use criterion::{black_box, criterion_group, criterion_main, Criterion};
use namescout::{search, similarity, Query, SearchConfig};
use std::fs;
use tempfile::tempdir;

fn create_test_tree(dir: &tempfile::TempDir, dirs: usize, files_per_dir: usize) -> std::io::Result<()> {
    for i in 0..dirs {
        let sub = dir.path().join(format!("dir_{}", i)).join("nested");
        fs::create_dir_all(&sub)?;
        for j in 0..files_per_dir {
            fs::write(sub.join(format!("file_{}_{}.txt", i, j)), "")?;
        }
        fs::write(sub.join("report.txt"), "")?;
    }
    Ok(())
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");
    group.bench_function("short", |b| {
        b.iter(|| similarity(black_box("report"), black_box("reports")))
    });
    group.bench_function("long", |b| {
        b.iter(|| {
            similarity(
                black_box("quarterly_financial_summary_final_v2"),
                black_box("quarterly_financial_summary_final_v3_draft"),
            )
        })
    });
    group.finish();
}

fn bench_tree_search(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    create_test_tree(&dir, 50, 40).unwrap();
    let config = SearchConfig::default();

    let mut group = c.benchmark_group("tree_search");
    group.bench_function("extension_sensitive", |b| {
        b.iter(|| {
            let query = Query::from_file_name("report.txt", &config);
            search(query, vec![dir.path().to_path_buf()], &config)
                .unwrap()
                .count()
        })
    });
    group.bench_function("any_extension", |b| {
        b.iter(|| {
            let query = Query::from_file_name("report", &config);
            search(query, vec![dir.path().to_path_buf()], &config)
                .unwrap()
                .count()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_similarity, bench_tree_search);
criterion_main!(benches);
