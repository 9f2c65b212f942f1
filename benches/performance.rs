use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eldeps::core::{build_graph, PackageScanner};
use eldeps::formatters::DotFormatter;
use eldeps::metadata::Metadata;

fn benchmark_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("repository_scan");

    let test_dir = std::env::temp_dir().join("eldeps_bench");
    std::fs::create_dir_all(&test_dir).unwrap();

    // 200 packages, each requiring up to three earlier ones
    for i in 0..200 {
        let name = format!("pkg-{i}");
        let package_dir = test_dir.join(&name);
        std::fs::create_dir_all(&package_dir).unwrap();

        let requires: Vec<String> = (1..=3)
            .filter(|offset| i >= *offset)
            .map(|offset| format!("(pkg-{} \"0.{offset}\")", i - offset))
            .collect();
        let content = format!(
            r#";;; {name}.el --- Benchmark package  -*- lexical-binding: t -*-

;; Version: 1.0.{i}
;; Package-Requires: ((emacs "27.1") {})

(defun {name}-hello ()
  "Say hello."
  (message "hello from {name}"))

(provide '{name})
;;; {name}.el ends here
"#,
            requires.join(" ")
        );
        std::fs::write(package_dir.join(format!("{name}.el")), &content).unwrap();
        std::fs::write(package_dir.join(format!("{name}-extra.el")), &content).unwrap();
    }

    group.bench_function("main_file_only", |b| {
        let scanner = PackageScanner::new();
        b.iter(|| black_box(scanner.scan(&test_dir).unwrap()))
    });

    group.bench_function("all_files", |b| {
        let scanner = PackageScanner::new().with_main_file_only(false);
        b.iter(|| black_box(scanner.scan(&test_dir).unwrap()))
    });

    let deps = PackageScanner::new().scan(&test_dir).unwrap();
    let metadata = Metadata::default();
    let builtins = metadata.builtins.get("30").cloned().unwrap_or_default();
    group.bench_function("graph_and_dot", |b| {
        b.iter(|| {
            let graph = build_graph(
                &deps,
                &metadata.catalog,
                &builtins,
                true,
                "bench".to_string(),
            );
            black_box(DotFormatter::new().format(&graph))
        })
    });

    group.finish();

    std::fs::remove_dir_all(&test_dir).ok();
}

criterion_group!(benches, benchmark_scan);
criterion_main!(benches);
