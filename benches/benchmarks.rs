use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use menufinder::{
    Dataset, MatcherOptions, MenuRow, NameEntry, NameIndex, RankedName, Ranking, SelectionSet,
    aggregate, default_base_sort, get_match_ranking, kana, match_store_names, sort_ranked_names,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const STEMS: &[&str] = &[
    "マクドナルド",
    "モスバーガー",
    "ケンタッキー",
    "ﾛｯﾃﾘｱ",
    "すき家",
    "ガスト",
    "サブウェイ",
    "ミスタードーナツ",
];

/// Generate `n` distinct store names: chain stems suffixed with a branch number.
fn generate_names(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("{}{i}号店", STEMS[i % STEMS.len()]))
        .collect()
}

/// Generate a dataset of `n` menu rows spread across 50 stores.
fn generate_rows(n: usize) -> Dataset {
    let stores = generate_names(50);
    (0..n)
        .map(|i| {
            let f = i as f64;
            MenuRow::new(
                stores[i % stores.len()].as_str(),
                format!("メニュー{i}"),
                f % 40.0,
                f % 30.0,
                f % 90.0,
            )
        })
        .collect()
}

/// Build ranked names across every tier to exercise the comparator.
fn generate_ranked(names: &[String]) -> Vec<RankedName<'_>> {
    let tiers = [
        Ranking::CaseSensitiveEqual,
        Ranking::Equal,
        Ranking::Literal {
            position: 0,
            similarity: 0.8,
        },
        Ranking::Literal {
            position: 3,
            similarity: 0.4,
        },
        Ranking::Fuzzy(0.6),
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| RankedName {
            name,
            index: i,
            rank: tiers[i % tiers.len()],
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 1. get_match_ranking micro-benchmark
// ---------------------------------------------------------------------------

fn bench_get_match_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_match_ranking");
    let opts = MatcherOptions::default();
    let entry = NameEntry::new("マクドナルド");

    group.bench_function("exact", |b| {
        b.iter(|| get_match_ranking(black_box(&entry), black_box("マクドナルド"), &opts));
    });

    group.bench_function("hiragana_prefix", |b| {
        b.iter(|| get_match_ranking(black_box(&entry), black_box("まく"), &opts));
    });

    group.bench_function("romaji", |b| {
        b.iter(|| get_match_ranking(black_box(&entry), black_box("donaru"), &opts));
    });

    // Falls through every literal form into the similarity fallback.
    group.bench_function("fuzzy", |b| {
        b.iter(|| get_match_ranking(black_box(&entry), black_box("makudonarodo"), &opts));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// 2. Kana conversion
// ---------------------------------------------------------------------------

fn bench_kana(c: &mut Criterion) {
    let mut group = c.benchmark_group("kana");

    group.bench_function("fold_ascii", |b| {
        b.iter(|| kana::fold(black_box("yoshinoya")));
    });

    group.bench_function("fold_half_width", |b| {
        b.iter(|| kana::fold(black_box("ｹﾝﾀｯｷｰﾌﾗｲﾄﾞﾁｷﾝ")));
    });

    group.bench_function("romanize", |b| {
        b.iter(|| kana::romanize(black_box("ケンタッキーフライドチキン")));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// 3. Index build and match throughput
// ---------------------------------------------------------------------------

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    let opts = MatcherOptions::default();

    for size in [100, 1_000, 10_000] {
        let names = generate_names(size);
        group.bench_with_input(BenchmarkId::new("index", size), &names, |b, names| {
            b.iter(|| NameIndex::from_names(black_box(names)));
        });

        let index = NameIndex::from_names(&names);
        group.bench_with_input(BenchmarkId::new("match", size), &index, |b, index| {
            b.iter(|| match_store_names(black_box(index), black_box("ばーがー"), &opts));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// 4. Sort comparator
// ---------------------------------------------------------------------------

fn bench_sort(c: &mut Criterion) {
    let names = generate_names(10_000);
    let ranked = generate_ranked(&names);

    c.bench_function("sort_ranked_names_10k", |b| {
        b.iter_batched(
            || ranked.clone(),
            |mut v| v.sort_by(|a, b| sort_ranked_names(a, b, &default_base_sort)),
            criterion::BatchSize::LargeInput,
        );
    });
}

// ---------------------------------------------------------------------------
// 5. Selection reconciliation and aggregation
// ---------------------------------------------------------------------------

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    let data = generate_rows(10_000);
    let ids: Vec<_> = data.ids().collect();

    group.bench_function("set_visible_200", |b| {
        b.iter_batched(
            || ids.iter().step_by(3).copied().collect::<SelectionSet>(),
            |mut selection| {
                let visible = &ids[1_000..1_200];
                selection.set_visible(visible.iter().copied(), visible.iter().step_by(2).copied());
                selection
            },
            criterion::BatchSize::SmallInput,
        );
    });

    let selection: SelectionSet = ids.iter().step_by(7).copied().collect();
    group.bench_function("aggregate", |b| {
        b.iter(|| aggregate(black_box(&selection).selected_rows(&data)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_get_match_ranking,
    bench_kana,
    bench_throughput,
    bench_sort,
    bench_selection,
);
criterion_main!(benches);
