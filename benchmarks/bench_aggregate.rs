use std::hint::black_box;
use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};

use fraglog::config::ErrorStrategy;
use fraglog::event::{classify, LogLine};
use fraglog::parallel::{ParallelConfig, ParallelProcessor};
use fraglog::pipeline::run_sequential;
use fraglog::{aggregate, MatchBatch};

const KILL: &str = " 21:07 Kill: 2 3 7: Isgalamido killed Dono da Bola by MOD_ROCKET_SPLASH";
const USERINFO: &str = r" 20:34 ClientUserinfoChanged: 2 n\Isgalamido\t\0\model\xian/default\hmodel\xian/default\g_redteam\\g_blueteam\\c1\4\c2\5";
const NOISE: &str = " 20:42 Item: 2 weapon_rocketlauncher";

/// A log of `matches` games, each with a handful of players and `kills` kills
fn synthetic_log(matches: usize, kills: usize) -> String {
    let mut log = String::new();
    for _ in 0..matches {
        log.push_str("  0:00 ------------------------------------------------------------\n");
        log.push_str("  0:00 InitGame: \\sv_hostname\\Code Miner Server\\mapname\\q3dm17\n");
        for id in 2..8 {
            log.push_str(&format!(
                " 0:01 ClientUserinfoChanged: {} n\\Player{}\\t\\0\\model\\sarge\n",
                id, id
            ));
        }
        for kill in 0..kills {
            let killer = if kill % 7 == 0 { 1022 } else { 2 + kill % 6 };
            let victim = 2 + (kill + 1) % 6;
            log.push_str(&format!(
                " 1:{:02} Kill: {} {} 7: a killed b by MOD_RAILGUN\n",
                kill % 60,
                killer,
                victim
            ));
            log.push_str(NOISE);
            log.push('\n');
        }
        log.push_str(" 9:59 ShutdownGame:\n");
    }
    log
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_kill", |b| {
        b.iter(|| black_box(classify(black_box(KILL))));
    });
    c.bench_function("classify_userinfo", |b| {
        b.iter(|| black_box(classify(black_box(USERINFO))));
    });
    c.bench_function("classify_noise", |b| {
        b.iter(|| black_box(classify(black_box(NOISE))));
    });
}

fn bench_aggregate_batch(c: &mut Criterion) {
    let lines = (0..500)
        .map(|idx| LogLine::new(idx + 1, if idx % 10 == 0 { USERINFO } else { KILL }))
        .collect();
    let batch = MatchBatch { id: 0, lines };

    c.bench_function("aggregate_500_lines", |b| {
        b.iter(|| black_box(aggregate(black_box(&batch))));
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let log = synthetic_log(200, 100);

    c.bench_function("pipeline_sequential", |b| {
        b.iter(|| black_box(run_sequential(Cursor::new(log.as_bytes()), ErrorStrategy::Abort)));
    });

    for workers in [1, 4] {
        let processor = ParallelProcessor::new(ParallelConfig {
            num_workers: workers,
            ..ParallelConfig::default()
        });
        c.bench_function(&format!("pipeline_parallel_{}_workers", workers), |b| {
            b.iter(|| black_box(processor.process(Cursor::new(log.clone()))));
        });
    }
}

criterion_group!(benches, bench_classify, bench_aggregate_batch, bench_pipeline);
criterion_main!(benches);
