// Local evaluation runner.
// Loads every task in a directory, runs the hypothesis search on each and
// scores the kept candidates against known test outputs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};
use rayon::prelude::*;

use crate::config::SearchConfig;
use crate::perception::Task;
use crate::synthesis::search::Catalog;
use super::arc::{solve_arc_task, ArcResult, Score};

#[derive(Debug)]
pub struct BenchmarkReport {
    pub total_tasks: usize,
    pub solved: usize,
    pub score: Score,
    pub elapsed_ms: u64,
    pub by_segmentation: Vec<(String, usize)>,
    pub per_task: Vec<TaskReport>,
}

#[derive(Debug, Clone)]
pub struct TaskReport {
    pub result: ArcResult,
    pub elapsed_ms: u64,
}

pub fn task_files(data_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(data_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    paths.sort();
    Ok(paths)
}

pub fn load_tasks(data_dir: &Path, max_tasks: Option<usize>) -> anyhow::Result<Vec<Task>> {
    let mut paths = task_files(data_dir)?;
    if let Some(max) = max_tasks {
        paths.truncate(max);
    }
    let mut tasks = Vec::with_capacity(paths.len());
    for path in &paths {
        match Task::load(path) {
            Ok(task) => tasks.push(task),
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }
    Ok(tasks)
}

fn run_one(task: &Task, catalog: &Catalog, config: &SearchConfig) -> TaskReport {
    let start = Instant::now();
    let result = solve_arc_task(task, catalog, config);
    let elapsed_ms = start.elapsed().as_millis() as u64;
    if result.solved {
        info!("{}: {} ({}/{} correct, {}ms)", result.task_id, result.method, result.correct, result.scored, elapsed_ms);
    }
    TaskReport { result, elapsed_ms }
}

/// Tasks share no state, so the parallel path needs no locking.
pub fn run_benchmark(tasks: &[Task], catalog: &Catalog, config: &SearchConfig) -> BenchmarkReport {
    let total_start = Instant::now();
    let per_task: Vec<TaskReport> = if config.parallel {
        tasks.par_iter().map(|t| run_one(t, catalog, config)).collect()
    } else {
        tasks.iter().map(|t| run_one(t, catalog, config)).collect()
    };

    let mut counts: rustc_hash::FxHashMap<String, usize> = Default::default();
    for t in per_task.iter().filter(|t| t.result.solved) {
        let family = t.result.method.split(" / ").next().unwrap_or("").to_string();
        *counts.entry(family).or_default() += 1;
    }
    let mut by_segmentation: Vec<(String, usize)> = counts.into_iter().collect();
    by_segmentation.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let results: Vec<ArcResult> = per_task.iter().map(|t| t.result.clone()).collect();
    BenchmarkReport {
        total_tasks: per_task.len(),
        solved: per_task.iter().filter(|t| t.result.solved).count(),
        score: Score::from_results(&results),
        elapsed_ms: total_start.elapsed().as_millis() as u64,
        by_segmentation,
        per_task,
    }
}

impl BenchmarkReport {
    pub fn print_summary(&self) {
        println!("=== ARC part-search results ===");
        println!("Tasks: {} | Solved on train: {} | Test correct: {} | Error: {:.3}",
            self.total_tasks, self.solved, self.score, self.score.error());
        println!("Time: {}ms", self.elapsed_ms);
        println!("\nBy segmentation:");
        for (family, count) in &self.by_segmentation {
            println!("  {}: {}", family, count);
        }
    }

    pub fn print_detail(&self) {
        self.print_summary();
        println!("\nPer-task detail:");
        for t in &self.per_task {
            let r = &t.result;
            let status = if r.correct > 0 { "OK" } else if r.solved { "~~" } else { "--" };
            println!("  [{}] {} | method={} tried={} correct={}/{} time={}ms",
                status, r.task_id, r.method, r.tried, r.correct, r.scored, t.elapsed_ms);
        }
    }
}
