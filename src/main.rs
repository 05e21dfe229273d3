use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use arc_part::bench::runner::{load_tasks, run_benchmark};
use arc_part::config::SearchConfig;
use arc_part::core::Color;
use arc_part::perception::features::{make_objects, FeatureRecord};
use arc_part::perception::{detect_bg, Segmentation, Task};
use arc_part::synthesis::search::Catalog;

/// Object segmentation and hypothesis search over ARC-style grid tasks.
#[derive(Parser)]
enum Mode {
    /// Run the search on every task file in a directory and report the score.
    Eval {
        /// Directory of task JSON files.
        data_dir: PathBuf,
        /// JSON file with search settings; missing fields take defaults.
        #[clap(short, long)]
        config: Option<PathBuf>,
        /// Only evaluate the first N tasks (sorted by file name).
        #[clap(long)]
        max_tasks: Option<usize>,
        /// Print one line per task.
        #[clap(long)]
        detail: bool,
    },
    /// Print the background and the object features of each segmentation for one task.
    Inspect {
        /// Task JSON file.
        task: PathBuf,
        #[clap(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct SegmentationReport {
    segmentation: String,
    objects: Vec<FeatureRecord>,
}

#[derive(Serialize)]
struct InputReport {
    index: usize,
    background: Color,
    segmentations: Vec<SegmentationReport>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SearchConfig> {
    match path {
        Some(p) => SearchConfig::from_json_file(p),
        None => Ok(SearchConfig::default()),
    }
}

fn inspect(task: &Task, config: &SearchConfig) -> anyhow::Result<Vec<InputReport>> {
    let mut reports = Vec::new();
    for (index, grid) in task.inputs().into_iter().chain(task.test_inputs()).enumerate() {
        let background = detect_bg(grid, config.background);
        let mut segmentations = Vec::new();
        for seg in Segmentation::standard_variants() {
            let objects = make_objects(grid, seg.segment(grid, background), config.nested_depth)?;
            segmentations.push(SegmentationReport {
                segmentation: seg.to_string(),
                objects: objects.iter().map(|o| o.features()).collect(),
            });
        }
        reports.push(InputReport { index, background, segmentations });
    }
    Ok(reports)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Mode::parse() {
        Mode::Eval { data_dir, config, max_tasks, detail } => {
            let config = load_config(config.as_ref())?;
            let tasks = load_tasks(&data_dir, max_tasks)?;
            let catalog = Catalog::standard();
            log::info!("evaluating {} tasks against {} hypotheses each", tasks.len(), catalog.len());

            let report = run_benchmark(&tasks, &catalog, &config);
            if detail {
                report.print_detail();
            } else {
                report.print_summary();
            }
        }
        Mode::Inspect { task, config } => {
            let config = load_config(config.as_ref())?;
            let task = Task::load(&task)?;
            let reports = inspect(&task, &config)?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}
