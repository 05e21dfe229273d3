use arc_part::config::SearchConfig;
use arc_part::core::types::{area, mask_count};
use arc_part::core::Grid;
use arc_part::perception::segment::{by_color, by_color_and_connectivity, by_connectivity};
use arc_part::perception::{detect_bg, BgMode, Segmentation, Task, Touch};
use arc_part::synthesis::augment::{rotate, Augment};
use arc_part::synthesis::search::{rank_candidates, Catalog};
use arc_part::synthesis::{predict_part_types, ExtractionMode, Hypothesis, SearchOutcome};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Small deterministic grids with a handful of colours.
fn sample_grids() -> Vec<Grid> {
    let mut state: u32 = 12345;
    let mut next = move || {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        (state >> 16) % 4
    };
    (0..20)
        .map(|i| {
            let (rows, cols) = (2 + i % 5, 3 + i % 4);
            (0..rows).map(|_| (0..cols).map(|_| next() as u8).collect()).collect()
        })
        .collect()
}

#[test]
fn l_shape_is_one_wall_connected_object() {
    init();
    let grid = vec![vec![1, 0, 0], vec![1, 0, 0], vec![1, 1, 0]];
    assert_eq!(detect_bg(&grid, BgMode::Touch), 0);
    let masks = by_connectivity(&grid, Touch::Wall, 0);
    assert_eq!(masks.len(), 1);
    assert_eq!(mask_count(&masks[0]), 4);

    let layered = by_color_and_connectivity(&grid, Touch::Wall, 0);
    assert_eq!(layered.len(), 1);
    assert_eq!(mask_count(&layered[0]), 4);
    assert_eq!(layered, masks);
}

#[test]
fn quarter_turn_of_whole_grid_predicted_for_test_input() {
    init();
    // no colour here touches three borders, so the background is 0 and each
    // grid is one object
    let inputs: Vec<Grid> = vec![
        vec![vec![1, 2, 3], vec![4, 5, 6]],
        vec![vec![7, 7, 8], vec![9, 1, 2]],
        vec![vec![3, 3, 3], vec![4, 4, 5]],
    ];
    let outputs: Vec<Grid> = vec![
        vec![vec![3, 6], vec![2, 5], vec![1, 4]],
        vec![vec![8, 2], vec![7, 1], vec![7, 9]],
        vec![vec![3, 5], vec![3, 4], vec![3, 4]],
    ];
    for (input, output) in inputs.iter().zip(&outputs) {
        assert_eq!(&rotate(input, 1), output);
    }

    let test_input: Grid = vec![vec![5, 6, 7], vec![8, 9, 1]];
    let task = Task::new(
        "quarter_turn",
        inputs.into_iter().zip(outputs).collect(),
        vec![(test_input.clone(), Some(vec![vec![7, 1], vec![6, 9], vec![5, 8]]))],
    );
    let outcome = predict_part_types(&task, &Catalog::standard(), &SearchConfig::default());
    assert_eq!(
        outcome.hypothesis(),
        Some(&Hypothesis::new(
            Segmentation::Connectivity { touch: Touch::Wall },
            ExtractionMode::CropObjects,
            Augment::Rotate(1),
        ))
    );
    let rotated = rotate(&test_input, 1);
    assert_eq!(rotated, vec![vec![7, 1], vec![6, 9], vec![5, 8]]);
    assert!(outcome.predictions()[0].contains(&rotated));
}

#[test]
fn segmentation_detects_background_when_none_given() {
    init();
    let grid: Grid = vec![
        vec![7, 7, 7, 7, 7],
        vec![7, 1, 7, 7, 7],
        vec![7, 7, 7, 2, 7],
        vec![7, 7, 7, 2, 7],
        vec![7, 7, 7, 7, 7],
    ];
    assert_eq!(detect_bg(&grid, BgMode::Touch), 7);
    let masks = Segmentation::Color.segment_detected(&grid, BgMode::Touch);
    assert_eq!(masks, by_color(&grid, 7));
    assert_eq!(masks.len(), 2);
    assert!(masks.iter().all(|m| m.iter().flatten().zip(grid.iter().flatten()).all(|(&set, &c)| !set || c != 7)));
    assert_eq!(masks.iter().map(mask_count).collect::<Vec<_>>(), vec![1, 2]);

    let components = Segmentation::Connectivity { touch: Touch::Wall }.segment_detected(&grid, BgMode::Touch);
    assert_eq!(components.len(), 2);
}

#[test]
fn rotated_whole_grid_found_by_isolate_and_rotate() {
    init();
    let task = Task::new(
        "rotate",
        vec![
            (
                vec![
                    vec![0, 0, 0, 0, 0],
                    vec![0, 1, 0, 0, 0],
                    vec![0, 1, 0, 0, 0],
                    vec![0, 1, 1, 0, 0],
                    vec![0, 0, 0, 0, 0],
                ],
                vec![
                    vec![0, 0, 0, 0, 0],
                    vec![0, 0, 0, 0, 0],
                    vec![0, 0, 0, 1, 0],
                    vec![0, 1, 1, 1, 0],
                    vec![0, 0, 0, 0, 0],
                ],
            ),
            (
                vec![
                    vec![0, 0, 0, 0, 0],
                    vec![0, 0, 2, 2, 0],
                    vec![0, 0, 0, 2, 0],
                    vec![0, 0, 0, 0, 0],
                    vec![0, 0, 0, 0, 0],
                ],
                vec![
                    vec![0, 0, 0, 0, 0],
                    vec![0, 2, 2, 0, 0],
                    vec![0, 2, 0, 0, 0],
                    vec![0, 0, 0, 0, 0],
                    vec![0, 0, 0, 0, 0],
                ],
            ),
        ],
        vec![(
            vec![
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 3, 3, 0],
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0],
            ],
            None,
        )],
    );

    let outcome = predict_part_types(&task, &Catalog::standard(), &SearchConfig::default());
    let expected = Hypothesis::new(
        Segmentation::Connectivity { touch: Touch::Wall },
        ExtractionMode::IsolateObject,
        Augment::Rotate(1),
    );
    assert_eq!(outcome.hypothesis(), Some(&expected));
    // every crop hypothesis fails first, then isolate/identity
    assert_eq!(outcome.tried(), 42);
    let rotated: Grid = vec![
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 3, 0, 0],
        vec![0, 0, 3, 0, 0],
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0],
    ];
    assert_eq!(outcome.predictions().to_vec(), vec![vec![rotated]]);
}

#[test]
fn new_output_colour_is_not_attempted() {
    init();
    let task = Task::new("recolour", vec![(vec![vec![1, 0], vec![0, 0]], vec![vec![2]])], vec![(vec![vec![1]], None)]);
    let outcome = predict_part_types(&task, &Catalog::standard(), &SearchConfig::default());
    assert_eq!(outcome, SearchOutcome::NotAttempted);
    assert!(outcome.predictions().is_empty());
}

#[test]
fn separated_blocks_agree_across_colour_segmentations() {
    init();
    let grid = vec![
        vec![1, 1, 0, 0, 0],
        vec![1, 1, 0, 0, 0],
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 0, 2, 2],
        vec![0, 0, 0, 2, 2],
    ];
    let colour = by_color(&grid, 0);
    let components = by_color_and_connectivity(&grid, Touch::Wall, 0);
    assert_eq!(colour.len(), 2);
    assert_eq!(colour, components);
    assert!(colour[0][0][0] && colour[1][4][4]);
}

#[test]
fn unsolvable_task_walks_whole_catalog() {
    init();
    let task = Task::new(
        "checker",
        vec![(vec![vec![1, 2], vec![2, 1]], vec![vec![1, 1, 1], vec![1, 2, 1], vec![1, 1, 1]])],
        vec![(vec![vec![1, 2], vec![2, 1]], None)],
    );
    let catalog = Catalog::standard();
    let outcome = predict_part_types(&task, &catalog, &SearchConfig::default());
    assert_eq!(outcome, SearchOutcome::Unsolved { tried: catalog.len() });
}

#[test]
fn every_segmentation_yields_non_empty_masks() {
    init();
    for grid in sample_grids() {
        let bg = detect_bg(&grid, BgMode::Touch);
        for seg in Segmentation::standard_variants() {
            for mask in seg.segment(&grid, bg) {
                assert_eq!((mask.len(), mask[0].len()), (grid.len(), grid[0].len()), "{}", seg);
                assert!(mask_count(&mask) > 0, "{} produced an empty mask", seg);
            }
        }
    }
}

#[test]
fn ranking_is_deduplicated_and_sorted() {
    init();
    let hypothesis = Hypothesis::new(Segmentation::Color, ExtractionMode::CropObjects, Augment::Zoom(1, 2));
    for grid in sample_grids() {
        let ranked = rank_candidates(hypothesis.fresh_candidates(&grid, BgMode::Touch));
        for (i, a) in ranked.iter().enumerate() {
            assert!(ranked[i + 1..].iter().all(|b| b != a));
        }
        assert!(ranked.windows(2).all(|w| area(&w[0]) >= area(&w[1])));
    }
}

#[test]
fn accepted_hypothesis_reproduces_every_training_output() {
    init();
    let catalog = Catalog::standard();
    let task = Task::from_json_str(
        "crop_largest",
        r#"{
            "train": [
                {"input": [[0,0,0,0],[0,4,4,0],[0,4,4,0],[0,0,0,0]], "output": [[4,4],[4,4]]},
                {"input": [[0,0,0],[0,0,0],[6,0,0]], "output": [[6]]}
            ],
            "test": [{"input": [[0,0,0],[0,7,7],[0,0,0]], "output": [[7,7]]}]
        }"#,
    )
    .unwrap();
    let outcome = predict_part_types(&task, &catalog, &SearchConfig::default());
    let hypothesis = outcome.hypothesis().copied().unwrap();
    for (input, output) in task.pairs() {
        assert!(hypothesis.fresh_candidates(input, BgMode::Touch).contains(output));
    }
    assert_eq!(outcome.predictions()[0][0], vec![vec![7, 7]]);
}
