// Cheap task-level predicates used to prune the search before any
// segmentation runs.

use crate::core::types::{all_colors, dims};
use crate::core::{Color, Grid};
use crate::perception::Task;

/// Every training output uses only colours present in its own input.
pub fn output_colors_from_input(task: &Task) -> bool {
    task.pairs().iter().all(|&(input, output)| colors_only_in_output(input, output).is_empty())
}

pub fn outputs_one_color(task: &Task) -> bool {
    task.outputs().iter().all(|g| all_colors(g).len() == 1)
}

pub fn outputs_same_shape(task: &Task) -> bool {
    let outputs = task.outputs();
    outputs.windows(2).all(|w| dims(w[0]) == dims(w[1]))
}

pub fn input_output_same_shape(task: &Task) -> bool {
    task.pairs().iter().all(|&(i, o)| dims(i) == dims(o))
}

/// Every output is strictly smaller than its input along at least one axis
/// and no larger along the other.
pub fn outputs_smaller(task: &Task) -> bool {
    task.pairs().iter().all(|&(i, o)| {
        let ((ir, ic), (or, oc)) = (dims(i), dims(o));
        or <= ir && oc <= ic && (or, oc) != (ir, ic)
    })
}

pub fn colors_only_in_input(input: &Grid, output: &Grid) -> Vec<Color> {
    let out = all_colors(output);
    all_colors(input).into_iter().filter(|c| !out.contains(c)).collect()
}

pub fn colors_only_in_output(input: &Grid, output: &Grid) -> Vec<Color> {
    let inp = all_colors(input);
    all_colors(output).into_iter().filter(|c| !inp.contains(c)).collect()
}
