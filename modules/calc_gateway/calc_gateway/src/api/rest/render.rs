use calc_gateway_sdk::{EvaluationResult, format_number};

/// Plain-text body for a successful evaluation.
///
/// ```text
/// result = 11\r\n
/// operations timings:\r\n
/// Multiplication: 4 * 2 = 8 (0.812 ms)\r\n
/// Sum: 3 + 8 = 11 (0.640 ms)\r\n
/// ```
#[must_use]
pub fn render_evaluation(evaluation: &EvaluationResult) -> String {
    let lines: String = evaluation
        .operations
        .iter()
        .map(|op| format!("{op}\r\n"))
        .collect();
    format!(
        "result = {}\r\noperations timings:\r\n{lines}",
        format_number(evaluation.result)
    )
}
