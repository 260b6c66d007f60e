use std::fmt;

/// Associativity of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binary arithmetic operator supported by the gateway.
///
/// Each operator is served by its own remote operation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators, in service-port order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Parse an operator symbol (`+ - * /`).
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Multiply | Self::Divide => 3,
            Self::Add | Self::Subtract => 2,
        }
    }

    #[must_use]
    pub fn associativity(self) -> Associativity {
        match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide => Associativity::Left,
        }
    }

    /// Display name used in timing lines and metrics reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        operation_name(self.symbol())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Display name for an operator symbol, `"Operation"` for anything unknown.
#[must_use]
pub fn operation_name(symbol: char) -> &'static str {
    match symbol {
        '+' => "Sum",
        '-' => "Subtraction",
        '*' => "Multiplication",
        '/' => "Division",
        _ => "Operation",
    }
}

/// Shortest decimal text that reads back as `value`.
///
/// Magnitudes in `[1e-6, 1e21)` are written positionally, everything else in
/// exponent form with an explicit sign (`1e+21`, `1.5e-7`). Negative zero is
/// written as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if (1e-6..1e21).contains(&value.abs()) {
        return value.to_string();
    }

    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

/// Outcome of a single remote operation call.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    pub operator: Operator,
    /// Left operand
    pub a: f64,
    /// Right operand
    pub b: f64,
    pub result: f64,
    /// Wall-clock time of the remote round-trip, in milliseconds
    pub duration_ms: f64,
}

impl OperationResult {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.operator.name()
    }
}

/// Renders the timing line, e.g. `Sum: 3 + 8 = 11 (1.234 ms)`.
impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} {} = {} ({:.3} ms)",
            self.name(),
            format_number(self.a),
            self.operator,
            format_number(self.b),
            format_number(self.result),
            self.duration_ms
        )
    }
}

/// Result of evaluating a whole expression.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub result: f64,
    /// Operations in evaluation (postfix) order
    pub operations: Vec<OperationResult>,
    /// Sum of all operation durations, in milliseconds
    pub total_duration_ms: f64,
}

impl EvaluationResult {
    /// Build a result, deriving the total duration from `operations`.
    #[must_use]
    pub fn new(result: f64, operations: Vec<OperationResult>) -> Self {
        let total_duration_ms = operations.iter().map(|op| op.duration_ms).sum();
        Self {
            result,
            operations,
            total_duration_ms,
        }
    }
}
