//! Built-in algorithms
//!
//! Each algorithm is a small [`Recursion`] descriptor plus a source listing
//! whose line indices the descriptor highlights. [`Algorithm`] names the
//! choice in the UI; [`Invocation`] is a fully resolved call (input parsed
//! and clamped) that [`Invocation::run`] feeds to the shared skeleton.
//!
//! Adding an algorithm means a new descriptor, a listing, and one variant in
//! each enum. The skeleton and the controller stay untouched.

use crate::engine::recorder::Recorder;
use crate::memory::MEMORY_CAPACITY;
use crate::engine::runner::{self, BaseCase, Combination, Recursion, SourceLines};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const FACTORIAL_MAX_N: u64 = 12;
pub const FIBONACCI_MAX_N: u64 = 7;
pub const POWER_MAX_N: u64 = 8;

pub const FACTORIAL_DEFAULT_N: u64 = 5;
pub const FIBONACCI_DEFAULT_N: u64 = 4;
pub const POWER_DEFAULT_N: u64 = 5;
pub const PALINDROME_DEFAULT_TEXT: &str = "racecar";

/// Longest palindrome input, in chars. Each call strips two chars, so this
/// keeps the deepest call within the memory slots.
pub const PALINDROME_MAX_LEN: usize = 2 * MEMORY_CAPACITY - 1;

/// The fixed base of the power algorithm
pub const POWER_BASE: u64 = 2;

pub const FACTORIAL_SOURCE: &str = "int factorial(int n) {
    // base case
    if (n <= 1) return 1;

    // recursive step:
    // n! = n * (n - 1)!
    int prev = factorial(n - 1);
    return n * prev;
}";

pub const FIBONACCI_SOURCE: &str = "int fibonacci(int n) {
    // base cases: fib(0) = 0, fib(1) = 1
    if (n <= 1) return n;

    // two recursive branches,
    // fib(n) = fib(n - 1) + fib(n - 2),
    // the left one runs first
    int left = fibonacci(n - 1);
    int right = fibonacci(n - 2);

    return left + right;
}";

pub const POWER_SOURCE: &str = "int power(int x, int n) {
    // base case
    if (n == 0) return 1;

    // recursive step:
    // x^n = x * x^(n - 1)
    int prev = power(x, n - 1);
    return x * prev;
}";

pub const PALINDROME_SOURCE: &str = "bool isPalindrome(string s) {
    // base case
    if (s.length() <= 1) return true;

    // compare first and last characters
    if (s[0] != s[s.length() - 1]) return false;

    // recurse on the inner substring
    string inner = s.substr(1, s.length() - 2);
    return isPalindrome(inner);
}";

const BASE_CASE_NOTE: &str = "Base Case";
const MISMATCH_NOTE: &str = "Mismatch";

/// The algorithm selected in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Algorithm {
    #[default]
    Factorial,
    Fibonacci,
    Power,
    Palindrome,
}

/// Which input field an algorithm reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Number,
    Text,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Factorial,
        Algorithm::Fibonacci,
        Algorithm::Power,
        Algorithm::Palindrome,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Factorial => "Factorial",
            Algorithm::Fibonacci => "Fibonacci",
            Algorithm::Power => "Power",
            Algorithm::Palindrome => "Palindrome",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Algorithm::Factorial => FACTORIAL_SOURCE,
            Algorithm::Fibonacci => FIBONACCI_SOURCE,
            Algorithm::Power => POWER_SOURCE,
            Algorithm::Palindrome => PALINDROME_SOURCE,
        }
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            Algorithm::Palindrome => InputKind::Text,
            _ => InputKind::Number,
        }
    }

    /// Following algorithm in selection order, wrapping around
    pub fn next(self) -> Self {
        let idx = Algorithm::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Algorithm::ALL[(idx + 1) % Algorithm::ALL.len()]
    }

    /// Resolve raw UI input into a call. Never fails: numbers are read from
    /// their leading integer, malformed ones fall back to the default, and
    /// out-of-range values are clamped. Text is cut to [`PALINDROME_MAX_LEN`].
    pub fn invocation(self, number: &str, text: &str) -> Invocation {
        match self {
            Algorithm::Factorial => Invocation::Factorial(parse_clamped(
                number,
                FACTORIAL_DEFAULT_N,
                FACTORIAL_MAX_N,
            )),
            Algorithm::Fibonacci => Invocation::Fibonacci(parse_clamped(
                number,
                FIBONACCI_DEFAULT_N,
                FIBONACCI_MAX_N,
            )),
            Algorithm::Power => {
                Invocation::Power(parse_clamped(number, POWER_DEFAULT_N, POWER_MAX_N))
            }
            Algorithm::Palindrome => {
                let text = if text.is_empty() {
                    PALINDROME_DEFAULT_TEXT
                } else {
                    text
                };
                Invocation::Palindrome(clamp_text(text))
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm `{0}` (expected factorial, fibonacci, power, or palindrome)")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "factorial" | "fact" => Ok(Algorithm::Factorial),
            "fibonacci" | "fib" => Ok(Algorithm::Fibonacci),
            "power" | "pow" => Ok(Algorithm::Power),
            "palindrome" | "pal" => Ok(Algorithm::Palindrome),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Read the leading integer of `input` (`"3abc"` is 3, `"4.5"` is 4) and
/// clamp it to `0..=max`. No leading digits means `default`.
pub fn parse_clamped(input: &str, default: u64, max: u64) -> u64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return default;
    }
    if negative {
        return 0;
    }
    // Too many digits for u64 is still "too large"
    rest[..digits].parse::<u64>().map_or(max, |value| value.min(max))
}

/// First [`PALINDROME_MAX_LEN`] chars of `text`
pub fn clamp_text(text: &str) -> String {
    text.chars().take(PALINDROME_MAX_LEN).collect()
}

/// A resolved call of one algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Factorial(u64),
    Fibonacci(u64),
    /// Exponent; the base is always [`POWER_BASE`]
    Power(u64),
    Palindrome(String),
}

impl Invocation {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Invocation::Factorial(_) => Algorithm::Factorial,
            Invocation::Fibonacci(_) => Algorithm::Fibonacci,
            Invocation::Power(_) => Algorithm::Power,
            Invocation::Palindrome(_) => Algorithm::Palindrome,
        }
    }

    /// The same call with every input inside its algorithm's limits
    pub fn clamped(self) -> Invocation {
        match self {
            Invocation::Factorial(n) => Invocation::Factorial(n.min(FACTORIAL_MAX_N)),
            Invocation::Fibonacci(n) => Invocation::Fibonacci(n.min(FIBONACCI_MAX_N)),
            Invocation::Power(n) => Invocation::Power(n.min(POWER_MAX_N)),
            Invocation::Palindrome(s) if s.chars().count() > PALINDROME_MAX_LEN => {
                Invocation::Palindrome(clamp_text(&s))
            }
            other => other,
        }
    }

    /// Run through the shared skeleton and render the root result
    pub fn run(&self, rec: &mut Recorder<'_>) -> String {
        match self {
            Invocation::Factorial(n) => runner::execute(&Factorial, rec, *n).to_string(),
            Invocation::Fibonacci(n) => runner::execute(&Fibonacci, rec, *n).to_string(),
            Invocation::Power(n) => runner::execute(&Power { base: POWER_BASE }, rec, *n).to_string(),
            Invocation::Palindrome(s) => runner::execute(&Palindrome, rec, s.clone()).to_string(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::Factorial(n) => write!(f, "Factorial({n})"),
            Invocation::Fibonacci(n) => write!(f, "Fibonacci({n})"),
            Invocation::Power(n) => write!(f, "Power({POWER_BASE}, {n})"),
            Invocation::Palindrome(s) => write!(f, "Palindrome({s:?})"),
        }
    }
}

fn n_arg(n: u64) -> Vec<(String, String)> {
    vec![("n".to_string(), n.to_string())]
}

/// `n! = n * (n - 1)!`, `n <= 1 -> 1`
pub struct Factorial;

impl Recursion for Factorial {
    type Arg = u64;
    type Output = u64;

    fn function_name(&self) -> &'static str {
        "factorial"
    }

    fn frame_name(&self) -> &'static str {
        "fact"
    }

    fn lines(&self) -> SourceLines {
        SourceLines {
            entry: 0,
            calls: &[6],
            combine: 7,
        }
    }

    fn stack_args(&self, n: &u64) -> Vec<(String, String)> {
        n_arg(*n)
    }

    fn frame_args(&self, n: &u64) -> String {
        format!("n={n}")
    }

    fn base_case(&self, n: &u64) -> Option<BaseCase<u64>> {
        (*n <= 1).then_some(BaseCase {
            value: 1,
            note: BASE_CASE_NOTE,
            line: 2,
        })
    }

    fn subproblems(&self, n: &u64) -> Vec<u64> {
        vec![n - 1]
    }

    fn combine(&self, n: &u64, results: &[u64]) -> Combination<u64> {
        let prev = results.first().copied().unwrap_or(1);
        Combination {
            value: n * prev,
            note: format!("{n} * {prev}"),
        }
    }
}

/// `fib(n) = fib(n - 1) + fib(n - 2)`, `n <= 1 -> n`
pub struct Fibonacci;

impl Recursion for Fibonacci {
    type Arg = u64;
    type Output = u64;

    fn function_name(&self) -> &'static str {
        "fib"
    }

    fn frame_name(&self) -> &'static str {
        "fib"
    }

    fn lines(&self) -> SourceLines {
        SourceLines {
            entry: 0,
            calls: &[7, 8],
            combine: 10,
        }
    }

    fn stack_args(&self, n: &u64) -> Vec<(String, String)> {
        n_arg(*n)
    }

    fn frame_args(&self, n: &u64) -> String {
        format!("n={n}")
    }

    fn base_case(&self, n: &u64) -> Option<BaseCase<u64>> {
        (*n <= 1).then_some(BaseCase {
            value: *n,
            note: BASE_CASE_NOTE,
            line: 2,
        })
    }

    fn subproblems(&self, n: &u64) -> Vec<u64> {
        vec![n - 1, n - 2]
    }

    fn combine(&self, _n: &u64, results: &[u64]) -> Combination<u64> {
        let left = results.first().copied().unwrap_or(0);
        let right = results.get(1).copied().unwrap_or(0);
        Combination {
            value: left + right,
            note: format!("{left} + {right}"),
        }
    }
}

/// `x^n = x * x^(n - 1)`, `n == 0 -> 1`
pub struct Power {
    pub base: u64,
}

impl Recursion for Power {
    type Arg = u64;
    type Output = u64;

    fn function_name(&self) -> &'static str {
        "pow"
    }

    fn frame_name(&self) -> &'static str {
        "pow"
    }

    fn lines(&self) -> SourceLines {
        SourceLines {
            entry: 0,
            calls: &[6],
            combine: 7,
        }
    }

    fn stack_args(&self, n: &u64) -> Vec<(String, String)> {
        vec![
            ("x".to_string(), self.base.to_string()),
            ("n".to_string(), n.to_string()),
        ]
    }

    fn frame_args(&self, n: &u64) -> String {
        format!("x={},n={n}", self.base)
    }

    fn base_case(&self, n: &u64) -> Option<BaseCase<u64>> {
        (*n == 0).then_some(BaseCase {
            value: 1,
            note: BASE_CASE_NOTE,
            line: 2,
        })
    }

    fn subproblems(&self, n: &u64) -> Vec<u64> {
        vec![n - 1]
    }

    fn combine(&self, _n: &u64, results: &[u64]) -> Combination<u64> {
        let prev = results.first().copied().unwrap_or(1);
        Combination {
            value: self.base * prev,
            note: format!("{} * {prev}", self.base),
        }
    }
}

/// Strips matching outer characters until one or none remain
pub struct Palindrome;

impl Recursion for Palindrome {
    type Arg = String;
    type Output = bool;

    fn function_name(&self) -> &'static str {
        "isPal"
    }

    fn frame_name(&self) -> &'static str {
        "isPal"
    }

    fn lines(&self) -> SourceLines {
        SourceLines {
            entry: 0,
            calls: &[9],
            combine: 9,
        }
    }

    fn stack_args(&self, s: &String) -> Vec<(String, String)> {
        vec![("s".to_string(), format!("{s:?}"))]
    }

    fn frame_args(&self, s: &String) -> String {
        format!("{s:?}")
    }

    fn base_case(&self, s: &String) -> Option<BaseCase<bool>> {
        let mut chars = s.chars();
        match (chars.next(), chars.next_back()) {
            (None, _) | (Some(_), None) => Some(BaseCase {
                value: true,
                note: BASE_CASE_NOTE,
                line: 2,
            }),
            (Some(first), Some(last)) if first != last => Some(BaseCase {
                value: false,
                note: MISMATCH_NOTE,
                line: 5,
            }),
            _ => None,
        }
    }

    fn subproblems(&self, s: &String) -> Vec<String> {
        let mut chars = s.chars();
        chars.next();
        chars.next_back();
        vec![chars.collect()]
    }

    fn pending_note(&self, _s: &String) -> Option<String> {
        Some("Check inner...".to_string())
    }

    fn combine(&self, _s: &String, results: &[bool]) -> Combination<bool> {
        let inner = results.first().copied().unwrap_or(true);
        Combination {
            value: inner,
            note: format!("inner = {inner}"),
        }
    }
}
