//! Answer evaluation.

use thiserror::Error;

use crate::config::ANSWER_TOLERANCE;

use super::problem::Problem;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrillError {
    /// The answer text is not a finite number.
    #[error("not a number: {0:?}")]
    InvalidInput(String),
}

/// Outcome of one submitted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: bool,
    pub revealed_answer: i32,
}

/// Parse `raw` and compare it with the problem's answer.
///
/// Pure: the caller applies the result with [`ProgressState::record`].
///
/// [`ProgressState::record`]: super::state::ProgressState::record
pub fn evaluate(raw: &str, problem: &Problem) -> Result<Evaluation, DrillError> {
    let parsed = parse_answer(raw)?;
    Ok(Evaluation {
        correct: (parsed - problem.answer as f64).abs() < ANSWER_TOLERANCE,
        revealed_answer: problem.answer,
    })
}

/// Read the longest numeric prefix, so `"100-"` and `"12.5.3"` count as
/// 100 and 12.5. Text with no leading digits, or a non-finite value, is
/// rejected.
fn parse_answer(raw: &str) -> Result<f64, DrillError> {
    let trimmed = raw.trim();
    let invalid = || DrillError::InvalidInput(trimmed.to_string());
    let prefix = numeric_prefix(trimmed).ok_or_else(invalid)?;
    match prefix.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid()),
    }
}

/// `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?` with at least one
/// mantissa digit. The exponent is only taken when it has digits.
fn numeric_prefix(s: &str) -> Option<&str> {
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if b.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(b.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(b.get(end + 1), Some(b'+' | b'-')));
        let exp_start = end + 1 + sign;
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    Some(&s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::problem::ProblemKind;
    use proptest::prelude::*;

    fn find_original() -> Problem {
        Problem::new(100, 20, true, ProblemKind::FindOriginal)
    }

    #[test]
    fn exact_answer_is_correct() {
        let e = evaluate("100", &find_original()).unwrap();
        assert!(e.correct);
        assert_eq!(e.revealed_answer, 100);
    }

    #[test]
    fn half_off_is_wrong() {
        let e = evaluate("99.5", &find_original()).unwrap();
        assert!(!e.correct);
        assert_eq!(e.revealed_answer, 100);
    }

    #[test]
    fn within_tolerance_is_correct() {
        assert!(evaluate("100.009", &find_original()).unwrap().correct);
        assert!(evaluate("99.995", &find_original()).unwrap().correct);
        assert!(evaluate(" 100.0 ", &find_original()).unwrap().correct);
    }

    #[test]
    fn tolerance_boundary_is_wrong() {
        // Difference of exactly 0.01 (within f64 precision) is not accepted.
        assert!(!evaluate("100.01", &find_original()).unwrap().correct);
        assert!(!evaluate("99.99", &find_original()).unwrap().correct);
    }

    #[test]
    fn signed_percent_answer() {
        let p = Problem::new(50, 20, false, ProblemKind::FindPercent);
        assert!(evaluate("-20", &p).unwrap().correct);
        assert!(!evaluate("20", &p).unwrap().correct);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let p = find_original();
        let rejected = [
            "", "   ", "abc", "-", ".", "-.", "+", "x100", "NaN", "inf", "-infinity", "1e999",
        ];
        for raw in rejected {
            assert_eq!(
                evaluate(raw, &p),
                Err(DrillError::InvalidInput(raw.trim().to_string())),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn trailing_text_after_a_number_is_ignored() {
        let p = find_original();
        for raw in ["100-", "100-5", "100.0.", "100abc", " 100 x"] {
            let e = evaluate(raw, &p).unwrap();
            assert!(e.correct, "{raw:?}");
        }
        assert!(!evaluate("12.5.3", &p).unwrap().correct);
    }

    #[test]
    fn numeric_prefix_rules() {
        assert_eq!(numeric_prefix("12.5.3"), Some("12.5"));
        assert_eq!(numeric_prefix("100-"), Some("100"));
        assert_eq!(numeric_prefix("-20%"), Some("-20"));
        assert_eq!(numeric_prefix(".5"), Some(".5"));
        assert_eq!(numeric_prefix("5."), Some("5."));
        assert_eq!(numeric_prefix("1e2x"), Some("1e2"));
        assert_eq!(numeric_prefix("1e"), Some("1"));
        assert_eq!(numeric_prefix("1e-"), Some("1"));
        assert_eq!(numeric_prefix("-"), None);
        assert_eq!(numeric_prefix("-.e5"), None);
        assert_eq!(numeric_prefix(""), None);
    }

    proptest! {
        #[test]
        fn correct_iff_within_tolerance(answer in -50i32..200, offset in -1.0f64..1.0) {
            let mut p = find_original();
            p.answer = answer;
            let submitted = answer as f64 + offset;
            let e = evaluate(&submitted.to_string(), &p).unwrap();
            let expected = (submitted - answer as f64).abs() < ANSWER_TOLERANCE;
            prop_assert_eq!(e.correct, expected);
        }
    }
}
