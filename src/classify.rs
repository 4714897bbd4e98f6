// src/classify.rs
use serde::Serialize;

/// Visual bucket for an inspection score. Exhaustive over all inputs:
/// `>= 90` good, `[70, 90)` passing, everything else failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreCategory {
    Good,
    Passing,
    Failing,
}

impl ScoreCategory {
    /// Missing and NaN scores land in `Failing`.
    pub fn classify(score: Option<f64>) -> Self {
        match score {
            Some(s) if s >= 90.0 => ScoreCategory::Good,
            Some(s) if (70.0..90.0).contains(&s) => ScoreCategory::Passing,
            _ => ScoreCategory::Failing,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategory::Good => "good",
            ScoreCategory::Passing => "passing",
            ScoreCategory::Failing => "failing",
        }
    }

    /// Color as handed to the renderer.
    pub fn color(&self) -> &'static str {
        match self {
            ScoreCategory::Good => "#8FBC8F",
            ScoreCategory::Passing => "#FEFE22",
            ScoreCategory::Failing => "red",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            ScoreCategory::Good => [0x8F, 0xBC, 0x8F],
            ScoreCategory::Passing => [0xFE, 0xFE, 0x22],
            ScoreCategory::Failing => [0xFF, 0x00, 0x00],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScoreCategory::*;

    #[test]
    fn boundaries() {
        assert_eq!(ScoreCategory::classify(Some(100.0)), Good);
        assert_eq!(ScoreCategory::classify(Some(90.0)), Good);
        assert_eq!(ScoreCategory::classify(Some(89.999)), Passing);
        assert_eq!(ScoreCategory::classify(Some(70.0)), Passing);
        assert_eq!(ScoreCategory::classify(Some(69.999)), Failing);
        assert_eq!(ScoreCategory::classify(Some(0.0)), Failing);
    }

    #[test]
    fn missing_and_nan_fail() {
        assert_eq!(ScoreCategory::classify(None), Failing);
        assert_eq!(ScoreCategory::classify(Some(f64::NAN)), Failing);
    }

    #[test]
    fn out_of_range_scores_are_not_rejected() {
        assert_eq!(ScoreCategory::classify(Some(140.0)), Good);
        assert_eq!(ScoreCategory::classify(Some(-5.0)), Failing);
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        for tenth in -100..=1100 {
            let s = f64::from(tenth) / 10.0;
            let in_good = s >= 90.0;
            let in_passing = (70.0..90.0).contains(&s);
            let in_failing = s < 70.0;
            assert_eq!([in_good, in_passing, in_failing].iter().filter(|b| **b).count(), 1);

            let expected = if in_good { Good } else if in_passing { Passing } else { Failing };
            assert_eq!(ScoreCategory::classify(Some(s)), expected, "score {s}");
        }
    }

    #[test]
    fn colors() {
        assert_eq!(Good.color(), "#8FBC8F");
        assert_eq!(Passing.color(), "#FEFE22");
        assert_eq!(Failing.color(), "red");
        assert_eq!(Good.label(), "good");
    }
}
