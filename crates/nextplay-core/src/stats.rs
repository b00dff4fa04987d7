// Derived-stat calculator: display-precision box score from raw projections.
//
// The model returns fractional counts. Once made and attempted are rounded
// independently for display, the server's own percentage no longer agrees with
// the pair shown beside it, so shooting percentages are recomputed here from
// the rounded counts.

use crate::model::StatBlock;

/// Round a raw count to the whole number shown on screen.
///
/// Halves round away from zero. Negative and non-finite inputs clamp to 0.
pub fn round_count(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let rounded = raw.round();
    if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Success rate for a shot category: `made / attempted`, or 0 with no attempts.
pub fn rate(made: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        0.0
    } else {
        made as f64 / attempted as f64
    }
}

/// A `[0, 1]` fraction as a whole-number percentage.
pub fn percent(fraction: f64) -> u32 {
    round_count(fraction * 100.0)
}

/// Made/attempted pair with its consistent rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotLine {
    pub made: u32,
    pub attempted: u32,
    pub rate: f64,
}

impl ShotLine {
    pub fn from_raw(made: f64, attempted: f64) -> Self {
        let made = round_count(made);
        let attempted = round_count(attempted);
        ShotLine {
            made,
            attempted,
            rate: rate(made, attempted),
        }
    }

    pub fn percent(&self) -> u32 {
        percent(self.rate)
    }
}

/// The projected box score exactly as it is displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBox {
    /// Minutes keep one decimal; everything else is a whole count.
    pub minutes: f64,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub blocks: u32,
    pub steals: u32,
    /// Server-supplied field goal fraction rescaled to a percentage. No
    /// made/attempted pair is shown for it, so there is nothing to reconcile.
    pub field_goal_percent: u32,
    pub threes: ShotLine,
    pub free_throws: ShotLine,
    pub fouls: u32,
    pub turnovers: u32,
}

impl DisplayBox {
    pub fn from_stats(stats: &StatBlock) -> Self {
        DisplayBox {
            minutes: (stats.minutes.max(0.0) * 10.0).round() / 10.0,
            points: round_count(stats.points),
            rebounds: round_count(stats.rebounds),
            assists: round_count(stats.assists),
            blocks: round_count(stats.blocks),
            steals: round_count(stats.steals),
            field_goal_percent: percent(stats.field_goal_percent),
            threes: ShotLine::from_raw(stats.three_made, stats.three_attempted),
            free_throws: ShotLine::from_raw(stats.free_throw_made, stats.free_throw_attempted),
            fouls: round_count(stats.fouls_committed),
            turnovers: round_count(stats.turnovers),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> StatBlock {
        StatBlock {
            minutes: 31.46,
            points: 22.6,
            rebounds: 6.2,
            assists: 5.5,
            blocks: 0.4,
            steals: 1.2,
            field_goal_percent: 0.474,
            three_attempted: 6.8,
            three_made: 2.6,
            three_percent: Some(0.38),
            free_throw_attempted: 0.3,
            free_throw_made: 0.2,
            free_throw_percent: Some(0.84),
            fouls_committed: 2.1,
            turnovers: 2.9,
        }
    }

    #[test]
    fn rate_of_three_for_seven() {
        assert!((rate(3, 7) - 0.428_571).abs() < 1e-4);
    }

    #[test]
    fn rate_with_no_attempts_is_zero() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(4, 0), 0.0);
    }

    #[test]
    fn round_count_clamps_and_rounds_half_up() {
        assert_eq!(round_count(2.5), 3);
        assert_eq!(round_count(2.49), 2);
        assert_eq!(round_count(-0.7), 0);
        assert_eq!(round_count(f64::NAN), 0);
    }

    #[test]
    fn three_point_percent_uses_rounded_counts() {
        let display = DisplayBox::from_stats(&block());
        assert_eq!(display.threes.made, 3);
        assert_eq!(display.threes.attempted, 7);
        assert_eq!(display.threes.percent(), 43);
    }

    #[test]
    fn free_throws_rounding_to_zero_attempts_give_zero_percent() {
        let display = DisplayBox::from_stats(&block());
        assert_eq!(display.free_throws.attempted, 0);
        assert_eq!(display.free_throws.percent(), 0);
    }

    #[test]
    fn counts_and_minutes_are_display_precision() {
        let display = DisplayBox::from_stats(&block());
        assert_eq!(display.points, 23);
        assert_eq!(display.rebounds, 6);
        assert_eq!(display.assists, 6);
        assert_eq!(display.blocks, 0);
        assert_eq!(display.field_goal_percent, 47);
        assert!((display.minutes - 31.5).abs() < 1e-9);
    }
}
