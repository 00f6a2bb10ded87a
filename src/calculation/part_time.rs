//! Full-time to part-time duration conversion

/// Convert full-time-equivalent months to part-time months by the ratio of
/// weekly hours, rounded half away from zero
///
/// Without usable part-time hours (zero, negative, NaN, or not below full
/// time) the duration is returned unchanged.
pub fn calculate_part_time_duration(
    full_time_equivalent_months: i32,
    full_time_hours: f64,
    part_time_hours: f64,
) -> i32 {
    if !(part_time_hours > 0.0) || part_time_hours >= full_time_hours {
        return full_time_equivalent_months;
    }

    let months = f64::from(full_time_equivalent_months) * (full_time_hours / part_time_hours);
    months.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_time_doubles() {
        assert_eq!(calculate_part_time_duration(24, 40.0, 20.0), 48);
    }

    #[test]
    fn test_three_quarter_time() {
        // 24 * 40 / 30 = 32
        assert_eq!(calculate_part_time_duration(24, 40.0, 30.0), 32);
        // 36 * 39 / 30 = 46.8
        assert_eq!(calculate_part_time_duration(36, 39.0, 30.0), 47);
    }

    #[test]
    fn test_rounds_half_up() {
        // 40 / 32 = 1.25
        assert_eq!(calculate_part_time_duration(9, 40.0, 32.0), 11);
        assert_eq!(calculate_part_time_duration(3, 40.0, 32.0), 4);
        // 2.5 exactly
        assert_eq!(calculate_part_time_duration(2, 40.0, 32.0), 3);
    }

    #[test]
    fn test_no_part_time_identity() {
        for months in [0, 1, 18, 36, 42] {
            for hours in [35.0, 38.5, 40.0, 48.0] {
                assert_eq!(calculate_part_time_duration(months, hours, 0.0), months);
                assert_eq!(calculate_part_time_duration(months, hours, hours), months);
            }
        }
    }

    #[test]
    fn test_invalid_part_time_hours() {
        assert_eq!(calculate_part_time_duration(24, 40.0, -10.0), 24);
        assert_eq!(calculate_part_time_duration(24, 40.0, 45.0), 24);
        assert_eq!(calculate_part_time_duration(24, 40.0, f64::NAN), 24);
    }

    #[test]
    fn test_zero_months() {
        assert_eq!(calculate_part_time_duration(0, 40.0, 20.0), 0);
    }

    #[test]
    fn test_inverse_conversion_recovers_months() {
        for months in 1..=42 {
            for part_time in [20.0, 24.5, 30.0, 32.0, 37.5] {
                let full_time = 40.0;
                let converted = calculate_part_time_duration(months, full_time, part_time);
                let back = (f64::from(converted) * part_time / full_time).round() as i32;
                assert!(
                    (back - months).abs() <= 1,
                    "{} months at {}h came back as {}",
                    months,
                    part_time,
                    back
                );
            }
        }
    }
}
